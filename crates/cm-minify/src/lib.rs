//! Deterministic class-name minification for classmcp.
//!
//! Semantic class names such as `btn-primary` are mapped to the shortest
//! unused names in the sequence `a, b, …, Z, aa, ab, …`. A map can be
//! exported, imported, rendered as CSS, and summarised as [`Savings`].
//!
//! ```
//! use cm_core::FrameworkId;
//! use cm_minify::{MinificationMap, RenderOptions, render_css};
//!
//! let mut map = MinificationMap::new();
//! map.minify("btn-primary", "inline-flex px-4 py-2 bg-blue-600 text-white");
//! map.minify("card", "rounded-lg shadow-md p-6");
//!
//! let css = render_css(&map, RenderOptions::new(FrameworkId::Tailwind).with_comments(false));
//! assert!(css.starts_with(".a { @apply inline-flex"));
//! assert!(map.savings().savings_percent > 80.0);
//! ```
//!
//! Nothing here fails: lookups return `Option`, and malformed imports are
//! repaired or reported rather than rejected.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod digest;
pub mod map;
pub mod name;
pub mod persist;
pub mod render;
pub mod savings;

pub use digest::hash_classes;
pub use map::{MinificationMap, MinifiedClassEntry};
pub use name::{ALPHABET, decode_name, generate_name, is_valid_name};
pub use persist::{ExportedMap, ImportIssue};
pub use render::{RenderOptions, comment_safe, render_css};
pub use savings::Savings;
