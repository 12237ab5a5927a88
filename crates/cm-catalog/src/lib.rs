//! Built-in pattern catalog and framework registry for classmcp.
//!
//! # Overview
//!
//! - [`Catalog`]: the embedded per-framework configuration and patterns
//! - [`PatternRegistry`]: lookups, search, statistics and CSS generation over
//!   the catalog plus a [`CustomOverlay`] of user patterns
//! - [`transform_pattern`]: expands a `CustomPatternInput` from the project
//!   config into a full pattern
//! - [`resolve_classes`]: flattens state variants into one class string
//!
//! # Example
//!
//! ```
//! use cm_catalog::{PatternRegistry, ResolveOptions, resolve_classes};
//! use cm_core::FrameworkId;
//!
//! let registry = PatternRegistry::builtin()?;
//! let card = registry.pattern(FrameworkId::Unocss, "card").expect("built-in");
//! let classes = resolve_classes(card, &ResolveOptions::with_all_states());
//! assert!(classes.ends_with("hover:shadow-lg"));
//! # Ok::<(), cm_catalog::CatalogError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod builtin;
mod css;
mod custom;
mod error;
mod registry;
mod resolve;

pub use builtin::{Catalog, FrameworkModule};
pub use css::CssOptions;
pub use custom::{
    CUSTOM_CATEGORY, CustomPattern, filter_for_framework, humanize_id, transform_pattern,
    transform_patterns, transform_patterns_with_meta,
};
pub use error::CatalogError;
pub use registry::{
    CustomOverlay, FrameworkStats, FrameworkSummary, PatternRegistry, group_by_category,
};
pub use resolve::{ResolveOptions, resolve_classes};
