//! Domain types for classmcp.
//!
//! # Module Organization
//!
//! - [`category`] - Known pattern categories
//! - [`framework`] - Framework identifiers and static configuration
//! - [`pattern`] - Component patterns and SSR notes
//! - [`state`] - State-variant decomposition
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use cm_core::{ComponentPattern, FrameworkId, PatternClasses, StateKind};
//! ```

pub mod category;
pub mod framework;
pub mod pattern;
pub mod state;

pub use category::{CATEGORIES, Category, category, category_display_name};
pub use framework::{
    Breakpoints, ClassSyntax, FrameworkConfig, FrameworkId, ParseFrameworkError, StatePrefix,
};
pub use pattern::{ComponentPattern, PatternClasses, SsrInfo};
pub use state::{ParseStateError, StateKind, StateVariant};
