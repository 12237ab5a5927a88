//! Core types, errors, and utilities for classmcp.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Domain types ([`ComponentPattern`], [`FrameworkId`], [`StateVariant`])
//! - User configuration structures ([`UserConfig`], [`CustomPatternInput`])
//! - Error types for configuration loading ([`ConfigError`])
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std for string keys)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{CustomPatternInput, UserConfig, ValidationIssue};
pub use error::ConfigError;
pub use types::*;

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
///
/// Used for internal indexes keyed by class and pattern names; these never
/// hold attacker-chosen keys at a volume where DoS resistance matters.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;
