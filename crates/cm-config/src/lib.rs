//! Project configuration for classmcp.
//!
//! [`load_config`] finds and validates a project's `.classmcp.json` (or one
//! of its alternatives), [`reload_config`] re-reads it after edits. Both
//! always produce a usable [`UserConfig`](cm_core::UserConfig): problems are
//! reported on the returned [`LoadedConfig`], never by failing.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use cm_config::load_config;
//!
//! # async fn run() {
//! let loaded = load_config(Utf8Path::new(".")).await;
//! if let Some(error) = loaded.validation_error() {
//!     eprintln!("{error}");
//! }
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod loader;
mod schema;

pub use loader::{
    CONFIG_FILE_NAMES, ConfigSource, LoadedConfig, PACKAGE_JSON_FIELD, load_config, reload_config,
};
pub use schema::{ConfigParse, ValidationReport, parse_user_config, validate_user_config};
