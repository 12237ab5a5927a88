//! Error types for the cm-core crate.
//!
//! This module provides the [`ConfigError`] type for failures while reading
//! a user configuration file. Loaders treat these as "no usable config" and
//! fall back to defaults; the CLI's `check-config` command surfaces them.

use camino::Utf8PathBuf;

use crate::config::ValidationIssue;

/// Errors that can occur while loading a user configuration.
///
/// # Examples
///
/// ```
/// use cm_core::{ConfigError, ValidationIssue};
///
/// let error = ConfigError::invalid(
///     "/project/.classmcp.json",
///     vec![ValidationIssue::new("defaultFramework", "invalid framework")],
/// );
/// assert!(error.to_string().contains(".classmcp.json"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// The file that failed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("failed to parse configuration {path}: {source}")]
    Parse {
        /// The file that failed.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The configuration parsed but failed validation.
    #[error("invalid configuration {source_label} ({} issue(s))", .issues.len())]
    Invalid {
        /// Where the configuration came from (a path, optionally with `#field`).
        source_label: String,
        /// Every validation failure found.
        issues: Vec<ValidationIssue>,
    },
}

impl ConfigError {
    /// Creates a new [`ConfigError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ConfigError::Parse`] error.
    #[inline]
    pub fn parse(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ConfigError::Invalid`] error.
    #[inline]
    pub fn invalid(source_label: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self::Invalid {
            source_label: source_label.into(),
            issues,
        }
    }

    /// Returns `true` if the file simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_display() {
        let error = ConfigError::read(
            "/project/.classmcp.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = error.to_string();
        assert!(msg.contains("/project/.classmcp.json"));
        assert!(msg.contains("denied"));
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_not_found() {
        let error = ConfigError::read("missing.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_parse_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ConfigError::parse("bad.json", source);
        assert!(error.to_string().starts_with("failed to parse configuration bad.json"));
    }

    #[test]
    fn test_invalid_display() {
        let error = ConfigError::invalid(
            "package.json#classmcp",
            vec![
                ValidationIssue::new("overrideBuiltins", "overrideBuiltins must be a boolean"),
                ValidationIssue::new("customPatterns", "customPatterns must be an array"),
            ],
        );
        assert_eq!(
            error.to_string(),
            "invalid configuration package.json#classmcp (2 issue(s))"
        );
    }
}
