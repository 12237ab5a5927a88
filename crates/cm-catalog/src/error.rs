//! Error types for the cm-catalog crate.

use cm_core::FrameworkId;

/// Errors that can occur while loading the built-in catalog.
///
/// The catalog is compiled into the binary, so these only surface if the
/// embedded data is edited into an inconsistent state.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Embedded data for a framework is not valid catalog JSON.
    #[error("failed to parse built-in catalog for {framework}: {source}")]
    Parse {
        /// The framework whose data failed.
        framework: FrameworkId,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Embedded data declares a different framework than the slot it fills.
    #[error("built-in catalog for {expected} is labelled \"{found}\"")]
    Mislabelled {
        /// The framework the data was loaded for.
        expected: FrameworkId,
        /// The `config.name` found in the data.
        found: String,
    },
}

impl CatalogError {
    /// Creates a new [`CatalogError::Parse`] error.
    #[inline]
    pub const fn parse(framework: FrameworkId, source: serde_json::Error) -> Self {
        Self::Parse { framework, source }
    }

    /// Creates a new [`CatalogError::Mislabelled`] error.
    #[inline]
    pub fn mislabelled(expected: FrameworkId, found: impl Into<String>) -> Self {
        Self::Mislabelled {
            expected,
            found: found.into(),
        }
    }
}
