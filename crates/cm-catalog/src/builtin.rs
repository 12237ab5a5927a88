//! The built-in pattern catalog.
//!
//! Each framework's configuration and patterns live in `data/<id>.json` and
//! are compiled into the binary. [`Catalog::builtin`] parses all four once;
//! the registry then borrows from the parsed catalog.

use cm_core::{ComponentPattern, FrameworkConfig, FrameworkId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;

const TAILWIND: &str = include_str!("../data/tailwind.json");
const BOOTSTRAP: &str = include_str!("../data/bootstrap.json");
const UNOCSS: &str = include_str!("../data/unocss.json");
const TACHYONS: &str = include_str!("../data/tachyons.json");

/// One framework's configuration and its built-in patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkModule {
    /// Static framework configuration.
    pub config: FrameworkConfig,
    /// Patterns in catalog order.
    pub patterns: Vec<ComponentPattern>,
}

/// Built-in patterns for every supported framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    modules: [FrameworkModule; 4],
}

impl Catalog {
    /// Parses the embedded catalog data.
    ///
    /// # Examples
    ///
    /// ```
    /// use cm_catalog::Catalog;
    /// use cm_core::FrameworkId;
    ///
    /// let catalog = Catalog::builtin()?;
    /// assert_eq!(catalog.config(FrameworkId::Tailwind).display_name, "Tailwind CSS");
    /// # Ok::<(), cm_catalog::CatalogError>(())
    /// ```
    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = Self {
            modules: [
                parse_module(FrameworkId::Tailwind, TAILWIND)?,
                parse_module(FrameworkId::Bootstrap, BOOTSTRAP)?,
                parse_module(FrameworkId::Unocss, UNOCSS)?,
                parse_module(FrameworkId::Tachyons, TACHYONS)?,
            ],
        };
        debug!(
            patterns = catalog.modules.iter().map(|m| m.patterns.len()).sum::<usize>(),
            "parsed built-in catalog"
        );
        Ok(catalog)
    }

    /// Returns the module for `framework`.
    #[must_use]
    pub const fn module(&self, framework: FrameworkId) -> &FrameworkModule {
        &self.modules[slot(framework)]
    }

    /// Returns the configuration for `framework`.
    #[must_use]
    pub const fn config(&self, framework: FrameworkId) -> &FrameworkConfig {
        &self.module(framework).config
    }

    /// Returns the built-in patterns for `framework`, in catalog order.
    #[must_use]
    pub fn patterns(&self, framework: FrameworkId) -> &[ComponentPattern] {
        &self.module(framework).patterns
    }

    /// Iterates over `(id, module)` in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameworkId, &FrameworkModule)> {
        FrameworkId::ALL.into_iter().zip(self.modules.iter())
    }
}

const fn slot(framework: FrameworkId) -> usize {
    match framework {
        FrameworkId::Tailwind => 0,
        FrameworkId::Bootstrap => 1,
        FrameworkId::Unocss => 2,
        FrameworkId::Tachyons => 3,
    }
}

fn parse_module(framework: FrameworkId, source: &str) -> Result<FrameworkModule, CatalogError> {
    let module: FrameworkModule =
        serde_json::from_str(source).map_err(|e| CatalogError::parse(framework, e))?;
    if module.config.name != framework.as_str() {
        return Err(CatalogError::mislabelled(framework, module.config.name));
    }
    Ok(module)
}
