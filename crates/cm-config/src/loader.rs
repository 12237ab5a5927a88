//! Configuration discovery and reload.
//!
//! A project directory is searched in this order, and the first candidate
//! that can be read and parsed as JSON wins:
//!
//! 1. `.classmcp.json`
//! 2. `classmcp.config.json`
//! 3. the `classmcp` object in `package.json`
//!
//! A winning document that fails validation still counts as found; the
//! effective configuration falls back to [`UserConfig::default`] and the
//! errors are kept on the [`LoadedConfig`].

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use cm_core::{ConfigError, UserConfig, ValidationIssue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::schema::{ConfigParse, parse_user_config};

/// Dedicated config file names, in priority order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".classmcp.json", "classmcp.config.json"];

/// Field of `package.json` that may hold the configuration.
pub const PACKAGE_JSON_FIELD: &str = "classmcp";

const PACKAGE_JSON: &str = "package.json";

/// Where a configuration was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "camelCase")]
pub enum ConfigSource {
    /// A dedicated config file.
    File(Utf8PathBuf),
    /// The `classmcp` field of a `package.json`.
    PackageJson(Utf8PathBuf),
}

impl ConfigSource {
    /// The file on disk.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::File(path) | Self::PackageJson(path) => path,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{path}"),
            Self::PackageJson(path) => write!(f, "{path}#{PACKAGE_JSON_FIELD}"),
        }
    }
}

/// Result of loading (or reloading) the project configuration.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Configuration to apply. Defaults unless a valid document was found.
    pub config: UserConfig,
    /// Where the document came from; `None` if nothing was found.
    pub source: Option<ConfigSource>,
    /// Validation failures of the found document.
    pub errors: Vec<ValidationIssue>,
    /// Non-fatal findings in the found document.
    pub warnings: Vec<String>,
    /// Candidates that exist but could not be read or parsed.
    pub skipped: Vec<ConfigError>,
}

impl LoadedConfig {
    fn not_found(skipped: Vec<ConfigError>) -> Self {
        Self {
            config: UserConfig::default(),
            source: None,
            errors: Vec::new(),
            warnings: Vec::new(),
            skipped,
        }
    }

    fn from_parse(source: ConfigSource, parse: ConfigParse, skipped: Vec<ConfigError>) -> Self {
        match parse {
            ConfigParse::Valid { config, warnings } => {
                for warning in &warnings {
                    warn!(source = %source, "{warning}");
                }
                Self {
                    config,
                    source: Some(source),
                    errors: Vec::new(),
                    warnings,
                    skipped,
                }
            }
            ConfigParse::Invalid { errors, warnings } => {
                warn!(source = %source, errors = errors.len(), "invalid config, using defaults");
                for error in &errors {
                    warn!(source = %source, "  {error}");
                }
                Self {
                    config: UserConfig::default(),
                    source: Some(source),
                    errors,
                    warnings,
                    skipped,
                }
            }
        }
    }

    /// Returns `true` if a config document was found.
    #[must_use]
    pub const fn found(&self) -> bool {
        self.source.is_some()
    }

    /// Returns `true` unless a found document failed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The validation failures as a single error, if there were any.
    #[must_use]
    pub fn validation_error(&self) -> Option<ConfigError> {
        match &self.source {
            Some(source) if !self.errors.is_empty() => {
                Some(ConfigError::invalid(source.to_string(), self.errors.clone()))
            }
            _ => None,
        }
    }
}

/// Discovers and loads the configuration of `project_dir`.
pub async fn load_config(project_dir: &Utf8Path) -> LoadedConfig {
    let mut skipped = Vec::new();

    for name in CONFIG_FILE_NAMES {
        let path = project_dir.join(name);
        match read_json(&path).await {
            Ok(value) if is_truthy(&value) => {
                info!(path = %path, "loading config");
                return LoadedConfig::from_parse(
                    ConfigSource::File(path),
                    parse_user_config(value),
                    skipped,
                );
            }
            Ok(_) => debug!(path = %path, "config file is empty, skipping"),
            Err(e) => note_skipped(e, &mut skipped),
        }
    }

    let package_json = project_dir.join(PACKAGE_JSON);
    match read_package_field(&package_json).await {
        Ok(Some(value)) => {
            let source = ConfigSource::PackageJson(package_json);
            info!(source = %source, "loading config");
            LoadedConfig::from_parse(source, parse_user_config(value), skipped)
        }
        Ok(None) => {
            debug!(dir = %project_dir, "no config found, using defaults");
            LoadedConfig::not_found(skipped)
        }
        Err(e) => {
            note_skipped(e, &mut skipped);
            LoadedConfig::not_found(skipped)
        }
    }
}

/// Re-reads the configuration from `previous`, or runs discovery again if
/// nothing was loaded before.
///
/// A source that can no longer be read yields "not found" rather than
/// falling back to discovery.
pub async fn reload_config(
    previous: Option<&ConfigSource>,
    project_dir: &Utf8Path,
) -> LoadedConfig {
    let Some(previous) = previous else {
        return load_config(project_dir).await;
    };

    match previous {
        ConfigSource::File(path) => match read_json(path).await {
            Ok(value) => LoadedConfig::from_parse(previous.clone(), parse_user_config(value), Vec::new()),
            Err(e) => {
                warn!(path = %path, error = %e, "could not reload config");
                LoadedConfig::not_found(vec![e])
            }
        },
        ConfigSource::PackageJson(path) => match read_package_field(path).await {
            Ok(Some(value)) => {
                LoadedConfig::from_parse(previous.clone(), parse_user_config(value), Vec::new())
            }
            Ok(None) => LoadedConfig::not_found(Vec::new()),
            Err(e) => {
                warn!(path = %path, error = %e, "could not reload config");
                LoadedConfig::not_found(vec![e])
            }
        },
    }
}

async fn read_json(path: &Utf8Path) -> Result<Value, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::read(path, e))?;
    serde_json::from_str(&text).map_err(|e| ConfigError::parse(path, e))
}

/// Returns the `classmcp` object of a `package.json`, if it has one.
async fn read_package_field(path: &Utf8Path) -> Result<Option<Value>, ConfigError> {
    let mut package = read_json(path).await?;
    Ok(package
        .get_mut(PACKAGE_JSON_FIELD)
        .map(Value::take)
        .filter(Value::is_object))
}

fn note_skipped(error: ConfigError, skipped: &mut Vec<ConfigError>) {
    if !error.is_not_found() {
        warn!(error = %error, "skipping config candidate");
        skipped.push(error);
    }
}

/// `null`, `false`, `0` and `""` do not count as a config document.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::FrameworkId;
    use std::fs;

    fn project() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[tokio::test]
    async fn test_no_config() {
        let (_dir, root) = project();
        let loaded = load_config(&root).await;

        assert!(!loaded.found());
        assert!(loaded.is_valid());
        assert_eq!(loaded.config, UserConfig::default());
        assert!(loaded.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_dotfile_wins() {
        let (_dir, root) = project();
        fs::write(root.join(".classmcp.json"), r#"{"defaultFramework":"bootstrap"}"#).unwrap();
        fs::write(root.join("classmcp.config.json"), r#"{"defaultFramework":"unocss"}"#).unwrap();

        let loaded = load_config(&root).await;
        assert_eq!(loaded.source, Some(ConfigSource::File(root.join(".classmcp.json"))));
        assert_eq!(loaded.config.default_framework, Some(FrameworkId::Bootstrap));
    }

    #[tokio::test]
    async fn test_unparseable_file_falls_through() {
        let (_dir, root) = project();
        fs::write(root.join(".classmcp.json"), "{ not json").unwrap();
        fs::write(root.join("classmcp.config.json"), r#"{"overrideBuiltins":true}"#).unwrap();

        let loaded = load_config(&root).await;
        assert_eq!(
            loaded.source,
            Some(ConfigSource::File(root.join("classmcp.config.json")))
        );
        assert!(loaded.config.override_builtins);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(matches!(loaded.skipped[0], ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_null_document_is_skipped() {
        let (_dir, root) = project();
        fs::write(root.join(".classmcp.json"), "null").unwrap();
        let loaded = load_config(&root).await;
        assert!(!loaded.found());
    }

    #[tokio::test]
    async fn test_package_json_field() {
        let (_dir, root) = project();
        fs::write(
            root.join("package.json"),
            r#"{"name":"app","classmcp":{"customPatterns":[{"id":"brand","classes":"p-4"}]}}"#,
        )
        .unwrap();

        let loaded = load_config(&root).await;
        let source = loaded.source.clone().unwrap();
        assert_eq!(source.to_string(), format!("{}#classmcp", root.join("package.json")));
        assert_eq!(loaded.config.custom_patterns.len(), 1);
    }

    #[tokio::test]
    async fn test_package_json_without_field() {
        let (_dir, root) = project();
        fs::write(root.join("package.json"), r#"{"name":"app"}"#).unwrap();
        assert!(!load_config(&root).await.found());
    }

    #[tokio::test]
    async fn test_invalid_config_uses_defaults() {
        let (_dir, root) = project();
        fs::write(root.join(".classmcp.json"), r#"{"defaultFramework":"bulma"}"#).unwrap();

        let loaded = load_config(&root).await;
        assert!(loaded.found());
        assert!(!loaded.is_valid());
        assert_eq!(loaded.config, UserConfig::default());
        assert_eq!(loaded.errors[0].path, "defaultFramework");

        let error = loaded.validation_error().unwrap();
        assert!(error.to_string().ends_with(".classmcp.json (1 issue(s))"));
    }

    #[tokio::test]
    async fn test_warnings_are_kept() {
        let (_dir, root) = project();
        fs::write(
            root.join(".classmcp.json"),
            r#"{"customPatterns":[{"id":"a","classes":"x"},{"id":"a","classes":"y"}]}"#,
        )
        .unwrap();
        let loaded = load_config(&root).await;
        assert!(loaded.is_valid());
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_reads_same_file() {
        let (_dir, root) = project();
        let path = root.join("classmcp.config.json");
        fs::write(&path, r#"{"defaultFramework":"tachyons"}"#).unwrap();
        let first = load_config(&root).await;

        // A higher-priority file appearing later does not change the source.
        fs::write(root.join(".classmcp.json"), r#"{"defaultFramework":"unocss"}"#).unwrap();
        fs::write(&path, r#"{"defaultFramework":"bootstrap"}"#).unwrap();

        let reloaded = reload_config(first.source.as_ref(), &root).await;
        assert_eq!(reloaded.source, first.source);
        assert_eq!(reloaded.config.default_framework, Some(FrameworkId::Bootstrap));
    }

    #[tokio::test]
    async fn test_reload_missing_file_is_not_found() {
        let (_dir, root) = project();
        let path = root.join(".classmcp.json");
        fs::write(&path, "{}").unwrap();
        let first = load_config(&root).await;

        fs::remove_file(&path).unwrap();
        let reloaded = reload_config(first.source.as_ref(), &root).await;
        assert!(!reloaded.found());
        assert_eq!(reloaded.skipped.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_without_source_discovers() {
        let (_dir, root) = project();
        fs::write(root.join("classmcp.config.json"), "{}").unwrap();
        let reloaded = reload_config(None, &root).await;
        assert!(reloaded.found());
    }

    #[tokio::test]
    async fn test_reload_package_json() {
        let (_dir, root) = project();
        let path = root.join("package.json");
        fs::write(&path, r#"{"classmcp":{"overrideBuiltins":false}}"#).unwrap();
        let first = load_config(&root).await;

        fs::write(&path, r#"{"classmcp":{"overrideBuiltins":true}}"#).unwrap();
        let reloaded = reload_config(first.source.as_ref(), &root).await;
        assert!(reloaded.config.override_builtins);

        fs::write(&path, r#"{"name":"app"}"#).unwrap();
        assert!(!reload_config(first.source.as_ref(), &root).await.found());
    }

    #[test]
    fn test_source_serialization() {
        let source = ConfigSource::PackageJson(Utf8PathBuf::from("/app/package.json"));
        insta::assert_json_snapshot!(source, @r#"
        {
          "kind": "packageJson",
          "path": "/app/package.json"
        }
        "#);
        assert_eq!(source.path(), "/app/package.json");
    }
}
