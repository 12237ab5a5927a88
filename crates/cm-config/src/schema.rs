//! Validation of untrusted configuration JSON.
//!
//! Validation runs on the raw [`serde_json::Value`] so every problem is
//! reported with a path, rather than stopping at the first serde error.
//! Only a document that passes is deserialized into a [`UserConfig`].

use std::fmt::Write as _;

use cm_core::{FrameworkId, StateKind, UserConfig, ValidationIssue};
use serde_json::{Map, Value};

/// Outcome of parsing a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigParse {
    /// The document is usable.
    Valid {
        /// The parsed configuration.
        config: UserConfig,
        /// Non-fatal findings, such as duplicate pattern ids.
        warnings: Vec<String>,
    },
    /// The document must be ignored.
    Invalid {
        /// Every validation failure.
        errors: Vec<ValidationIssue>,
        /// Non-fatal findings.
        warnings: Vec<String>,
    },
}

impl ConfigParse {
    /// Returns `true` for [`ConfigParse::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Warnings, whichever way the parse went.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Valid { warnings, .. } | Self::Invalid { warnings, .. } => warnings,
        }
    }

    /// Errors; empty for a valid document.
    #[must_use]
    pub fn errors(&self) -> &[ValidationIssue] {
        match self {
            Self::Valid { .. } => &[],
            Self::Invalid { errors, .. } => errors,
        }
    }
}

/// Errors and warnings found in a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the document unusable.
    pub errors: Vec<ValidationIssue>,
    /// Problems that are reported but tolerated.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates and, if valid, deserializes a configuration document.
///
/// # Examples
///
/// ```
/// use cm_config::parse_user_config;
/// use serde_json::json;
///
/// let parse = parse_user_config(json!({ "overrideBuiltins": "yes" }));
/// assert!(!parse.is_valid());
/// assert_eq!(parse.errors()[0].to_string(), "overrideBuiltins: overrideBuiltins must be a boolean");
/// ```
#[must_use]
pub fn parse_user_config(value: Value) -> ConfigParse {
    let ValidationReport { errors, warnings } = validate_user_config(&value);
    if !errors.is_empty() {
        return ConfigParse::Invalid { errors, warnings };
    }
    match serde_json::from_value::<UserConfig>(value) {
        Ok(config) => ConfigParse::Valid { config, warnings },
        Err(e) => ConfigParse::Invalid {
            errors: vec![ValidationIssue::new("", e.to_string())],
            warnings,
        },
    }
}

/// Checks a configuration document against the expected shape.
#[must_use]
pub fn validate_user_config(value: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    let Some(config) = value.as_object() else {
        report
            .errors
            .push(ValidationIssue::new("", "config must be an object"));
        return report;
    };

    if config
        .get("overrideBuiltins")
        .is_some_and(|value| !value.is_boolean())
    {
        report.errors.push(ValidationIssue::new(
            "overrideBuiltins",
            "overrideBuiltins must be a boolean",
        ));
    }

    if let Some(value) = config
        .get("defaultFramework")
        .filter(|value| !is_framework(value))
    {
        report.errors.push(ValidationIssue::new(
            "defaultFramework",
            invalid_framework(value),
        ));
    }

    if let Some(value) = config.get("customPatterns") {
        match value.as_array() {
            Some(patterns) => validate_patterns(patterns, &mut report),
            None => report.errors.push(ValidationIssue::new(
                "customPatterns",
                "customPatterns must be an array",
            )),
        }
    }

    report
}

fn validate_patterns(patterns: &[Value], report: &mut ValidationReport) {
    let mut seen = Vec::<&str>::with_capacity(patterns.len());
    for (index, pattern) in patterns.iter().enumerate() {
        validate_pattern(pattern, index, &mut report.errors);

        let id = pattern
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty());
        if let Some(id) = id {
            if seen.contains(&id) {
                report.warnings.push(format!(
                    "Duplicate pattern id \"{id}\" at index {index} - later definition will be used"
                ));
            }
            seen.push(id);
        }
    }
}

fn validate_pattern(pattern: &Value, index: usize, errors: &mut Vec<ValidationIssue>) {
    let at = |field: &str| format!("customPatterns[{index}].{field}");

    let Some(p) = pattern.as_object() else {
        errors.push(ValidationIssue::new(
            format!("customPatterns[{index}]"),
            "pattern must be an object",
        ));
        return;
    };

    if let Some(message) = check_id(p.get("id")) {
        errors.push(ValidationIssue::new(at("id"), message));
    }

    match p.get("classes") {
        None => errors.push(ValidationIssue::new(at("classes"), "classes is required")),
        Some(classes) => {
            if let Some((field, message)) = check_classes(classes) {
                errors.push(ValidationIssue::new(at(&field), message));
            }
        }
    }

    for field in ["category", "name", "description"] {
        if p.get(field).is_some_and(|value| !value.is_string()) {
            errors.push(ValidationIssue::new(
                at(field),
                format!("{field} must be a string"),
            ));
        }
    }

    if let Some(frameworks) = p.get("frameworks") {
        match frameworks.as_array() {
            None => errors.push(ValidationIssue::new(
                at("frameworks"),
                "frameworks must be an array",
            )),
            Some(list) => {
                for (i, framework) in list.iter().enumerate() {
                    if !is_framework(framework) {
                        errors.push(ValidationIssue::new(
                            at(&format!("frameworks[{i}]")),
                            invalid_framework(framework),
                        ));
                    }
                }
            }
        }
    }

    if let Some(ssr) = p.get("ssr") {
        check_ssr(ssr, &at, errors);
    }
}

fn check_id(id: Option<&Value>) -> Option<String> {
    let Some(id) = id.and_then(Value::as_str) else {
        return Some("id must be a string".to_owned());
    };
    if id.trim().is_empty() {
        return Some("id cannot be empty".to_owned());
    }
    if !is_valid_id(id) {
        return Some(format!(
            "id \"{id}\" is invalid - must start with letter and contain only letters, numbers, hyphens, underscores"
        ));
    }
    None
}

/// `^[a-zA-Z][a-zA-Z0-9_-]*$`
fn is_valid_id(id: &str) -> bool {
    let mut bytes = id.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_alphabetic())
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Returns the offending field (relative to the pattern) and message.
fn check_classes(classes: &Value) -> Option<(String, String)> {
    match classes {
        Value::String(s) if s.trim().is_empty() => {
            Some(("classes".to_owned(), "classes cannot be empty".to_owned()))
        }
        Value::String(_) => None,
        Value::Object(variant) => check_state_variant(variant),
        _ => Some((
            "classes".to_owned(),
            "classes must be a string or an object with base, hover, focus, active, disabled fields"
                .to_owned(),
        )),
    }
}

fn check_state_variant(variant: &Map<String, Value>) -> Option<(String, String)> {
    let base_ok = variant
        .get("base")
        .and_then(Value::as_str)
        .is_some_and(|base| !base.trim().is_empty());
    if !base_ok {
        return Some((
            "classes.base".to_owned(),
            "classes.base is required and must be a non-empty string".to_owned(),
        ));
    }
    StateKind::ALL.into_iter().find_map(|kind| {
        let field = kind.as_str();
        variant
            .get(field)
            .filter(|value| !value.is_string())
            .map(|_| {
                (
                    format!("classes.{field}"),
                    format!("classes.{field} must be a string"),
                )
            })
    })
}

fn check_ssr(ssr: &Value, at: &dyn Fn(&str) -> String, errors: &mut Vec<ValidationIssue>) {
    let Some(ssr) = ssr.as_object() else {
        errors.push(ValidationIssue::new(at("ssr"), "ssr must be an object"));
        return;
    };
    if !ssr.get("safe").is_some_and(Value::is_boolean) {
        errors.push(ValidationIssue::new(at("ssr.safe"), "ssr.safe must be a boolean"));
    }
    for field in ["warning", "clientOnly"] {
        if ssr.get(field).is_some_and(|value| !value.is_string()) {
            errors.push(ValidationIssue::new(
                at(&format!("ssr.{field}")),
                format!("ssr.{field} must be a string"),
            ));
        }
    }
}

fn is_framework(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.parse::<FrameworkId>().is_ok())
}

fn invalid_framework(value: &Value) -> String {
    format!(
        "invalid framework \"{}\" - must be one of: {}",
        display_value(value),
        FrameworkId::joined()
    )
}

/// Renders a JSON value the way it reads when interpolated into a message.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            let mut out = String::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{}", display_value(item));
            }
            out
        }
        Value::Object(_) => "[object Object]".to_owned(),
    }
}
