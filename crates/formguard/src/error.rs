//! Error types for rule failures and configuration problems.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Failure reported by a single rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleError {
    /// The rule code (e.g., "email", "not_empty", "equals_any")
    pub code: String,
    /// Human-readable failure message
    pub message: String,
}

impl RuleError {
    /// Create a new rule error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Replace the message, keeping the code.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RuleError {}

/// Failures for every field that did not pass, keyed by field path.
///
/// Within a field, failures keep the order in which the constraints were
/// registered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Map of field key to the ordered failures for that field
    #[serde(flatten)]
    pub fields: BTreeMap<String, Vec<RuleError>>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add an error for a field.
    pub fn add(&mut self, field: impl Into<String>, error: RuleError) {
        self.fields.entry(field.into()).or_default().push(error);
    }

    /// Add multiple errors for a field.
    pub fn add_all(&mut self, field: impl Into<String>, errors: Vec<RuleError>) {
        self.fields.entry(field.into()).or_default().extend(errors);
    }

    /// Merge another collection into this one.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, errors) in other.fields {
            self.add_all(field, errors);
        }
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of failures across all fields.
    pub fn len(&self) -> usize {
        self.fields.values().map(|v| v.len()).sum()
    }

    /// Failures for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<RuleError>> {
        self.fields.get(field)
    }

    /// Failure messages for a field, empty if the field passed.
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.fields
            .get(field)
            .map(|errors| errors.iter().map(|e| e.message.as_str()).collect())
            .unwrap_or_default()
    }

    /// Names of all failing fields, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(|s| s.as_str()).collect()
    }

    /// Convert to Result - Ok if no errors, Err otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Flatten to a field -> messages map.
    pub fn into_message_map(self) -> BTreeMap<String, Vec<String>> {
        self.fields
            .into_iter()
            .map(|(field, errors)| (field, errors.into_iter().map(|e| e.message).collect()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation failed: {} error(s) in {} field(s)",
            self.len(),
            self.fields.len()
        )
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors raised while loading or compiling rule specs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML rule file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON rule file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported rule file format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("equals_any needs at least one allowed value")]
    EmptyChoices,
}
