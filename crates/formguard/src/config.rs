//! Serializable rule definitions.
//!
//! Rule files describe the rules for each field in TOML or JSON and compile
//! into a [`RuleSet`]:
//!
//! ```toml
//! [[fields.email]]
//! type = "email"
//! required = true
//!
//! [[fields.gender]]
//! type = "equals_any"
//! values = ["male", "female"]
//! message = "Pick one of the listed options"
//! ```

use crate::error::ConfigError;
use crate::registry::RuleSet;
use crate::rule::{Constraint, Rule};
use crate::rules::{
    Alpha, Date, Email, EqualsAny, NotEmpty, Numeric, ObjectId, Pattern, Sha1, Url, ZipCode,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Which built-in rule a spec refers to, with its parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    NotEmpty,
    Url,
    ObjectId,
    Alpha,
    Email,
    Numeric,
    ZipCode,
    Sha1,
    EqualsAny { values: Vec<String> },
    Date { format: String },
    Pattern { pattern: String },
}

/// One rule for one field, as written in a rule file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSpec {
    #[serde(flatten)]
    pub kind: RuleKind,
    /// Replaces the rule's own failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Register through `add_required` (not-empty check first)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl RuleSpec {
    /// A spec with no override message, not required.
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
            required: false,
        }
    }

    /// Set the message that replaces the rule's failure reason.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Put a not-empty check in front of the rule.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Compile into a rule.
    pub fn build(&self) -> Result<Box<dyn Rule>, ConfigError> {
        let rule: Box<dyn Rule> = match &self.kind {
            RuleKind::NotEmpty => Box::new(NotEmpty),
            RuleKind::Url => Box::new(Url),
            RuleKind::ObjectId => Box::new(ObjectId),
            RuleKind::Alpha => Box::new(Alpha),
            RuleKind::Email => Box::new(Email),
            RuleKind::Numeric => Box::new(Numeric),
            RuleKind::ZipCode => Box::new(ZipCode),
            RuleKind::Sha1 => Box::new(Sha1),
            RuleKind::EqualsAny { values } => {
                if values.is_empty() {
                    return Err(ConfigError::EmptyChoices);
                }
                Box::new(EqualsAny::new(values.iter().cloned()))
            }
            RuleKind::Date { format } => Box::new(Date::new(format.clone())),
            RuleKind::Pattern { pattern } => {
                let compiled =
                    Pattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    })?;
                Box::new(compiled)
            }
        };
        Ok(rule)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::NotEmpty => f.write_str("not_empty"),
            RuleKind::Url => f.write_str("url"),
            RuleKind::ObjectId => f.write_str("object_id"),
            RuleKind::Alpha => f.write_str("alpha"),
            RuleKind::Email => f.write_str("email"),
            RuleKind::Numeric => f.write_str("numeric"),
            RuleKind::ZipCode => f.write_str("zip_code"),
            RuleKind::Sha1 => f.write_str("sha1"),
            RuleKind::EqualsAny { values } => write!(f, "equals_any({})", values.join(", ")),
            RuleKind::Date { format } => write!(f, "date({})", format),
            RuleKind::Pattern { pattern } => write!(f, "pattern({})", pattern),
        }
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.required {
            f.write_str("required ")?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ", message = \"{}\"", message)?;
        }
        Ok(())
    }
}

/// A whole rule file: field name to its rules, in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSetConfig {
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<RuleSpec>>,
}

impl RuleSetConfig {
    /// Parse a TOML rule file.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a JSON rule file.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read a rule file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&source)
    }

    /// Compile every spec into a rule set.
    pub fn build(&self) -> Result<RuleSet, ConfigError> {
        let mut rules = RuleSet::new();
        for (field, specs) in &self.fields {
            for spec in specs {
                if spec.required {
                    rules.push(field.clone(), Constraint::new(Box::new(NotEmpty), ""));
                }
                let message = spec.message.as_deref().unwrap_or("");
                rules.push(field.clone(), Constraint::new(spec.build()?, message));
            }
        }

        tracing::debug!(fields = rules.len(), "built rule set from config");
        Ok(rules)
    }
}

impl RuleSet {
    /// Build a rule set from a parsed rule file.
    pub fn from_config(config: &RuleSetConfig) -> Result<Self, ConfigError> {
        config.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_display() {
        assert_eq!(RuleSpec::new(RuleKind::Email).to_string(), "email");
        assert_eq!(
            RuleSpec::new(RuleKind::Date {
                format: "%Y-%m-%d".to_string()
            })
            .required()
            .to_string(),
            "required date(%Y-%m-%d)"
        );
        assert_eq!(
            RuleSpec::new(RuleKind::EqualsAny {
                values: vec!["male".to_string(), "female".to_string()]
            })
            .with_message("pick one")
            .to_string(),
            "equals_any(male, female), message = \"pick one\""
        );
    }

    #[test]
    fn spec_json_shape() {
        let spec = RuleSpec::new(RuleKind::ZipCode).with_message("bad zip");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "zip_code");
        assert_eq!(json["message"], "bad zip");
        assert!(json.get("required").is_none());
    }

    #[test]
    fn spec_from_json() {
        let json = r#"{"type": "equals_any", "values": ["a", "b"], "required": true}"#;
        let spec: RuleSpec = serde_json::from_str(json).unwrap();
        assert!(spec.required);
        assert_eq!(
            spec.kind,
            RuleKind::EqualsAny {
                values: vec!["a".to_string(), "b".to_string()]
            }
        );
        assert!(spec.message.is_none());
    }

    #[test]
    fn unknown_rule_type_is_rejected() {
        let result: Result<RuleSpec, _> = serde_json::from_str(r#"{"type": "phone"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn build_rejects_bad_pattern() {
        let spec = RuleSpec::new(RuleKind::Pattern {
            pattern: "(".to_string(),
        });
        assert!(matches!(
            spec.build(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn build_rejects_empty_choices() {
        let spec = RuleSpec::new(RuleKind::EqualsAny { values: vec![] });
        assert!(matches!(spec.build(), Err(ConfigError::EmptyChoices)));
    }

    #[test]
    fn config_from_toml_builds_rule_set() {
        let config = RuleSetConfig::from_toml_str(
            r#"
            [[fields.age]]
            type = "numeric"
            required = true
            message = "Age must be a number"

            [[fields.gender]]
            type = "equals_any"
            values = ["male", "female"]
            "#,
        )
        .unwrap();

        let rules = config.build().unwrap();
        assert_eq!(rules.constraints("age").len(), 2);
        assert_eq!(rules.constraints("age")[0].rule_name(), "not_empty");
        assert_eq!(
            rules.constraints("age")[1].message(),
            Some("Age must be a number")
        );

        let errors = rules
            .validate([("age", "x"), ("gender", "other")])
            .unwrap_err();
        assert_eq!(errors.messages("age"), vec!["Age must be a number"]);
        assert_eq!(
            errors.messages("gender"),
            vec!["Did not match the following: male, female"]
        );
    }

    #[test]
    fn empty_config_is_an_empty_rule_set() {
        let config = RuleSetConfig::from_toml_str("").unwrap();
        assert!(config.fields.is_empty());
        assert!(RuleSet::from_config(&config).unwrap().is_empty());
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let result = RuleSetConfig::load("rules.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
