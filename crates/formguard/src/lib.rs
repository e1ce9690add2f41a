//! # formguard
//!
//! Declarative field validation. Register rules per field name once, then
//! validate flat key/value input (form or query data) or nested records
//! against them. Every failing rule is reported, in registration order.
//!
//! ## Example
//!
//! ```rust
//! use formguard::rules::{Email, EqualsAny, Numeric};
//! use formguard::RuleSet;
//!
//! let mut rules = RuleSet::new();
//! rules.add_required("email", Email, "");
//! rules.add("age", Numeric, "Age must be a whole number");
//! rules.add("gender", EqualsAny::new(["male", "female"]), "");
//!
//! let errors = rules
//!     .validate([("email", ""), ("age", "forty"), ("gender", "female")])
//!     .unwrap_err();
//!
//! assert_eq!(errors.messages("email"), vec!["This value is required"]);
//! assert_eq!(errors.messages("age"), vec!["Age must be a whole number"]);
//! assert!(errors.get("gender").is_none());
//! ```
//!
//! ## Rules
//!
//! - `NotEmpty` - rejects the empty string
//! - `Url`, `ObjectId`, `Alpha`, `Email`, `Numeric`, `ZipCode` - format
//!   checks that accept the empty string
//! - `Sha1` - 40 hex characters
//! - `EqualsAny` - membership in a fixed set
//! - `Date` - parses under a strftime format
//! - `Pattern` - matches a regular expression
//!
//! Any `Fn(&str) -> Result<(), RuleError>` closure is a rule too.
//!
//! ## Nested records
//!
//! `#[derive(Record)]` exposes a struct's fields to
//! [`RuleSet::validate_record`]. String fields are validated under their
//! name, nested records under a dotted path (`Address.City`), and all other
//! fields are skipped.

extern crate self as formguard;

mod config;
mod error;
mod record;
mod registry;
mod rule;
/// Built-in rules.
pub mod rules;

#[cfg(test)]
mod tests;

pub use config::{RuleKind, RuleSetConfig, RuleSpec};
pub use error::{ConfigError, RuleError, ValidationErrors};
pub use record::{AsField, Field, Record};
pub use registry::RuleSet;
pub use rule::{Constraint, Rule};

// Derive macro lives in the macro namespace next to the trait
pub use formguard_macros::Record;

/// Prelude module for validation
pub mod prelude {
    pub use crate::config::{RuleKind, RuleSetConfig, RuleSpec};
    pub use crate::error::{ConfigError, RuleError, ValidationErrors};
    pub use crate::record::{AsField, Field, Record};
    pub use crate::registry::RuleSet;
    pub use crate::rule::{Constraint, Rule};
    pub use crate::rules::*;
    pub use formguard_macros::Record;
}
