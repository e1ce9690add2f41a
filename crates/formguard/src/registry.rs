//! The rule registry and flat key/value validation.

use crate::error::{RuleError, ValidationErrors};
use crate::rule::{Constraint, Rule};
use crate::rules::NotEmpty;
use std::collections::HashMap;

/// Field name to ordered constraints.
///
/// Registration takes `&mut self` and validation takes `&self`, so a
/// finished `RuleSet` can be shared across threads (for example in an
/// `Arc`) without locking. Constraints are only ever appended.
///
/// ## Example
///
/// ```rust
/// use formguard::{rules::Numeric, RuleSet};
///
/// let mut rules = RuleSet::new();
/// rules.add_required("age", Numeric, "Age must be a whole number");
///
/// assert!(rules.validate([("age", "42")]).is_ok());
///
/// let errors = rules.validate([("age", "")]).unwrap_err();
/// assert_eq!(errors.messages("age"), vec!["This value is required"]);
/// ```
#[derive(Debug, Default)]
pub struct RuleSet {
    fields: HashMap<String, Vec<Constraint>>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule for `field`.
    ///
    /// A non-empty `message` replaces the rule's own failure reason. The
    /// same rule may be added more than once; each copy reports separately.
    pub fn add(&mut self, field: impl Into<String>, rule: impl Rule + 'static, message: &str) {
        self.push(field.into(), Constraint::new(Box::new(rule), message));
    }

    /// Append the standard not-empty check, then `rule`.
    ///
    /// On an empty value the not-empty failure is always reported first.
    pub fn add_required(
        &mut self,
        field: impl Into<String>,
        rule: impl Rule + 'static,
        message: &str,
    ) {
        let field = field.into();
        self.add(field.clone(), NotEmpty, "");
        self.add(field, rule, message);
    }

    /// Builder form of [`add`](Self::add).
    pub fn rule(
        mut self,
        field: impl Into<String>,
        rule: impl Rule + 'static,
        message: &str,
    ) -> Self {
        self.add(field, rule, message);
        self
    }

    /// Builder form of [`add_required`](Self::add_required).
    pub fn required(
        mut self,
        field: impl Into<String>,
        rule: impl Rule + 'static,
        message: &str,
    ) -> Self {
        self.add_required(field, rule, message);
        self
    }

    pub(crate) fn push(&mut self, field: String, constraint: Constraint) {
        self.fields.entry(field).or_default().push(constraint);
    }

    /// Constraints registered for a field, in registration order.
    pub fn constraints(&self, field: &str) -> &[Constraint] {
        self.fields
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether any constraint is registered for the field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Registered field names, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field has constraints.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate one value against every constraint registered for `field`.
    ///
    /// All constraints run, in registration order; every failure is
    /// reported. A field with no constraints always passes.
    pub fn validate_key_value(&self, field: &str, value: &str) -> Result<(), Vec<RuleError>> {
        let failures: Vec<RuleError> = self
            .constraints(field)
            .iter()
            .filter_map(|constraint| {
                let outcome = constraint.check(value);
                tracing::trace!(
                    field,
                    rule = constraint.rule_name(),
                    passed = outcome.is_ok(),
                    "evaluated constraint"
                );
                outcome.err()
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            tracing::debug!(field, failures = failures.len(), "field failed validation");
            Err(failures)
        }
    }

    /// Validate flat key/value input.
    ///
    /// Only keys present in `input` are checked: a registered field missing
    /// from the input is not an error. Register with
    /// [`add_required`](Self::add_required) and supply `""` to enforce
    /// presence.
    pub fn validate<I, K, V>(&self, input: I) -> Result<(), ValidationErrors>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut errors = ValidationErrors::new();
        for (key, value) in input {
            let key = key.as_ref();
            if let Err(failures) = self.validate_key_value(key, value.as_ref()) {
                errors.add_all(key, failures);
            }
        }

        tracing::debug!(
            valid = errors.is_empty(),
            failed_fields = errors.fields.len(),
            "validated key/value input"
        );
        errors.into_result()
    }
}
