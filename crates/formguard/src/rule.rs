//! The rule abstraction and the constraint that binds a rule to a message.

use crate::error::RuleError;
use std::fmt;

/// A predicate over a single string value.
///
/// A rule returns `Ok(())` when the value is acceptable and a [`RuleError`]
/// carrying its default reason otherwise. Rules may close over
/// configuration (an allowed-value set, a date format, a compiled pattern)
/// but never see any other field.
///
/// Any `Fn(&str) -> Result<(), RuleError>` closure is a rule:
///
/// ```rust
/// use formguard::{Rule, RuleError};
///
/// let no_spaces = |value: &str| {
///     if value.contains(' ') {
///         Err(RuleError::new("no_spaces", "Spaces are not allowed."))
///     } else {
///         Ok(())
///     }
/// };
/// assert!(no_spaces.validate("a b").is_err());
/// assert_eq!(no_spaces.rule_name(), "custom");
/// ```
pub trait Rule: Send + Sync {
    /// Validate the value against this rule.
    fn validate(&self, value: &str) -> Result<(), RuleError>;

    /// Rule code used in reported errors.
    fn rule_name(&self) -> &'static str;
}

impl<F> Rule for F
where
    F: Fn(&str) -> Result<(), RuleError> + Send + Sync,
{
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        self(value)
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }
}

/// A rule together with an optional message that replaces the rule's own
/// failure reason.
pub struct Constraint {
    rule: Box<dyn Rule>,
    message: Option<String>,
}

impl Constraint {
    /// Bind a rule to an override message. An empty message means "use the
    /// rule's own reason".
    pub fn new(rule: Box<dyn Rule>, message: &str) -> Self {
        let message = if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        };
        Self { rule, message }
    }

    /// The override message, if one was given.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Code of the wrapped rule.
    pub fn rule_name(&self) -> &'static str {
        self.rule.rule_name()
    }

    /// Run the rule, substituting the override message on failure.
    pub fn check(&self, value: &str) -> Result<(), RuleError> {
        self.rule.validate(value).map_err(|err| match &self.message {
            Some(message) => err.with_message(message.clone()),
            None => err,
        })
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("rule", &self.rule.rule_name())
            .field("message", &self.message)
            .finish()
    }
}
