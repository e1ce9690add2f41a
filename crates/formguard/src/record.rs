//! Structural validation of records.
//!
//! A [`Record`] lists its fields in declaration order, each tagged with its
//! shape: a string leaf, a nested record, or something the validator does
//! not look at. `#[derive(Record)]` writes the implementation; the
//! [`AsField`] trait decides the shape from each field's type.

use crate::error::ValidationErrors;
use crate::registry::RuleSet;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Shape of one field as seen by the structural validator.
#[derive(Clone, Copy)]
pub enum Field<'a> {
    /// A string value, validated under its field key.
    Text(&'a str),
    /// A sub-record, walked with `<name>.` prepended to its keys.
    Nested(&'a dyn Record),
    /// Anything else. Never validated.
    Other,
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Text(value) => f.debug_tuple("Text").field(value).finish(),
            Field::Nested(_) => f.write_str("Nested(..)"),
            Field::Other => f.write_str("Other"),
        }
    }
}

/// A type whose fields can be walked by [`RuleSet::validate_record`].
///
/// ## Example
///
/// ```rust
/// use formguard::{rules::Alpha, rules::NotEmpty, Record, RuleSet};
///
/// #[derive(Record)]
/// struct Address {
///     #[record(rename = "City")]
///     city: String,
/// }
///
/// #[derive(Record)]
/// struct Person {
///     #[record(rename = "Name")]
///     name: String,
///     #[record(rename = "Address")]
///     address: Address,
///     age: u32,
/// }
///
/// let rules = RuleSet::new()
///     .rule("Name", NotEmpty, "")
///     .rule("Address.City", Alpha, "");
///
/// let person = Person {
///     name: String::new(),
///     address: Address { city: "St. Louis".into() },
///     age: 40,
/// };
///
/// let errors = rules.validate_record(&person).unwrap_err();
/// assert_eq!(errors.field_names(), vec!["Address.City", "Name"]);
/// ```
pub trait Record {
    /// Fields in declaration order, with their key segment.
    fn fields(&self) -> Vec<(&'static str, Field<'_>)>;
}

/// Maps a field's type to its [`Field`] shape.
pub trait AsField {
    /// The shape the structural validator sees for this value.
    fn as_field(&self) -> Field<'_>;
}

impl AsField for String {
    fn as_field(&self) -> Field<'_> {
        Field::Text(self)
    }
}

impl AsField for str {
    fn as_field(&self) -> Field<'_> {
        Field::Text(self)
    }
}

impl AsField for &str {
    fn as_field(&self) -> Field<'_> {
        Field::Text(self)
    }
}

impl AsField for Cow<'_, str> {
    fn as_field(&self) -> Field<'_> {
        Field::Text(self)
    }
}

impl AsField for Box<str> {
    fn as_field(&self) -> Field<'_> {
        Field::Text(self)
    }
}

macro_rules! opaque_fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsField for $ty {
                fn as_field(&self) -> Field<'_> {
                    Field::Other
                }
            }
        )*
    };
}

opaque_fields!(bool, char, ());
opaque_fields!(u8, u16, u32, u64, u128, usize);
opaque_fields!(i8, i16, i32, i64, i128, isize);
opaque_fields!(f32, f64);

macro_rules! opaque_containers {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T> AsField for $ty<T> {
                fn as_field(&self) -> Field<'_> {
                    Field::Other
                }
            }
        )*
    };
}

// Containers and pointers are not walked, even when they hold strings or
// records.
opaque_containers!(Option, Vec, VecDeque, BTreeSet, HashSet, Box, Rc, Arc);

impl<K, V> AsField for BTreeMap<K, V> {
    fn as_field(&self) -> Field<'_> {
        Field::Other
    }
}

impl<K, V, S> AsField for HashMap<K, V, S> {
    fn as_field(&self) -> Field<'_> {
        Field::Other
    }
}

impl<T, const N: usize> AsField for [T; N] {
    fn as_field(&self) -> Field<'_> {
        Field::Other
    }
}

impl RuleSet {
    /// Validate the string fields of a record, recursing into sub-records.
    ///
    /// Top-level keys are the field names; nested keys are dotted paths
    /// such as `Address.City`, matching how rules for nested fields must be
    /// registered. Fields of any other shape are skipped.
    pub fn validate_record(&self, record: &dyn Record) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.validate_with_prefix("", record, &mut errors);
        tracing::debug!(
            valid = errors.is_empty(),
            failed_fields = errors.fields.len(),
            "validated record"
        );
        errors.into_result()
    }

    fn validate_with_prefix(
        &self,
        prefix: &str,
        record: &dyn Record,
        errors: &mut ValidationErrors,
    ) {
        for (name, field) in record.fields() {
            match field {
                Field::Text(value) => {
                    let key = format!("{prefix}{name}");
                    if let Err(failures) = self.validate_key_value(&key, value) {
                        errors.add_all(key, failures);
                    }
                }
                Field::Nested(inner) => {
                    let nested_prefix = format!("{prefix}{name}.");
                    self.validate_with_prefix(&nested_prefix, inner, errors);
                }
                Field::Other => {}
            }
        }
    }
}
