//! Built-in rules.
//!
//! The format rules (`Url`, `ObjectId`, `Alpha`, `Email`, `Numeric`,
//! `ZipCode`) accept the empty string: on their own they never reject an
//! absent value. Pair them with [`NotEmpty`], or register them through
//! [`RuleSet::add_required`](crate::RuleSet::add_required), to make a field
//! mandatory. `Sha1`, `EqualsAny` and `Date` have no such allowance.

use crate::error::RuleError;
use crate::rule::Rule;
use chrono::format::{ParseErrorKind, ParseResult, Parsed, StrftimeItems};
use regex::Regex;
use std::sync::OnceLock;

// Source expressions of the built-in format rules

/// Scheme, `://`, then a host-like remainder. Case-insensitive.
pub const URL_PATTERN: &str = r"(?i)^([a-z]+://[a-z0-9][a-z0-9\-\.]*.+)?$";
/// 24 lowercase hex characters.
pub const OBJECT_ID_PATTERN: &str = r"^([a-f0-9]{24})?$";
/// ASCII letters and digits only. Case-insensitive.
pub const ALPHA_PATTERN: &str = r"(?i)^([a-z0-9]+)?$";
/// A loose `local@domain.tld` shape. Case-insensitive.
pub const EMAIL_PATTERN: &str = r"(?i)^([a-z0-9][a-z0-9\.\-+_]*@[a-z0-9\-\.]+.[a-z]+)?$";
/// ASCII digits only.
pub const NUMERIC_PATTERN: &str = r"^([0-9]+)?$";
/// Exactly five ASCII digits.
pub const ZIP_CODE_PATTERN: &str = r"^([0-9]{5})?$";
/// Exactly 40 hex characters, either case. Unlike the others, rejects `""`.
pub const SHA1_PATTERN: &str = r"(?i)^[a-f0-9]{40}$";

// Pre-compiled regex patterns
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static OBJECT_ID_REGEX: OnceLock<Regex> = OnceLock::new();
static ALPHA_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
static ZIP_CODE_REGEX: OnceLock<Regex> = OnceLock::new();
static SHA1_REGEX: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &'static str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in patterns are valid regexes"))
}

fn check(regex: &Regex, value: &str, code: &str, message: &str) -> Result<(), RuleError> {
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(RuleError::new(code, message))
    }
}

/// Fails only on the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotEmpty;

impl NotEmpty {
    /// Reason reported for an empty value.
    pub const MESSAGE: &'static str = "This value is required";
}

impl Rule for NotEmpty {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        if value.is_empty() {
            Err(RuleError::new("not_empty", Self::MESSAGE))
        } else {
            Ok(())
        }
    }

    fn rule_name(&self) -> &'static str {
        "not_empty"
    }
}

/// `scheme://host...` shaped values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Url;

impl Rule for Url {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        check(
            compiled(&URL_REGEX, URL_PATTERN),
            value,
            "url",
            "Value must be an URL.",
        )
    }

    fn rule_name(&self) -> &'static str {
        "url"
    }
}

/// 24 lowercase hex characters (a BSON ObjectId).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectId;

impl Rule for ObjectId {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        check(
            compiled(&OBJECT_ID_REGEX, OBJECT_ID_PATTERN),
            value,
            "object_id",
            "Expecting an ObjectId.",
        )
    }

    fn rule_name(&self) -> &'static str {
        "object_id"
    }
}

/// ASCII letters and digits only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alpha;

impl Rule for Alpha {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        check(
            compiled(&ALPHA_REGEX, ALPHA_PATTERN),
            value,
            "alpha",
            "Value must be a number or a letter from A to Z (case does not matter).",
        )
    }

    fn rule_name(&self) -> &'static str {
        "alpha"
    }
}

/// `local@domain.tld` shaped values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Email;

impl Rule for Email {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        check(
            compiled(&EMAIL_REGEX, EMAIL_PATTERN),
            value,
            "email",
            "Value must be an e-mail address.",
        )
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }
}

/// Decimal digits only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Numeric;

impl Rule for Numeric {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        check(
            compiled(&NUMERIC_REGEX, NUMERIC_PATTERN),
            value,
            "numeric",
            "Value must be a number.",
        )
    }

    fn rule_name(&self) -> &'static str {
        "numeric"
    }
}

/// Exactly five digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZipCode;

impl Rule for ZipCode {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        check(
            compiled(&ZIP_CODE_REGEX, ZIP_CODE_PATTERN),
            value,
            "zip_code",
            "Value must be a zipcode (XXXXX).",
        )
    }

    fn rule_name(&self) -> &'static str {
        "zip_code"
    }
}

/// Exactly 40 hex characters. The empty string fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha1;

impl Rule for Sha1 {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        check(
            compiled(&SHA1_REGEX, SHA1_PATTERN),
            value,
            "sha1",
            "Value must be a SHA1 hash.",
        )
    }

    fn rule_name(&self) -> &'static str {
        "sha1"
    }
}

/// Exact membership in a fixed set of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualsAny {
    values: Vec<String>,
}

impl EqualsAny {
    /// Create a membership rule over the given values.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The allowed values, in the order given.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Rule for EqualsAny {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        if self.values.iter().any(|allowed| allowed == value) {
            Ok(())
        } else {
            Err(RuleError::new(
                "equals_any",
                format!("Did not match the following: {}", self.values.join(", ")),
            ))
        }
    }

    fn rule_name(&self) -> &'static str {
        "equals_any"
    }
}

/// Values that parse under a `chrono` strftime format such as `%Y-%m-%d`.
///
/// The format may describe any part of a date or time: `%Y-%m` for a card
/// expiry, `%H:%M` for a time of day, a full timestamp with an offset.
/// Calendar fields the format leaves out default to year 0, January and
/// day 1, and the rest must form a real date (`%m/%d` rejects `02/30`).
/// The failure reason is chrono's parse error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    format: String,
}

impl Date {
    /// Create a date rule for the given format.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// The strftime format.
    pub fn format(&self) -> &str {
        &self.format
    }

    fn parse(&self, value: &str) -> ParseResult<()> {
        let mut parsed = Parsed::new();
        chrono::format::parse(&mut parsed, value, StrftimeItems::new(&self.format))?;

        if has_date_fields(&parsed) {
            fill_date_defaults(&mut parsed)?;
            allow_partial(parsed.to_naive_date().map(drop))?;
        }
        if has_time_fields(&parsed) {
            if parsed.minute().is_none() {
                parsed.set_minute(0)?;
            }
            allow_partial(parsed.to_naive_time().map(drop))?;
        }
        Ok(())
    }
}

fn has_date_fields(parsed: &Parsed) -> bool {
    parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some()
        || parsed.isoyear_div_100().is_some()
        || parsed.isoyear_mod_100().is_some()
        || parsed.month().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some()
        || parsed.isoweek().is_some()
        || parsed.ordinal().is_some()
        || parsed.day().is_some()
}

fn has_time_fields(parsed: &Parsed) -> bool {
    parsed.hour_div_12().is_some()
        || parsed.hour_mod_12().is_some()
        || parsed.minute().is_some()
        || parsed.second().is_some()
        || parsed.nanosecond().is_some()
}

/// Missing calendar fields default to year 0, January, day 1.
///
/// Fields that can be derived from an ordinal or a week number are left
/// alone so chrono can resolve them.
fn fill_date_defaults(parsed: &mut Parsed) -> ParseResult<()> {
    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some()
        || parsed.isoyear_div_100().is_some()
        || parsed.isoyear_mod_100().is_some();
    let has_week_or_ordinal = parsed.ordinal().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some()
        || parsed.isoweek().is_some();

    if !has_year {
        parsed.set_year(0)?;
    }
    if !has_week_or_ordinal {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }
    Ok(())
}

// Fields chrono cannot pin down (a 12-hour clock without AM/PM, a week
// number without a weekday) are accepted as parsed.
fn allow_partial(result: ParseResult<()>) -> ParseResult<()> {
    match result {
        Err(err) if err.kind() == ParseErrorKind::NotEnough => Ok(()),
        other => other,
    }
}

impl Rule for Date {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        self.parse(value)
            .map_err(|err| RuleError::new("date", err.to_string()))
    }

    fn rule_name(&self) -> &'static str {
        "date"
    }
}

/// Values matching an arbitrary regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile the expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// The source expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for Pattern {
    fn validate(&self, value: &str) -> Result<(), RuleError> {
        if self.regex.is_match(value) {
            Ok(())
        } else {
            Err(RuleError::new(
                "pattern",
                format!("Value does not match pattern {}.", self.regex.as_str()),
            ))
        }
    }

    fn rule_name(&self) -> &'static str {
        "pattern"
    }
}
