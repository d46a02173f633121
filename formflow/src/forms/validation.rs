//! Validation rules and built-in checks
//!
//! Validators return a [`Validation`] instead of the loose "true or message"
//! convention: `Valid` passes, `Invalid(message)` fails with a message that
//! must not be empty.

use std::sync::Arc;

use chrono::NaiveDate;
use regex::Regex;
use validator::{ValidateEmail, ValidateUrl};

use super::element::ElementCore;
use super::field::FormatCheck;
use super::form::Form;

/// Outcome of a custom validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The value (or form) is acceptable
    Valid,
    /// The value (or form) is rejected with this message
    Invalid(String),
}

impl Validation {
    /// Reject with a message
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// `Valid` when `ok`, otherwise `Invalid(message)`
    #[must_use]
    pub fn check(ok: bool, message: impl Into<String>) -> Self {
        if ok {
            Self::Valid
        } else {
            Self::Invalid(message.into())
        }
    }
}

/// Per-element custom validator
pub type ElementValidator = Arc<dyn Fn(&ElementCore, &Form) -> Validation + Send + Sync>;

/// Whole-form validator, run after every element passed
pub type FormValidator = Arc<dyn Fn(&Form) -> Validation + Send + Sync>;

/// A compiled server-side pattern rule
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    html: String,
    message: String,
}

impl Pattern {
    /// Compile `source`, which may be a bare expression or `/expression/flags`.
    ///
    /// Supported flags are `i`, `m`, `s` and `x`. The bare expression is kept
    /// for the HTML `pattern` attribute.
    ///
    /// # Errors
    ///
    /// Returns the regex error if the expression does not compile.
    pub fn new(source: &str, message: Option<&str>) -> Result<Self, regex::Error> {
        let (expression, flags) = split_delimited(source);
        let compiled = if flags.is_empty() {
            expression.to_owned()
        } else {
            format!("(?{flags}){expression}")
        };
        let message = match message {
            Some(m) if !m.is_empty() => m.to_owned(),
            _ => format!("Value must match the pattern: \"{source}\""),
        };
        Ok(Self {
            regex: Regex::new(&compiled)?,
            html: expression.to_owned(),
            message,
        })
    }

    /// Whether `value` matches
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Expression for the HTML `pattern` attribute
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Failure message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn split_delimited(source: &str) -> (&str, String) {
    if let Some(rest) = source.strip_prefix('/') {
        if let Some(end) = rest.rfind('/') {
            let flags = &rest[end + 1..];
            if flags.chars().all(|c| matches!(c, 'i' | 'm' | 's' | 'x')) {
                return (&rest[..end], flags.to_owned());
            }
        }
    }
    (source, String::new())
}

/// Accepted values for [`whitelist`](super::ElementBuilder::whitelist)
///
/// Built from a comma-separated string or a list. Entries are trimmed and
/// empty entries dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist(Vec<String>);

impl Whitelist {
    /// The accepted values
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.0
    }

    fn collect<'a>(entries: impl IntoIterator<Item = &'a str>) -> Self {
        Self(
            entries
                .into_iter()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

impl From<&str> for Whitelist {
    fn from(csv: &str) -> Self {
        Self::collect(csv.split(','))
    }
}

impl From<&[&str]> for Whitelist {
    fn from(values: &[&str]) -> Self {
        Self::collect(values.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Whitelist {
    fn from(values: [&str; N]) -> Self {
        Self::collect(values)
    }
}

impl From<Vec<String>> for Whitelist {
    fn from(values: Vec<String>) -> Self {
        Self::collect(values.iter().map(String::as_str))
    }
}

/// Server-side rules attached to an element
#[derive(Clone, Default)]
pub struct Rules {
    /// Overrides the default required message
    pub required_message: Option<String>,
    /// Regex rule
    pub pattern: Option<Pattern>,
    /// Accepted values
    pub whitelist: Option<Vec<String>>,
    /// Minimum length in characters
    pub minlength: Option<usize>,
    /// Message for a `minlength` failure
    pub minlength_message: Option<String>,
    /// Message for a `maxlength` failure
    pub maxlength_message: Option<String>,
    /// Custom validator, run last
    pub matcher: Option<ElementValidator>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("required_message", &self.required_message)
            .field("pattern", &self.pattern)
            .field("whitelist", &self.whitelist)
            .field("minlength", &self.minlength)
            .field("matcher", &self.matcher.as_ref().map(|_| "Fn"))
            .finish_non_exhaustive()
    }
}

/// Run a built-in format check, returning the failure message
#[must_use]
pub fn check_format(check: FormatCheck, value: &str) -> Option<&'static str> {
    let ok = match check {
        FormatCheck::None => true,
        FormatCheck::HeaderSafe => !value.contains(['\r', '\n']),
        FormatCheck::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        FormatCheck::Email => value.validate_email(),
        FormatCheck::Url => value.validate_url(),
        FormatCheck::Float => value.parse::<f64>().is_ok_and(f64::is_finite),
        FormatCheck::Integer => value.parse::<i64>().is_ok(),
        FormatCheck::Boolean => parse_bool(value).is_some(),
    };
    if ok {
        return None;
    }
    Some(match check {
        FormatCheck::None => "",
        FormatCheck::HeaderSafe => "Value must not contain line breaks",
        FormatCheck::Date => "Please enter a valid date (YYYY-MM-DD)",
        FormatCheck::Email => "Please enter a valid email address",
        FormatCheck::Url => "Please enter a valid URL",
        FormatCheck::Float => "Please enter a number",
        FormatCheck::Integer => "Please enter a whole number",
        FormatCheck::Boolean => "Please answer yes or no",
    })
}

/// Interpret the usual spellings of yes and no
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_delimited_flags() {
        let p = Pattern::new("/^yes|yep$/i", None).unwrap();
        assert!(p.is_match("YES"));
        assert_eq!(p.html(), "^yes|yep$");
        assert_eq!(p.message(), "Value must match the pattern: \"/^yes|yep$/i\"");
    }

    #[test]
    fn test_pattern_bare() {
        let p = Pattern::new(r"^[^0-9]*$", Some("No numbers please!")).unwrap();
        assert!(p.is_match("hello"));
        assert!(!p.is_match("h3llo"));
        assert_eq!(p.message(), "No numbers please!");
    }

    #[test]
    fn test_pattern_invalid() {
        assert!(Pattern::new("(", None).is_err());
    }

    #[test]
    fn test_slash_without_flags_is_literal_when_unbalanced() {
        let p = Pattern::new("/usr", None).unwrap();
        assert_eq!(p.html(), "/usr");
    }

    #[test]
    fn test_check_format() {
        assert!(check_format(FormatCheck::Email, "ben@example.com").is_none());
        assert_eq!(
            check_format(FormatCheck::Email, "not-an-email"),
            Some("Please enter a valid email address")
        );
        assert!(check_format(FormatCheck::Url, "https://example.com/x").is_none());
        assert!(check_format(FormatCheck::Url, "example").is_some());
        assert!(check_format(FormatCheck::Integer, "-42").is_none());
        assert!(check_format(FormatCheck::Integer, "4.2").is_some());
        assert!(check_format(FormatCheck::Float, "4.2").is_none());
        assert!(check_format(FormatCheck::Float, "NaN").is_some());
        assert!(check_format(FormatCheck::Date, "2024-02-29").is_none());
        assert!(check_format(FormatCheck::Date, "2023-02-29").is_some());
        assert!(check_format(FormatCheck::HeaderSafe, "a\r\nBcc: x").is_some());
    }

    #[test]
    fn test_whitelist_sources() {
        assert_eq!(Whitelist::from(" a, b ,,c").values(), ["a", "b", "c"]);
        assert_eq!(Whitelist::from(["x ", " y"]).values(), ["x", "y"]);
        assert!(Whitelist::from(" , ").values().is_empty());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_validation_check() {
        assert_eq!(Validation::check(true, "x"), Validation::Valid);
        assert_eq!(Validation::check(false, "x"), Validation::invalid("x"));
    }
}
