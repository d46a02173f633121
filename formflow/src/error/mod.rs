//! Error types and error handling
//!
//! Everything in [`FormError`] is a fault in the form *definition* or in an
//! external collaborator (session storage). Bad user input never produces an
//! `Err`: it is collected as [`ValidationErrors`](crate::forms::ValidationErrors)
//! and shown when the form is re-rendered.

use thiserror::Error;

/// Failure reported by a [`Session`](crate::csrf::Session) backend
#[derive(Debug, Clone, Error)]
#[error("Session error: {0}")]
pub struct SessionError(pub String);

/// Framework error type
#[derive(Debug, Clone, Error)]
pub enum FormError {
    /// A form or element was created without a usable name
    #[error("Configuration error: {0} must be named")]
    EmptyName(&'static str),

    /// Form method other than `get` or `post`
    #[error("Configuration error: method [{0}] must be one of get, post")]
    InvalidMethod(String),

    /// `set_renderer_named` was given a name no renderer answers to
    #[error("Configuration error: renderer [{0}] cannot be found")]
    UnknownRenderer(String),

    /// A second `pattern()` call on the same element
    #[error("Configuration error: cannot redefine the pattern for [{element}]")]
    PatternRedefined {
        /// Element name
        element: String,
    },

    /// The supplied pattern is not a valid regular expression
    #[error("Configuration error: invalid pattern for [{element}]: {source}")]
    InvalidPattern {
        /// Element name
        element: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// `min`/`max` used on an element that is not a number or integer input
    #[error("Configuration error: [{attribute}] on [{element}] requires a number or integer input")]
    NumericOnly {
        /// Element name
        element: String,
        /// `min` or `max`
        attribute: &'static str,
    },

    /// A `min`/`max` bound that does not parse as a number
    #[error("Configuration error: [{attribute}] on [{element}] is not numeric: {value}")]
    InvalidBound {
        /// Element name
        element: String,
        /// `min` or `max`
        attribute: &'static str,
        /// The configured value
        value: String,
    },

    /// `min` greater than `max`
    #[error("Element {element} has min[{min}] > max[{max}]")]
    MinGreaterThanMax {
        /// Element name
        element: String,
        /// Configured minimum
        min: String,
        /// Configured maximum
        max: String,
    },

    /// `minlength` greater than `maxlength`
    #[error("Element {element} has minlength[{min}] > maxlength[{max}]")]
    MinLengthGreaterThanMaxLength {
        /// Element name
        element: String,
        /// Configured minimum length
        min: usize,
        /// Configured maximum length
        max: usize,
    },

    /// `whitelist()` called with no usable entries
    #[error("Configuration error: whitelist for [{element}] must not be empty")]
    EmptyWhitelist {
        /// Element name
        element: String,
    },

    /// Radio, checkbox or select set with too few members
    #[error("Configuration error: [{element}] needs {required} or more members, found {found}")]
    TooFewMembers {
        /// Element name
        element: String,
        /// Minimum member count for this kind of set
        required: usize,
        /// Members supplied
        found: usize,
    },

    /// `on_success()` called twice
    #[error("Configuration error: success handler for [{form}] is already set")]
    SuccessHandlerRedefined {
        /// Form name
        form: String,
    },

    /// A valid submission arrived but no success handler was configured
    #[error("Configuration error: form [{form}] was submitted successfully but has no success handler")]
    MissingSuccessHandler {
        /// Form name
        form: String,
    },

    /// A validator returned `Invalid` with an empty message
    #[error("Validator function for {element} must return Valid or a non-empty message")]
    InvalidValidatorResult {
        /// Element (or form) name
        element: String,
    },

    /// `render()` called before `process()` established the form identity
    #[error("Form [{form}] cannot be rendered without a form id and token")]
    MissingFormIdentity {
        /// Form name
        form: String,
    },

    /// Session storage failure
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_message() {
        let err = FormError::MinGreaterThanMax {
            element: "age".into(),
            min: "10".into(),
            max: "2".into(),
        };
        assert_eq!(err.to_string(), "Element age has min[10] > max[2]");
    }

    #[test]
    fn test_session_error_is_transparent() {
        let err = FormError::from(SessionError("store offline".into()));
        assert_eq!(err.to_string(), "Session error: store offline");
    }
}
