//! Submitted request data
//!
//! [`RequestSource`] is what a form reads a submission from. Web frameworks
//! adapt their request type to it; [`SubmittedRequest`] is a ready-made
//! implementation backed by decoded name/value pairs.

use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// Form submission method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// Query-string submission
    Get,
    /// Request-body submission
    #[default]
    Post,
}

impl Method {
    /// Lower-case name, as rendered in the `method` attribute
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
        }
    }
}

impl FromStr for Method {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            _ => Err(FormError::InvalidMethod(s.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to a submitted request
pub trait RequestSource {
    /// Method the request arrived with
    fn method(&self) -> Method;

    /// Whether the request carries any submitted fields
    fn has_fields(&self) -> bool;

    /// First value submitted under `name`, trimmed
    fn field(&self, name: &str) -> Option<&str>;

    /// Every value submitted under `name`, trimmed, in order
    fn fields(&self, name: &str) -> Vec<&str>;

    /// A submission arrived via `method` and carries data
    fn is_submitted_via(&self, method: Method) -> bool {
        self.method() == method && self.has_fields()
    }
}

/// Decoded request: a method plus ordered name/value pairs
///
/// # Examples
///
/// ```rust
/// use formflow::request::{Method, RequestSource, SubmittedRequest};
///
/// let req = SubmittedRequest::from_urlencoded(Method::Post, "name=+Ben+&tags%5B%5D=a&tags%5B%5D=b");
/// assert_eq!(req.field("name"), Some("Ben"));
/// assert_eq!(req.fields("tags[]"), vec!["a", "b"]);
/// assert!(req.is_submitted_via(Method::Post));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedRequest {
    method: Method,
    pairs: Vec<(String, String)>,
}

impl SubmittedRequest {
    /// Build from pairs; values are trimmed
    #[must_use]
    pub fn from_pairs<K, V>(method: Method, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        Self {
            method,
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.as_ref().trim().to_owned()))
                .collect(),
        }
    }

    /// Decode an `application/x-www-form-urlencoded` body or query string
    #[must_use]
    pub fn from_urlencoded(method: Method, input: &str) -> Self {
        Self::from_pairs(method, url::form_urlencoded::parse(input.as_bytes()))
    }

    /// A plain page view: GET with no fields
    #[must_use]
    pub const fn get() -> Self {
        Self {
            method: Method::Get,
            pairs: Vec::new(),
        }
    }

    /// A POST submission
    #[must_use]
    pub fn post<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        Self::from_pairs(Method::Post, pairs)
    }

    /// All pairs in submission order
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

impl RequestSource for SubmittedRequest {
    fn method(&self) -> Method {
        self.method
    }

    fn has_fields(&self) -> bool {
        !self.pairs.is_empty()
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn fields(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("POST".parse::<Method>().unwrap(), Method::Post);
        assert_eq!(" get ".parse::<Method>().unwrap(), Method::Get);
        assert!(matches!("put".parse::<Method>(), Err(FormError::InvalidMethod(m)) if m == "put"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let req = SubmittedRequest::post([("name", "  Ben \n")]);
        assert_eq!(req.field("name"), Some("Ben"));
    }

    #[test]
    fn test_get_is_not_a_submission() {
        let req = SubmittedRequest::get();
        assert!(!req.is_submitted_via(Method::Get));
        assert!(!req.is_submitted_via(Method::Post));
    }

    #[test]
    fn test_method_must_match() {
        let req = SubmittedRequest::post([("q", "rust")]);
        assert!(!req.is_submitted_via(Method::Get));
    }

    #[test]
    fn test_missing_field() {
        let req = SubmittedRequest::post([("a", "1")]);
        assert_eq!(req.field("b"), None);
        assert!(req.fields("b").is_empty());
    }
}
