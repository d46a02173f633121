//! Form field types and submitted values
//!
//! Defines the input types an element can carry, the built-in format check
//! each type selects, and the shape of a submitted value.

use std::fmt;

/// HTML input types
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputType {
    /// Text input (default)
    #[default]
    Text,
    /// Search input
    Search,
    /// Telephone input
    Tel,
    /// Email input
    Email,
    /// URL input
    Url,
    /// Date input
    Date,
    /// Number (float) input
    Number,
    /// Integer input; rendered as `number`
    Integer,
    /// Yes/no style input; rendered as `text`
    Boolean,
    /// Password input (masked)
    Password,
    /// Hidden input
    Hidden,
    /// Single checkbox
    Checkbox,
    /// Single radio button
    Radio,
    /// Any other type, passed through untouched
    Other(String),
}

impl InputType {
    /// Parse a type name, case-insensitively, accepting the `int` and `bool` aliases
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "search" => Self::Search,
            "tel" => Self::Tel,
            "email" => Self::Email,
            "url" => Self::Url,
            "date" => Self::Date,
            "number" => Self::Number,
            "int" | "integer" => Self::Integer,
            "bool" | "boolean" => Self::Boolean,
            "password" => Self::Password,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Get the type name as stored in the element's `type` attribute
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Search => "search",
            Self::Tel => "tel",
            Self::Email => "email",
            Self::Url => "url",
            Self::Date => "date",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Password => "password",
            Self::Hidden => "hidden",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Other(name) => name,
        }
    }

    /// The server-side format check this type implies
    #[must_use]
    pub const fn format_check(&self) -> FormatCheck {
        match self {
            Self::Text | Self::Search | Self::Tel => FormatCheck::HeaderSafe,
            Self::Date => FormatCheck::Date,
            Self::Email => FormatCheck::Email,
            Self::Url => FormatCheck::Url,
            Self::Number => FormatCheck::Float,
            Self::Integer => FormatCheck::Integer,
            Self::Boolean => FormatCheck::Boolean,
            Self::Password | Self::Hidden | Self::Checkbox | Self::Radio | Self::Other(_) => {
                FormatCheck::None
            }
        }
    }

    /// Whether `min`/`max` may be used with this type
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }

    /// Checkboxes and radios keep their `value` attribute when rendered
    #[must_use]
    pub const fn is_choice(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in format checks selected by [`InputType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCheck {
    /// No check
    None,
    /// No carriage returns or line feeds
    HeaderSafe,
    /// `YYYY-MM-DD`
    Date,
    /// Email address
    Email,
    /// Absolute URL
    Url,
    /// Floating point number
    Float,
    /// Whole number
    Integer,
    /// yes/no, true/false, on/off, 1/0 and friends
    Boolean,
}

/// Button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonType {
    /// Plain button
    #[default]
    Button,
    /// Submits the form
    Submit,
    /// Resets the form
    Reset,
}

impl ButtonType {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

/// Kind of leaf element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// `<input>`
    Input(InputType),
    /// `<textarea>`
    TextArea,
    /// `<button>`
    Button(ButtonType),
}

/// A submitted (or initially selected) value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    /// Nothing submitted
    #[default]
    None,
    /// One value
    One(String),
    /// Several values, from `name[]` style fields
    Many(Vec<String>),
}

impl FieldValue {
    /// True when nothing, an empty string, or an empty list was submitted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::One(s) => s.is_empty(),
            Self::Many(v) => v.iter().all(String::is_empty),
        }
    }

    /// The single value, or the first of several
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::One(s) => Some(s),
            Self::Many(v) => v.first().map(String::as_str),
        }
    }

    /// Whether `candidate` is (one of) the value(s)
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            Self::None => false,
            Self::One(s) => s == candidate,
            Self::Many(v) => v.iter().any(|s| s == candidate),
        }
    }

    /// All non-empty values
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::None => Vec::new(),
            Self::One(s) if s.is_empty() => Vec::new(),
            Self::One(s) => vec![s.as_str()],
            Self::Many(v) => v.iter().map(String::as_str).filter(|s| !s.is_empty()).collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for FieldValue {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldValue {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|s| (*s).to_owned()).collect())
    }
}
