//! Validation failures collected during one `process()` call
//!
//! Failures are kept in the order elements were validated. Whole-form
//! failures live under [`FORM_ERRORS_KEY`].

/// Key under which whole-form validator failures are recorded
pub const FORM_ERRORS_KEY: &str = "_form";

/// One failure: which element, and what to tell the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Element key, or [`FORM_ERRORS_KEY`]
    pub field: String,
    /// Message shown next to the element
    pub message: String,
}

/// Failures of the last submission, in validation order
///
/// ```rust
/// use formflow::forms::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("age", "Value must be 10 or less");
/// errors.add("age", "Whole numbers only");
/// errors.add_form_error("Passwords do not match");
///
/// assert_eq!(errors.count(), 3);
/// assert_eq!(errors.for_field("age").next(), Some("Value must be 10 or less"));
/// assert_eq!(errors.form_errors().collect::<Vec<_>>(), ["Passwords do not match"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    entries: Vec<FieldError>,
}

impl ValidationErrors {
    /// No failures
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Record a failure for an element
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record a whole-form failure
    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.add(FORM_ERRORS_KEY, message);
    }

    /// Whether anything failed
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Messages recorded for one element
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// First message recorded for one element
    #[must_use]
    pub fn first_for(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Messages from the whole-form validator
    pub fn form_errors(&self) -> impl Iterator<Item = &str> + '_ {
        self.for_field(FORM_ERRORS_KEY)
    }

    /// Total number of failures
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Forget every failure
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
