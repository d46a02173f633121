//! Form elements and the fluent setters they share
//!
//! Every control (input, textarea, button) and every set (fieldset, radios,
//! checkboxes, select) is built around an [`ElementCore`]: its attributes,
//! label, rules, submitted value and errors. The [`ElementBuilder`] trait
//! carries the chainable setters common to both.

use std::fmt;
use std::sync::Arc;

use crate::error::FormError;

use super::element_set::ElementSet;
use super::field::{ButtonType, ElementKind, FieldValue, FormatCheck, InputType};
use super::form::Form;
use super::named_set::{NamedSet, Value};
use super::simplify::simplify;
use super::validation::{check_format, Pattern, Rules, Validation, Whitelist};

/// Flags a child inherits from the set it is added to
pub(crate) const INHERITED_FLAGS: [&str; 3] = ["disabled", "readonly", "required"];

/// State shared by every element and element set
pub struct ElementCore {
    pub(crate) attrs: NamedSet,
    pub(crate) label: String,
    pub(crate) label_right: bool,
    pub(crate) rules: Rules,
    pub(crate) value: FieldValue,
    pub(crate) errors: Vec<String>,
    pub(crate) config_error: Option<FormError>,
    pub(crate) ignore_parent: Vec<String>,
}

impl ElementCore {
    /// Build from a label. A leading `>` places the label after the control.
    /// Name and id are the simplified label.
    pub(crate) fn new(label: &str) -> Self {
        let (label, label_right) = label
            .strip_prefix('>')
            .map_or((label, false), |rest| (rest, true));
        let name = simplify(label);
        let mut core = Self::bare(&name, &name, label);
        core.label_right = label_right;
        if name.is_empty() {
            core.record(FormError::EmptyName("element"));
        }
        core
    }

    /// Build with an explicit name and id
    pub(crate) fn bare(name: &str, id: &str, label: &str) -> Self {
        let mut attrs = NamedSet::default();
        attrs.set_attribute("name", Value::text(name));
        attrs.set_attribute("id", Value::text(id));
        Self {
            attrs,
            label: label.to_owned(),
            label_right: false,
            rules: Rules::default(),
            value: FieldValue::None,
            errors: Vec::new(),
            config_error: None,
            ignore_parent: Vec::new(),
        }
    }

    /// Keep the first configuration error
    pub(crate) fn record(&mut self, error: FormError) {
        if self.config_error.is_none() {
            self.config_error = Some(error);
        }
    }

    /// The `name` attribute, as submitted
    #[must_use]
    pub fn name(&self) -> &str {
        self.attrs.attribute_str("name").unwrap_or_default()
    }

    /// The name without any trailing `[]`; errors are keyed by this
    #[must_use]
    pub fn key(&self) -> &str {
        let name = self.name();
        name.strip_suffix("[]").unwrap_or(name)
    }

    /// The `id` attribute, before the parent prefix is applied
    #[must_use]
    pub fn id(&self) -> &str {
        self.attrs.attribute_str("id").unwrap_or_default()
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the label follows the control
    #[must_use]
    pub const fn label_right(&self) -> bool {
        self.label_right
    }

    /// Placeholder or hint text
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.attrs.meta("note").and_then(Value::as_str)
    }

    /// Attribute and meta storage
    #[must_use]
    pub const fn attrs(&self) -> &NamedSet {
        &self.attrs
    }

    /// Server-side rules
    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Submitted value; empty until the form is processed
    #[must_use]
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Validation messages from the last submission
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True when the last validation produced no errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the `required` attribute is set
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.attrs.has_attribute("required")
    }

    /// Whether the `disabled` attribute is set
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.attrs.has_attribute("disabled")
    }

    /// Whether the `readonly` attribute is set
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.attrs.has_attribute("readonly")
    }

    /// Whether the element renders without a label
    #[must_use]
    pub fn has_no_label(&self) -> bool {
        self.attrs.has_meta("nolabel")
    }

    /// Copy inherited flags from a parent, honouring `ignore_parent`
    pub(crate) fn inherit(&mut self, flags: &[&str]) {
        for flag in flags {
            if !self.ignore_parent.iter().any(|f| f == flag) {
                self.attrs.set_flag(*flag);
            }
        }
    }

    /// Flags from [`INHERITED_FLAGS`] that are set here
    pub(crate) fn inheritable_flags(&self) -> Vec<&'static str> {
        INHERITED_FLAGS
            .into_iter()
            .filter(|f| self.attrs.has_attribute(f))
            .collect()
    }

    /// Check the submitted value, returning every message it earns
    ///
    /// Disabled elements are skipped. An empty value passes unless required,
    /// in which case the required message is the only error. Otherwise the
    /// format, pattern, whitelist and member checks all run, then the range
    /// and length checks. The custom matcher runs only when nothing failed.
    pub(crate) fn validate(
        &self,
        form: &Form,
        check: FormatCheck,
        allowed: Option<&[String]>,
    ) -> Result<Vec<String>, FormError> {
        if self.is_disabled() {
            return Ok(Vec::new());
        }

        let values = self.value.values();
        if values.is_empty() {
            if self.is_required() {
                let message = self
                    .rules
                    .required_message
                    .clone()
                    .unwrap_or_else(|| form.messages().required.clone());
                return Ok(vec![message]);
            }
            return Ok(Vec::new());
        }

        let mut errors = Vec::new();
        for value in &values {
            if let Some(message) = check_format(check, value) {
                push_unique(&mut errors, message);
            }
            if let Some(pattern) = &self.rules.pattern {
                if !pattern.is_match(value) {
                    push_unique(&mut errors, pattern.message());
                }
            }
            if let Some(list) = &self.rules.whitelist {
                if !list.iter().any(|w| w == value) {
                    push_unique(&mut errors, &format!("Please choose one of: {}", list.join(", ")));
                }
            }
            if let Some(allowed) = allowed {
                if !allowed.iter().any(|a| a == value) {
                    push_unique(&mut errors, &form.messages().invalid_choice);
                }
            }
        }

        if let FieldValue::One(single) = &self.value {
            self.check_range(single, &mut errors)?;
            self.check_length(single, &mut errors)?;
        }

        if errors.is_empty() {
            if let Some(matcher) = &self.rules.matcher {
                match matcher(self, form) {
                    Validation::Valid => {}
                    Validation::Invalid(message) if message.is_empty() => {
                        return Err(FormError::InvalidValidatorResult {
                            element: self.key().to_owned(),
                        });
                    }
                    Validation::Invalid(message) => errors.push(message),
                }
            }
        }

        Ok(errors)
    }

    fn bound(&self, attribute: &'static str) -> Result<Option<(f64, &str)>, FormError> {
        let Some(raw) = self.attrs.attribute_str(attribute) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<f64>()
            .map(|n| Some((n, raw)))
            .map_err(|_| FormError::InvalidBound {
                element: self.key().to_owned(),
                attribute,
                value: raw.to_owned(),
            })
    }

    fn check_range(&self, value: &str, errors: &mut Vec<String>) -> Result<(), FormError> {
        let min = self.bound("min")?;
        let max = self.bound("max")?;
        if let (Some((lo, lo_raw)), Some((hi, hi_raw))) = (min, max) {
            if lo > hi {
                return Err(FormError::MinGreaterThanMax {
                    element: self.key().to_owned(),
                    min: lo_raw.to_owned(),
                    max: hi_raw.to_owned(),
                });
            }
        }
        // Non-numeric input is reported by the format check
        let Ok(n) = value.parse::<f64>() else {
            return Ok(());
        };
        if let Some((lo, raw)) = min {
            if n < lo {
                errors.push(format!("Value must be {raw} or more"));
            }
        }
        if let Some((hi, raw)) = max {
            if n > hi {
                errors.push(format!("Value must be {raw} or less"));
            }
        }
        Ok(())
    }

    fn check_length(&self, value: &str, errors: &mut Vec<String>) -> Result<(), FormError> {
        let min = self.rules.minlength;
        let max = self
            .attrs
            .attribute_str("maxlength")
            .and_then(|m| m.parse::<usize>().ok());
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(FormError::MinLengthGreaterThanMaxLength {
                    element: self.key().to_owned(),
                    min: lo,
                    max: hi,
                });
            }
        }
        let len = value.chars().count();
        if let Some(lo) = min {
            if len < lo {
                errors.push(self.rules.minlength_message.clone().unwrap_or_else(|| {
                    format!("Value must be {lo} characters or more")
                }));
            }
        }
        if let Some(hi) = max {
            if len > hi {
                errors.push(self.rules.maxlength_message.clone().unwrap_or_else(|| {
                    format!("Value must be {hi} characters or less")
                }));
            }
        }
        Ok(())
    }
}

fn push_unique(errors: &mut Vec<String>, message: &str) {
    if !errors.iter().any(|e| e == message) {
        errors.push(message.to_owned());
    }
}

impl fmt::Debug for ElementCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementCore")
            .field("name", &self.name())
            .field("label", &self.label)
            .field("attrs", &self.attrs)
            .field("rules", &self.rules)
            .field("value", &self.value)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

/// Chainable setters shared by elements and element sets
///
/// # Examples
///
/// ```rust
/// use formflow::forms::{input, ElementBuilder};
///
/// let name = input("Name").required().note("Your full name").maxlength(80);
/// assert!(name.core().is_required());
/// assert_eq!(name.core().note(), Some("Your full name"));
/// ```
pub trait ElementBuilder: Sized {
    /// Shared state
    fn core(&self) -> &ElementCore;

    /// Mutable shared state
    fn core_mut(&mut self) -> &mut ElementCore;

    /// Store under `key`; a leading underscore routes it to meta
    #[must_use]
    fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.core_mut().attrs.set(key, value.into());
        self
    }

    /// Set an HTML attribute
    #[must_use]
    fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.core_mut().attrs.set_attribute(key, Value::text(value));
        self
    }

    /// Set a boolean HTML attribute
    #[must_use]
    fn flag(mut self, key: &str) -> Self {
        self.core_mut().attrs.set_flag(key);
        self
    }

    /// Set internal metadata
    #[must_use]
    fn meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.core_mut().attrs.set_meta(key, value.into());
        self
    }

    /// Set the `class` attribute
    #[must_use]
    fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Override the id
    #[must_use]
    fn id(self, id: &str) -> Self {
        let id = simplify(id);
        self.attr("id", id)
    }

    /// Override name and id together
    #[must_use]
    fn named(mut self, name: &str) -> Self {
        let name = simplify(name);
        if name.is_empty() {
            self.core_mut().record(FormError::EmptyName("element"));
            return self;
        }
        let suffix = if self.core().name().ends_with("[]") { "[]" } else { "" };
        self.core_mut().attrs.set_attribute("name", Value::text(format!("{name}{suffix}")));
        self.core_mut().attrs.set_attribute("id", Value::text(name));
        self
    }

    /// Replace the label
    #[must_use]
    fn label(mut self, label: impl Into<String>) -> Self {
        self.core_mut().label = label.into();
        self
    }

    /// Render the label after the control
    #[must_use]
    fn label_right(mut self) -> Self {
        self.core_mut().label_right = true;
        self
    }

    /// Render without a label
    #[must_use]
    fn no_label(self) -> Self {
        self.meta("nolabel", Value::Flag)
    }

    /// Placeholder or hint text
    #[must_use]
    fn note(self, note: impl Into<String>) -> Self {
        self.meta("note", Value::text(note))
    }

    /// Mark as required with the default message
    #[must_use]
    fn required(self) -> Self {
        self.flag("required")
    }

    /// Mark as required with a custom message
    #[must_use]
    fn required_with(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.core_mut().rules.required_message = Some(message);
        }
        self.flag("required")
    }

    /// Mark as disabled; disabled elements are not validated
    #[must_use]
    fn disabled(self) -> Self {
        self.flag("disabled")
    }

    /// Mark as readonly; readonly elements are still validated
    #[must_use]
    fn readonly(self) -> Self {
        self.flag("readonly")
    }

    /// Set the `autofocus` attribute
    #[must_use]
    fn autofocus(self) -> Self {
        self.flag("autofocus")
    }

    /// Set the `autocomplete` attribute
    #[must_use]
    fn autocomplete(self, value: impl Into<String>) -> Self {
        self.attr("autocomplete", value)
    }

    /// Require the value to match `pattern` (`regex` or `/regex/flags`)
    #[must_use]
    fn pattern(self, pattern: &str) -> Self {
        self.pattern_with(pattern, "")
    }

    /// Require a pattern match, failing with `message`
    ///
    /// The message doubles as the `title` attribute unless one is set.
    #[must_use]
    fn pattern_with(mut self, pattern: &str, message: &str) -> Self {
        let element = self.core().key().to_owned();
        let core = self.core_mut();
        if core.rules.pattern.is_some() {
            core.record(FormError::PatternRedefined { element });
            return self;
        }
        match Pattern::new(pattern, Some(message)) {
            Ok(compiled) => {
                if !core.attrs.has_attribute("title") {
                    core.attrs.set_attribute("title", Value::text(compiled.message()));
                }
                core.rules.pattern = Some(compiled);
            }
            Err(source) => core.record(FormError::InvalidPattern { element, source }),
        }
        self
    }

    /// Restrict the value to a list
    #[must_use]
    fn whitelist(mut self, values: impl Into<Whitelist>) -> Self {
        let values = values.into();
        if values.values().is_empty() {
            let element = self.core().key().to_owned();
            self.core_mut().record(FormError::EmptyWhitelist { element });
        } else {
            self.core_mut().rules.whitelist = Some(values.values().to_vec());
        }
        self
    }

    /// Attach a custom validator, run after every built-in check passed
    #[must_use]
    fn match_with<F>(mut self, validator: F) -> Self
    where
        F: Fn(&ElementCore, &Form) -> Validation + Send + Sync + 'static,
    {
        self.core_mut().rules.matcher = Some(Arc::new(validator));
        self
    }

    /// Minimum length in characters, checked server-side only
    #[must_use]
    fn minlength(mut self, min: usize) -> Self {
        self.core_mut().rules.minlength = Some(min);
        self
    }

    /// Minimum length with a custom message
    #[must_use]
    fn minlength_with(mut self, min: usize, message: impl Into<String>) -> Self {
        self.core_mut().rules.minlength_message = Some(message.into());
        self.minlength(min)
    }

    /// Maximum length, rendered as `maxlength` and checked server-side
    #[must_use]
    fn maxlength(self, max: usize) -> Self {
        self.attr("maxlength", max.to_string())
    }

    /// Maximum length with a custom message
    #[must_use]
    fn maxlength_with(mut self, max: usize, message: impl Into<String>) -> Self {
        self.core_mut().rules.maxlength_message = Some(message.into());
        self.maxlength(max)
    }

    /// Do not inherit these flags (`disabled`, `readonly`, `required`) from a parent set
    #[must_use]
    fn ignore_parent(mut self, flags: &[&str]) -> Self {
        self.core_mut().ignore_parent = flags.iter().map(|f| f.trim().to_owned()).collect();
        self
    }

    /// Log the rendered markup at debug level
    #[must_use]
    fn show_html(self) -> Self {
        self.meta("show_html", Value::Flag)
    }

    /// Log the captured value at debug level
    #[must_use]
    fn show_submitted(self) -> Self {
        self.meta("show_submitted", Value::Flag)
    }

    /// Log validation errors at debug level
    #[must_use]
    fn show_errors(self) -> Self {
        self.meta("show_errors", Value::Flag)
    }
}

/// Suggestions attached to an input via `<datalist>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datalist {
    /// Explicit list id; derived from the element id when absent
    pub id: Option<String>,
    /// Suggested values
    pub values: Vec<String>,
}

/// A single control: input, textarea or button
#[derive(Debug)]
pub struct FormElement {
    pub(crate) core: ElementCore,
    pub(crate) kind: ElementKind,
    pub(crate) datalist: Option<Datalist>,
}

impl FormElement {
    pub(crate) fn new(label: &str, kind: ElementKind) -> Self {
        Self {
            core: ElementCore::new(label),
            kind,
            datalist: None,
        }
    }

    /// Element kind
    #[must_use]
    pub const fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Attached datalist, if any
    #[must_use]
    pub const fn list(&self) -> Option<&Datalist> {
        self.datalist.as_ref()
    }

    /// Change the input type; ignored on textareas and buttons
    #[must_use]
    pub fn input_type(mut self, name: &str) -> Self {
        if let ElementKind::Input(_) = self.kind {
            self.kind = ElementKind::Input(InputType::parse(name));
        }
        self
    }

    /// Set the HTML default value
    #[must_use]
    pub fn value(self, value: impl Into<String>) -> Self {
        self.attr("value", value)
    }

    /// Lower bound; number and integer inputs only
    #[must_use]
    pub fn min(self, min: impl fmt::Display) -> Self {
        self.bound("min", min.to_string())
    }

    /// Upper bound; number and integer inputs only
    #[must_use]
    pub fn max(self, max: impl fmt::Display) -> Self {
        self.bound("max", max.to_string())
    }

    fn bound(mut self, attribute: &'static str, value: String) -> Self {
        let numeric = matches!(&self.kind, ElementKind::Input(t) if t.is_numeric());
        if !numeric {
            let element = self.core.key().to_owned();
            self.core.record(FormError::NumericOnly { element, attribute });
            return self;
        }
        if value.trim().parse::<f64>().is_err() {
            let element = self.core.key().to_owned();
            self.core.record(FormError::InvalidBound { element, attribute, value });
            return self;
        }
        self.attr(attribute, value)
    }

    /// Attach a datalist; the list id is derived from the element id when `None`
    #[must_use]
    pub fn datalist<S: AsRef<str>>(mut self, values: &[S], id: Option<&str>) -> Self {
        self.datalist = Some(Datalist {
            id: id.map(str::to_owned),
            values: values.iter().map(|v| v.as_ref().to_owned()).collect(),
        });
        self
    }

    pub(crate) fn is_button(&self) -> bool {
        matches!(self.kind, ElementKind::Button(_))
    }

    pub(crate) fn button_type(&self) -> Option<ButtonType> {
        match self.kind {
            ElementKind::Button(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn validate(&self, form: &Form) -> Result<Vec<String>, FormError> {
        match &self.kind {
            ElementKind::Button(_) => Ok(Vec::new()),
            ElementKind::TextArea => self.core.validate(form, FormatCheck::None, None),
            ElementKind::Input(t) => self.core.validate(form, t.format_check(), None),
        }
    }
}

impl ElementBuilder for FormElement {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }
}

/// A child of a form or fieldset
#[derive(Debug)]
pub enum Node {
    /// A control
    Element(FormElement),
    /// A fieldset, radio set, checkbox set or select
    Set(ElementSet),
    /// Literal markup, output verbatim
    Text(String),
}

impl Node {
    /// Shared state, unless this is text
    #[must_use]
    pub const fn core(&self) -> Option<&ElementCore> {
        match self {
            Self::Element(e) => Some(&e.core),
            Self::Set(s) => Some(&s.core),
            Self::Text(_) => None,
        }
    }

    /// Apply a parent's flags, then push this set's own flags down to its children
    pub(crate) fn inherit(&mut self, flags: &[&str]) {
        match self {
            Self::Element(e) => e.core.inherit(flags),
            Self::Set(s) => {
                s.core.inherit(flags);
                let own = s.core.inheritable_flags();
                for child in &mut s.children {
                    child.inherit(&own);
                }
            }
            Self::Text(_) => {}
        }
    }

    pub(crate) fn config_error(&self) -> Option<FormError> {
        match self {
            Self::Element(e) => e.core.config_error.clone(),
            Self::Set(s) => s
                .core
                .config_error
                .clone()
                .or_else(|| s.children.iter().find_map(Self::config_error)),
            Self::Text(_) => None,
        }
    }

    pub(crate) fn visit<'a>(&'a self, f: &mut impl FnMut(&'a ElementCore)) {
        match self {
            Self::Element(e) => f(&e.core),
            Self::Set(s) => {
                f(&s.core);
                for child in &s.children {
                    child.visit(f);
                }
            }
            Self::Text(_) => {}
        }
    }
}

impl From<FormElement> for Node {
    fn from(element: FormElement) -> Self {
        Self::Element(element)
    }
}

impl From<ElementSet> for Node {
    fn from(set: ElementSet) -> Self {
        Self::Set(set)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::builder::{email, input, integer, textarea};

    #[test]
    fn test_label_right_prefix() {
        let el = input(">Accept terms");
        assert!(el.core().label_right());
        assert_eq!(el.core().label(), "Accept terms");
        assert_eq!(el.core().name(), "accept-terms");
        assert_eq!(el.core().id(), "accept-terms");
    }

    #[test]
    fn test_datalist_attached() {
        let el = input("Browser").datalist(&["Firefox", "Chrome"], Some("browsers"));
        let list = el.list().unwrap();
        assert_eq!(list.id.as_deref(), Some("browsers"));
        assert_eq!(list.values, ["Firefox", "Chrome"]);
        assert!(input("Plain").list().is_none());
    }

    #[test]
    fn test_empty_label_is_config_error() {
        let el = input("  ");
        assert!(matches!(el.core.config_error, Some(FormError::EmptyName(_))));
    }

    #[test]
    fn test_min_on_text_input_is_config_error() {
        let el = input("Age").min(2);
        assert!(matches!(
            el.core.config_error,
            Some(FormError::NumericOnly { attribute: "min", .. })
        ));
    }

    #[test]
    fn test_min_max_on_integer() {
        let el = integer("Age").min(2).max(10);
        assert_eq!(el.core().attrs().attribute_str("min"), Some("2"));
        assert_eq!(el.core().attrs().attribute_str("max"), Some("10"));
        assert!(el.core.config_error.is_none());
    }

    #[test]
    fn test_pattern_sets_title_once() {
        let el = input("Code").attr("title", "Code please").pattern("^[A-Z]+$");
        assert_eq!(el.core().attrs().attribute_str("title"), Some("Code please"));

        let el = input("Code").pattern_with("^[A-Z]+$", "Upper case only");
        assert_eq!(el.core().attrs().attribute_str("title"), Some("Upper case only"));
    }

    #[test]
    fn test_pattern_redefined() {
        let el = input("Code").pattern("a").pattern("b");
        assert!(matches!(el.core.config_error, Some(FormError::PatternRedefined { .. })));
    }

    #[test]
    fn test_invalid_pattern() {
        let el = input("Code").pattern("(");
        assert!(matches!(el.core.config_error, Some(FormError::InvalidPattern { .. })));
    }

    #[test]
    fn test_empty_whitelist() {
        let el = input("Colour").whitelist(" , ");
        assert!(matches!(el.core.config_error, Some(FormError::EmptyWhitelist { .. })));
    }

    #[test]
    fn test_textarea_default_maxlength() {
        let el = textarea("Message");
        assert_eq!(el.core().attrs().attribute_str("maxlength"), Some("2000"));
    }

    #[test]
    fn test_named_override() {
        let el = email("Your email").named("Email");
        assert_eq!(el.core().name(), "email");
        assert_eq!(el.core().label(), "Your email");
    }

    #[test]
    fn test_underscore_routes_to_meta() {
        let el = input("Name").set("_hint", "x").set("data-x", "y");
        assert!(el.core().attrs().has_meta("hint"));
        assert!(el.core().attrs().has_attribute("data-x"));
    }

    #[test]
    fn test_inherit_honours_ignore_parent() {
        let mut node = Node::from(input("Name").ignore_parent(&["required"]));
        node.inherit(&["required", "disabled"]);
        let core = node.core().unwrap();
        assert!(core.is_disabled());
        assert!(!core.is_required());
    }
}
