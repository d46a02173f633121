//! The root form and its processing lifecycle
//!
//! [`Form::process`] decides what a request means for the form:
//!
//! - not submitted: issue a token and render the form
//! - submitted with a foreign form id or a bad token: refuse with a short message
//! - submitted and invalid: re-render with the submitted values and errors
//! - submitted and valid: hand the form to the success handler

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{FormsConfig, MessageSettings};
use crate::csrf::TokenStore;
use crate::error::FormError;
use crate::render::{self, BasicHtmlRenderer, Renderer};
use crate::request::{Method, RequestSource};

use super::element::{ElementCore, Node};
use super::element_set::SetKind;
use super::error::ValidationErrors;
use super::field::FieldValue;
use super::fingerprint::fingerprint;
use super::named_set::{NamedSet, Value};
use super::simplify::simplify;
use super::validation::{FormValidator, Validation};

/// Hidden field carrying the form fingerprint
pub const FORM_ID_FIELD: &str = "_form_id";

/// Hidden field carrying the anti-CSRF token
pub const FORM_TOKEN_FIELD: &str = "_form_token";

/// Called with the form after a valid submission; returns the page output
pub type SuccessHandler = Arc<dyn Fn(&Form) -> String + Send + Sync>;

/// Where a `process()` call ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// First view; the form was rendered with a fresh token
    Unsubmitted,
    /// Form id or token did not match; nothing was validated
    TokenInvalid,
    /// Validation failed; the form was re-rendered with errors
    Invalid,
    /// Validation passed; the output is the success handler's
    Valid,
}

/// Result of processing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Final state
    pub state: FormState,
    /// Page output: form markup, mismatch message or success output
    pub html: String,
}

/// A form: the root of the element tree plus its submission lifecycle
pub struct Form {
    name: String,
    action: String,
    method: Method,
    attrs: NamedSet,
    children: Vec<Node>,
    renderer: Arc<dyn Renderer>,
    on_success: Option<SuccessHandler>,
    validator: Option<FormValidator>,
    messages: MessageSettings,
    form_id: Option<String>,
    form_token: Option<String>,
    errors: ValidationErrors,
    submitting: bool,
    config_error: Option<FormError>,
}

impl Form {
    /// Create a form; its id is `form-` followed by the simplified name
    #[must_use]
    pub fn new(name: &str, action: &str) -> Self {
        let mut attrs = NamedSet::default();
        attrs.set_attribute("id", Value::text(simplify(&format!("form-{name}"))));
        let config_error = name.trim().is_empty().then_some(FormError::EmptyName("form"));
        Self {
            name: name.to_owned(),
            action: action.to_owned(),
            method: Method::Post,
            attrs,
            children: Vec::new(),
            renderer: Arc::new(BasicHtmlRenderer::default()),
            on_success: None,
            validator: None,
            messages: MessageSettings::default(),
            form_id: None,
            form_token: None,
            errors: ValidationErrors::new(),
            submitting: false,
            config_error,
        }
    }

    fn record(&mut self, error: FormError) {
        if self.config_error.is_none() {
            self.config_error = Some(error);
        }
    }

    /// Set the method, `post` or `get` in any case
    #[must_use]
    pub fn method(mut self, method: &str) -> Self {
        match method.parse() {
            Ok(m) => self.method = m,
            Err(e) => self.record(e),
        }
        self
    }

    /// Set an attribute on the `<form>` tag
    #[must_use]
    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.set(key, Value::text(value));
        self
    }

    /// Set a boolean attribute on the `<form>` tag
    #[must_use]
    pub fn flag(mut self, key: &str) -> Self {
        self.attrs.set_flag(key);
        self
    }

    /// Set the `class` attribute
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a child; it inherits the form's `disabled`, `readonly` and `required` flags
    #[must_use]
    pub fn add(mut self, node: impl Into<Node>) -> Self {
        let mut node = node.into();
        let flags: Vec<&str> = super::element::INHERITED_FLAGS
            .into_iter()
            .filter(|f| self.attrs.has_attribute(f))
            .collect();
        node.inherit(&flags);
        self.children.push(node);
        self
    }

    /// Append a child only when `condition` holds
    #[must_use]
    pub fn add_if(self, condition: bool, node: impl Into<Node>) -> Self {
        if condition {
            self.add(node)
        } else {
            self
        }
    }

    /// Set the success handler; setting it twice is a configuration error
    #[must_use]
    pub fn on_success<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Self) -> String + Send + Sync + 'static,
    {
        if self.on_success.is_some() {
            let form = self.name.clone();
            self.record(FormError::SuccessHandlerRedefined { form });
        } else {
            self.on_success = Some(Arc::new(handler));
        }
        self
    }

    /// Whole-form validator, run once every element passed
    #[must_use]
    pub fn validate_with<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Self) -> Validation + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Render with a custom renderer
    #[must_use]
    pub fn set_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Render with a built-in renderer looked up by name
    #[must_use]
    pub fn set_renderer_named(mut self, name: &str) -> Self {
        match render::named(name, &crate::config::RenderSettings::default()) {
            Some(renderer) => self.renderer = renderer,
            None => self.record(FormError::UnknownRenderer(name.to_owned())),
        }
        self
    }

    /// Apply renderer settings and messages from configuration
    #[must_use]
    pub fn configure(mut self, config: &FormsConfig) -> Self {
        self.messages = config.messages.clone();
        match render::named(&config.render.renderer, &config.render) {
            Some(renderer) => self.renderer = renderer,
            None => self.record(FormError::UnknownRenderer(config.render.renderer.clone())),
        }
        self
    }

    /// Form name as given
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `id` attribute
    #[must_use]
    pub fn id(&self) -> &str {
        self.attrs.attribute_str("id").unwrap_or_default()
    }

    /// Target URL
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Submission method
    #[must_use]
    pub const fn http_method(&self) -> Method {
        self.method
    }

    /// Attributes of the `<form>` tag
    #[must_use]
    pub const fn attrs(&self) -> &NamedSet {
        &self.attrs
    }

    /// Top-level children
    #[must_use]
    pub fn elements(&self) -> &[Node] {
        &self.children
    }

    /// User-facing messages
    #[must_use]
    pub const fn messages(&self) -> &MessageSettings {
        &self.messages
    }

    /// Whether the last `process()` handled a submission
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Fingerprint established by the last `process()`
    #[must_use]
    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    /// Token issued (or received) by the last `process()`
    #[must_use]
    pub fn form_token(&self) -> Option<&str> {
        self.form_token.as_deref()
    }

    /// All validation errors
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Whether the last validation produced any error
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// First error for an element, looked up by label or name
    #[must_use]
    pub fn error_for(&self, label_or_name: &str) -> Option<&str> {
        let key = self.element(label_or_name).map_or(label_or_name, ElementCore::key);
        self.errors.first_for(key)
    }

    /// Form-level errors from the whole-form validator
    #[must_use]
    pub fn form_errors(&self) -> impl Iterator<Item = &str> + '_ {
        self.errors.form_errors()
    }

    /// Find an element anywhere in the tree by label or name
    #[must_use]
    pub fn element(&self, label_or_name: &str) -> Option<&ElementCore> {
        let wanted = simplify(label_or_name);
        let mut found = None;
        for child in &self.children {
            child.visit(&mut |core| {
                let hit = core.label() == label_or_name
                    || core.key() == wanted
                    || core.name() == label_or_name;
                if found.is_none() && hit {
                    found = Some(core);
                }
            });
        }
        found
    }

    /// Submitted value(s) of an element
    #[must_use]
    pub fn values_of(&self, label_or_name: &str) -> Option<&FieldValue> {
        self.element(label_or_name).map(ElementCore::value)
    }

    /// Submitted value of an element; the first one for multi-valued sets
    #[must_use]
    pub fn value_of(&self, label_or_name: &str) -> Option<&str> {
        self.values_of(label_or_name).and_then(FieldValue::as_str)
    }

    fn check_config(&self) -> Result<(), FormError> {
        if let Some(error) = &self.config_error {
            return Err(error.clone());
        }
        match self.children.iter().find_map(Node::config_error) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Handle one request
    ///
    /// # Errors
    ///
    /// Configuration errors in the form definition, a validator returning an
    /// empty message, a valid submission with no success handler, and token
    /// store failures. Bad user input is never an error.
    pub fn process<R, T>(&mut self, request: &R, tokens: &T) -> Result<Outcome, FormError>
    where
        R: RequestSource + ?Sized,
        T: TokenStore + ?Sized,
    {
        self.check_config()?;
        let form_id = fingerprint(self);
        self.form_id = Some(form_id.clone());
        self.errors.clear();
        self.submitting = false;
        for child in &mut self.children {
            reset(child);
        }

        if !request.is_submitted_via(self.method) {
            self.form_token = Some(tokens.issue(&form_id)?);
            debug!(form = %self.name, form_id = %form_id, "rendering unsubmitted form");
            let html = self.render()?;
            return Ok(Outcome { state: FormState::Unsubmitted, html });
        }

        if request.field(FORM_ID_FIELD) != Some(form_id.as_str()) {
            warn!(form = %self.name, "form id mismatch");
            return Ok(Outcome {
                state: FormState::TokenInvalid,
                html: self.messages.id_mismatch.clone(),
            });
        }

        let token = request.field(FORM_TOKEN_FIELD).unwrap_or_default().to_owned();
        if !tokens.check(&form_id, &token)? {
            warn!(form = %self.name, "form token mismatch");
            return Ok(Outcome {
                state: FormState::TokenInvalid,
                html: self.messages.token_mismatch.clone(),
            });
        }

        self.submitting = true;
        self.form_token = Some(token);
        for child in &mut self.children {
            capture(child, request);
        }

        let mut results = Vec::new();
        for child in &self.children {
            self.collect(child, &mut results)?;
        }
        let mut results = results.into_iter();
        let mut errors = ValidationErrors::new();
        for child in &mut self.children {
            apply(child, &mut results, &mut errors);
        }
        self.errors = errors;

        if !self.errors.has_errors() {
            if let Some(validator) = self.validator.clone() {
                match validator(self) {
                    Validation::Valid => {}
                    Validation::Invalid(message) if message.is_empty() => {
                        return Err(FormError::InvalidValidatorResult {
                            element: self.name.clone(),
                        });
                    }
                    Validation::Invalid(message) => self.errors.add_form_error(message),
                }
            }
        }

        if !self.errors.has_errors() {
            let handler = self.on_success.clone().ok_or_else(|| FormError::MissingSuccessHandler {
                form: self.name.clone(),
            })?;
            tokens.clear(&form_id)?;
            info!(form = %self.name, "form submission accepted");
            let html = handler(self);
            return Ok(Outcome { state: FormState::Valid, html });
        }

        debug!(form = %self.name, errors = self.errors.count(), "form submission rejected");
        tokens.clear(&form_id)?;
        self.form_token = Some(tokens.issue(&form_id)?);
        let html = self.render()?;
        Ok(Outcome { state: FormState::Invalid, html })
    }

    fn collect(&self, node: &Node, out: &mut Vec<Vec<String>>) -> Result<(), FormError> {
        match node {
            Node::Element(e) => out.push(e.validate(self)?),
            Node::Set(s) => {
                out.push(s.validate(self)?);
                for child in &s.children {
                    self.collect(child, out)?;
                }
            }
            Node::Text(_) => {}
        }
        Ok(())
    }

    /// Render with the current state
    ///
    /// # Errors
    ///
    /// [`FormError::MissingFormIdentity`] when called before `process()`.
    pub fn render(&self) -> Result<String, FormError> {
        if self.form_id.is_none() || self.form_token.is_none() {
            return Err(FormError::MissingFormIdentity { form: self.name.clone() });
        }
        let html = self.renderer.render_form(self);
        if self.attrs.has_meta("show_html") {
            debug!(form = %self.name, html = %html, "rendered form");
        }
        Ok(html)
    }
}

fn reset(node: &mut Node) {
    match node {
        Node::Element(e) => {
            e.core.value = FieldValue::None;
            e.core.errors.clear();
        }
        Node::Set(s) => {
            s.core.value = FieldValue::None;
            s.core.errors.clear();
            s.children.iter_mut().for_each(reset);
        }
        Node::Text(_) => {}
    }
}

fn capture<R: RequestSource + ?Sized>(node: &mut Node, request: &R) {
    let (core, multi) = match node {
        Node::Element(e) if e.is_button() => return,
        Node::Element(e) => (&mut e.core, false),
        Node::Set(s) if s.kind == SetKind::Fieldset => {
            for child in &mut s.children {
                capture(child, request);
            }
            return;
        }
        Node::Set(s) => (&mut s.core, s.kind.is_multi()),
        Node::Text(_) => return,
    };
    core.value = if multi {
        FieldValue::Many(request.fields(core.name()).into_iter().map(str::to_owned).collect())
    } else {
        request.field(core.name()).map_or(FieldValue::None, FieldValue::from)
    };
    if core.attrs.has_meta("show_submitted") {
        debug!(element = %core.key(), value = ?core.value, "captured submitted value");
    }
}

fn apply(
    node: &mut Node,
    results: &mut impl Iterator<Item = Vec<String>>,
    errors: &mut ValidationErrors,
) {
    let core = match node {
        Node::Element(e) => &mut e.core,
        Node::Set(s) => &mut s.core,
        Node::Text(_) => return,
    };
    core.errors = results.next().unwrap_or_default();
    for message in &core.errors {
        errors.add(core.key(), message.as_str());
    }
    if core.attrs.has_meta("show_errors") && !core.errors.is_empty() {
        debug!(element = %core.key(), errors = ?core.errors, "validation errors");
    }
    if let Node::Set(s) = node {
        for child in &mut s.children {
            apply(child, results, errors);
        }
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("action", &self.action)
            .field("method", &self.method)
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("renderer", &self.renderer.name())
            .field("form_id", &self.form_id)
            .field("errors", &self.errors)
            .field("submitting", &self.submitting)
            .finish_non_exhaustive()
    }
}
