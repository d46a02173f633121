//! The built-in HTML renderer

use std::fmt::{self, Write};
use std::sync::Arc;

use crate::config::RenderSettings;
use crate::forms::{
    select_key, simplify, ElementBuilder, ElementCore, ElementKind, ElementSet, FieldValue, Form,
    FormElement, InputType, Member, Members, FORM_ID_FIELD, FORM_TOKEN_FIELD,
};

use super::{escape, RenderContext, Renderer, Target};

/// Replaces the error block at the top of a form that failed validation
pub type ErrorBlockFormatter = Arc<dyn Fn(&Form) -> String + Send + Sync>;

/// Replaces the markup of an element's error message
pub type ElementErrorFormatter = Arc<dyn Fn(&ElementCore, &Form) -> String + Send + Sync>;

/// Wraps each member of a radio or checkbox set.
/// Called with the member markup, the set key, the member index and the last index.
pub type AffixFormatter = Arc<dyn Fn(&str, &str, usize, usize) -> String + Send + Sync>;

/// Plain HTML output with optional formatter hooks
///
/// # Examples
///
/// ```rust
/// use formflow::render::{BasicHtmlRenderer, Renderer, Target};
///
/// let renderer = BasicHtmlRenderer::new()
///     .with_target(Target::Html4)
///     .with_affixes("<p>", "</p>");
/// assert_eq!(renderer.name(), "basic");
/// ```
#[derive(Clone)]
pub struct BasicHtmlRenderer {
    target: Target,
    prefix: String,
    suffix: String,
    label_class: String,
    error_block: Option<ErrorBlockFormatter>,
    element_error: Option<ElementErrorFormatter>,
    affix: Option<AffixFormatter>,
}

impl Default for BasicHtmlRenderer {
    fn default() -> Self {
        Self::from_settings(&RenderSettings::default())
    }
}

impl BasicHtmlRenderer {
    /// Renderer with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer configured from the `[render]` section
    #[must_use]
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            target: settings.target,
            prefix: settings.element_prefix.clone(),
            suffix: settings.element_suffix.clone(),
            label_class: settings.label_class.clone(),
            error_block: None,
            element_error: None,
            affix: None,
        }
    }

    /// Set the HTML flavour
    #[must_use]
    pub const fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Markup around each labelled element outside a set
    #[must_use]
    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// CSS class for labels
    #[must_use]
    pub fn with_label_class(mut self, class: impl Into<String>) -> Self {
        self.label_class = class.into();
        self
    }

    /// Custom error block
    #[must_use]
    pub fn with_error_block<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Form) -> String + Send + Sync + 'static,
    {
        self.error_block = Some(Arc::new(formatter));
        self
    }

    /// Custom per-element error markup
    #[must_use]
    pub fn with_element_error<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&ElementCore, &Form) -> String + Send + Sync + 'static,
    {
        self.element_error = Some(Arc::new(formatter));
        self
    }

    /// Custom wrapper for set members
    #[must_use]
    pub fn with_affix_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&str, &str, usize, usize) -> String + Send + Sync + 'static,
    {
        self.affix = Some(Arc::new(formatter));
        self
    }

    fn write_attr(html: &mut String, name: &str, value: &str) {
        html.push(' ');
        html.push_str(name);
        html.push_str("=\"");
        html.push_str(&escape(value));
        html.push('"');
    }

    fn write_attrs(html: &mut String, core: &ElementCore, exclude: &[&str]) {
        for (name, value) in core.attrs().attributes_except(exclude) {
            match value.as_str() {
                Some(text) => Self::write_attr(html, name, text),
                None => {
                    html.push(' ');
                    html.push_str(name);
                }
            }
        }
    }

    fn write_class(html: &mut String, core: &ElementCore, ctx: &RenderContext) {
        let mut classes: Vec<&str> = core
            .attrs()
            .attribute_str("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        if !ctx.in_element_set {
            if ctx.submitting {
                if !core.is_valid() {
                    classes.push("error");
                } else if core.is_required() {
                    classes.push("ok");
                }
            } else if core.is_required() && core.value().is_empty() {
                classes.push("required");
            }
        }
        if !classes.is_empty() {
            Self::write_attr(html, "class", &classes.join(" "));
        }
    }

    fn write_id(html: &mut String, core: &ElementCore, ctx: &RenderContext) {
        if !core.id().is_empty() {
            Self::write_attr(html, "id", &ctx.make_id(core.id()));
        }
    }

    fn type_name<'a>(&self, input_type: &'a InputType) -> &'a str {
        match input_type {
            InputType::Integer => "number",
            InputType::Boolean => "text",
            InputType::Tel
            | InputType::Number
            | InputType::Date
            | InputType::Search
            | InputType::Email
            | InputType::Url
                if self.target == Target::Html4 =>
            {
                "text"
            }
            other => other.as_str(),
        }
    }

    fn error_message(&self, core: &ElementCore, form: &Form, ctx: &RenderContext) -> String {
        if ctx.in_element_set || !ctx.submitting || core.is_valid() {
            return String::new();
        }
        if let Some(formatter) = &self.element_error {
            return formatter(core, form);
        }
        core.errors().first().map_or_else(String::new, |message| {
            format!("<span class=\"error-msg\">{}</span>", escape(message))
        })
    }

    fn push_error(html: &mut String, error: &str) {
        if !error.is_empty() {
            html.push(' ');
            html.push_str(error);
        }
    }

    fn label_class_attr(&self) -> String {
        let mut out = String::new();
        if !self.label_class.is_empty() {
            Self::write_attr(&mut out, "class", &self.label_class);
        }
        out
    }

    fn add_label(&self, markup: String, core: &ElementCore, ctx: &RenderContext, for_set: bool) -> String {
        if core.has_no_label() {
            return markup;
        }
        let label = escape(core.label());
        let class = self.label_class_attr();
        let (tag, glue) = if for_set {
            (format!("<span{class}>{label}</span>"), "\n")
        } else {
            let id = escape(&ctx.make_id(core.id()));
            (format!("<label for=\"{id}\"{class}>{label}</label>"), " ")
        };
        let joined = if core.label_right() {
            format!("{markup}{glue}{tag}")
        } else {
            format!("{tag}{glue}{markup}")
        };

        if !ctx.in_element_set {
            return format!("{}{joined}{}", self.prefix, self.suffix);
        }
        match &self.affix {
            Some(formatter) => formatter(&joined, core.key(), ctx.set_index, ctx.set_max),
            None => joined,
        }
    }

    fn render_options(html: &mut String, members: &Members, current: &FieldValue, prefix: &str) {
        for entry in members.entries() {
            match entry {
                Member::Item { key, label } => {
                    let value = format!("{prefix}{}", select_key(key));
                    html.push_str("\n<option");
                    Self::write_attr(html, "value", &value);
                    if current.contains(&value) {
                        html.push_str(" selected");
                    }
                    let _ = write!(html, ">{}</option>", escape(label));
                }
                Member::Group { label, members } => {
                    html.push_str("\n<optgroup");
                    Self::write_attr(html, "label", label);
                    html.push('>');
                    let nested = format!("{prefix}{}-", simplify(label));
                    Self::render_options(html, members, current, &nested);
                    html.push_str("\n</optgroup>");
                }
            }
        }
    }

    fn render_error_block(&self, form: &Form) -> String {
        if let Some(formatter) = &self.error_block {
            return formatter(form);
        }
        let mut html = String::from("<div class=\"form-errors\">");
        let _ = write!(html, "<p>{}</p>", escape(&form.messages().form_errors));
        for message in form.form_errors() {
            let _ = write!(html, "<p>{}</p>", escape(message));
        }
        html.push_str("</div>");
        html
    }
}

impl Renderer for BasicHtmlRenderer {
    fn name(&self) -> &str {
        "basic"
    }

    fn render_form(&self, form: &Form) -> String {
        let ctx = RenderContext::for_form(form);
        let mut parts = Vec::with_capacity(form.elements().len() + 5);

        let mut open = String::from("<form");
        Self::write_attr(&mut open, "action", form.action());
        Self::write_attr(&mut open, "method", form.http_method().as_str());
        for (name, value) in form.attrs().attributes_except(&["name", "action", "method"]) {
            match value.as_str() {
                Some(text) => Self::write_attr(&mut open, name, text),
                None => {
                    open.push(' ');
                    open.push_str(name);
                }
            }
        }
        open.push('>');
        parts.push(open);

        for (name, value) in [
            (FORM_ID_FIELD, form.form_id().unwrap_or_default()),
            (FORM_TOKEN_FIELD, form.form_token().unwrap_or_default()),
        ] {
            let mut hidden = String::from("<input type=\"hidden\"");
            Self::write_attr(&mut hidden, "name", name);
            Self::write_attr(&mut hidden, "value", value);
            hidden.push_str(" />");
            parts.push(hidden);
        }

        if form.has_errors() {
            let block = self.render_error_block(form);
            if !block.is_empty() {
                parts.push(block);
            }
        }

        for child in form.elements() {
            parts.push(self.render_node(child, form, &ctx));
        }
        parts.push("</form>".to_owned());
        parts.join("\n")
    }

    fn render_input(&self, element: &FormElement, form: &Form, ctx: &RenderContext) -> String {
        let core = element.core();
        let input_type = match element.kind() {
            ElementKind::Input(t) => t.clone(),
            ElementKind::TextArea | ElementKind::Button(_) => InputType::Text,
        };
        let rendered_id = ctx.make_id(core.id());

        let mut html = String::with_capacity(128);
        html.push_str("<input");
        Self::write_attr(&mut html, "type", self.type_name(&input_type));
        Self::write_id(&mut html, core, ctx);
        Self::write_attrs(&mut html, core, &["type", "id", "class", "value", "pattern", "checked"]);
        if let Some(note) = core.note() {
            Self::write_attr(&mut html, "placeholder", note);
        }
        Self::write_class(&mut html, core, ctx);
        if let Some(pattern) = &core.rules().pattern {
            Self::write_attr(&mut html, "pattern", pattern.html());
        }

        let list_id = element
            .list()
            .map(|list| list.id.clone().unwrap_or_else(|| format!("{rendered_id}-list")));
        if let Some(list_id) = &list_id {
            Self::write_attr(&mut html, "list", list_id);
        }

        let default = core.attrs().attribute_str("value");
        let value = if input_type.is_choice() || input_type == InputType::Hidden || !ctx.submitting {
            default
        } else if input_type == InputType::Password {
            None
        } else {
            core.value().as_str()
        };
        if let Some(value) = value {
            Self::write_attr(&mut html, "value", value);
        }
        if core.attrs().has_attribute("checked") {
            html.push_str(" checked");
        }
        html.push_str(" />");

        if input_type != InputType::Hidden {
            Self::push_error(&mut html, &self.error_message(core, form, ctx));
        }

        if let (Some(list), Some(list_id)) = (element.list(), list_id) {
            html.push_str("\n<datalist");
            Self::write_attr(&mut html, "id", &list_id);
            html.push('>');
            for value in &list.values {
                html.push_str("<option");
                Self::write_attr(&mut html, "value", value);
                html.push_str("></option>");
            }
            html.push_str("</datalist>");
        }

        self.add_label(html, core, ctx, false)
    }

    fn render_textarea(&self, element: &FormElement, form: &Form, ctx: &RenderContext) -> String {
        let core = element.core();
        let mut html = String::with_capacity(128);
        html.push_str("<textarea");
        Self::write_id(&mut html, core, ctx);
        Self::write_attrs(&mut html, core, &["id", "class", "value", "pattern"]);
        if let Some(note) = core.note() {
            Self::write_attr(&mut html, "placeholder", note);
        }
        Self::write_class(&mut html, core, ctx);
        let text = if ctx.submitting {
            core.value().as_str()
        } else {
            core.attrs().attribute_str("value")
        };
        let _ = write!(html, ">{}</textarea>", escape(text.unwrap_or_default()));
        Self::push_error(&mut html, &self.error_message(core, form, ctx));
        self.add_label(html, core, ctx, false)
    }

    fn render_button(&self, element: &FormElement, _form: &Form, ctx: &RenderContext) -> String {
        let core = element.core();
        let button_type = element.button_type().unwrap_or_default();
        let mut html = String::with_capacity(96);
        html.push_str("<button");
        Self::write_attr(&mut html, "type", button_type.as_str());
        Self::write_id(&mut html, core, ctx);
        Self::write_attrs(&mut html, core, &["type", "id", "class"]);
        Self::write_class(&mut html, core, ctx);
        let _ = write!(html, ">{}</button>", escape(core.label()));
        self.add_label(html, core, ctx, false)
    }

    fn render_fieldset(&self, set: &ElementSet, form: &Form, ctx: &RenderContext) -> String {
        let core = set.core();
        let mut open = String::from("<fieldset");
        Self::write_id(&mut open, core, ctx);
        Self::write_attrs(&mut open, core, &["id", "class", "name", "value"]);
        Self::write_class(&mut open, core, ctx);
        open.push('>');
        if !core.has_no_label() && !core.label().is_empty() {
            let _ = write!(open, "<legend>{}</legend>", escape(core.label()));
        }

        let mut parts = vec![open];
        parts.extend(set.children().iter().map(|child| self.render_node(child, form, ctx)));
        parts.push("</fieldset>".to_owned());
        parts.join("\n")
    }

    fn render_element_set(&self, set: &ElementSet, form: &Form, ctx: &RenderContext) -> String {
        let core = set.core();
        let members = set.expand(ctx.submitting);
        let max = members.len().saturating_sub(1);

        let mut open = String::from("<div");
        Self::write_class(&mut open, core, ctx);
        open.push('>');

        let mut parts = vec![open];
        for (index, member) in members.iter().enumerate() {
            parts.push(self.render_input(member, form, &ctx.member(index, max)));
        }
        parts.push("</div>".to_owned());
        let error = self.error_message(core, form, ctx);
        if !error.is_empty() {
            parts.push(error);
        }
        self.add_label(parts.join("\n"), core, ctx, true)
    }

    fn render_select(&self, set: &ElementSet, form: &Form, ctx: &RenderContext) -> String {
        let core = set.core();
        let mut html = String::with_capacity(256);
        html.push_str("<select");
        Self::write_id(&mut html, core, ctx);
        Self::write_attrs(&mut html, core, &["id", "class", "value"]);
        Self::write_class(&mut html, core, ctx);
        html.push('>');
        Self::render_options(&mut html, set.members(), set.current_value(ctx.submitting), "");
        html.push_str("\n</select>");
        Self::push_error(&mut html, &self.error_message(core, form, ctx));
        self.add_label(html, core, ctx, false)
    }
}

impl fmt::Debug for BasicHtmlRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicHtmlRenderer")
            .field("target", &self.target)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("label_class", &self.label_class)
            .field("error_block", &self.error_block.is_some())
            .field("element_error", &self.element_error.is_some())
            .field("affix", &self.affix.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csrf::{CsrfTokens, MemorySession};
    use crate::forms::{
        checkboxes, email, fieldset, form, hidden, input, integer, multi_select, password, radios,
        select, submit, textarea, FormState,
    };
    use crate::request::SubmittedRequest;

    fn tokens() -> CsrfTokens<MemorySession> {
        CsrfTokens::new(MemorySession::default())
    }

    fn first_view(f: &mut Form) -> String {
        f.process(&SubmittedRequest::get(), &tokens()).unwrap().html
    }

    #[test]
    fn test_form_wrapper() {
        let mut f = form("Contact", "/contact?a=1&b=2").class("wide");
        let html = first_view(&mut f);
        assert!(html.starts_with(r#"<form action="/contact?a=1&amp;b=2" method="post" id="form-contact" class="wide">"#));
        assert!(html.contains(r#"<input type="hidden" name="_form_id" value=""#));
        assert!(html.contains(r#"<input type="hidden" name="_form_token" value=""#));
        assert!(html.ends_with("</form>"));
    }

    #[test]
    fn test_input_with_label_and_suffix() {
        let mut f = form("Contact", "/").add(input("Your Name").note("First and last"));
        let html = first_view(&mut f);
        assert!(html.contains(
            r#"<label for="form-contact-your-name">Your Name</label> <input type="text" id="form-contact-your-name" name="your-name" placeholder="First and last" /><br>"#
        ));
    }

    #[test]
    fn test_label_right() {
        let mut f = form("Terms", "/").add(input(">I agree"));
        let html = first_view(&mut f);
        assert!(html.contains(r#"/> <label for="form-terms-i-agree">I agree</label><br>"#));
    }

    #[test]
    fn test_required_class_before_submission() {
        let mut f = form("Contact", "/").add(input("Name").required());
        let html = first_view(&mut f);
        assert!(html.contains(r#"name="name" required class="required""#));
    }

    #[test]
    fn test_integer_renders_as_number() {
        let mut f = form("Age", "/").add(integer("Age").min(0));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<input type="number" id="form-age-age" name="age" min="0" />"#));
    }

    #[test]
    fn test_html4_downgrades_types() {
        let renderer = BasicHtmlRenderer::new().with_target(Target::Html4);
        let mut f = form("Contact", "/")
            .add(email("Email"))
            .set_renderer(Arc::new(renderer));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<input type="text" id="form-contact-email""#));
    }

    #[test]
    fn test_hidden_has_no_label_or_suffix() {
        let mut f = form("Contact", "/").add(hidden("ref", "home"));
        let html = first_view(&mut f);
        assert!(html.contains("\n<input type=\"hidden\" id=\"form-contact-ref\" name=\"ref\" value=\"home\" />\n"));
    }

    #[test]
    fn test_textarea() {
        let mut f = form("Contact", "/").add(textarea("Message"));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<textarea id="form-contact-message" name="message" maxlength="2000"></textarea>"#));
    }

    #[test]
    fn test_submit_button_without_label() {
        let mut f = form("Contact", "/").add(submit("Send it"));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<button type="submit" id="form-contact-send-it" name="send-it" value="send-it">Send it</button>"#));
        assert!(!html.contains("<label for=\"form-contact-send-it\""));
    }

    #[test]
    fn test_radio_set_markup() {
        let mut f = form("Poll", "/").add(radios("Happy?", Members::from_pairs([("y", "Yes"), ("n", "No")])));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<div class="radioset">"#));
        assert!(html.contains(r#"<label for="form-poll-happy-y">Yes</label> <input type="radio" id="form-poll-happy-y" name="happy" value="y" />"#));
        assert!(html.contains(r#"id="form-poll-happy-n""#));
        assert!(html.contains("<span>Happy?</span>\n<div"));
    }

    #[test]
    fn test_checkbox_initial_value_checked() {
        let mut f = form("Prefs", "/").add(
            checkboxes("Options", Members::from_pairs([("spam_me", "Spam me"), ("extra", "Extras")]))
                .value(["spam_me"]),
        );
        let html = first_view(&mut f);
        assert!(html.contains(r#"name="options[]" value="spam_me" checked />"#));
        assert!(html.contains(r#"name="options[]" value="extra" />"#));
    }

    #[test]
    fn test_affix_formatter_wraps_members() {
        let renderer = BasicHtmlRenderer::new()
            .with_affix_formatter(|markup, _, index, max| format!("<li data-i=\"{index}/{max}\">{markup}</li>"));
        let mut f = form("Poll", "/")
            .add(radios("Pick", Members::from_labels(["A", "B", "C"])))
            .set_renderer(Arc::new(renderer));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<li data-i="0/2"><label for="form-poll-pick-a">A</label> <input type="radio""#));
        assert!(html.contains(r#"<li data-i="2/2">"#));
    }

    #[test]
    fn test_select_with_groups() {
        let members = Members::new()
            .item("Inhuman Resources")
            .group("Sales", Members::new().keyed("bk", "Books").item("Records"));
        let mut f = form("Dept", "/").add(select("Department", members).value("sales-bk"));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<option value="0">Inhuman Resources</option>"#));
        assert!(html.contains("<optgroup label=\"Sales\">\n<option value=\"sales-bk\" selected>Books</option>"));
        assert!(html.contains(r#"<option value="sales-0">Records</option>"#));
    }

    #[test]
    fn test_multi_select_name() {
        let mut f = form("Dept", "/").add(multi_select("Tags", Members::from_labels(["a", "b"])));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<select id="form-dept-tags" name="tags[]" multiple>"#));
    }

    #[test]
    fn test_fieldset_legend_and_children() {
        let mut f = form("Contact", "/").add(fieldset("About you").add(input("Name")));
        let html = first_view(&mut f);
        assert!(html.contains("<fieldset id=\"form-contact-about-you\"><legend>About you</legend>\n<label"));
        assert!(html.contains("</fieldset>"));
    }

    #[test]
    fn test_datalist() {
        let mut f = form("Browser", "/").add(input("Browser").datalist(&["Firefox", "Chrome"], None));
        let html = first_view(&mut f);
        assert!(html.contains(r#"list="form-browser-browser-list""#));
        assert!(html.contains(r#"<datalist id="form-browser-browser-list"><option value="Firefox"></option><option value="Chrome"></option></datalist>"#));
    }

    #[test]
    fn test_errors_and_submitted_values() {
        let store = tokens();
        let mut f = form("Signup", "/")
            .add(input("Name").required())
            .add(email("Email"))
            .add(password("Secret"))
            .on_success(|_| "OK".into());
        f.process(&SubmittedRequest::get(), &store).unwrap();
        let id = f.form_id().unwrap().to_owned();
        let token = f.form_token().unwrap().to_owned();
        let request = SubmittedRequest::post([
            ("email", "not-an-email"),
            ("secret", "hunter2"),
            ("_form_id", id.as_str()),
            ("_form_token", token.as_str()),
        ]);
        let outcome = f.process(&request, &store).unwrap();
        assert_eq!(outcome.state, FormState::Invalid);
        let html = outcome.html;
        assert!(html.contains(r#"<div class="form-errors"><p>There was a problem with your form."#));
        assert!(html.contains(r#"class="error" /> <span class="error-msg">* Requires your input</span>"#));
        assert!(html.contains(r#"value="not-an-email" /> <span class="error-msg">Please enter a valid email address</span>"#));
        assert!(!html.contains("hunter2"));
    }

    #[test]
    fn test_custom_formatters() {
        let renderer = BasicHtmlRenderer::new()
            .with_error_block(|_| "<p>Oops</p>".into())
            .with_element_error(|core, _| format!("<em>{}</em>", core.errors()[0]));
        let store = tokens();
        let mut f = form("Contact", "/")
            .add(input("Name").required())
            .set_renderer(Arc::new(renderer))
            .on_success(|_| "OK".into());
        f.process(&SubmittedRequest::get(), &store).unwrap();
        let id = f.form_id().unwrap().to_owned();
        let token = f.form_token().unwrap().to_owned();
        let request = SubmittedRequest::post([("_form_id", id.as_str()), ("_form_token", token.as_str())]);
        let html = f.process(&request, &store).unwrap().html;
        assert!(html.contains("\n<p>Oops</p>\n"));
        assert!(html.contains("<em>* Requires your input</em>"));
    }

    #[test]
    fn test_label_class_and_escaping() {
        let renderer = BasicHtmlRenderer::new().with_label_class("control-label").with_affixes("<p>", "</p>");
        let mut f = form("Contact", "/")
            .add(input("Tom & Jerry"))
            .set_renderer(Arc::new(renderer));
        let html = first_view(&mut f);
        assert!(html.contains(r#"<p><label for="form-contact-tom-jerry" class="control-label">Tom &amp; Jerry</label>"#));
    }
}
