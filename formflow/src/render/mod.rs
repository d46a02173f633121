//! Turning a form into markup
//!
//! A [`Renderer`] has one method per node kind and a provided
//! [`render_node`](Renderer::render_node) that dispatches on the kind. All
//! per-render state travels in a [`RenderContext`] passed down the call
//! tree, so one renderer can serve any number of forms at once.

mod html;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RenderSettings;
use crate::forms::{simplify, ElementKind, ElementSet, Form, FormElement, Node, SetKind};

pub use html::{AffixFormatter, BasicHtmlRenderer, ElementErrorFormatter, ErrorBlockFormatter};

/// HTML flavour to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// HTML4: HTML5-only input types fall back to `text`
    Html4,
    /// HTML5
    #[default]
    Html5,
}

/// State for one render pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderContext {
    /// The form is being re-rendered after a submission
    pub submitting: bool,
    /// Rendering the synthesized members of a radio or checkbox set
    pub in_element_set: bool,
    /// Position of the current member, zero based
    pub set_index: usize,
    /// Index of the last member
    pub set_max: usize,
    /// Id prefix for rendered ids
    pub parent_id: String,
}

impl RenderContext {
    /// Context for the top level of `form`
    #[must_use]
    pub fn for_form(form: &Form) -> Self {
        Self {
            submitting: form.is_submitting(),
            parent_id: form.id().to_owned(),
            ..Self::default()
        }
    }

    /// Context for member `index` of `max + 1`
    #[must_use]
    pub fn member(&self, index: usize, max: usize) -> Self {
        Self {
            in_element_set: true,
            set_index: index,
            set_max: max,
            ..self.clone()
        }
    }

    /// Rendered id for an element id: the simplified `parent-id`
    #[must_use]
    pub fn make_id(&self, id: &str) -> String {
        simplify(&format!("{}-{id}", self.parent_id))
    }
}

/// Produces output for each kind of node
pub trait Renderer: Send + Sync {
    /// Name the renderer is registered under
    fn name(&self) -> &str;

    /// The whole form, including the hidden id and token fields
    fn render_form(&self, form: &Form) -> String;

    /// An `<input>` element
    fn render_input(&self, element: &FormElement, form: &Form, ctx: &RenderContext) -> String;

    /// A `<textarea>` element
    fn render_textarea(&self, element: &FormElement, form: &Form, ctx: &RenderContext) -> String;

    /// A `<button>` element
    fn render_button(&self, element: &FormElement, form: &Form, ctx: &RenderContext) -> String;

    /// A fieldset and its children
    fn render_fieldset(&self, set: &ElementSet, form: &Form, ctx: &RenderContext) -> String;

    /// A radio or checkbox set
    fn render_element_set(&self, set: &ElementSet, form: &Form, ctx: &RenderContext) -> String;

    /// A select and its options
    fn render_select(&self, set: &ElementSet, form: &Form, ctx: &RenderContext) -> String;

    /// Literal text, passed through untouched
    fn render_text(&self, text: &str, _ctx: &RenderContext) -> String {
        text.to_owned()
    }

    /// Dispatch on the node kind
    fn render_node(&self, node: &Node, form: &Form, ctx: &RenderContext) -> String {
        let html = match node {
            Node::Text(text) => return self.render_text(text, ctx),
            Node::Element(e) => match e.kind() {
                ElementKind::Input(_) => self.render_input(e, form, ctx),
                ElementKind::TextArea => self.render_textarea(e, form, ctx),
                ElementKind::Button(_) => self.render_button(e, form, ctx),
            },
            Node::Set(s) => match s.kind() {
                SetKind::Fieldset => self.render_fieldset(s, form, ctx),
                SetKind::Radios | SetKind::Checkboxes => self.render_element_set(s, form, ctx),
                SetKind::Select { .. } => self.render_select(s, form, ctx),
            },
        };
        if let Some(core) = node.core() {
            if core.attrs().has_meta("show_html") {
                debug!(element = %core.key(), html = %html, "rendered element");
            }
        }
        html
    }
}

/// Look up a built-in renderer by name, case-insensitively
#[must_use]
pub fn named(name: &str, settings: &RenderSettings) -> Option<Arc<dyn Renderer>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "basic" | "basichtml" => Some(Arc::new(BasicHtmlRenderer::from_settings(settings))),
        _ => None,
    }
}

/// Escape text for HTML content and attribute values
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
