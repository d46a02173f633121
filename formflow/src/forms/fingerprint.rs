//! Deterministic form fingerprint
//!
//! The `_form_id` embedded in a rendered form is the SHA-256 of a canonical
//! serialization of the form's structure. Submitted values, errors and
//! tokens never contribute, so the fingerprint is stable across requests
//! for the same definition.

use sha2::{Digest, Sha256};

use super::element::{ElementCore, Node};
use super::element_set::SetKind;
use super::field::ElementKind;
use super::form::Form;
use super::members::{Member, MemberKey, Members};
use super::named_set::{NamedSet, Value};

/// Length-prefixed writer so adjacent fields can never run together
struct Canonical(Sha256);

impl Canonical {
    fn str(&mut self, s: &str) {
        self.0.update((s.len() as u64).to_be_bytes());
        self.0.update(s.as_bytes());
    }

    fn tag(&mut self, t: u8) {
        self.0.update([t]);
    }

    fn attrs(&mut self, attrs: &NamedSet) {
        self.tag(b'a');
        for (key, value) in attrs.attributes() {
            self.str(key);
            match value {
                Value::Flag => self.tag(0),
                Value::Text(text) => {
                    self.tag(1);
                    self.str(text);
                }
            }
        }
        self.tag(b'/');
    }

    fn core(&mut self, core: &ElementCore) {
        self.str(core.label());
        self.tag(u8::from(core.label_right()));
        self.str(core.note().unwrap_or_default());
        self.attrs(core.attrs());

        let rules = core.rules();
        self.str(rules.required_message.as_deref().unwrap_or_default());
        self.str(rules.pattern.as_ref().map_or("", |p| p.html()));
        if let Some(list) = &rules.whitelist {
            self.tag(b'w');
            list.iter().for_each(|v| self.str(v));
        }
        self.str(&rules.minlength.map(|n| n.to_string()).unwrap_or_default());
        self.tag(u8::from(rules.matcher.is_some()));
    }

    fn members(&mut self, members: &Members) {
        self.tag(b'm');
        for member in members.entries() {
            match member {
                Member::Item { key, label } => {
                    match key {
                        MemberKey::Explicit(k) => self.str(k),
                        MemberKey::Implicit(i) => self.str(&i.to_string()),
                    }
                    self.str(label);
                }
                Member::Group { label, members } => {
                    self.tag(b'g');
                    self.str(label);
                    self.members(members);
                }
            }
        }
        self.tag(b'/');
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Text(text) => {
                self.tag(b't');
                self.str(text);
            }
            Node::Element(e) => {
                self.tag(b'e');
                match e.kind() {
                    ElementKind::Input(t) => self.str(t.as_str()),
                    ElementKind::TextArea => self.str("textarea"),
                    ElementKind::Button(b) => self.str(b.as_str()),
                }
                self.core(&e.core);
                if let Some(list) = e.list() {
                    self.str(list.id.as_deref().unwrap_or_default());
                    list.values.iter().for_each(|v| self.str(v));
                }
            }
            Node::Set(s) => {
                self.tag(b's');
                self.str(match s.kind() {
                    SetKind::Fieldset => "fieldset",
                    SetKind::Radios => "radios",
                    SetKind::Checkboxes => "checkboxes",
                    SetKind::Select { multiple: false } => "select",
                    SetKind::Select { multiple: true } => "multi-select",
                });
                self.core(&s.core);
                self.members(s.members());
                s.children().iter().for_each(|child| self.node(child));
                self.tag(b'/');
            }
        }
    }
}

/// Lowercase hex SHA-256 of the form structure
#[must_use]
pub fn fingerprint(form: &Form) -> String {
    let mut canonical = Canonical(Sha256::new());
    canonical.str(form.name());
    canonical.str(form.action());
    canonical.str(form.http_method().as_str());
    canonical.attrs(form.attrs());
    form.elements().iter().for_each(|node| canonical.node(node));
    hex::encode(canonical.0.finalize())
}
