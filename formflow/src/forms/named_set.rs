//! Attribute and meta-data storage shared by every form element
//!
//! A [`NamedSet`] keeps two maps: `data`, whose entries become HTML
//! attributes, and `meta`, which holds behavioural flags that are never
//! rendered. Callers pick the map with a naming convention: a key that
//! starts with an underscore (and has at least one more character) goes
//! to meta with the underscore removed; every other key goes to data.
//!
//! ```rust
//! use formflow::forms::{NamedSet, Value};
//!
//! let mut set = NamedSet::default();
//! set.set("class", Value::text("wide"));
//! set.set("_show_html", Value::Flag);
//!
//! assert!(set.has_attribute("class"));
//! assert!(set.has_meta("show_html"));
//! assert!(!set.has_attribute("show_html"));
//! ```

use std::collections::BTreeMap;

/// A stored attribute or meta value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Boolean attribute, rendered as a bare name (`required`, `novalidate`)
    Flag,
    /// Attribute with a value
    Text(String),
}

impl Value {
    /// Build a text value
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The text of this value, if it has any
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Which half of a [`NamedSet`] a key addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Rendered HTML attribute
    Data,
    /// Internal meta-data
    Meta,
}

/// Split a caller-supplied key into its slot and the stored key.
#[must_use]
fn route(key: &str) -> (Slot, &str) {
    match key.strip_prefix('_') {
        Some(rest) if !rest.is_empty() => (Slot::Meta, rest),
        _ => (Slot::Data, key),
    }
}

/// Ordered attribute data plus keyed meta-data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedSet {
    data: Vec<(String, Value)>,
    meta: BTreeMap<String, Value>,
}

impl NamedSet {
    /// Store `value` under `key`, routed by the underscore convention
    pub fn set(&mut self, key: &str, value: Value) {
        match route(key) {
            (Slot::Data, k) => self.set_attribute(k, value),
            (Slot::Meta, k) => self.set_meta(k, value),
        }
    }

    /// Look up `key`, routed by the underscore convention
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match route(key) {
            (Slot::Data, k) => self.attribute(k),
            (Slot::Meta, k) => self.meta(k),
        }
    }

    /// Set an HTML attribute, replacing any previous value in place
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.data.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.data.push((key, value));
        }
    }

    /// Set a boolean HTML attribute
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.set_attribute(key, Value::Flag);
    }

    /// Set a meta value
    pub fn set_meta(&mut self, key: impl Into<String>, value: Value) {
        self.meta.insert(key.into(), value);
    }

    /// Get an HTML attribute
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get the text of an HTML attribute
    #[must_use]
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(Value::as_str)
    }

    /// Get a meta value
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    /// Whether the attribute is present
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    /// Whether the meta key is present
    #[must_use]
    pub fn has_meta(&self, key: &str) -> bool {
        self.meta.contains_key(key)
    }

    /// Remove a key, routed by the underscore convention
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match route(key) {
            (Slot::Data, k) => {
                let pos = self.data.iter().position(|(name, _)| name == k)?;
                Some(self.data.remove(pos).1)
            }
            (Slot::Meta, k) => self.meta.remove(k),
        }
    }

    /// All attributes in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Attributes minus the excluded keys, in insertion order
    pub fn attributes_except<'a>(
        &'a self,
        exclude: &'a [&'a str],
    ) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.attributes().filter(move |(k, _)| !exclude.contains(k))
    }

    /// All meta entries in key order
    pub fn meta_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.meta.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route() {
        assert_eq!(route("_renderer"), (Slot::Meta, "renderer"));
        assert_eq!(route("class"), (Slot::Data, "class"));
        // A lone underscore is an ordinary attribute name
        assert_eq!(route("_"), (Slot::Data, "_"));
    }

    #[test]
    fn test_set_get_routing() {
        let mut set = NamedSet::default();
        set.set("_note", Value::text("hint"));
        set.set("placeholder", Value::text("shown"));

        assert_eq!(set.get("_note"), Some(&Value::text("hint")));
        assert_eq!(set.get("note"), None);
        assert_eq!(set.get("placeholder"), Some(&Value::text("shown")));
        assert_eq!(set.meta("note"), Some(&Value::text("hint")));
        assert!(!set.has_meta("placeholder"));
    }

    #[test]
    fn test_replace_keeps_order() {
        let mut set = NamedSet::default();
        set.set_attribute("name", Value::text("a"));
        set.set_flag("required");
        set.set_attribute("name", Value::text("b"));

        let keys: Vec<_> = set.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "required"]);
        assert_eq!(set.attribute_str("name"), Some("b"));
    }

    #[test]
    fn test_attributes_except_never_yields_excluded() {
        let mut set = NamedSet::default();
        set.set_attribute("id", Value::text("x"));
        set.set_attribute("class", Value::text("c"));
        set.set_attribute("value", Value::text("v"));
        set.set_flag("readonly");
        set.set("_secret", Value::text("meta only"));

        let kept: Vec<_> = set
            .attributes_except(&["class", "value", "id"])
            .map(|(k, _)| k)
            .collect();
        assert_eq!(kept, vec!["readonly"]);
    }

    #[test]
    fn test_remove() {
        let mut set = NamedSet::default();
        set.set_flag("disabled");
        set.set("_errors", Value::Flag);
        assert_eq!(set.remove("disabled"), Some(Value::Flag));
        assert_eq!(set.remove("_errors"), Some(Value::Flag));
        assert!(set.remove("disabled").is_none());
    }
}
