//! Fieldsets and member-driven sets
//!
//! Radio and checkbox sets are expanded into concrete inputs each time they
//! are rendered, so the current value decides which options are checked.
//! Expansion never touches the member list.

use std::collections::HashSet;

use crate::error::FormError;

use super::element::{ElementBuilder, ElementCore, FormElement, Node};
use super::field::{ElementKind, FieldValue, FormatCheck, InputType};
use super::form::Form;
use super::members::Members;
use super::named_set::Value;
use super::simplify::simplify;

/// Kind of element set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    /// Titled group of children
    Fieldset,
    /// One choice from several radio buttons
    Radios,
    /// Any number of checkboxes, submitted as `name[]`
    Checkboxes,
    /// `<select>`; multiple selects submit as `name[]`
    Select {
        /// Allow several selections
        multiple: bool,
    },
}

impl SetKind {
    /// Minimum member count
    #[must_use]
    pub const fn min_members(self) -> usize {
        match self {
            Self::Fieldset => 0,
            Self::Radios => 2,
            Self::Checkboxes | Self::Select { .. } => 1,
        }
    }

    /// Whether several values are submitted under `name[]`
    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::Checkboxes | Self::Select { multiple: true })
    }
}

/// A container of elements, or a set built from members
#[derive(Debug)]
pub struct ElementSet {
    pub(crate) core: ElementCore,
    pub(crate) kind: SetKind,
    pub(crate) children: Vec<Node>,
    pub(crate) members: Members,
    pub(crate) initial: FieldValue,
}

impl ElementSet {
    pub(crate) fn fieldset(label: &str) -> Self {
        Self {
            core: ElementCore::new(label),
            kind: SetKind::Fieldset,
            children: Vec::new(),
            members: Members::new(),
            initial: FieldValue::None,
        }
    }

    pub(crate) fn with_members(label: &str, kind: SetKind, members: Members) -> Self {
        let mut core = ElementCore::new(label);
        let key = core.key().to_owned();
        if kind.is_multi() {
            core.attrs.set_attribute("name", Value::text(format!("{key}[]")));
        }
        match kind {
            SetKind::Radios => core.attrs.set_attribute("class", Value::text("radioset")),
            SetKind::Checkboxes => core.attrs.set_attribute("class", Value::text("checkboxset")),
            SetKind::Select { multiple: true } => core.attrs.set_flag("multiple"),
            SetKind::Select { multiple: false } | SetKind::Fieldset => {}
        }

        let mut set = Self {
            core,
            kind,
            children: Vec::new(),
            members,
            initial: FieldValue::None,
        };
        let found = set.allowed_values().len();
        let required = kind.min_members();
        if found < required {
            set.core.record(FormError::TooFewMembers { element: key, required, found });
        }
        set
    }

    /// Set kind
    #[must_use]
    pub const fn kind(&self) -> SetKind {
        self.kind
    }

    /// Member list
    #[must_use]
    pub const fn members(&self) -> &Members {
        &self.members
    }

    /// Children of a fieldset
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Initially selected value(s)
    #[must_use]
    pub const fn initial(&self) -> &FieldValue {
        &self.initial
    }

    /// Append a child; it inherits `disabled`, `readonly` and `required`
    #[must_use]
    pub fn add(mut self, node: impl Into<Node>) -> Self {
        let mut node = node.into();
        node.inherit(&self.core.inheritable_flags());
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

    /// Initial selection, used until the form is submitted
    #[must_use]
    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial = value.into();
        self
    }

    /// The value driving checked/selected state
    #[must_use]
    pub const fn current_value(&self, submitting: bool) -> &FieldValue {
        if submitting {
            &self.core.value
        } else {
            &self.initial
        }
    }

    /// Values a submission may carry
    #[must_use]
    pub fn allowed_values(&self) -> Vec<String> {
        match self.kind {
            SetKind::Fieldset => Vec::new(),
            SetKind::Radios => self.members.choices(false).into_iter().map(|(v, _)| v).collect(),
            SetKind::Checkboxes => self.members.choices(true).into_iter().map(|(v, _)| v).collect(),
            SetKind::Select { .. } => self.members.flatten().into_iter().map(|(v, _)| v).collect(),
        }
    }

    /// Synthesize one input per member of a radio or checkbox set
    ///
    /// Each input shares the set's name, takes the member value, and gets an
    /// id derived from the set name and that value. When two values simplify
    /// to the same id, the later one takes its position as a suffix. The set's
    /// flags are copied down (`required` only for radios).
    #[must_use]
    pub fn expand(&self, submitting: bool) -> Vec<FormElement> {
        let (input_type, simplify_keys) = match self.kind {
            SetKind::Radios => (InputType::Radio, false),
            SetKind::Checkboxes => (InputType::Checkbox, true),
            SetKind::Fieldset | SetKind::Select { .. } => return Vec::new(),
        };
        let current = self.current_value(submitting);
        let mut flags = vec!["disabled", "readonly"];
        if self.kind == SetKind::Radios {
            flags.push("required");
        }

        let mut taken = HashSet::new();
        self.members
            .choices(simplify_keys)
            .into_iter()
            .enumerate()
            .map(|(index, (value, label))| {
                let mut id = simplify(&format!("{}-{value}", self.core.key()));
                while !taken.insert(id.clone()) {
                    id = format!("{id}-{index}");
                }
                let mut core = ElementCore::bare(self.core.name(), &id, &label);
                core.label_right = self.core.label_right;
                core.attrs.set_attribute("value", Value::text(value.as_str()));
                for flag in &flags {
                    if self.core.attrs.has_attribute(flag) {
                        core.attrs.set_flag(*flag);
                    }
                }
                if current.contains(&value) {
                    core.attrs.set_flag("checked");
                }
                FormElement {
                    core,
                    kind: ElementKind::Input(input_type.clone()),
                    datalist: None,
                }
            })
            .collect()
    }

    /// Member check for sets; fieldsets are validated through their children
    pub(crate) fn validate(&self, form: &Form) -> Result<Vec<String>, FormError> {
        if self.kind == SetKind::Fieldset {
            return Ok(Vec::new());
        }
        let allowed = self.allowed_values();
        self.core.validate(form, FormatCheck::None, Some(&allowed))
    }
}

impl ElementBuilder for ElementSet {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }
}
