//! Member lists for radio, checkbox and select sets
//!
//! Members are ordered and may nest (a nested group becomes an `<optgroup>`
//! in a select). Entries added without a key get an implicit index, counted
//! over the unkeyed entries of their own level.
//!
//! ```rust
//! use formflow::forms::Members;
//!
//! let departments = Members::new()
//!     .item("Inhuman Resources")
//!     .group("Sales", Members::new().keyed("bk", "Books").item("Records"));
//!
//! let map = departments.flatten();
//! assert_eq!(map[0], ("0".to_string(), "Inhuman Resources".to_string()));
//! assert_eq!(map[1], ("sales-bk".to_string(), "Books".to_string()));
//! assert_eq!(map[2], ("sales-0".to_string(), "Records".to_string()));
//! ```

use super::simplify::simplify;

/// Key of a member entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKey {
    /// Caller-supplied key
    Explicit(String),
    /// Position among the unkeyed entries of the same level
    Implicit(usize),
}

/// A single entry in a member list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    /// A selectable entry
    Item {
        /// Entry key
        key: MemberKey,
        /// Display text
        label: String,
    },
    /// A named group of entries
    Group {
        /// Group heading
        label: String,
        /// Entries in the group
        members: Members,
    },
}

/// Ordered, nestable list of members
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Members {
    entries: Vec<Member>,
    next_implicit: usize,
}

impl Members {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, label)` pairs
    #[must_use]
    pub fn from_pairs<K, L>(pairs: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |members, (k, l)| members.keyed(k, l))
    }

    /// Build from unkeyed labels
    #[must_use]
    pub fn from_labels<L: Into<String>>(labels: impl IntoIterator<Item = L>) -> Self {
        labels.into_iter().fold(Self::new(), |members, l| members.item(l))
    }

    /// Append an entry with an explicit key
    #[must_use]
    pub fn keyed(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.entries.push(Member::Item {
            key: MemberKey::Explicit(key.into()),
            label: label.into(),
        });
        self
    }

    /// Append an entry keyed by its implicit index
    #[must_use]
    pub fn item(mut self, label: impl Into<String>) -> Self {
        let key = MemberKey::Implicit(self.next_implicit);
        self.next_implicit += 1;
        self.entries.push(Member::Item {
            key,
            label: label.into(),
        });
        self
    }

    /// Append a nested group
    #[must_use]
    pub fn group(mut self, label: impl Into<String>, members: Self) -> Self {
        self.entries.push(Member::Group {
            label: label.into(),
            members,
        });
        self
    }

    /// Entries at this level
    #[must_use]
    pub fn entries(&self) -> &[Member] {
        &self.entries
    }

    /// Number of entries at this level
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattened `(value, label)` map used by selects, depth first.
    ///
    /// Values are the simplified key prefixed by the simplified labels of the
    /// enclosing groups, joined with `-`.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for entry in &self.entries {
            match entry {
                Member::Item { key, label } => {
                    out.push((format!("{prefix}{}", select_key(key)), label.clone()));
                }
                Member::Group { label, members } => {
                    let nested = format!("{prefix}{}-", simplify(label));
                    members.flatten_into(&nested, out);
                }
            }
        }
    }

    /// Top-level `(value, label)` entries for radio and checkbox sets.
    ///
    /// Explicit keys are used as given (or simplified when `simplify_keys` is
    /// set); unkeyed entries use their simplified label. Groups are ignored.
    #[must_use]
    pub fn choices(&self, simplify_keys: bool) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Member::Item {
                    key: MemberKey::Explicit(k),
                    label,
                } => {
                    let value = if simplify_keys { simplify(k) } else { k.clone() };
                    Some((value, label.clone()))
                }
                Member::Item {
                    key: MemberKey::Implicit(_),
                    label,
                } => Some((simplify(label), label.clone())),
                Member::Group { .. } => None,
            })
            .collect()
    }
}

/// Select option value for a key at its own level
pub(crate) fn select_key(key: &MemberKey) -> String {
    match key {
        MemberKey::Explicit(k) => simplify(k),
        MemberKey::Implicit(i) => i.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departments() -> Members {
        Members::new()
            .item("Inhuman Resources")
            .group(
                "Sales",
                Members::new()
                    .keyed("bk", "Books")
                    .item("Records")
                    .item("Post Complaint Therapy"),
            )
            .group(
                "Complaints",
                Members::from_labels(["About Books", "About Records", "About Complaints"]),
            )
    }

    #[test]
    fn test_flatten_prefixes_groups() {
        let keys: Vec<String> = departments().flatten().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "0",
                "sales-bk",
                "sales-0",
                "sales-1",
                "complaints-0",
                "complaints-1",
                "complaints-2",
            ]
        );
    }

    #[test]
    fn test_implicit_index_skips_keyed_entries() {
        let m = Members::new().keyed("a", "A").item("B").keyed("c", "C").item("D");
        let keys: Vec<_> = m.flatten().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "0", "c", "1"]);
    }

    #[test]
    fn test_choices() {
        let m = Members::new().keyed("Spam_Me", "Spam").item("Extra Often");
        assert_eq!(
            m.choices(true),
            vec![
                ("spam_me".to_string(), "Spam".to_string()),
                ("extra-often".to_string(), "Extra Often".to_string()),
            ]
        );
        assert_eq!(m.choices(false)[0].0, "Spam_Me");
    }

    #[test]
    fn test_from_pairs_keeps_order() {
        let m = Members::from_pairs([("n", "No"), ("y", "Yes")]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.choices(false)[1], ("y".to_string(), "Yes".to_string()));
    }
}
