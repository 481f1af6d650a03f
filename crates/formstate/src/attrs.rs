// File: src/attrs.rs
// Purpose: Opaque attribute bag carried alongside a field for presenters

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Arbitrary attributes (`id`, `class`, `data-*`, `style`, ...) attached to
/// a field.
///
/// Validation never reads these. They ride along with the descriptor so a
/// presenter can forward them verbatim. Iteration is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldAttrs(BTreeMap<String, String>);

impl FieldAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldAttrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_are_sorted_and_replaceable() {
        let mut attrs: FieldAttrs = [("id", "firstName"), ("class", "custom-class")]
            .into_iter()
            .collect();
        attrs.insert("data-custom", "5");
        attrs.insert("class", "other");

        let names: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["class", "data-custom", "id"]);
        assert_eq!(attrs.get("class"), Some("other"));
        assert_eq!(attrs.len(), 3);
    }

    #[test]
    fn test_empty_attrs() {
        let attrs = FieldAttrs::new();
        assert!(attrs.is_empty());
        assert_eq!(attrs.get("id"), None);
    }
}
