//! Ordered attribute list.
//!
//! [§ 4.9.2 Interface NamedNodeMap](https://dom.spec.whatwg.org/#interface-namednodemap)
//! "A NamedNodeMap has an associated element (an element) ... attribute list"
//!
//! Attributes keep their source order, so anything derived from them (such as
//! generated selectors) is reproducible run to run.

/// An element's attribute list, in insertion order, with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// An empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Value of the attribute called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set `name` to `value`, keeping the original position when it already
    /// exists. Returns the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        if let Some(index) = self.entries.iter().position(|(key, _)| *key == name) {
            return Some(std::mem::replace(&mut self.entries[index].1, value));
        }
        self.entries.push((name, value));
        None
    }

    /// `(name, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            let _ = attrs.insert(name, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_first_position() {
        let mut attrs: Attributes = [("data-b", "1"), ("type", "text")].into_iter().collect();
        assert_eq!(attrs.insert("data-b", "2"), Some("1".to_string()));
        let names: Vec<&str> = attrs.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["data-b", "type"]);
        assert_eq!(attrs.get("data-b"), Some("2"));
    }

    #[test]
    fn missing_attribute() {
        let attrs = Attributes::new();
        assert!(attrs.is_empty());
        assert_eq!(attrs.get("id"), None);
    }
}
