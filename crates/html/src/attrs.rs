//! Ordered attribute lists with unique, ASCII case-insensitive names.
//!
//! A `None` value is a boolean attribute and serializes as the bare name.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Inserts or replaces `name`. A replaced entry keeps its original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.put(name.into(), Some(value.into()));
    }

    /// Inserts or replaces `name` as a valueless attribute.
    pub fn set_flag(&mut self, name: impl Into<String>) {
        self.put(name.into(), None);
    }

    fn put(&mut self, name: String, value: Option<String>) {
        match self.position(&name) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder form of [`Attributes::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder form of [`Attributes::set_flag`].
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.set_flag(name);
        self
    }

    /// Value of `name`; valueless attributes yield `Some("")`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .map(|i| self.entries[i].1.as_deref().unwrap_or(""))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    /// Appends each whitespace-separated token of `classes` to the `class` list,
    /// skipping tokens already present. Existing tokens are never dropped.
    pub fn add_class(&mut self, classes: &str) {
        let mut list: Vec<String> = self
            .get("class")
            .map(|v| v.split_ascii_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let before = list.len();
        for token in classes.split_ascii_whitespace() {
            if !list.iter().any(|t| t == token) {
                list.push(token.to_string());
            }
        }
        if list.len() != before || !self.contains("class") {
            self.set("class", list.join(" "));
        }
    }

    /// Copies every entry of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Attributes) {
        for (k, v) in &other.entries {
            self.put(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_and_case_insensitive() {
        let mut attrs = Attributes::from([("ID", "a"), ("title", "t")]);
        attrs.set("id", "b");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("Id"), Some("b"));
        assert_eq!(attrs.iter().next(), Some(("ID", Some("b"))));
    }

    #[test]
    fn add_class_merges_without_duplicates() {
        let mut attrs = Attributes::from([("class", "foo  dialog")]);
        attrs.add_class("dialog bar");
        assert_eq!(attrs.get("class"), Some("foo dialog bar"));

        let mut empty = Attributes::new();
        empty.add_class("dialog");
        assert_eq!(empty.get("class"), Some("dialog"));
    }

    #[test]
    fn merge_prefers_the_right_hand_side() {
        let mut attrs = Attributes::from([("aria-label", "mine"), ("title", "t")]);
        attrs.merge(&Attributes::new().with("aria-label", "close").with_flag("data-x"));
        assert_eq!(attrs.get("aria-label"), Some("close"));
        assert_eq!(attrs.get("title"), Some("t"));
        assert_eq!(attrs.get("data-x"), Some(""));
    }

    #[test]
    fn remove_returns_the_old_value() {
        let mut attrs = Attributes::new().with_flag("open");
        assert_eq!(attrs.remove("OPEN"), Some(None));
        assert!(attrs.is_empty());
        assert_eq!(attrs.remove("open"), None);
    }
}
