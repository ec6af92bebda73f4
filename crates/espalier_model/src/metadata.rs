//! Ordered key/value multimap carried by every tree node.

use std::collections::BTreeMap;

/// Metadata attached to a test or parameter.
///
/// Keys iterate in sorted order (stable rendering); values under one key
/// keep insertion order. Empty values are dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value under `key`. Empty values are ignored.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.entries.entry(key.into()).or_default().push(value);
    }

    /// Replace every value under `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let key = key.into();
        if value.is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, vec![value]);
        }
    }

    /// All values under `key`, in insertion order.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first value under `key`, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, values)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn values_keep_insertion_order_per_key() {
        let mut map = MetadataMap::new();
        map.add("Category", "slow");
        map.add("Category", "integration");
        assert_eq!(map.get("Category"), &["slow", "integration"]);
        assert_eq!(map.first("Category"), Some("slow"));
    }

    #[test]
    fn keys_iterate_sorted() {
        let mut map = MetadataMap::new();
        map.add("Zeta", "1");
        map.add("Alpha", "2");
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn empty_values_are_dropped() {
        let mut map = MetadataMap::new();
        map.add("Description", "");
        assert!(map.is_empty());
        assert_eq!(map.get("Description"), &[] as &[String]);

        map.set("Title", "");
        assert!(!map.contains_key("Title"));
    }

    #[test]
    fn set_replaces_all_values() {
        let mut map = MetadataMap::new();
        map.add("IgnoreReason", "flaky");
        map.add("IgnoreReason", "slow");
        map.set("IgnoreReason", "quarantined");
        assert_eq!(map.get("IgnoreReason"), &["quarantined"]);
    }
}
