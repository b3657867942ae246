//! Persisted open/closed state for collapsible groups.
//!
//! The persisted value is a JSON array of group ids held under one key of a
//! [`KeyValueStore`]. Reads are lenient: a missing or unparseable value is the
//! empty set. Writes always replace the whole value.

use std::collections::{BTreeSet, HashMap};

/// Minimal string key-value store (the shape of browser local storage).
pub trait KeyValueStore {
    /// Return the raw value under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: String);
}

/// In-process [`KeyValueStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// The set of currently open group ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGroups(BTreeSet<String>);

impl OpenGroups {
    /// Parse a persisted JSON array. Duplicates collapse; anything that is not
    /// an array of strings is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str::<Vec<String>>(raw)
            .ok()
            .map(|ids| Self(ids.into_iter().collect()))
    }

    /// Read the state under `key`, degrading to the empty set.
    pub fn load(store: &impl KeyValueStore, key: &str) -> Self {
        match store.get(key) {
            Some(raw) => Self::parse(&raw).unwrap_or_else(|| {
                log::warn!("Discarding malformed group state under '{key}'");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Write the whole set under `key`.
    pub fn save(&self, store: &mut impl KeyValueStore, key: &str) {
        let ids: Vec<&str> = self.0.iter().map(String::as_str).collect();
        // Vec<&str> always serializes.
        let raw = serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string());
        store.set(key, raw);
    }

    pub fn contains(&self, group: &str) -> bool {
        self.0.contains(group)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Mark `group` open or closed and persist the resulting set.
pub fn toggle(store: &mut impl KeyValueStore, key: &str, group: &str, open: bool) -> OpenGroups {
    let mut groups = OpenGroups::load(store, key);
    if open {
        groups.0.insert(group.to_string());
    } else {
        groups.0.remove(group);
    }
    groups.save(store, key);
    groups
}

#[cfg(test)]
#[path = "toggle_test.rs"]
mod tests;
