//! Case-insensitive, multi-valued HTTP header collections.

use std::collections::BTreeMap;

/// Header names are stored lower-cased; each name keeps a de-duplicated,
/// insertion-ordered list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: BTreeMap<String, Vec<String>>,
}

/// Headers attached to an outgoing request.
pub type RequestHeaders = Headers;

/// Headers received with a response.
pub type ResponseHeaders = Headers;

fn normalize(key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_ascii_lowercase())
    }
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, keeping existing values for the same name.
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        let Some(key) = normalize(key) else { return };
        let value = value.into();
        let values = self.inner.entry(key).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }

    /// Add a value only when no value exists for the name yet.
    pub fn try_add(&mut self, key: &str, value: impl Into<String>) -> bool {
        let Some(key) = normalize(key) else { return false };
        if self.inner.contains_key(&key) {
            return false;
        }
        self.inner.insert(key, vec![value.into()]);
        true
    }

    /// Replace every value of a name.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let Some(key) = normalize(key) else { return };
        self.inner.insert(key, vec![value.into()]);
    }

    /// Merge another collection into this one.
    pub fn add_all(&mut self, other: &Headers) {
        for (key, values) in &other.inner {
            for v in values {
                self.add(key, v.clone());
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        match normalize(key) {
            Some(key) => self.inner.remove(&key).is_some(),
            None => false,
        }
    }

    /// Remove one value; drops the name when it was the last value.
    pub fn remove_value(&mut self, key: &str, value: &str) -> bool {
        let Some(key) = normalize(key) else { return false };
        let Some(values) = self.inner.get_mut(&key) else { return false };
        let before = values.len();
        values.retain(|v| v != value);
        let removed = values.len() != before;
        if values.is_empty() {
            self.inner.remove(&key);
        }
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        normalize(key).map_or(false, |k| self.inner.contains_key(&k))
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        let key = normalize(key)?;
        self.inner.get(&key).map(|v| v.as_slice())
    }

    /// First value of a name.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.first()).map(|s| s.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
