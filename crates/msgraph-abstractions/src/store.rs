//! In-memory backing store with change tracking.
//!
//! Every generated model keeps its properties here instead of in struct
//! fields, which is what lets a PATCH send only the properties the caller
//! touched.

use crate::serialization::{JsonParseNode, Parsable};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Change callback: `(key, previous value, new value)`.
pub type StoreSubscriber = Arc<dyn Fn(&str, Option<&Value>, &Value) + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    value: Value,
    dirty: bool,
}

#[derive(Clone)]
pub struct InMemoryBackingStore {
    entries: BTreeMap<String, Entry>,
    initialization_completed: bool,
    return_only_changed_values: bool,
    subscribers: BTreeMap<String, StoreSubscriber>,
    next_subscription: u64,
}

impl fmt::Debug for InMemoryBackingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBackingStore")
            .field("entries", &self.entries)
            .field("initialization_completed", &self.initialization_completed)
            .field("return_only_changed_values", &self.return_only_changed_values)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for InMemoryBackingStore {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            initialization_completed: true,
            return_only_changed_values: false,
            subscribers: BTreeMap::new(),
            next_subscription: 0,
        }
    }
}

impl PartialEq for InMemoryBackingStore {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl InMemoryBackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a store from a parsed JSON object; every entry starts clean.
    pub fn from_json_object(map: &Map<String, Value>) -> Self {
        let mut store = Self::new();
        store.set_initialization_completed(false);
        for (k, v) in map {
            store.set(k, v.clone());
        }
        store.set_initialization_completed(true);
        store
    }

    pub fn initialization_completed(&self) -> bool {
        self.initialization_completed
    }

    /// Turning initialization on marks every current entry clean.
    pub fn set_initialization_completed(&mut self, completed: bool) {
        self.initialization_completed = completed;
        if completed {
            for entry in self.entries.values_mut() {
                entry.dirty = false;
            }
        }
    }

    pub fn return_only_changed_values(&self) -> bool {
        self.return_only_changed_values
    }

    pub fn set_return_only_changed_values(&mut self, value: bool) {
        self.return_only_changed_values = value;
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        let entry = self.entries.get(key)?;
        if self.return_only_changed_values && !entry.dirty {
            return None;
        }
        Some(&entry.value)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        let previous = self.entries.get(key).map(|e| e.value.clone());
        if previous.as_ref() == Some(&value) {
            return;
        }
        for callback in self.subscribers.values() {
            callback(key, previous.as_ref(), &value);
        }
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                dirty: self.initialization_completed,
            },
        );
    }

    pub fn is_dirty(&self, key: &str) -> bool {
        self.entries.get(key).map_or(false, |e| e.dirty)
    }

    /// Entries in key order; only dirty ones when
    /// `return_only_changed_values` is on.
    pub fn enumerate(&self) -> Vec<(&str, &Value)> {
        self.entries
            .iter()
            .filter(|(_, e)| !self.return_only_changed_values || e.dirty)
            .map(|(k, e)| (k.as_str(), &e.value))
            .collect()
    }

    /// Keys explicitly changed to `null` since initialization.
    pub fn enumerate_keys_for_values_changed_to_null(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.dirty && e.value.is_null())
            .map(|(k, _)| k.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Register a change callback; returns the subscription id.
    pub fn subscribe(&mut self, callback: StoreSubscriber) -> String {
        self.next_subscription += 1;
        let id = format!("sub-{}", self.next_subscription);
        self.subscribers.insert(id.clone(), callback);
        id
    }

    /// Register a callback under a caller-chosen id, replacing any previous one.
    pub fn subscribe_with_id(&mut self, id: &str, callback: StoreSubscriber) {
        self.subscribers.insert(id.to_string(), callback);
    }

    pub fn unsubscribe(&mut self, id: &str) -> bool {
        self.subscribers.remove(id).is_some()
    }

    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }

    /// Dump entries as a JSON object.
    pub fn to_json(&self, changed_only: bool) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .filter(|(_, e)| !changed_only || e.dirty)
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect();
        Value::Object(map)
    }

    // ── Typed accessors ─────────────────────────────────────────────────

    /// Typed read; `null`, missing and undecodable values read as `None`.
    pub fn get_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get(key)? {
            Value::Null => None,
            v => match T::deserialize(v) {
                Ok(t) => Some(t),
                Err(e) => {
                    log::debug!("backing store value '{}' has an unexpected shape: {}", key, e);
                    None
                }
            },
        }
    }

    /// Typed write; `None` stores an explicit `null`.
    pub fn set_value<T: Serialize>(&mut self, key: &str, value: Option<T>) {
        let v = match value {
            Some(v) => match serde_json::to_value(v) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("could not store value '{}': {}", key, e);
                    return;
                }
            },
            None => Value::Null,
        };
        self.set(key, v);
    }

    pub fn get_object<T: Parsable>(&self, key: &str) -> Option<T> {
        let v = self.get(key)?;
        if v.is_null() {
            return None;
        }
        match T::create_from_discriminator_value(&JsonParseNode::new(v)) {
            Ok(t) => Some(t),
            Err(e) => {
                log::debug!("backing store object '{}' could not be parsed: {}", key, e);
                None
            }
        }
    }

    pub fn set_object<T: Parsable>(&mut self, key: &str, value: Option<&T>) {
        let v = value.map_or(Value::Null, |t| t.serialize(false));
        self.set(key, v);
    }

    /// Elements that fail to parse (including `null`) are skipped, not the
    /// whole collection.
    pub fn get_collection<T: Parsable>(&self, key: &str) -> Option<Vec<T>> {
        let items = match self.get(key)? {
            Value::Null => return None,
            Value::Array(items) => items,
            _ => {
                log::debug!("backing store collection '{}' is not an array", key);
                return None;
            }
        };
        let parsed = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                match T::create_from_discriminator_value(&JsonParseNode::new(item)) {
                    Ok(t) => Some(t),
                    Err(e) => {
                        log::warn!("skipping element {} of collection '{}': {}", i, key, e);
                        None
                    }
                }
            })
            .collect();
        Some(parsed)
    }

    pub fn set_collection<T: Parsable>(&mut self, key: &str, value: Option<&[T]>) {
        let v = value.map_or(Value::Null, |items| {
            Value::Array(items.iter().map(|t| t.serialize(false)).collect())
        });
        self.set(key, v);
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
