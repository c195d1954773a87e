//! JSON parse helpers and the [`Parsable`] model contract.
//!
//! Models keep their properties in an [`InMemoryBackingStore`] keyed by the
//! JSON property name, so parsing is "load the object into a store" and
//! serializing is "dump the (changed) store entries back out".

use crate::error::{GraphError, GraphResult};
use crate::store::InMemoryBackingStore;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// Property holding the OData discriminator.
pub const ODATA_TYPE_KEY: &str = "@odata.type";

/// Property holding the link to the next page of a collection.
pub const ODATA_NEXT_LINK_KEY: &str = "@odata.nextLink";

/// `application/json; charset=utf-8` → `application/json`.
pub fn primary_content_type(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Decode a response body into a JSON tree according to its content type.
///
/// `text/plain` bodies become a JSON string so primitive readers can treat
/// `"42"` and `42` alike.
pub fn parse_root(content_type: &str, body: &[u8]) -> GraphResult<Value> {
    let ct = primary_content_type(content_type);
    if ct == "application/json" || ct.ends_with("+json") {
        Ok(serde_json::from_slice(body)?)
    } else if ct == "text/plain" {
        Ok(Value::String(String::from_utf8_lossy(body).into_owned()))
    } else {
        Err(GraphError::serialization(format!(
            "content type {} does not have a parse node factory registered to be parsed",
            ct
        )))
    }
}

/// A read-only cursor into a parsed JSON document.
#[derive(Debug, Clone, Copy)]
pub struct JsonParseNode<'a> {
    value: &'a Value,
}

impl<'a> JsonParseNode<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Child property; `None` when missing or explicitly `null`.
    pub fn get_child_node(&self, key: &str) -> Option<JsonParseNode<'a>> {
        match self.value.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(JsonParseNode::new(v)),
        }
    }

    pub fn get_string_value(&self) -> Option<String> {
        self.value.as_str().map(str::to_string)
    }

    pub fn get_bool_value(&self) -> Option<bool> {
        match self.value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_i64_value(&self) -> Option<i64> {
        match self.value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_f64_value(&self) -> Option<f64> {
        match self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The `@odata.type` discriminator, if present.
    pub fn discriminator(&self) -> Option<&'a str> {
        self.value.get(ODATA_TYPE_KEY).and_then(Value::as_str)
    }

    pub fn as_object(&self) -> GraphResult<&'a Map<String, Value>> {
        self.value.as_object().ok_or_else(|| {
            GraphError::serialization(format!("expected a JSON object, found {}", kind(self.value)))
        })
    }

    /// Deserialize the node through serde.
    pub fn get_value<T: DeserializeOwned>(&self) -> GraphResult<T> {
        Ok(T::deserialize(self.value)?)
    }

    pub fn get_object_value<T: Parsable>(&self) -> GraphResult<T> {
        T::create_from_discriminator_value(self)
    }

    pub fn get_collection_of_object_values<T: Parsable>(&self) -> GraphResult<Vec<T>> {
        self.array()?
            .iter()
            .map(|item| T::create_from_discriminator_value(&JsonParseNode::new(item)))
            .collect()
    }

    pub fn get_collection_of_primitive_values<T: DeserializeOwned>(&self) -> GraphResult<Vec<T>> {
        self.array()?
            .iter()
            .map(|item| T::deserialize(item).map_err(GraphError::from))
            .collect()
    }

    fn array(&self) -> GraphResult<&'a Vec<Value>> {
        self.value.as_array().ok_or_else(|| {
            GraphError::serialization(format!("expected a JSON array, found {}", kind(self.value)))
        })
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A model that can be parsed from and serialized to JSON through its
/// backing store.
pub trait Parsable: fmt::Debug + Send + Sync + Sized + 'static {
    /// Discriminator value written by new instances (`#microsoft.graph.user`).
    const ODATA_TYPE: Option<&'static str>;

    fn from_backing_store(store: InMemoryBackingStore) -> Self;

    fn backing_store(&self) -> &InMemoryBackingStore;

    fn backing_store_mut(&mut self) -> &mut InMemoryBackingStore;

    /// JSON property names known to the schema, inherited ones included.
    fn field_names() -> &'static [&'static str];

    /// Build an instance from a parse node. Polymorphic bases override
    /// this to dispatch on [`JsonParseNode::discriminator`].
    fn create_from_discriminator_value(node: &JsonParseNode<'_>) -> GraphResult<Self> {
        let map = node.as_object()?;
        Ok(Self::from_backing_store(InMemoryBackingStore::from_json_object(map)))
    }

    fn serialize(&self, changed_only: bool) -> Value {
        self.backing_store().to_json(changed_only)
    }

    /// Properties present in the payload but not in the schema.
    fn additional_data(&self) -> Map<String, Value> {
        let known = Self::field_names();
        self.backing_store()
            .enumerate()
            .into_iter()
            .filter(|(k, _)| !known.contains(k))
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn set_additional_value(&mut self, key: &str, value: Value) {
        self.backing_store_mut().set(key, value);
    }

    fn odata_type(&self) -> Option<String> {
        self.backing_store().get_value(ODATA_TYPE_KEY)
    }
}

/// Serialize a model to a JSON byte buffer.
pub fn serialize_to_json<T: Parsable>(model: &T, changed_only: bool) -> GraphResult<Vec<u8>> {
    Ok(serde_json::to_vec(&model.serialize(changed_only))?)
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
