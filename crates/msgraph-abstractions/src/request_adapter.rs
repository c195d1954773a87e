//! The transport contract every generated request builder talks to.

use crate::error::{ErrorMappings, GraphError, GraphResult};
use crate::headers::ResponseHeaders;
use crate::request_information::RequestInformation;
use crate::serialization::{parse_root, JsonParseNode, Parsable};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A successful response that carried a body.
#[derive(Debug, Clone)]
pub struct ResponseBody {
    pub status: u16,
    /// Primary media type, lower-cased and without parameters.
    pub content_type: String,
    pub headers: ResponseHeaders,
    pub body: Vec<u8>,
}

impl ResponseBody {
    pub fn parse(&self) -> GraphResult<Value> {
        parse_root(&self.content_type, &self.body)
    }
}

/// Executes [`RequestInformation`]s.
///
/// Implementations must:
/// - turn statuses ≥ 400 into errors through `error_mappings`;
/// - return `Ok(None)` for 204, an empty body or a missing `Content-Type`.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    /// Service root used to fill the `baseurl` path parameter.
    fn base_url(&self) -> String;

    /// Whether models should only serialize changed properties.
    fn backing_store_enabled(&self) -> bool {
        false
    }

    async fn send_raw(
        &self,
        request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<ResponseBody>>;
}

impl fmt::Debug for dyn RequestAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestAdapter")
            .field("base_url", &self.base_url())
            .finish()
    }
}

impl dyn RequestAdapter {
    /// Send and decode a single model.
    pub async fn send<T: Parsable>(
        &self,
        request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<T>> {
        let Some(response) = self.send_raw(request, error_mappings).await? else {
            return Ok(None);
        };
        let root = response.parse()?;
        Ok(Some(JsonParseNode::new(&root).get_object_value()?))
    }

    /// Send and decode a top-level JSON array of models.
    pub async fn send_collection<T: Parsable>(
        &self,
        request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<Vec<T>>> {
        let Some(response) = self.send_raw(request, error_mappings).await? else {
            return Ok(None);
        };
        let root = response.parse()?;
        Ok(Some(JsonParseNode::new(&root).get_collection_of_object_values()?))
    }

    /// Send and decode a primitive; `text/plain` bodies go through `FromStr`.
    pub async fn send_primitive<P>(
        &self,
        request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<P>>
    where
        P: DeserializeOwned + FromStr + Send,
        P::Err: fmt::Display,
    {
        let Some(response) = self.send_raw(request, error_mappings).await? else {
            return Ok(None);
        };
        let root = response.parse()?;
        primitive_from_value(&root).map(Some)
    }

    pub async fn send_primitive_collection<P: DeserializeOwned + Send>(
        &self,
        request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<Vec<P>>> {
        let Some(response) = self.send_raw(request, error_mappings).await? else {
            return Ok(None);
        };
        let root = response.parse()?;
        Ok(Some(JsonParseNode::new(&root).get_collection_of_primitive_values()?))
    }

    /// Send and return the raw body.
    pub async fn send_bytes(
        &self,
        request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<Vec<u8>>> {
        Ok(self
            .send_raw(request, error_mappings)
            .await?
            .map(|response| response.body))
    }

    /// Send and decode a string-valued enum.
    pub async fn send_enum<E>(
        &self,
        request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<E>>
    where
        E: FromStr + Send,
        E::Err: fmt::Display,
    {
        let Some(response) = self.send_raw(request, error_mappings).await? else {
            return Ok(None);
        };
        let root = response.parse()?;
        let raw = JsonParseNode::new(&root)
            .get_string_value()
            .ok_or_else(|| GraphError::serialization("expected a string enum value"))?;
        E::from_str(&raw)
            .map(Some)
            .map_err(|e| GraphError::serialization(format!("invalid enum value '{}': {}", raw, e)))
    }

    /// Send and discard any body.
    pub async fn send_no_content(
        &self,
        request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<()> {
        self.send_raw(request, error_mappings).await?;
        Ok(())
    }
}

fn primitive_from_value<P>(root: &Value) -> GraphResult<P>
where
    P: DeserializeOwned + FromStr,
    P::Err: fmt::Display,
{
    match P::deserialize(root) {
        Ok(p) => Ok(p),
        Err(json_err) => match root {
            Value::String(s) => P::from_str(s.trim()).map_err(|e| {
                GraphError::serialization(format!("could not parse primitive '{}': {}", s, e))
            }),
            _ => Err(json_err.into()),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
