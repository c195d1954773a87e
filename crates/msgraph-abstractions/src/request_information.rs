//! Abstract description of an HTTP request, independent of any transport.

use crate::error::{GraphError, GraphResult};
use crate::headers::RequestHeaders;
use crate::request_adapter::RequestAdapter;
use crate::request_option::{RequestConfiguration, RequestOption, RequestOptions};
use crate::serialization::{primary_content_type, Parsable};
use crate::uri_template::{TemplateValue, UriTemplate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Path parameter holding a fully built URL that bypasses the template.
pub const RAW_URL_KEY: &str = "request-raw-url";

/// Path parameter holding the service root (`https://graph.microsoft.com/v1.0`).
pub const BASE_URL_KEY: &str = "baseurl";

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub const TEXT_CONTENT_TYPE: &str = "text/plain";

pub const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
    Put,
    Head,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Put => "PUT",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RequestInformation {
    pub method: HttpMethod,
    pub url_template: String,
    pub path_parameters: HashMap<String, String>,
    pub query_parameters: HashMap<String, TemplateValue>,
    pub headers: RequestHeaders,
    pub content: Option<Vec<u8>>,
    pub options: RequestOptions,
}

impl RequestInformation {
    pub fn new(
        method: HttpMethod,
        url_template: impl Into<String>,
        path_parameters: HashMap<String, String>,
    ) -> Self {
        Self {
            method,
            url_template: url_template.into(),
            path_parameters,
            query_parameters: HashMap::new(),
            headers: RequestHeaders::new(),
            content: None,
            options: RequestOptions::new(),
        }
    }

    /// Resolve the final request URL.
    pub fn uri(&self) -> GraphResult<Url> {
        if let Some(raw) = self.path_parameters.get(RAW_URL_KEY).filter(|s| !s.is_empty()) {
            return Ok(Url::parse(raw)?);
        }

        let needs_base = self.url_template.to_ascii_lowercase().contains("{+baseurl}");
        let has_base = self
            .path_parameters
            .get(BASE_URL_KEY)
            .map_or(false, |s| !s.is_empty());
        if needs_base && !has_base {
            return Err(GraphError::invalid_request(
                "pathParameters must contain a value for \"baseurl\" for the URL to be built",
            ));
        }

        let mut values: HashMap<String, TemplateValue> = self
            .path_parameters
            .iter()
            .map(|(k, v)| (k.clone(), TemplateValue::String(v.clone())))
            .collect();
        for (k, v) in &self.query_parameters {
            values.insert(k.clone(), v.clone());
        }

        let expanded = UriTemplate::parse(&self.url_template)?.expand(&values);
        Ok(Url::parse(&expanded)?)
    }

    /// Point the request at a fully built URL.
    pub fn set_uri(&mut self, url: &Url) {
        self.path_parameters.clear();
        self.query_parameters.clear();
        self.path_parameters
            .insert(RAW_URL_KEY.to_string(), url.as_str().to_string());
    }

    /// Convert a query-parameter struct into template variables.
    ///
    /// Field names must already be the wire names (`%24select`); `None`
    /// fields and empty lists are skipped.
    pub fn add_query_parameters<T: Serialize>(&mut self, params: &T) -> GraphResult<()> {
        let value = serde_json::to_value(params)?;
        let Value::Object(map) = value else {
            return Err(GraphError::invalid_request(
                "query parameters must serialize to an object",
            ));
        };
        for (name, v) in map {
            if let Some(tv) = template_value(v) {
                self.query_parameters.insert(name, tv);
            }
        }
        Ok(())
    }

    pub fn add_request_options<I: IntoIterator<Item = Arc<dyn RequestOption>>>(&mut self, options: I) {
        self.options.add_all(options);
    }

    pub fn add_request_headers(&mut self, headers: &RequestHeaders) {
        self.headers.add_all(headers);
    }

    /// Apply a caller supplied configuration: headers, options, then query
    /// parameters.
    pub fn configure<Q: Serialize>(
        &mut self,
        config: Option<&RequestConfiguration<Q>>,
    ) -> GraphResult<()> {
        let Some(config) = config else { return Ok(()) };
        self.add_request_headers(&config.headers);
        self.add_request_options(config.options.iter().cloned());
        if let Some(q) = &config.query_parameters {
            self.add_query_parameters(q)?;
        }
        Ok(())
    }

    /// Serialize a model as the request body.
    ///
    /// Only the properties changed since the model was loaded are written
    /// when the adapter runs with the backing store enabled.
    pub fn set_content_from_parsable<T: Parsable>(
        &mut self,
        adapter: &dyn RequestAdapter,
        content_type: &str,
        body: &T,
    ) -> GraphResult<()> {
        ensure_json(content_type)?;
        let json = body.serialize(adapter.backing_store_enabled());
        self.set_json_content(content_type, &json)
    }

    pub fn set_content_from_parsable_collection<T: Parsable>(
        &mut self,
        adapter: &dyn RequestAdapter,
        content_type: &str,
        items: &[T],
    ) -> GraphResult<()> {
        ensure_json(content_type)?;
        let changed_only = adapter.backing_store_enabled();
        let json = Value::Array(items.iter().map(|i| i.serialize(changed_only)).collect());
        self.set_json_content(content_type, &json)
    }

    /// Serialize a primitive body (`application/json` or `text/plain`).
    pub fn set_content_from_scalar<T: Serialize + fmt::Display>(
        &mut self,
        content_type: &str,
        value: &T,
    ) -> GraphResult<()> {
        match primary_content_type(content_type).as_str() {
            JSON_CONTENT_TYPE => {
                let json = serde_json::to_value(value)?;
                self.set_json_content(content_type, &json)
            }
            TEXT_CONTENT_TYPE => {
                self.headers.set(CONTENT_TYPE_HEADER, content_type);
                self.content = Some(value.to_string().into_bytes());
                Ok(())
            }
            other => Err(no_writer(other)),
        }
    }

    /// Binary body with `application/octet-stream`.
    pub fn set_stream_content(&mut self, content: Vec<u8>) {
        self.set_stream_content_and_content_type(content, BINARY_CONTENT_TYPE);
    }

    pub fn set_stream_content_and_content_type(&mut self, content: Vec<u8>, content_type: &str) {
        self.headers.set(CONTENT_TYPE_HEADER, content_type);
        self.content = Some(content);
    }

    fn set_json_content(&mut self, content_type: &str, json: &Value) -> GraphResult<()> {
        self.content = Some(serde_json::to_vec(json)?);
        self.headers.set(CONTENT_TYPE_HEADER, content_type);
        Ok(())
    }
}

fn ensure_json(content_type: &str) -> GraphResult<()> {
    let primary = primary_content_type(content_type);
    if primary == JSON_CONTENT_TYPE || primary.ends_with("+json") {
        Ok(())
    } else {
        Err(no_writer(&primary))
    }
}

fn no_writer(content_type: &str) -> GraphError {
    GraphError::serialization(format!(
        "content type {} does not have a serialization writer factory registered",
        content_type
    ))
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn template_value(v: Value) -> Option<TemplateValue> {
    match v {
        Value::Null => None,
        Value::Bool(b) => Some(TemplateValue::Boolean(b)),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => TemplateValue::Integer(i),
            None => TemplateValue::String(n.to_string()),
        }),
        Value::String(s) => Some(TemplateValue::String(s)),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().filter_map(scalar_string).collect();
            if items.is_empty() {
                None
            } else {
                Some(TemplateValue::List(items))
            }
        }
        Value::Object(_) => Some(TemplateValue::String(v.to_string())),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorMappings, GraphErrorCode};
    use crate::request_adapter::ResponseBody;
    use crate::store::InMemoryBackingStore;
    use async_trait::async_trait;

    const USER_TEMPLATE: &str = "{+baseurl}/users/{user%2Did}{?%24expand,%24select}";

    #[derive(Serialize, Default)]
    struct ItemQuery {
        #[serde(rename = "%24expand", skip_serializing_if = "Option::is_none")]
        expand: Option<Vec<String>>,
        #[serde(rename = "%24select", skip_serializing_if = "Option::is_none")]
        select: Option<Vec<String>>,
    }

    fn params() -> HashMap<String, String> {
        HashMap::from([
            (BASE_URL_KEY.to_string(), "https://graph.microsoft.com/v1.0".to_string()),
            ("user%2Did".to_string(), "adele".to_string()),
        ])
    }

    struct Adapter(bool);

    #[async_trait]
    impl RequestAdapter for Adapter {
        fn base_url(&self) -> String {
            String::new()
        }
        fn backing_store_enabled(&self) -> bool {
            self.0
        }
        async fn send_raw(
            &self,
            _request: RequestInformation,
            _error_mappings: Option<&ErrorMappings>,
        ) -> GraphResult<Option<ResponseBody>> {
            Ok(None)
        }
    }

    #[derive(Debug)]
    struct Thing {
        store: InMemoryBackingStore,
    }

    impl Parsable for Thing {
        const ODATA_TYPE: Option<&'static str> = None;
        fn from_backing_store(store: InMemoryBackingStore) -> Self {
            Self { store }
        }
        fn backing_store(&self) -> &InMemoryBackingStore {
            &self.store
        }
        fn backing_store_mut(&mut self) -> &mut InMemoryBackingStore {
            &mut self.store
        }
        fn field_names() -> &'static [&'static str] {
            &["id", "name"]
        }
    }

    #[test]
    fn test_uri_from_template() {
        let mut info = RequestInformation::new(HttpMethod::Get, USER_TEMPLATE, params());
        info.add_query_parameters(&ItemQuery {
            select: Some(vec!["id".into(), "mail".into()]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            info.uri().unwrap().as_str(),
            "https://graph.microsoft.com/v1.0/users/adele?%24select=id,mail"
        );
    }

    #[test]
    fn test_uri_requires_baseurl() {
        let info = RequestInformation::new(HttpMethod::Get, USER_TEMPLATE, HashMap::new());
        let err = info.uri().unwrap_err();
        assert_eq!(err.code, GraphErrorCode::InvalidRequest);
        assert!(err.message.contains("baseurl"));
    }

    #[test]
    fn test_raw_url_wins() {
        let mut p = params();
        p.insert(
            RAW_URL_KEY.to_string(),
            "https://graph.microsoft.com/v1.0/users?$skiptoken=abc".to_string(),
        );
        let info = RequestInformation::new(HttpMethod::Get, USER_TEMPLATE, p);
        assert_eq!(
            info.uri().unwrap().as_str(),
            "https://graph.microsoft.com/v1.0/users?$skiptoken=abc"
        );
    }

    #[test]
    fn test_set_uri_clears_template_inputs() {
        let mut info = RequestInformation::new(HttpMethod::Get, USER_TEMPLATE, params());
        info.query_parameters
            .insert("%24top".into(), TemplateValue::Integer(5));
        let url = Url::parse("https://example.com/next").unwrap();
        info.set_uri(&url);
        assert!(info.query_parameters.is_empty());
        assert_eq!(info.path_parameters.len(), 1);
        assert_eq!(info.uri().unwrap(), url);
    }

    #[test]
    fn test_empty_query_list_skipped() {
        let mut info = RequestInformation::new(HttpMethod::Get, USER_TEMPLATE, params());
        info.add_query_parameters(&ItemQuery {
            expand: Some(vec![]),
            select: None,
        })
        .unwrap();
        assert!(info.query_parameters.is_empty());
    }

    #[test]
    fn test_configure_applies_everything() {
        let cfg = RequestConfiguration::<ItemQuery>::new()
            .with_header("Prefer", "return=minimal")
            .with_query(ItemQuery {
                expand: Some(vec!["manager".into()]),
                select: None,
            });
        let mut info = RequestInformation::new(HttpMethod::Get, USER_TEMPLATE, params());
        info.configure(Some(&cfg)).unwrap();
        assert_eq!(info.headers.first("prefer"), Some("return=minimal"));
        assert_eq!(
            info.query_parameters.get("%24expand"),
            Some(&TemplateValue::List(vec!["manager".into()]))
        );
    }

    #[test]
    fn test_content_from_parsable_honours_backing_store() {
        let v = serde_json::json!({"id": "1", "name": "old"});
        let mut thing = Thing::from_backing_store(InMemoryBackingStore::from_json_object(
            v.as_object().unwrap(),
        ));
        thing.store.set_value("name", Some("new"));

        let mut info = RequestInformation::new(HttpMethod::Patch, USER_TEMPLATE, params());
        info.set_content_from_parsable(&Adapter(true), JSON_CONTENT_TYPE, &thing)
            .unwrap();
        assert_eq!(info.content.as_deref(), Some(br#"{"name":"new"}"#.as_slice()));
        assert_eq!(info.headers.first("content-type"), Some(JSON_CONTENT_TYPE));

        info.set_content_from_parsable(&Adapter(false), JSON_CONTENT_TYPE, &thing)
            .unwrap();
        assert_eq!(
            info.content.as_deref(),
            Some(br#"{"id":"1","name":"new"}"#.as_slice())
        );
    }

    #[test]
    fn test_content_rejects_unknown_type() {
        let thing = Thing::from_backing_store(InMemoryBackingStore::new());
        let mut info = RequestInformation::new(HttpMethod::Post, USER_TEMPLATE, params());
        let err = info
            .set_content_from_parsable(&Adapter(false), "application/xml", &thing)
            .unwrap_err();
        assert_eq!(err.code, GraphErrorCode::Serialization);
    }

    #[test]
    fn test_scalar_and_stream_content() {
        let mut info = RequestInformation::new(HttpMethod::Put, USER_TEMPLATE, params());
        info.set_content_from_scalar(TEXT_CONTENT_TYPE, &42).unwrap();
        assert_eq!(info.content.as_deref(), Some(b"42".as_slice()));

        info.set_stream_content(vec![1, 2, 3]);
        assert_eq!(info.headers.first("Content-Type"), Some(BINARY_CONTENT_TYPE));
        assert_eq!(info.content, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
