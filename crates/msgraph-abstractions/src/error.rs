//! Error types for the Microsoft Graph client runtime.
//!
//! Every public API surface in the workspace returns `GraphResult<T>`.
//! Failed HTTP responses are turned into a [`GraphError`] through
//! [`ErrorMappings`], which select a factory by status code and decode the
//! response body into a typed error model (for Graph, the OData error).

use crate::headers::ResponseHeaders;
use crate::serialization::{parse_root, JsonParseNode};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Convenience alias.
pub type GraphResult<T> = Result<T, GraphError>;

/// Broad classification of a [`GraphError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphErrorCode {
    /// The request could not be built (bad template, missing base URL, ...).
    InvalidRequest,
    /// Token acquisition or request authentication failed.
    Authentication,
    /// Network / connectivity error.
    Network,
    /// The request timed out.
    Timeout,
    /// (De)serialization error.
    Serialization,
    /// The service answered with a failure status and no usable error model.
    UnexpectedStatus,
    /// The service answered with a failure status and a typed error body.
    ServiceError,
    /// Catch-all internal error.
    Internal,
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A typed error body produced by an error factory.
pub trait ErrorModel: fmt::Debug + Send + Sync + 'static {
    /// Service-specific error code (for Graph: `error.code`).
    fn error_code(&self) -> Option<String>;
    /// Human readable message (for Graph: `error.message`).
    fn error_message(&self) -> Option<String>;
    fn as_any(&self) -> &dyn Any;
}

/// Structured error returned by every public function.
#[derive(Debug, Clone)]
pub struct GraphError {
    pub code: GraphErrorCode,
    pub message: String,
    pub status: Option<u16>,
    pub response_headers: ResponseHeaders,
    model: Option<Arc<dyn ErrorModel>>,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        if let Some(code) = self.service_code() {
            write!(f, " (service: {})", code)?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphError {}

impl GraphError {
    /// Create from a code + message.
    pub fn new(code: GraphErrorCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            message: msg.into(),
            status: None,
            response_headers: ResponseHeaders::new(),
            model: None,
        }
    }

    /// Shortcut: invalid request.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(GraphErrorCode::InvalidRequest, msg)
    }

    /// Shortcut: authentication failure.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::new(GraphErrorCode::Authentication, msg)
    }

    /// Shortcut: network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::new(GraphErrorCode::Network, msg)
    }

    /// Shortcut: timeout.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(GraphErrorCode::Timeout, msg)
    }

    /// Shortcut: serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::new(GraphErrorCode::Serialization, msg)
    }

    /// Shortcut: internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(GraphErrorCode::Internal, msg)
    }

    /// A failure status that could not be mapped to a typed model.
    pub fn unexpected_status(
        status: u16,
        msg: impl Into<String>,
        headers: ResponseHeaders,
    ) -> Self {
        Self {
            code: GraphErrorCode::UnexpectedStatus,
            message: msg.into(),
            status: Some(status),
            response_headers: headers,
            model: None,
        }
    }

    /// A failure status decoded into a typed error model.
    pub fn from_model(
        status: u16,
        headers: ResponseHeaders,
        model: Arc<dyn ErrorModel>,
    ) -> Self {
        let message = model
            .error_message()
            .unwrap_or_else(|| format!("Service error (HTTP {})", status));
        Self {
            code: GraphErrorCode::ServiceError,
            message,
            status: Some(status),
            response_headers: headers,
            model: Some(model),
        }
    }

    /// Attach the response status and headers (used when a factory fails).
    pub fn with_response(mut self, status: u16, headers: ResponseHeaders) -> Self {
        self.status = Some(status);
        self.response_headers = headers;
        self
    }

    /// The typed error model, if the error was produced by a factory of type `T`.
    pub fn model<T: ErrorModel>(&self) -> Option<&T> {
        self.model.as_ref()?.as_any().downcast_ref::<T>()
    }

    /// Whether a typed model is attached.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Service-specific error code from the attached model.
    pub fn service_code(&self) -> Option<String> {
        self.model.as_ref().and_then(|m| m.error_code())
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for GraphError {
    fn from(err: url::ParseError) -> Self {
        Self::invalid_request(format!("URL parse error: {}", err))
    }
}

impl From<crate::uri_template::UriTemplateError> for GraphError {
    fn from(err: crate::uri_template::UriTemplateError) -> Self {
        Self::invalid_request(format!("URI template error: {}", err))
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Error mappings
// ═══════════════════════════════════════════════════════════════════════

/// Decodes an error response body into a typed model.
pub type ErrorFactory = fn(&JsonParseNode<'_>) -> GraphResult<Arc<dyn ErrorModel>>;

/// Status-code keyed error factories.
///
/// Keys are an exact status (`"404"`), a class (`"4XX"`, `"5XX"`) or the
/// catch-all `"XXX"`, tried in that order.
#[derive(Clone, Default)]
pub struct ErrorMappings {
    factories: HashMap<String, ErrorFactory>,
}

impl fmt::Debug for ErrorMappings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("ErrorMappings").field("keys", &keys).finish()
    }
}

impl ErrorMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, factory: ErrorFactory) -> Self {
        self.insert(key, factory);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, factory: ErrorFactory) {
        self.factories.insert(key.into().to_ascii_uppercase(), factory);
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Pick the factory for a status code.
    pub fn resolve(&self, status: u16) -> Option<ErrorFactory> {
        if let Some(f) = self.factories.get(&status.to_string()) {
            return Some(*f);
        }
        let class = match status {
            400..=499 => self.factories.get("4XX"),
            500..=599 => self.factories.get("5XX"),
            _ => None,
        };
        if let Some(f) = class {
            return Some(*f);
        }
        if (400..600).contains(&status) {
            return self.factories.get("XXX").copied();
        }
        None
    }
}

/// Turn a failed response into a [`GraphError`].
///
/// `content_type` is the primary (parameter-less, lower-cased) media type.
pub fn error_from_response(
    mappings: Option<&ErrorMappings>,
    status: u16,
    headers: ResponseHeaders,
    content_type: Option<&str>,
    body: &[u8],
) -> GraphError {
    let Some(factory) = mappings.and_then(|m| m.resolve(status)) else {
        return GraphError::unexpected_status(
            status,
            format!(
                "The server returned an unexpected status code and no error factory is registered for this code: {}",
                status
            ),
            headers,
        );
    };

    let content_type = content_type.unwrap_or_default();
    if body.is_empty() || content_type.is_empty() {
        return GraphError::unexpected_status(
            status,
            format!(
                "The server returned an unexpected status code with no response body: {}",
                status
            ),
            headers,
        );
    }

    let root = match parse_root(content_type, body) {
        Ok(v) => v,
        Err(e) => return e.with_response(status, headers),
    };

    match factory(&JsonParseNode::new(&root)) {
        Ok(model) => GraphError::from_model(status, headers, model),
        Err(e) => e.with_response(status, headers),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
