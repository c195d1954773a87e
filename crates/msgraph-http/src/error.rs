//! Transport error mapping.

use msgraph_abstractions::{GraphError, ResponseHeaders};
use reqwest::header::HeaderMap;

/// Map a `reqwest` failure onto a [`GraphError`].
pub fn from_reqwest(err: reqwest::Error) -> GraphError {
    if err.is_timeout() {
        GraphError::timeout(format!("Request timed out: {}", err))
    } else if err.is_connect() {
        GraphError::network(format!("Connection failed: {}", err))
    } else if err.is_builder() {
        GraphError::invalid_request(format!("Invalid request: {}", err))
    } else if err.is_decode() || err.is_body() {
        GraphError::serialization(format!("Failed to read response body: {}", err))
    } else {
        GraphError::network(format!("HTTP error: {}", err))
    }
}

/// Copy response headers; values that are not valid UTF-8 are dropped.
pub fn response_headers(map: &HeaderMap) -> ResponseHeaders {
    let mut headers = ResponseHeaders::new();
    for (name, value) in map {
        match value.to_str() {
            Ok(v) => headers.add(name.as_str(), v),
            Err(_) => log::debug!("skipping non-UTF-8 response header {}", name),
        }
    }
    headers
}
