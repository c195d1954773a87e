//! Per-request options handed through to the adapter and its handlers.

use crate::headers::RequestHeaders;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An option attached to a single request, looked up by key.
pub trait RequestOption: fmt::Debug + Send + Sync + 'static {
    fn key(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

/// Options keyed by [`RequestOption::key`]; adding a second option with the
/// same key replaces the first.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    inner: BTreeMap<&'static str, Arc<dyn RequestOption>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, option: Arc<dyn RequestOption>) {
        self.inner.insert(option.key(), option);
    }

    pub fn add_all<I: IntoIterator<Item = Arc<dyn RequestOption>>>(&mut self, options: I) {
        for option in options {
            self.add(option);
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.inner.remove(key).is_some()
    }

    pub fn get_by_key(&self, key: &str) -> Option<&Arc<dyn RequestOption>> {
        self.inner.get(key)
    }

    /// Typed lookup by downcast.
    pub fn get<T: RequestOption>(&self) -> Option<&T> {
        self.inner.values().find_map(|o| o.as_any().downcast_ref::<T>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn RequestOption>> {
        self.inner.values()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Query-parameter placeholder for operations that take none.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct NoQueryParameters {}

/// Headers, options and query parameters supplied by the caller of a
/// generated operation.
#[derive(Debug, Clone)]
pub struct RequestConfiguration<Q = NoQueryParameters> {
    pub headers: RequestHeaders,
    pub options: Vec<Arc<dyn RequestOption>>,
    pub query_parameters: Option<Q>,
}

impl<Q> Default for RequestConfiguration<Q> {
    fn default() -> Self {
        Self {
            headers: RequestHeaders::new(),
            options: Vec::new(),
            query_parameters: None,
        }
    }
}

impl<Q> RequestConfiguration<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: Q) -> Self {
        self.query_parameters = Some(query);
        self
    }

    pub fn with_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.add(key, value);
        self
    }

    pub fn with_option(mut self, option: Arc<dyn RequestOption>) -> Self {
        self.options.push(option);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Marker(u8);

    impl RequestOption for Marker {
        fn key(&self) -> &'static str {
            "Marker"
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_same_key_replaces() {
        let mut opts = RequestOptions::new();
        opts.add(Arc::new(Marker(1)));
        opts.add(Arc::new(Marker(2)));
        assert_eq!(opts.len(), 1);
        assert_eq!(opts.get::<Marker>().map(|m| m.0), Some(2));
    }

    #[test]
    fn test_remove() {
        let mut opts = RequestOptions::new();
        opts.add(Arc::new(Marker(1)));
        assert!(opts.remove("Marker"));
        assert!(opts.get::<Marker>().is_none());
    }

    #[test]
    fn test_configuration_builder() {
        let cfg: RequestConfiguration = RequestConfiguration::new()
            .with_header("ConsistencyLevel", "eventual")
            .with_option(Arc::new(Marker(3)));
        assert_eq!(cfg.headers.first("consistencylevel"), Some("eventual"));
        assert_eq!(cfg.options.len(), 1);
        assert!(cfg.query_parameters.is_none());
    }
}
