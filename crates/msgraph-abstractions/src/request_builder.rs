//! State shared by every generated request builder.

use crate::error::GraphResult;
use crate::request_adapter::RequestAdapter;
use crate::request_information::{HttpMethod, RequestInformation, JSON_CONTENT_TYPE, RAW_URL_KEY};
use crate::request_option::RequestConfiguration;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub const ACCEPT_HEADER: &str = "Accept";

#[derive(Clone)]
pub struct BaseRequestBuilder {
    pub url_template: String,
    pub path_parameters: HashMap<String, String>,
    pub request_adapter: Arc<dyn RequestAdapter>,
}

impl fmt::Debug for BaseRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseRequestBuilder")
            .field("url_template", &self.url_template)
            .field("path_parameters", &self.path_parameters)
            .finish()
    }
}

impl BaseRequestBuilder {
    /// Builder for a child path; the parent's map is copied, never shared.
    pub fn new(
        request_adapter: Arc<dyn RequestAdapter>,
        url_template: &str,
        path_parameters: &HashMap<String, String>,
    ) -> Self {
        Self {
            url_template: url_template.to_string(),
            path_parameters: path_parameters.clone(),
            request_adapter,
        }
    }

    /// Builder pointed at a fully built URL (paging, `@odata.nextLink`).
    pub fn from_raw_url(
        request_adapter: Arc<dyn RequestAdapter>,
        url_template: &str,
        raw_url: &str,
    ) -> Self {
        let path_parameters = HashMap::from([(RAW_URL_KEY.to_string(), raw_url.to_string())]);
        Self {
            url_template: url_template.to_string(),
            path_parameters,
            request_adapter,
        }
    }

    /// Path parameters handed to a child builder; a raw URL never leaks
    /// into children.
    pub fn child_parameters(&self) -> HashMap<String, String> {
        let mut params = self.path_parameters.clone();
        params.remove(RAW_URL_KEY);
        params
    }

    /// Child path parameters with one more entry, for indexer navigation.
    pub fn with_path_parameter(&self, name: &str, value: impl Into<String>) -> HashMap<String, String> {
        let mut params = self.child_parameters();
        params.insert(name.to_string(), value.into());
        params
    }

    pub fn adapter(&self) -> &(dyn RequestAdapter + 'static) {
        self.request_adapter.as_ref()
    }

    /// Request accepting JSON.
    pub fn to_request_information<Q: Serialize>(
        &self,
        method: HttpMethod,
        config: Option<&RequestConfiguration<Q>>,
    ) -> GraphResult<RequestInformation> {
        self.to_request_information_accepting(method, config, JSON_CONTENT_TYPE)
    }

    /// Request with a custom `Accept`; a caller supplied `Accept` header
    /// takes precedence.
    pub fn to_request_information_accepting<Q: Serialize>(
        &self,
        method: HttpMethod,
        config: Option<&RequestConfiguration<Q>>,
        accept: &str,
    ) -> GraphResult<RequestInformation> {
        let mut info =
            RequestInformation::new(method, self.url_template.clone(), self.path_parameters.clone());
        info.configure(config)?;
        info.headers.try_add(ACCEPT_HEADER, accept);
        Ok(info)
    }
}
