//! OData query options and the URL template suffixes that carry them.
//!
//! Field names serialize to the template variable names (`%24select`), so
//! a struct can be passed straight to
//! [`RequestInformation::add_query_parameters`](msgraph_abstractions::RequestInformation::add_query_parameters).

use msgraph_abstractions::RequestConfiguration;
use serde::Serialize;

pub const COLLECTION_QUERY: &str =
    "{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
pub const ITEM_QUERY: &str = "{?%24expand,%24select}";
pub const COUNT_QUERY: &str = "{?%24filter,%24search}";
pub const CONTENT_QUERY: &str = "{?%24format}";
pub const NO_QUERY: &str = "";

pub type CollectionRequestConfiguration = RequestConfiguration<CollectionQueryParameters>;
pub type ItemRequestConfiguration = RequestConfiguration<ItemQueryParameters>;
pub type CountRequestConfiguration = RequestConfiguration<CountQueryParameters>;
pub type ContentRequestConfiguration = RequestConfiguration<ContentQueryParameters>;

/// `$count`, `$filter`, `$top` and friends for collection reads.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionQueryParameters {
    #[serde(rename = "%24count", skip_serializing_if = "Option::is_none")]
    pub count: Option<bool>,
    #[serde(rename = "%24expand", skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,
    #[serde(rename = "%24filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(rename = "%24orderby", skip_serializing_if = "Option::is_none")]
    pub orderby: Option<Vec<String>>,
    #[serde(rename = "%24search", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "%24select", skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<String>>,
    #[serde(rename = "%24skip", skip_serializing_if = "Option::is_none")]
    pub skip: Option<i32>,
    #[serde(rename = "%24top", skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
}

/// `$select` and `$expand` for single entity reads.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemQueryParameters {
    #[serde(rename = "%24expand", skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,
    #[serde(rename = "%24select", skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CountQueryParameters {
    #[serde(rename = "%24filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(rename = "%24search", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Conversion format for downloads (`$format=pdf`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentQueryParameters {
    #[serde(rename = "%24format", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl CollectionQueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filter = Some(expression.into());
        self
    }

    pub fn top(mut self, top: i32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }
}

impl ItemQueryParameters {
    pub fn select<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            select: Some(fields.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}
