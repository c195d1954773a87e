//! `$count` segments.

use msgraph_abstractions::{GraphResult, HttpMethod, RequestInformation};

use crate::models::odata_error_mappings;
use crate::query::{CountRequestConfiguration, COUNT_QUERY};

pub const CONSISTENCY_LEVEL_HEADER: &str = "ConsistencyLevel";

request_builder!(
    /// Number of entities in the parent collection, returned as `text/plain`.
    CountRequestBuilder,
    COUNT_QUERY
);

impl CountRequestBuilder {
    pub async fn get(&self, config: Option<&CountRequestConfiguration>) -> GraphResult<Option<i32>> {
        let info = self.to_get_request_information(config)?;
        self.base
            .adapter()
            .send_primitive(info, Some(&odata_error_mappings()))
            .await
    }

    /// Directory counts need `ConsistencyLevel: eventual`; it is added
    /// unless the caller set the header.
    pub fn to_get_request_information(
        &self,
        config: Option<&CountRequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info =
            self.base
                .to_request_information_accepting(HttpMethod::Get, config, "text/plain;q=0.9")?;
        info.headers.try_add(CONSISTENCY_LEVEL_HEADER, "eventual");
        Ok(info)
    }
}
