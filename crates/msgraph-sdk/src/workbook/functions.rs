use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{GraphResult, HttpMethod, RequestConfiguration, RequestInformation};

use crate::models::{
    odata_error_mappings, AbsPostRequestBody, SumPostRequestBody, WorkbookFunctionResult,
};
use crate::query::NO_QUERY;

request_builder!(
    /// Excel worksheet functions evaluated by the service.
    FunctionsRequestBuilder,
    NO_QUERY
);

impl FunctionsRequestBuilder {
    pub fn abs(&self) -> AbsRequestBuilder {
        self.child("/abs", AbsRequestBuilder::new)
    }

    pub fn sum(&self) -> SumRequestBuilder {
        self.child("/sum", SumRequestBuilder::new)
    }
}

request_builder!(AbsRequestBuilder, NO_QUERY);

impl AbsRequestBuilder {
    /// `ABS(number)`.
    pub async fn post(
        &self,
        body: &AbsPostRequestBody,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookFunctionResult>> {
        let info = self.to_post_request_information(body, config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_post_request_information(
        &self,
        body: &AbsPostRequestBody,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(SumRequestBuilder, NO_QUERY);

impl SumRequestBuilder {
    /// `SUM(values...)`; `values` may mix numbers, nested arrays and range
    /// references.
    pub async fn post(
        &self,
        body: &SumPostRequestBody,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookFunctionResult>> {
        let info = self.to_post_request_information(body, config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_post_request_information(
        &self,
        body: &SumPostRequestBody,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
