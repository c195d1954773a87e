use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{GraphResult, HttpMethod, RequestConfiguration, RequestInformation};

use crate::models::{odata_error_mappings, WorkbookRange};
use crate::query::NO_QUERY;

request_builder!(
    /// A cell range reached through `range()`, `range(address=...)`,
    /// `usedRange()` or `usedRange(valuesOnly=...)`.
    RangeRequestBuilder,
    NO_QUERY
);

impl RangeRequestBuilder {
    pub async fn get(&self, config: Option<&RequestConfiguration>) -> GraphResult<Option<WorkbookRange>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    /// Write `values`, `formulas` or `numberFormat` into the range.
    pub async fn patch(
        &self,
        body: &WorkbookRange,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookRange>> {
        let info = self.to_patch_request_information(body, config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Get, config)
    }

    pub fn to_patch_request_information(
        &self,
        body: &WorkbookRange,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Patch, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::models::WorkbookRange;
    use crate::test_support::RecordingAdapter;
    use crate::GraphServiceClient;
    use serde_json::json;

    fn sheet(client: &GraphServiceClient) -> crate::workbook::WorksheetItemRequestBuilder {
        client
            .me()
            .drive()
            .items()
            .by_drive_item_id("i1")
            .workbook()
            .worksheets()
            .by_workbook_worksheet_id("Sheet1")
    }

    #[tokio::test]
    async fn test_range_with_address_is_encoded() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"address": "Sheet1!A1:B2", "values": [[1, 2], [3, 4]]}));
        let client = GraphServiceClient::new(adapter.clone());

        let range = sheet(&client).range_with_address("A1:B2").get(None).await.unwrap().unwrap();
        assert_eq!(range.values(), Some(json!([[1, 2], [3, 4]])));
        assert_eq!(
            adapter.last_url(),
            "https://graph.microsoft.com/v1.0/me/drive/items/i1/workbook/worksheets/Sheet1/range(address='A1%3AB2')"
        );
    }

    #[tokio::test]
    async fn test_used_range_values_only() {
        let adapter = RecordingAdapter::new();
        let client = GraphServiceClient::new(adapter.clone());
        sheet(&client).used_range_with_values_only(false).get(None).await.unwrap();
        assert_eq!(
            adapter.last_url(),
            "https://graph.microsoft.com/v1.0/me/drive/items/i1/workbook/worksheets/Sheet1/usedRange(valuesOnly=false)"
        );
        sheet(&client).range().get(None).await.unwrap();
        assert!(adapter.last_url().ends_with("/worksheets/Sheet1/range()"));
    }

    #[tokio::test]
    async fn test_write_range_values() {
        let adapter = RecordingAdapter::new();
        let client = GraphServiceClient::new(adapter.clone());
        let mut update = WorkbookRange::new();
        update.set_values(Some(json!([["Region", "Sales"], ["West", 1200]])));
        sheet(&client).range_with_address("A1:B2").patch(&update, None).await.unwrap();
        assert_eq!(
            adapter.last_body(),
            json!({
                "@odata.type": "#microsoft.graph.workbookRange",
                "values": [["Region", "Sales"], ["West", 1200]]
            })
        );
    }
}
