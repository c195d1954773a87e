use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{GraphResult, HttpMethod, RequestConfiguration, RequestInformation};

use super::{ChartsRequestBuilder, RangeRequestBuilder, TablesRequestBuilder};
use crate::models::{odata_error_mappings, WorkbookWorksheet, WorkbookWorksheetCollectionResponse};
use crate::query::{
    CollectionRequestConfiguration, ItemRequestConfiguration, COLLECTION_QUERY, ITEM_QUERY,
};

request_builder!(WorksheetsRequestBuilder, COLLECTION_QUERY);

impl WorksheetsRequestBuilder {
    /// Navigate to a worksheet by id or by name.
    pub fn by_workbook_worksheet_id(&self, worksheet_id: impl Into<String>) -> WorksheetItemRequestBuilder {
        self.child_with(
            "/{workbookWorksheet%2Did}",
            "workbookWorksheet%2Did",
            worksheet_id.into(),
            WorksheetItemRequestBuilder::new,
        )
    }

    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<WorkbookWorksheetCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    /// Add a worksheet; only `name` is read by the service.
    pub async fn post(
        &self,
        body: &WorkbookWorksheet,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookWorksheet>> {
        let info = self.to_post_request_information(body, config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Get, config)
    }

    pub fn to_post_request_information(
        &self,
        body: &WorkbookWorksheet,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(WorksheetItemRequestBuilder, ITEM_QUERY);

impl WorksheetItemRequestBuilder {
    pub fn charts(&self) -> ChartsRequestBuilder {
        self.child("/charts", ChartsRequestBuilder::new)
    }

    pub fn tables(&self) -> TablesRequestBuilder {
        self.child("/tables", TablesRequestBuilder::new)
    }

    /// The whole sheet as a range.
    pub fn range(&self) -> RangeRequestBuilder {
        self.child("/range()", RangeRequestBuilder::new)
    }

    /// A range by A1 address, e.g. `A1:C3`.
    pub fn range_with_address(&self, address: impl Into<String>) -> RangeRequestBuilder {
        self.child_with(
            "/range(address='{address}')",
            "address",
            address.into(),
            RangeRequestBuilder::new,
        )
    }

    /// Smallest range that contains every cell with a value or format.
    pub fn used_range(&self) -> RangeRequestBuilder {
        self.child("/usedRange()", RangeRequestBuilder::new)
    }

    /// Like [`used_range`](Self::used_range); with `true` formatting alone
    /// does not count as use.
    pub fn used_range_with_values_only(&self, values_only: bool) -> RangeRequestBuilder {
        self.child_with(
            "/usedRange(valuesOnly={valuesOnly})",
            "valuesOnly",
            values_only.to_string(),
            RangeRequestBuilder::new,
        )
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<WorkbookWorksheet>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(
        &self,
        body: &WorkbookWorksheet,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookWorksheet>> {
        let info = self.to_patch_request_information(body, config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn delete(&self, config: Option<&RequestConfiguration>) -> GraphResult<()> {
        let info = self.to_delete_request_information(config)?;
        self.base
            .adapter()
            .send_no_content(info, Some(&odata_error_mappings()))
            .await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&ItemRequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Get, config)
    }

    pub fn to_patch_request_information(
        &self,
        body: &WorkbookWorksheet,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Patch, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }

    pub fn to_delete_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Delete, config)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::models::WorkbookWorksheet;
    use crate::test_support::RecordingAdapter;
    use crate::GraphServiceClient;
    use msgraph_abstractions::HttpMethod;
    use serde_json::json;

    fn sheet(client: &GraphServiceClient) -> super::WorksheetItemRequestBuilder {
        client
            .drives()
            .by_drive_id("d1")
            .items()
            .by_drive_item_id("i1")
            .workbook()
            .worksheets()
            .by_workbook_worksheet_id("Sheet1")
    }

    #[tokio::test]
    async fn test_add_worksheet() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"id": "{75A18F35}", "name": "Q3", "position": 1}));
        let client = GraphServiceClient::new(adapter.clone());

        let mut body = WorkbookWorksheet::new();
        body.set_name(Some("Q3".into()));
        let created = client
            .drives()
            .by_drive_id("d1")
            .items()
            .by_drive_item_id("i1")
            .workbook()
            .worksheets()
            .post(&body, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.position(), Some(1));
        assert_eq!(
            adapter.last_url(),
            "https://graph.microsoft.com/v1.0/drives/d1/items/i1/workbook/worksheets"
        );
    }

    #[tokio::test]
    async fn test_worksheet_item_operations() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"id": "{75A18F35}", "name": "Sheet1", "visibility": "Visible"}));
        let client = GraphServiceClient::new(adapter.clone());
        let sheet = sheet(&client);

        let got = sheet.get(None).await.unwrap().unwrap();
        assert_eq!(got.visibility().as_deref(), Some("Visible"));
        assert_eq!(
            adapter.last_url(),
            "https://graph.microsoft.com/v1.0/drives/d1/items/i1/workbook/worksheets/Sheet1"
        );

        let mut rename = WorkbookWorksheet::new();
        rename.set_name(Some("Summary".into()));
        sheet.patch(&rename, None).await.unwrap();
        assert_eq!(adapter.last().method, HttpMethod::Patch);

        sheet.delete(None).await.unwrap();
        assert_eq!(adapter.last().method, HttpMethod::Delete);
    }

    #[test]
    fn test_range_function_templates() {
        let client = GraphServiceClient::new(RecordingAdapter::new());
        let sheet = sheet(&client);
        assert!(sheet.range().url_template().ends_with("/worksheets/{workbookWorksheet%2Did}/range()"));
        assert!(sheet
            .range_with_address("A1:B2")
            .url_template()
            .ends_with("/range(address='{address}')"));
        assert!(sheet.used_range().url_template().ends_with("/usedRange()"));
        let used = sheet.used_range_with_values_only(true);
        assert!(used.url_template().ends_with("/usedRange(valuesOnly={valuesOnly})"));
        assert_eq!(used.path_parameters().get("valuesOnly").map(String::as_str), Some("true"));
    }
}
