use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{GraphResult, HttpMethod, RequestConfiguration, RequestInformation};

use crate::models::{
    odata_error_mappings, SetSolidColorPostRequestBody, WorkbookChart, WorkbookChartAreaFormat,
    WorkbookChartCollectionResponse, WorkbookChartFill, WorkbookChartFont,
};
use crate::query::{
    CollectionRequestConfiguration, ItemRequestConfiguration, COLLECTION_QUERY, ITEM_QUERY,
    NO_QUERY,
};

request_builder!(ChartsRequestBuilder, COLLECTION_QUERY);

impl ChartsRequestBuilder {
    pub fn by_workbook_chart_id(&self, chart_id: impl Into<String>) -> ChartItemRequestBuilder {
        self.child_with(
            "/{workbookChart%2Did}",
            "workbookChart%2Did",
            chart_id.into(),
            ChartItemRequestBuilder::new,
        )
    }

    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<WorkbookChartCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn post(
        &self,
        body: &WorkbookChart,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookChart>> {
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
        body: &WorkbookChart,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(ChartItemRequestBuilder, ITEM_QUERY);

impl ChartItemRequestBuilder {
    pub fn format(&self) -> ChartFormatRequestBuilder {
        self.child("/format", ChartFormatRequestBuilder::new)
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<WorkbookChart>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(
        &self,
        body: &WorkbookChart,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookChart>> {
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
        body: &WorkbookChart,
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

request_builder!(
    /// Formatting of the chart area.
    ChartFormatRequestBuilder,
    ITEM_QUERY
);

impl ChartFormatRequestBuilder {
    pub fn fill(&self) -> ChartFillRequestBuilder {
        self.child("/fill", ChartFillRequestBuilder::new)
    }

    pub fn font(&self) -> ChartFontRequestBuilder {
        self.child("/font", ChartFontRequestBuilder::new)
    }

    pub async fn get(
        &self,
        config: Option<&ItemRequestConfiguration>,
    ) -> GraphResult<Option<WorkbookChartAreaFormat>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(
        &self,
        body: &WorkbookChartAreaFormat,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookChartAreaFormat>> {
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
        body: &WorkbookChartAreaFormat,
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

request_builder!(ChartFontRequestBuilder, ITEM_QUERY);

impl ChartFontRequestBuilder {
    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<WorkbookChartFont>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(
        &self,
        body: &WorkbookChartFont,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookChartFont>> {
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
        body: &WorkbookChartFont,
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

request_builder!(ChartFillRequestBuilder, ITEM_QUERY);

impl ChartFillRequestBuilder {
    pub fn clear(&self) -> ClearRequestBuilder {
        self.child("/clear", ClearRequestBuilder::new)
    }

    pub fn set_solid_color(&self) -> SetSolidColorRequestBuilder {
        self.child("/setSolidColor", SetSolidColorRequestBuilder::new)
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<WorkbookChartFill>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(
        &self,
        body: &WorkbookChartFill,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookChartFill>> {
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
        body: &WorkbookChartFill,
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

request_builder!(
    /// `fill/clear`: reset the fill to its default.
    ClearRequestBuilder,
    NO_QUERY
);

impl ClearRequestBuilder {
    pub async fn post(&self, config: Option<&RequestConfiguration>) -> GraphResult<()> {
        let info = self.to_post_request_information(config)?;
        self.base
            .adapter()
            .send_no_content(info, Some(&odata_error_mappings()))
            .await
    }

    pub fn to_post_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Post, config)
    }
}

request_builder!(
    /// `fill/setSolidColor`: fill with a single HTML color.
    SetSolidColorRequestBuilder,
    NO_QUERY
);

impl SetSolidColorRequestBuilder {
    pub async fn post(
        &self,
        body: &SetSolidColorPostRequestBody,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<()> {
        let info = self.to_post_request_information(body, config)?;
        self.base
            .adapter()
            .send_no_content(info, Some(&odata_error_mappings()))
            .await
    }

    pub fn to_post_request_information(
        &self,
        body: &SetSolidColorPostRequestBody,
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

#[cfg(test)]
mod tests {
    use crate::models::{SetSolidColorPostRequestBody, WorkbookChartFont};
    use crate::test_support::RecordingAdapter;
    use crate::GraphServiceClient;
    use msgraph_abstractions::HttpMethod;
    use serde_json::json;

    const CHART: &str =
        "https://graph.microsoft.com/v1.0/drives/d1/items/i1/workbook/worksheets/Sheet1/charts/Chart%201";

    fn chart(client: &GraphServiceClient) -> super::ChartItemRequestBuilder {
        client
            .drives()
            .by_drive_id("d1")
            .items()
            .by_drive_item_id("i1")
            .workbook()
            .worksheets()
            .by_workbook_worksheet_id("Sheet1")
            .charts()
            .by_workbook_chart_id("Chart 1")
    }

    #[tokio::test]
    async fn test_chart_font_round_trip() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"bold": false, "color": "#000000", "name": "Calibri", "size": 10}));
        let client = GraphServiceClient::new(adapter.clone());
        let font_builder = chart(&client).format().font();

        let font = font_builder.get(None).await.unwrap().unwrap();
        assert_eq!(font.size(), Some(10.0));
        assert_eq!(adapter.last_url(), format!("{}/format/font", CHART));

        let mut update = WorkbookChartFont::new();
        update.set_bold(Some(true));
        update.set_color(Some("#4472C4".into()));
        font_builder.patch(&update, None).await.unwrap();
        assert_eq!(adapter.last().method, HttpMethod::Patch);
        assert_eq!(adapter.last_body()["color"], json!("#4472C4"));

        font_builder.delete(None).await.unwrap();
        assert_eq!(adapter.last().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_fill_actions() {
        let adapter = RecordingAdapter::new();
        let client = GraphServiceClient::new(adapter.clone());
        let fill = chart(&client).format().fill();

        fill.clear().post(None).await.unwrap();
        let request = adapter.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.content.is_none());
        assert_eq!(adapter.last_url(), format!("{}/format/fill/clear", CHART));

        let mut body = SetSolidColorPostRequestBody::new();
        body.set_color(Some("#FF0000".into()));
        fill.set_solid_color().post(&body, None).await.unwrap();
        assert_eq!(adapter.last_url(), format!("{}/format/fill/setSolidColor", CHART));
        assert_eq!(adapter.last_body(), json!({"color": "#FF0000"}));
    }

    #[tokio::test]
    async fn test_list_and_delete_charts() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"value": [{"id": "c1", "name": "Chart 1", "height": 216.0}]}));
        let client = GraphServiceClient::new(adapter.clone());
        let page = client
            .drives()
            .by_drive_id("d1")
            .items()
            .by_drive_item_id("i1")
            .workbook()
            .worksheets()
            .by_workbook_worksheet_id("Sheet1")
            .charts()
            .get(None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.value().unwrap()[0].height(), Some(216.0));

        chart(&client).delete(None).await.unwrap();
        assert_eq!(adapter.last_url(), CHART);
    }
}
