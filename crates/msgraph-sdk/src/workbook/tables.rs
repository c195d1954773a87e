use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{GraphResult, HttpMethod, RequestConfiguration, RequestInformation};

use crate::models::{
    odata_error_mappings, WorkbookTable, WorkbookTableCollectionResponse, WorkbookTableColumn,
    WorkbookTableColumnCollectionResponse, WorkbookTableRow, WorkbookTableRowCollectionResponse,
};
use crate::query::{
    CollectionRequestConfiguration, ItemRequestConfiguration, COLLECTION_QUERY, ITEM_QUERY,
    NO_QUERY,
};

request_builder!(TablesRequestBuilder, COLLECTION_QUERY);

impl TablesRequestBuilder {
    /// Navigate to a table by id or by name.
    pub fn by_workbook_table_id(&self, table_id: impl Into<String>) -> TableItemRequestBuilder {
        self.child_with(
            "/{workbookTable%2Did}",
            "workbookTable%2Did",
            table_id.into(),
            TableItemRequestBuilder::new,
        )
    }

    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTableCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn post(
        &self,
        body: &WorkbookTable,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTable>> {
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
        body: &WorkbookTable,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(TableItemRequestBuilder, ITEM_QUERY);

impl TableItemRequestBuilder {
    pub fn rows(&self) -> RowsRequestBuilder {
        self.child("/rows", RowsRequestBuilder::new)
    }

    pub fn columns(&self) -> ColumnsRequestBuilder {
        self.child("/columns", ColumnsRequestBuilder::new)
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<WorkbookTable>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(
        &self,
        body: &WorkbookTable,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTable>> {
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
        body: &WorkbookTable,
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

// ── Rows ────────────────────────────────────────────────────────────────

request_builder!(RowsRequestBuilder, COLLECTION_QUERY);

impl RowsRequestBuilder {
    pub fn by_workbook_table_row_id(&self, row_id: impl Into<String>) -> RowItemRequestBuilder {
        self.child_with(
            "/{workbookTableRow%2Did}",
            "workbookTableRow%2Did",
            row_id.into(),
            RowItemRequestBuilder::new,
        )
    }

    /// The row at a zero-based position in the table body.
    pub fn item_at_with_index(&self, index: i32) -> RowAtRequestBuilder {
        self.child_with("/itemAt(index={index})", "index", index.to_string(), RowAtRequestBuilder::new)
    }

    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTableRowCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    /// Append a row; `values` is a 2D array with one inner array.
    pub async fn post(
        &self,
        body: &WorkbookTableRow,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTableRow>> {
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
        body: &WorkbookTableRow,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(RowItemRequestBuilder, ITEM_QUERY);

impl RowItemRequestBuilder {
    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<WorkbookTableRow>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(
        &self,
        body: &WorkbookTableRow,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTableRow>> {
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
        body: &WorkbookTableRow,
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

request_builder!(RowAtRequestBuilder, NO_QUERY);

impl RowAtRequestBuilder {
    pub async fn get(&self, config: Option<&RequestConfiguration>) -> GraphResult<Option<WorkbookTableRow>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Get, config)
    }
}

// ── Columns ─────────────────────────────────────────────────────────────

request_builder!(ColumnsRequestBuilder, COLLECTION_QUERY);

impl ColumnsRequestBuilder {
    pub fn by_workbook_table_column_id(&self, column_id: impl Into<String>) -> ColumnItemRequestBuilder {
        self.child_with(
            "/{workbookTableColumn%2Did}",
            "workbookTableColumn%2Did",
            column_id.into(),
            ColumnItemRequestBuilder::new,
        )
    }

    /// The column at a zero-based position in the table.
    pub fn item_at_with_index(&self, index: i32) -> ColumnAtRequestBuilder {
        self.child_with("/itemAt(index={index})", "index", index.to_string(), ColumnAtRequestBuilder::new)
    }

    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTableColumnCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn post(
        &self,
        body: &WorkbookTableColumn,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTableColumn>> {
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
        body: &WorkbookTableColumn,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(ColumnItemRequestBuilder, ITEM_QUERY);

impl ColumnItemRequestBuilder {
    pub async fn get(
        &self,
        config: Option<&ItemRequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTableColumn>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(
        &self,
        body: &WorkbookTableColumn,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<Option<WorkbookTableColumn>> {
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
        body: &WorkbookTableColumn,
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

request_builder!(ColumnAtRequestBuilder, NO_QUERY);

impl ColumnAtRequestBuilder {
    pub async fn get(&self, config: Option<&RequestConfiguration>) -> GraphResult<Option<WorkbookTableColumn>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Get, config)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
