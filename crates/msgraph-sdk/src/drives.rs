//! Drives, drive items, their children and file content.

use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{GraphResult, HttpMethod, RequestConfiguration, RequestInformation};

use crate::models::{
    odata_error_mappings, Drive, DriveCollectionResponse, DriveItem, DriveItemCollectionResponse,
};
use crate::query::{
    CollectionRequestConfiguration, ContentRequestConfiguration, ItemRequestConfiguration,
    COLLECTION_QUERY, CONTENT_QUERY, ITEM_QUERY,
};
use crate::workbook::WorkbookRequestBuilder;

request_builder!(DrivesRequestBuilder, COLLECTION_QUERY);

impl DrivesRequestBuilder {
    pub fn by_drive_id(&self, drive_id: impl Into<String>) -> DriveRequestBuilder {
        self.child_with("/{drive%2Did}", "drive%2Did", drive_id.into(), DriveRequestBuilder::new)
    }

    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<DriveCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Get, config)
    }
}

request_builder!(
    /// One drive: `/drives/{id}`, `/me/drive`, `/users/{id}/drive` or
    /// `/groups/{id}/drive`.
    DriveRequestBuilder,
    ITEM_QUERY
);

impl DriveRequestBuilder {
    pub fn items(&self) -> DriveItemsRequestBuilder {
        self.child("/items", DriveItemsRequestBuilder::new)
    }

    /// The root folder of the drive.
    pub fn root(&self) -> DriveItemRequestBuilder {
        self.child("/root", DriveItemRequestBuilder::new)
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<Drive>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&ItemRequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information(HttpMethod::Get, config)
    }
}

request_builder!(DriveItemsRequestBuilder, COLLECTION_QUERY);

impl DriveItemsRequestBuilder {
    pub fn by_drive_item_id(&self, drive_item_id: impl Into<String>) -> DriveItemRequestBuilder {
        self.child_with(
            "/{driveItem%2Did}",
            "driveItem%2Did",
            drive_item_id.into(),
            DriveItemRequestBuilder::new,
        )
    }

    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<DriveItemCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn post(&self, body: &DriveItem, config: Option<&RequestConfiguration>) -> GraphResult<Option<DriveItem>> {
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
        body: &DriveItem,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(DriveItemRequestBuilder, ITEM_QUERY);

impl DriveItemRequestBuilder {
    pub fn children(&self) -> ChildrenRequestBuilder {
        self.child("/children", ChildrenRequestBuilder::new)
    }

    pub fn content(&self) -> ContentRequestBuilder {
        self.child("/content", ContentRequestBuilder::new)
    }

    /// The Excel workbook behind an `.xlsx` item.
    pub fn workbook(&self) -> WorkbookRequestBuilder {
        self.child("/workbook", WorkbookRequestBuilder::new)
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<DriveItem>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    /// Rename or move the item.
    pub async fn patch(&self, body: &DriveItem, config: Option<&RequestConfiguration>) -> GraphResult<Option<DriveItem>> {
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
        body: &DriveItem,
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
    /// Items directly inside a folder.
    ChildrenRequestBuilder,
    COLLECTION_QUERY
);

impl ChildrenRequestBuilder {
    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<DriveItemCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    /// Create a folder (or another item) inside this folder.
    pub async fn post(&self, body: &DriveItem, config: Option<&RequestConfiguration>) -> GraphResult<Option<DriveItem>> {
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
        body: &DriveItem,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(
    /// Raw bytes of a file.
    ContentRequestBuilder,
    CONTENT_QUERY
);

impl ContentRequestBuilder {
    /// Download the file. An error body is still decoded as JSON.
    pub async fn get(&self, config: Option<&ContentRequestConfiguration>) -> GraphResult<Option<Vec<u8>>> {
        let info = self.to_get_request_information(config)?;
        self.base
            .adapter()
            .send_bytes(info, Some(&odata_error_mappings()))
            .await
    }

    /// Upload (create or replace) the file in one request.
    pub async fn put(&self, body: Vec<u8>, config: Option<&RequestConfiguration>) -> GraphResult<Option<DriveItem>> {
        let info = self.to_put_request_information(body, config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&ContentRequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        self.base.to_request_information_accepting(
            HttpMethod::Get,
            config,
            "application/octet-stream, application/json",
        )
    }

    pub fn to_put_request_information(
        &self,
        body: Vec<u8>,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Put, config)?;
        info.set_stream_content(body);
        Ok(info)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
