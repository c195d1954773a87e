//! Directory object collections reached through navigation properties
//! (`memberOf`, `members`).

use msgraph_abstractions::{GraphResult, HttpMethod, RequestInformation};

use crate::count::CountRequestBuilder;
use crate::models::{odata_error_mappings, DirectoryObject, DirectoryObjectCollectionResponse};
use crate::query::{
    CollectionRequestConfiguration, ItemRequestConfiguration, COLLECTION_QUERY, ITEM_QUERY,
};

request_builder!(DirectoryObjectsRequestBuilder, COLLECTION_QUERY);

impl DirectoryObjectsRequestBuilder {
    pub fn by_directory_object_id(
        &self,
        directory_object_id: impl Into<String>,
    ) -> DirectoryObjectItemRequestBuilder {
        self.child_with(
            "/{directoryObject%2Did}",
            "directoryObject%2Did",
            directory_object_id.into(),
            DirectoryObjectItemRequestBuilder::new,
        )
    }

    pub fn count(&self) -> CountRequestBuilder {
        self.child("/$count", CountRequestBuilder::new)
    }

    /// Members are returned as [`DirectoryObject`] variants chosen by
    /// `@odata.type`.
    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<DirectoryObjectCollectionResponse>> {
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

request_builder!(DirectoryObjectItemRequestBuilder, ITEM_QUERY);

impl DirectoryObjectItemRequestBuilder {
    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<DirectoryObject>> {
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

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::models::DirectoryObject;
    use crate::test_support::RecordingAdapter;
    use crate::GraphServiceClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_member_of_is_polymorphic() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({
            "value": [
                {"@odata.type": "#microsoft.graph.group", "id": "g1", "displayName": "Sales"},
                {"@odata.type": "#microsoft.graph.directoryRole", "id": "r1"}
            ]
        }));
        let client = GraphServiceClient::new(adapter.clone());
        let page = client.users().by_user_id("u1").member_of().get(None).await.unwrap().unwrap();
        let members = page.value().unwrap();
        assert!(matches!(members[0], DirectoryObject::Group(_)));
        assert!(matches!(members[1], DirectoryObject::Other(_)));
        assert_eq!(members[1].id().as_deref(), Some("r1"));
        assert_eq!(adapter.last_url(), "https://graph.microsoft.com/v1.0/users/u1/memberOf");
    }

    #[tokio::test]
    async fn test_single_member() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"@odata.type": "#microsoft.graph.user", "id": "u2"}));
        let client = GraphServiceClient::new(adapter.clone());
        let member = client
            .groups()
            .by_group_id("g1")
            .members()
            .by_directory_object_id("u2")
            .get(None)
            .await
            .unwrap()
            .unwrap();
        assert!(member.as_user().is_some());
        assert_eq!(adapter.last_url(), "https://graph.microsoft.com/v1.0/groups/g1/members/u2");
    }
}
