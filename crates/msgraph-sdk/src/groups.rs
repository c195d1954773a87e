//! `/groups` and `/groups/{id}`.

use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{GraphResult, HttpMethod, RequestConfiguration, RequestInformation};

use crate::count::CountRequestBuilder;
use crate::directory_objects::DirectoryObjectsRequestBuilder;
use crate::drives::DriveRequestBuilder;
use crate::models::{odata_error_mappings, Group, GroupCollectionResponse};
use crate::query::{
    CollectionRequestConfiguration, ItemRequestConfiguration, COLLECTION_QUERY, ITEM_QUERY,
};

request_builder!(GroupsRequestBuilder, COLLECTION_QUERY);

impl GroupsRequestBuilder {
    pub fn by_group_id(&self, group_id: impl Into<String>) -> GroupItemRequestBuilder {
        self.child_with("/{group%2Did}", "group%2Did", group_id.into(), GroupItemRequestBuilder::new)
    }

    pub fn count(&self) -> CountRequestBuilder {
        self.child("/$count", CountRequestBuilder::new)
    }

    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<GroupCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn post(&self, body: &Group, config: Option<&RequestConfiguration>) -> GraphResult<Option<Group>> {
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
        body: &Group,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(GroupItemRequestBuilder, ITEM_QUERY);

impl GroupItemRequestBuilder {
    /// Direct members of the group.
    pub fn members(&self) -> DirectoryObjectsRequestBuilder {
        self.child("/members", DirectoryObjectsRequestBuilder::new)
    }

    /// The group's document library.
    pub fn drive(&self) -> DriveRequestBuilder {
        self.child("/drive", DriveRequestBuilder::new)
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<Group>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(&self, body: &Group, config: Option<&RequestConfiguration>) -> GraphResult<Option<Group>> {
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
        body: &Group,
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
    use crate::models::Group;
    use crate::query::CollectionQueryParameters;
    use crate::test_support::RecordingAdapter;
    use crate::GraphServiceClient;
    use msgraph_abstractions::{HttpMethod, RequestConfiguration};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_security_group() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"id": "g1", "displayName": "Ops"}));
        let client = GraphServiceClient::new(adapter.clone());

        let mut group = Group::new();
        group.set_display_name(Some("Ops".into()));
        group.set_mail_enabled(Some(false));
        group.set_mail_nickname(Some("ops".into()));
        group.set_security_enabled(Some(true));
        let created = client.groups().post(&group, None).await.unwrap().unwrap();
        assert_eq!(created.id().as_deref(), Some("g1"));
        assert_eq!(adapter.last_url(), "https://graph.microsoft.com/v1.0/groups");
        assert_eq!(
            adapter.last_body(),
            json!({
                "@odata.type": "#microsoft.graph.group",
                "displayName": "Ops",
                "mailEnabled": false,
                "mailNickname": "ops",
                "securityEnabled": true
            })
        );
    }

    #[tokio::test]
    async fn test_list_groups_with_filter_and_count() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"@odata.count": 1, "value": [{"id": "g1"}]}));
        let client = GraphServiceClient::new(adapter.clone());
        let config = RequestConfiguration::new().with_query(
            CollectionQueryParameters::new()
                .filter("startswith(displayName,'O')")
                .count(true),
        );
        let page = client.groups().get(Some(&config)).await.unwrap().unwrap();
        assert_eq!(page.odata_count(), Some(1));
        assert_eq!(
            adapter.last_url(),
            "https://graph.microsoft.com/v1.0/groups?%24count=true&%24filter=startswith%28displayName%2C%27O%27%29"
        );
    }

    #[tokio::test]
    async fn test_group_item_operations() {
        let adapter = RecordingAdapter::new();
        let client = GraphServiceClient::new(adapter.clone());
        let item = client.groups().by_group_id("g1");

        let mut patch = Group::new();
        patch.set_description(Some("Operations team".into()));
        item.patch(&patch, None).await.unwrap();
        assert_eq!(adapter.last().method, HttpMethod::Patch);

        item.delete(None).await.unwrap();
        assert_eq!(adapter.last().method, HttpMethod::Delete);
        assert_eq!(adapter.last_url(), "https://graph.microsoft.com/v1.0/groups/g1");
        assert_eq!(adapter.requests().len(), 2);
    }

    #[test]
    fn test_group_count_template() {
        let client = GraphServiceClient::new(RecordingAdapter::new());
        assert_eq!(
            client.groups().count().url_template(),
            "{+baseurl}/groups/$count{?%24filter,%24search}"
        );
    }
}
