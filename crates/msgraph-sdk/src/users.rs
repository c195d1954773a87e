//! `/users`, `/users/{id}` and `/me`.

use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{GraphResult, HttpMethod, RequestConfiguration, RequestInformation};

use crate::count::CountRequestBuilder;
use crate::directory_objects::DirectoryObjectsRequestBuilder;
use crate::drives::DriveRequestBuilder;
use crate::models::{odata_error_mappings, User, UserCollectionResponse};
use crate::query::{
    CollectionRequestConfiguration, ItemRequestConfiguration, COLLECTION_QUERY, ITEM_QUERY,
};

request_builder!(
    /// The users collection of the tenant.
    UsersRequestBuilder,
    COLLECTION_QUERY
);

impl UsersRequestBuilder {
    /// Navigate to one user by object id or user principal name.
    pub fn by_user_id(&self, user_id: impl Into<String>) -> UserItemRequestBuilder {
        self.child_with("/{user%2Did}", "user%2Did", user_id.into(), UserItemRequestBuilder::new)
    }

    pub fn count(&self) -> CountRequestBuilder {
        self.child("/$count", CountRequestBuilder::new)
    }

    /// List users, one page at a time.
    pub async fn get(
        &self,
        config: Option<&CollectionRequestConfiguration>,
    ) -> GraphResult<Option<UserCollectionResponse>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    /// Create a user.
    pub async fn post(&self, body: &User, config: Option<&RequestConfiguration>) -> GraphResult<Option<User>> {
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
        body: &User,
        config: Option<&RequestConfiguration>,
    ) -> GraphResult<RequestInformation> {
        let mut info = self.base.to_request_information(HttpMethod::Post, config)?;
        info.set_content_from_parsable(self.base.adapter(), JSON_CONTENT_TYPE, body)?;
        Ok(info)
    }
}

request_builder!(
    /// A single user, addressed by id or as the signed-in user (`/me`).
    UserItemRequestBuilder,
    ITEM_QUERY
);

impl UserItemRequestBuilder {
    /// Groups, directory roles and administrative units the user is a
    /// direct member of.
    pub fn member_of(&self) -> DirectoryObjectsRequestBuilder {
        self.child("/memberOf", DirectoryObjectsRequestBuilder::new)
    }

    /// The user's OneDrive.
    pub fn drive(&self) -> DriveRequestBuilder {
        self.child("/drive", DriveRequestBuilder::new)
    }

    pub async fn get(&self, config: Option<&ItemRequestConfiguration>) -> GraphResult<Option<User>> {
        let info = self.to_get_request_information(config)?;
        self.base.adapter().send(info, Some(&odata_error_mappings())).await
    }

    pub async fn patch(&self, body: &User, config: Option<&RequestConfiguration>) -> GraphResult<Option<User>> {
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
        body: &User,
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
    use crate::models::User;
    use crate::query::{CollectionQueryParameters, CountQueryParameters, ItemQueryParameters};
    use crate::test_support::RecordingAdapter;
    use crate::GraphServiceClient;
    use msgraph_abstractions::{
        GraphErrorCode, HttpMethod, JsonParseNode, Parsable, RequestConfiguration,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_list_users_with_query() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"value": [{"id": "u1", "displayName": "Adele"}]}));
        let client = GraphServiceClient::new(adapter.clone());

        let config = RequestConfiguration::new()
            .with_query(CollectionQueryParameters::new().select(["id", "displayName"]).top(5));
        let page = client.users().get(Some(&config)).await.unwrap().unwrap();
        assert_eq!(page.value().unwrap()[0].display_name().as_deref(), Some("Adele"));

        let request = adapter.last();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.headers.first("Accept"), Some("application/json"));
        assert_eq!(
            adapter.last_url(),
            "https://graph.microsoft.com/v1.0/users?%24select=id,displayName&%24top=5"
        );
    }

    #[tokio::test]
    async fn test_user_item_url_encodes_id() {
        let adapter = RecordingAdapter::new();
        let client = GraphServiceClient::new(adapter.clone());
        let builder = client.users().by_user_id("adele@contoso.com");
        assert_eq!(builder.url_template(), "{+baseurl}/users/{user%2Did}{?%24expand,%24select}");
        assert_eq!(
            builder.path_parameters().get("user%2Did").map(String::as_str),
            Some("adele@contoso.com")
        );

        let config = RequestConfiguration::new().with_query(ItemQueryParameters::select(["mail"]));
        builder.get(Some(&config)).await.unwrap();
        assert_eq!(
            adapter.last_url(),
            "https://graph.microsoft.com/v1.0/users/adele%40contoso.com?%24select=mail"
        );
    }

    #[tokio::test]
    async fn test_me_shares_the_user_surface() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"id": "me", "userPrincipalName": "adele@contoso.com"}));
        let client = GraphServiceClient::new(adapter.clone());
        let me = client.me().get(None).await.unwrap().unwrap();
        assert_eq!(me.user_principal_name().as_deref(), Some("adele@contoso.com"));
        assert_eq!(adapter.last_url(), "https://graph.microsoft.com/v1.0/me");

        client.me().member_of().get(None).await.unwrap();
        assert_eq!(adapter.last_url(), "https://graph.microsoft.com/v1.0/me/memberOf");
    }

    #[tokio::test]
    async fn test_create_user_body() {
        let adapter = RecordingAdapter::new();
        adapter.respond_json(json!({"id": "new-id", "displayName": "Adele"}));
        let client = GraphServiceClient::new(adapter.clone());

        let mut user = User::new();
        user.set_account_enabled(Some(true));
        user.set_display_name(Some("Adele".into()));
        let created = client.users().post(&user, None).await.unwrap().unwrap();
        assert_eq!(created.id().as_deref(), Some("new-id"));

        let request = adapter.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.first("Content-Type"), Some("application/json"));
        assert_eq!(
            adapter.last_body(),
            json!({"@odata.type": "#microsoft.graph.user", "accountEnabled": true, "displayName": "Adele"})
        );
    }

    #[tokio::test]
    async fn test_patch_sends_only_changes_with_backing_store() {
        let adapter = RecordingAdapter::with_backing_store();
        let client = GraphServiceClient::new(adapter.clone());

        let loaded = json!({"id": "u1", "displayName": "Adele", "jobTitle": "Engineer"});
        let mut user = User::create_from_discriminator_value(&JsonParseNode::new(&loaded)).unwrap();
        user.set_job_title(Some("Principal Engineer".into()));
        client.users().by_user_id("u1").patch(&user, None).await.unwrap();

        assert_eq!(adapter.last().method, HttpMethod::Patch);
        assert_eq!(adapter.last_body(), json!({"jobTitle": "Principal Engineer"}));
    }

    #[tokio::test]
    async fn test_patch_sends_full_model_without_backing_store() {
        let adapter = RecordingAdapter::new();
        let client = GraphServiceClient::new(adapter.clone());

        let loaded = json!({"id": "u1", "jobTitle": "Engineer"});
        let mut user = User::create_from_discriminator_value(&JsonParseNode::new(&loaded)).unwrap();
        user.set_job_title(Some("Principal Engineer".into()));
        client.users().by_user_id("u1").patch(&user, None).await.unwrap();
        assert_eq!(adapter.last_body(), json!({"id": "u1", "jobTitle": "Principal Engineer"}));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let adapter = RecordingAdapter::new();
        let client = GraphServiceClient::new(adapter.clone());
        client.users().by_user_id("u1").delete(None).await.unwrap();
        let request = adapter.last();
        assert_eq!(request.method, HttpMethod::Delete);
        assert!(request.content.is_none());
        assert_eq!(adapter.last_url(), "https://graph.microsoft.com/v1.0/users/u1");
    }

    #[tokio::test]
    async fn test_count_users() {
        let adapter = RecordingAdapter::new();
        adapter.respond_text("42");
        let client = GraphServiceClient::new(adapter.clone());
        let config = RequestConfiguration::new().with_query(CountQueryParameters {
            filter: Some("accountEnabled eq true".into()),
            ..Default::default()
        });
        let count = client.users().count().get(Some(&config)).await.unwrap();
        assert_eq!(count, Some(42));

        let request = adapter.last();
        assert_eq!(request.headers.first("Accept"), Some("text/plain;q=0.9"));
        assert_eq!(request.headers.first("ConsistencyLevel"), Some("eventual"));
        assert_eq!(
            adapter.last_url(),
            "https://graph.microsoft.com/v1.0/users/$count?%24filter=accountEnabled%20eq%20true"
        );
    }

    #[tokio::test]
    async fn test_service_error_maps_to_odata_error() {
        let adapter = RecordingAdapter::new();
        adapter.respond_failure(
            404,
            json!({"error": {"code": "Request_ResourceNotFound", "message": "Resource 'x' does not exist."}}),
        );
        let client = GraphServiceClient::new(adapter.clone());
        let err = client.users().by_user_id("x").get(None).await.unwrap_err();
        assert_eq!(err.code, GraphErrorCode::ServiceError);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.service_code().as_deref(), Some("Request_ResourceNotFound"));
        assert!(err.model::<crate::models::ODataError>().is_some());
    }

    #[test]
    fn test_builders_do_not_share_parameters() {
        let adapter = RecordingAdapter::new();
        let client = GraphServiceClient::new(adapter);
        let users = client.users();
        let first = users.by_user_id("a");
        let second = users.by_user_id("b");
        assert!(!users.path_parameters().contains_key("user%2Did"));
        assert_eq!(first.path_parameters().get("user%2Did").map(String::as_str), Some("a"));
        assert_eq!(second.path_parameters().get("user%2Did").map(String::as_str), Some("b"));
    }
}
