//! Microsoft Graph v1.0 client.
//!
//! Ties the request builders of [`msgraph_sdk`] to the reqwest transport of
//! [`msgraph_http`]:
//!
//! ```ignore
//! let client = msgraph::client_from_env(GraphClientOptions::default())?;
//! let page = client.users().get(None).await?;
//! ```

pub mod logging;

pub use msgraph_abstractions as abstractions;
pub use msgraph_http as http;
pub use msgraph_sdk::{
    client, count, directory_objects, drives, groups, models, page_iterator, query, users,
    workbook, GraphServiceClient, PageIterator,
};

pub use msgraph_abstractions::{GraphError, GraphErrorCode, GraphResult, RequestConfiguration};
pub use msgraph_http::{ClientCredentialsConfig, GraphClientOptions, NationalCloud};

use log::info;
use msgraph_abstractions::{
    AccessTokenProvider, AnonymousAuthenticationProvider, AuthenticationProvider,
    BaseBearerTokenAuthenticationProvider, RequestAdapter,
};
use msgraph_http::{ClientCredentialsTokenProvider, ReqwestRequestAdapter, StaticAccessTokenProvider};
use std::sync::Arc;

/// Client authenticated with the client-credentials grant (app-only).
pub fn client_with_credentials(
    config: ClientCredentialsConfig,
    options: GraphClientOptions,
) -> GraphResult<GraphServiceClient> {
    info!(
        "Creating Graph client for tenant {} ({:?})",
        config.tenant_id, config.national_cloud
    );
    let provider = ClientCredentialsTokenProvider::new(config)?;
    client_with_token_provider(Arc::new(provider), options)
}

/// Client-credentials client configured from `AZURE_TENANT_ID`,
/// `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`.
pub fn client_from_env(options: GraphClientOptions) -> GraphResult<GraphServiceClient> {
    let mut config = ClientCredentialsConfig::from_env()?;
    config.national_cloud = options.national_cloud;
    client_with_credentials(config, options)
}

/// Client sending a fixed bearer token, e.g. one acquired by a desktop app.
pub fn client_with_token(
    token: impl Into<String>,
    options: GraphClientOptions,
) -> GraphResult<GraphServiceClient> {
    client_with_token_provider(Arc::new(StaticAccessTokenProvider::new(token)), options)
}

pub fn client_with_token_provider(
    provider: Arc<dyn AccessTokenProvider>,
    options: GraphClientOptions,
) -> GraphResult<GraphServiceClient> {
    let auth = BaseBearerTokenAuthenticationProvider::new(provider);
    client_with_auth(Arc::new(auth), options)
}

/// Client that sends no `Authorization` header.
pub fn anonymous_client(options: GraphClientOptions) -> GraphResult<GraphServiceClient> {
    client_with_auth(Arc::new(AnonymousAuthenticationProvider), options)
}

pub fn client_with_auth(
    auth: Arc<dyn AuthenticationProvider>,
    options: GraphClientOptions,
) -> GraphResult<GraphServiceClient> {
    let adapter: Arc<dyn RequestAdapter> = Arc::new(ReqwestRequestAdapter::new(auth, options)?);
    Ok(GraphServiceClient::new(adapter))
}
