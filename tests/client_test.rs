use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use msgraph::{
    anonymous_client, client_with_credentials, client_with_token, ClientCredentialsConfig,
    GraphClientOptions, GraphErrorCode, NationalCloud,
};
use msgraph::abstractions::RequestAdapter as _;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

async fn me(headers: HeaderMap) -> Response {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({"id": "me", "jobTitle": auth}).to_string(),
    )
        .into_response()
}

async fn spawn_server() -> String {
    let app = Router::new().route("/v1.0/me", get(me));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1.0", addr)
}

fn options(base_url: &str) -> GraphClientOptions {
    GraphClientOptions {
        base_url: Some(base_url.to_string()),
        retry_delay_sec: 0,
        timeout_sec: 10,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_token_client_sends_bearer() {
    let base = spawn_server().await;
    let client = assert_ok!(client_with_token("secret-token", options(&base)));
    assert_eq!(client.request_adapter().base_url(), base);

    let me = client.me().get(None).await.unwrap().unwrap();
    assert_eq!(me.id().as_deref(), Some("me"));
    // The fake service echoes the Authorization header into jobTitle.
    assert_eq!(me.job_title().as_deref(), Some("Bearer secret-token"));
}

#[tokio::test]
async fn test_anonymous_client_sends_no_credentials() {
    let base = spawn_server().await;
    let client = assert_ok!(anonymous_client(options(&base)));
    let me = client.me().get(None).await.unwrap().unwrap();
    assert_eq!(me.job_title().as_deref(), Some("none"));
}

#[test]
fn test_default_base_url_follows_national_cloud() {
    let client = assert_ok!(anonymous_client(GraphClientOptions {
        national_cloud: NationalCloud::China,
        ..Default::default()
    }));
    assert_eq!(
        client.request_adapter().base_url(),
        "https://microsoftgraph.chinacloudapi.cn/v1.0"
    );
}

#[test]
fn test_credentials_require_secret() {
    let config = ClientCredentialsConfig {
        tenant_id: "contoso.onmicrosoft.com".into(),
        client_id: "app".into(),
        ..Default::default()
    };
    let err = assert_err!(client_with_credentials(config, GraphClientOptions::default()));
    assert_eq!(err.code, GraphErrorCode::Authentication);
}
