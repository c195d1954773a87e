//! Access token providers.
//!
//! - **Static token**: a caller-obtained bearer token.
//! - **Client credentials**: daemon / service identities against the
//!   Microsoft identity platform v2.0 token endpoint
//!   (`{authority}/{tenant}/oauth2/v2.0/token`), cached until shortly
//!   before expiry.

use crate::error::from_reqwest;
use crate::options::NationalCloud;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use msgraph_abstractions::{
    AccessTokenProvider, AdditionalContext, AllowedHostsValidator, GraphError, GraphResult,
    CLAIMS_KEY,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::Mutex;
use url::Url;

/// Seconds before expiry at which a cached token is considered stale.
const EXPIRY_GRACE_SEC: i64 = 60;

/// Plain HTTP is only accepted for loopback hosts.
fn ensure_secure(url: &Url) -> GraphResult<()> {
    if url.scheme().eq_ignore_ascii_case("https") {
        return Ok(());
    }
    match url.host_str() {
        Some("localhost") | Some("127.0.0.1") | Some("[::1]") | Some("::1") => Ok(()),
        _ => Err(GraphError::authentication(format!(
            "url scheme must be https, got {}",
            url.scheme()
        ))),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Static token
// ═══════════════════════════════════════════════════════════════════════

/// Hands out a fixed token to allowed hosts.
#[derive(Debug, Clone)]
pub struct StaticAccessTokenProvider {
    token: String,
    validator: AllowedHostsValidator,
}

impl StaticAccessTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            validator: AllowedHostsValidator::default(),
        }
    }

    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.validator.set_allowed_hosts(hosts);
        self
    }
}

#[async_trait]
impl AccessTokenProvider for StaticAccessTokenProvider {
    async fn get_authorization_token(
        &self,
        url: &Url,
        _context: &AdditionalContext,
    ) -> GraphResult<String> {
        if !self.validator.is_url_host_valid(url) {
            return Ok(String::new());
        }
        ensure_secure(url)?;
        Ok(self.token.clone())
    }

    fn allowed_hosts_validator(&self) -> &AllowedHostsValidator {
        &self.validator
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Client credentials
// ═══════════════════════════════════════════════════════════════════════

/// App registration used by the client-credentials grant.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientCredentialsConfig {
    /// Entra ID tenant (GUID or domain).
    pub tenant_id: String,
    /// Application (client) ID.
    pub client_id: String,
    pub client_secret: String,
    pub national_cloud: NationalCloud,
    /// Authority host override (defaults to the national cloud's login host).
    pub authority_host: Option<String>,
    /// Requested scopes.  Default: `{graph endpoint}/.default`.
    pub scopes: Vec<String>,
}

impl Default for ClientCredentialsConfig {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            national_cloud: NationalCloud::Global,
            authority_host: None,
            scopes: Vec::new(),
        }
    }
}

impl fmt::Debug for ClientCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsConfig")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("national_cloud", &self.national_cloud)
            .field("authority_host", &self.authority_host)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl ClientCredentialsConfig {
    pub const TENANT_ID_ENV: &'static str = "AZURE_TENANT_ID";
    pub const CLIENT_ID_ENV: &'static str = "AZURE_CLIENT_ID";
    pub const CLIENT_SECRET_ENV: &'static str = "AZURE_CLIENT_SECRET";

    /// Read tenant, client id and secret from the standard `AZURE_*`
    /// environment variables.
    pub fn from_env() -> GraphResult<Self> {
        let read = |key: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| GraphError::authentication(format!("{} is not set", key)))
        };
        Ok(Self {
            tenant_id: read(Self::TENANT_ID_ENV)?,
            client_id: read(Self::CLIENT_ID_ENV)?,
            client_secret: read(Self::CLIENT_SECRET_ENV)?,
            ..Default::default()
        })
    }

    pub fn token_url(&self) -> String {
        let authority = self
            .authority_host
            .as_deref()
            .unwrap_or_else(|| self.national_cloud.login_endpoint());
        format!(
            "{}/{}/oauth2/v2.0/token",
            authority.trim_end_matches('/'),
            self.tenant_id
        )
    }

    pub fn scope(&self) -> String {
        if self.scopes.is_empty() {
            format!("{}/.default", self.national_cloud.graph_endpoint())
        } else {
            self.scopes.join(" ")
        }
    }

    fn validate(&self) -> GraphResult<()> {
        if self.tenant_id.is_empty() {
            return Err(GraphError::authentication("tenant_id is required"));
        }
        if self.client_id.is_empty() {
            return Err(GraphError::authentication("client_id is required"));
        }
        if self.client_secret.is_empty() {
            return Err(GraphError::authentication(
                "client_secret is required for client-credentials flow",
            ));
        }
        Ok(())
    }
}

/// Token issued by the identity platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token has expired (with 60-second grace).
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at - chrono::Duration::seconds(EXPIRY_GRACE_SEC)
    }
}

/// OAuth2 client-credentials token provider with an in-memory cache.
#[derive(Debug)]
pub struct ClientCredentialsTokenProvider {
    config: ClientCredentialsConfig,
    client: reqwest::Client,
    validator: AllowedHostsValidator,
    cached: Mutex<Option<AccessToken>>,
}

impl ClientCredentialsTokenProvider {
    /// Tokens are only handed to the national cloud Graph hosts by default.
    pub fn new(config: ClientCredentialsConfig) -> GraphResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            client: reqwest::Client::new(),
            validator: AllowedHostsValidator::new(NationalCloud::all_graph_hosts()),
            cached: Mutex::new(None),
        })
    }

    pub fn with_allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.validator.set_allowed_hosts(hosts);
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &ClientCredentialsConfig {
        &self.config
    }

    async fn request_token(&self, claims: Option<&str>) -> GraphResult<AccessToken> {
        let scope = self.config.scope();
        let mut params = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", scope.as_str()),
        ];
        if let Some(claims) = claims {
            params.push(("claims", claims));
        }

        let token_url = self.config.token_url();
        debug!("Requesting client-credentials token from {}", token_url);
        let resp = self
            .client
            .post(&token_url)
            .form(&params)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(from_reqwest)?;

        if status != 200 {
            return Err(token_error(status, &body));
        }

        let token = parse_token_response(&body)?;
        info!("Acquired access token, expires at {}", token.expires_at);
        Ok(token)
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsTokenProvider {
    async fn get_authorization_token(
        &self,
        url: &Url,
        context: &AdditionalContext,
    ) -> GraphResult<String> {
        if !self.validator.is_url_host_valid(url) {
            debug!("Host {:?} is not allowed to receive a token", url.host_str());
            return Ok(String::new());
        }
        ensure_secure(url)?;

        let claims = context.get(CLAIMS_KEY).filter(|c| !c.is_empty());
        let mut cached = self.cached.lock().await;
        if claims.is_none() {
            if let Some(token) = cached.as_ref().filter(|t| !t.is_expired()) {
                return Ok(token.token.clone());
            }
        }

        let token = self.request_token(claims.map(String::as_str)).await?;
        let value = token.token.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn allowed_hosts_validator(&self) -> &AllowedHostsValidator {
        &self.validator
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Internal helpers
// ═══════════════════════════════════════════════════════════════════════

fn parse_token_response(body: &str) -> GraphResult<AccessToken> {
    let v: serde_json::Value = serde_json::from_str(body)?;

    let token = v["access_token"]
        .as_str()
        .ok_or_else(|| GraphError::authentication("No access_token in response"))?
        .to_string();

    let expires_in = v["expires_in"]
        .as_i64()
        .or_else(|| v["expires_in"].as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(3600);
    let expires_at = Utc::now() + chrono::Duration::seconds(expires_in);

    debug!("Parsed token, expires in {}s", expires_in);

    Ok(AccessToken {
        token,
        token_type: v["token_type"].as_str().unwrap_or("Bearer").to_string(),
        expires_at,
    })
}

fn token_error(status: u16, body: &str) -> GraphError {
    let v: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let code = v["error"].as_str().unwrap_or("unknown_error");
    let description = v["error_description"].as_str().unwrap_or(body);
    GraphError::authentication(format!("{}: {}", code, description)).with_response(status, Default::default())
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientCredentialsConfig {
        ClientCredentialsConfig {
            tenant_id: "contoso.onmicrosoft.com".into(),
            client_id: "app".into(),
            client_secret: "secret".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_token_url_and_scope() {
        let cfg = config();
        assert_eq!(
            cfg.token_url(),
            "https://login.microsoftonline.com/contoso.onmicrosoft.com/oauth2/v2.0/token"
        );
        assert_eq!(cfg.scope(), "https://graph.microsoft.com/.default");

        let cfg = ClientCredentialsConfig {
            national_cloud: NationalCloud::China,
            authority_host: Some("http://127.0.0.1:9999/".into()),
            ..config()
        };
        assert_eq!(
            cfg.token_url(),
            "http://127.0.0.1:9999/contoso.onmicrosoft.com/oauth2/v2.0/token"
        );
        assert_eq!(cfg.scope(), "https://microsoftgraph.chinacloudapi.cn/.default");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let out = format!("{:?}", config());
        assert!(out.contains("<redacted>"));
        assert!(!out.contains("\"secret\""));
    }

    #[test]
    fn test_config_validation() {
        let err = ClientCredentialsTokenProvider::new(ClientCredentialsConfig {
            client_secret: String::new(),
            ..config()
        })
        .unwrap_err();
        assert!(err.message.contains("client_secret"));
    }

    #[test]
    fn test_parse_token_response() {
        let body = r#"{"token_type":"Bearer","expires_in":3599,"access_token":"eyJ0eXAi..."}"#;
        let token = parse_token_response(body).unwrap();
        assert_eq!(token.token, "eyJ0eXAi...");
        assert_eq!(token.token_type, "Bearer");
        assert!(!token.is_expired());
    }

    #[test]
    fn test_parse_token_response_missing_access_token() {
        let err = parse_token_response(r#"{"token_type":"Bearer"}"#).unwrap_err();
        assert!(err.message.contains("No access_token"));
    }

    #[test]
    fn test_short_lived_token_is_expired() {
        let token = parse_token_response(r#"{"access_token":"t","expires_in":30}"#).unwrap();
        assert!(token.is_expired());
    }

    #[test]
    fn test_token_error() {
        let err = token_error(
            401,
            r#"{"error":"invalid_client","error_description":"AADSTS7000215: Invalid client secret"}"#,
        );
        assert_eq!(err.status, Some(401));
        assert!(err.message.starts_with("invalid_client: AADSTS7000215"));
    }

    #[tokio::test]
    async fn test_static_provider_hosts_and_scheme() {
        let provider = StaticAccessTokenProvider::new("tok").with_allowed_hosts(["graph.microsoft.com"]);
        let ctx = AdditionalContext::new();

        let ok = Url::parse("https://graph.microsoft.com/v1.0/me").unwrap();
        assert_eq!(provider.get_authorization_token(&ok, &ctx).await.unwrap(), "tok");

        let other = Url::parse("https://example.com/").unwrap();
        assert_eq!(provider.get_authorization_token(&other, &ctx).await.unwrap(), "");

        let open = StaticAccessTokenProvider::new("tok");
        let insecure = Url::parse("http://example.com/").unwrap();
        assert!(open.get_authorization_token(&insecure, &ctx).await.is_err());
        let local = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(open.get_authorization_token(&local, &ctx).await.unwrap(), "tok");
    }

    #[test]
    fn test_default_allowed_hosts_are_graph_hosts() {
        let provider = ClientCredentialsTokenProvider::new(config()).unwrap();
        let hosts = provider.allowed_hosts_validator().allowed_hosts();
        assert!(hosts.contains(&"graph.microsoft.com"));
        assert!(hosts.contains(&"microsoftgraph.chinacloudapi.cn"));
        assert_eq!(hosts.len(), 4);
    }
}
