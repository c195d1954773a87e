//! [`RequestAdapter`] over `reqwest`.
//!
//! One `send_raw` call runs: base URL injection → authentication → URL
//! building and parameter name decoding → send with retry for 429 / 503 /
//! 504 → a single re-authentication when a 401 carries a claims challenge
//! → error mapping → response body hand-off.

use crate::decoding::decode_parameter_names;
use crate::error::{from_reqwest, response_headers};
use crate::options::{GraphClientOptions, ParametersNameDecodingOption, RetryHandlerOption, SDK_VERSION};
use crate::retry::{is_retryable_status, retry_delay, RETRY_AFTER_HEADER, RETRY_ATTEMPT_HEADER};
use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, info, warn};
use msgraph_abstractions::serialization::primary_content_type;
use msgraph_abstractions::{
    error_from_response, AdditionalContext, AuthenticationProvider, ErrorMappings, GraphError,
    GraphResult, RequestAdapter, RequestInformation, ResponseBody, ResponseHeaders, BASE_URL_KEY,
    CLAIMS_KEY,
};
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use url::Url;

pub const SDK_VERSION_HEADER: &str = "SdkVersion";
pub const CLIENT_REQUEST_ID_HEADER: &str = "client-request-id";
pub const WWW_AUTHENTICATE_HEADER: &str = "WWW-Authenticate";

/// Fully read HTTP response.
#[derive(Debug, Clone)]
struct RawResponse {
    status: u16,
    headers: ResponseHeaders,
    body: Bytes,
}

impl RawResponse {
    async fn read(resp: reqwest::Response) -> GraphResult<Self> {
        let status = resp.status().as_u16();
        let headers = response_headers(resp.headers());
        let body = resp.bytes().await.map_err(from_reqwest)?;
        debug!("Response status={} body_len={}", status, body.len());
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    fn content_type(&self) -> Option<String> {
        self.headers
            .first("content-type")
            .map(primary_content_type)
            .filter(|ct| !ct.is_empty())
    }
}

/// Microsoft Graph request adapter.
pub struct ReqwestRequestAdapter {
    client: reqwest::Client,
    auth: Arc<dyn AuthenticationProvider>,
    options: GraphClientOptions,
    base_url: String,
}

impl std::fmt::Debug for ReqwestRequestAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRequestAdapter")
            .field("base_url", &self.base_url)
            .field("options", &self.options)
            .finish()
    }
}

impl ReqwestRequestAdapter {
    pub fn new(
        auth: Arc<dyn AuthenticationProvider>,
        options: GraphClientOptions,
    ) -> GraphResult<Self> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&options.user_agent)
            .map_err(|e| GraphError::invalid_request(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout_sec))
            .default_headers(headers)
            .build()
            .map_err(|e| GraphError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(auth, options, client))
    }

    /// Use a caller-built `reqwest::Client` (proxies, custom TLS, ...).
    pub fn with_client(
        auth: Arc<dyn AuthenticationProvider>,
        options: GraphClientOptions,
        client: reqwest::Client,
    ) -> Self {
        let base_url = options.resolved_base_url();
        Self {
            client,
            auth,
            options,
            base_url,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn options(&self) -> &GraphClientOptions {
        &self.options
    }

    fn set_base_url_for(&self, request: &mut RequestInformation) {
        request
            .path_parameters
            .insert(BASE_URL_KEY.to_string(), self.base_url.clone());
    }

    fn build_url(&self, request: &RequestInformation) -> GraphResult<Url> {
        let mut url = request.uri()?;
        let decoding = request
            .options
            .get::<ParametersNameDecodingOption>()
            .cloned()
            .unwrap_or_else(|| ParametersNameDecodingOption {
                enable: self.options.decode_parameter_names,
                ..Default::default()
            });
        if decoding.enable {
            decode_parameter_names(&mut url, &decoding.chars_to_decode);
        }
        Ok(url)
    }

    /// Authenticate, send, and answer one claims challenge.
    async fn get_http_response(&self, request: &mut RequestInformation) -> GraphResult<RawResponse> {
        let mut claims: Option<String> = None;
        loop {
            let mut context = AdditionalContext::new();
            if let Some(c) = &claims {
                context.insert(CLAIMS_KEY.to_string(), c.clone());
            }
            self.auth.authenticate_request(request, &context).await?;

            let response = self.send_with_retry(request).await?;
            if response.status == 401 && claims.is_none() {
                let challenge = response
                    .headers
                    .first(WWW_AUTHENTICATE_HEADER)
                    .and_then(claims_from_challenge);
                if let Some(c) = challenge {
                    info!("Received a claims challenge, re-authenticating once");
                    claims = Some(c);
                    continue;
                }
            }
            return Ok(response);
        }
    }

    async fn send_with_retry(&self, request: &RequestInformation) -> GraphResult<RawResponse> {
        let url = self.build_url(request)?;
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| GraphError::invalid_request(format!("Invalid method: {}", e)))?;
        let retry = request
            .options
            .get::<RetryHandlerOption>()
            .copied()
            .unwrap_or_else(|| self.options.retry_option());
        let body = request.content.clone().map(Bytes::from);
        let client_request_id = uuid::Uuid::new_v4().to_string();

        let mut attempt: u32 = 0;
        let mut cumulative = Duration::ZERO;
        loop {
            let mut builder = self.client.request(method.clone(), url.clone());
            for (name, values) in request.headers.iter() {
                for value in values {
                    builder = builder.header(name, value.as_str());
                }
            }
            builder = builder.header(SDK_VERSION_HEADER, SDK_VERSION);
            if !request.headers.contains(CLIENT_REQUEST_ID_HEADER) {
                builder = builder.header(CLIENT_REQUEST_ID_HEADER, client_request_id.as_str());
            }
            if attempt > 0 {
                builder = builder.header(RETRY_ATTEMPT_HEADER, attempt.to_string());
            }
            if let Some(body) = &body {
                builder = builder.body(body.clone());
            }

            debug!("{} {}", method, url);
            let response = RawResponse::read(builder.send().await.map_err(from_reqwest)?).await?;

            if attempt < retry.max_retries && is_retryable_status(response.status) {
                let delay = retry_delay(
                    response.headers.first(RETRY_AFTER_HEADER),
                    attempt + 1,
                    &retry,
                );
                if cumulative + delay > Duration::from_secs(retry.max_delay_sec) {
                    warn!(
                        "Giving up after {} retries: next delay {:?} exceeds the retry budget",
                        attempt, delay
                    );
                    return Ok(response);
                }
                attempt += 1;
                cumulative += delay;
                warn!(
                    "Retry {}/{} after {:?} (HTTP {})",
                    attempt, retry.max_retries, delay, response.status
                );
                tokio::time::sleep(delay).await;
                continue;
            }
            return Ok(response);
        }
    }
}

#[async_trait]
impl RequestAdapter for ReqwestRequestAdapter {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    fn backing_store_enabled(&self) -> bool {
        self.options.enable_backing_store
    }

    async fn send_raw(
        &self,
        mut request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<ResponseBody>> {
        self.set_base_url_for(&mut request);
        let response = self.get_http_response(&mut request).await?;
        let content_type = response.content_type();

        if response.status >= 400 {
            let err = error_from_response(
                error_mappings,
                response.status,
                response.headers,
                content_type.as_deref(),
                &response.body,
            );
            debug!("Request failed: {}", err);
            return Err(err);
        }

        if response.status == 204 || response.body.is_empty() {
            return Ok(None);
        }
        let Some(content_type) = content_type else {
            return Ok(None);
        };

        Ok(Some(ResponseBody {
            status: response.status,
            content_type,
            headers: response.headers,
            body: response.body.to_vec(),
        }))
    }
}

static BEARER_SCHEME: OnceLock<Option<Regex>> = OnceLock::new();
static QUOTED_VALUE: OnceLock<Option<Regex>> = OnceLock::new();

/// Extract `claims="..."` from a `WWW-Authenticate: Bearer ...` challenge.
pub fn claims_from_challenge(header: &str) -> Option<String> {
    let bearer = BEARER_SCHEME
        .get_or_init(|| Regex::new(r"(?i)^\s*Bearer\s+").ok())
        .as_ref()?;
    let quoted = QUOTED_VALUE
        .get_or_init(|| Regex::new(r#""([^"]*)""#).ok())
        .as_ref()?;
    if !bearer.is_match(header) {
        return None;
    }
    let parameters = bearer.replace(header, "");
    parameters
        .split(',')
        .map(str::trim)
        .find(|p| p.starts_with(CLAIMS_KEY))
        .and_then(|p| quoted.captures(p))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgraph_abstractions::AnonymousAuthenticationProvider;

    #[test]
    fn test_claims_from_challenge() {
        let header = r#"Bearer authorization_uri="https://login.windows.net/common/oauth2/authorize", error="insufficient_claims", claims="eyJhY2Nlc3NfdG9rZW4iOnt9fQ==""#;
        assert_eq!(
            claims_from_challenge(header).as_deref(),
            Some("eyJhY2Nlc3NfdG9rZW4iOnt9fQ==")
        );
    }

    #[test]
    fn test_challenge_patterns_compiled_once() {
        let header = r#"bearer error="insufficient_claims", claims="e30=""#;
        assert_eq!(claims_from_challenge(header).as_deref(), Some("e30="));
        let bearer = BEARER_SCHEME.get().and_then(Option::as_ref).map(|r| r as *const Regex);
        let quoted = QUOTED_VALUE.get().and_then(Option::as_ref).map(|r| r as *const Regex);
        assert!(bearer.is_some() && quoted.is_some());

        assert_eq!(claims_from_challenge(header).as_deref(), Some("e30="));
        assert_eq!(BEARER_SCHEME.get().and_then(Option::as_ref).map(|r| r as *const Regex), bearer);
        assert_eq!(QUOTED_VALUE.get().and_then(Option::as_ref).map(|r| r as *const Regex), quoted);
    }

    #[test]
    fn test_claims_requires_bearer() {
        assert!(claims_from_challenge(r#"Basic realm="x", claims="abc""#).is_none());
        assert!(claims_from_challenge(r#"Bearer realm="x""#).is_none());
        assert!(claims_from_challenge(r#"Bearer claims="""#).is_none());
    }

    #[test]
    fn test_base_url_from_options() {
        let adapter = ReqwestRequestAdapter::new(
            Arc::new(AnonymousAuthenticationProvider),
            GraphClientOptions::default(),
        )
        .unwrap();
        assert_eq!(adapter.base_url(), "https://graph.microsoft.com/v1.0");
        let adapter = adapter.with_base_url("http://127.0.0.1:1/v1.0/");
        assert_eq!(adapter.base_url(), "http://127.0.0.1:1/v1.0");
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        let err = ReqwestRequestAdapter::new(
            Arc::new(AnonymousAuthenticationProvider),
            GraphClientOptions {
                user_agent: "bad\nagent".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, msgraph_abstractions::GraphErrorCode::InvalidRequest);
    }
}
