//! Request authentication contracts.

use crate::error::GraphResult;
use crate::request_information::RequestInformation;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use url::Url;

/// Extra inputs for a single authentication attempt (e.g. CAE claims).
pub type AdditionalContext = HashMap<String, String>;

/// Context key carrying the decoded claims challenge of a 401 response.
pub const CLAIMS_KEY: &str = "claims";

pub const AUTHORIZATION_HEADER: &str = "Authorization";

#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    async fn authenticate_request(
        &self,
        request: &mut RequestInformation,
        context: &AdditionalContext,
    ) -> GraphResult<()>;
}

/// Leaves requests untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAuthenticationProvider;

#[async_trait]
impl AuthenticationProvider for AnonymousAuthenticationProvider {
    async fn authenticate_request(
        &self,
        _request: &mut RequestInformation,
        _context: &AdditionalContext,
    ) -> GraphResult<()> {
        Ok(())
    }
}

/// Host allow list; an empty list allows every host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedHostsValidator {
    hosts: BTreeSet<String>,
}

impl AllowedHostsValidator {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut v = Self::default();
        v.set_allowed_hosts(hosts);
        v
    }

    pub fn set_allowed_hosts<I, S>(&mut self, hosts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.hosts = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
    }

    pub fn allowed_hosts(&self) -> Vec<&str> {
        self.hosts.iter().map(String::as_str).collect()
    }

    pub fn is_url_host_valid(&self, url: &Url) -> bool {
        if self.hosts.is_empty() {
            return true;
        }
        match url.host_str() {
            Some(host) => self.hosts.contains(&host.to_ascii_lowercase()),
            None => false,
        }
    }
}

/// Supplies bearer tokens for a URL.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns an empty string when the URL must not receive a token.
    async fn get_authorization_token(
        &self,
        url: &Url,
        context: &AdditionalContext,
    ) -> GraphResult<String>;

    fn allowed_hosts_validator(&self) -> &AllowedHostsValidator;
}

/// Adds `Authorization: Bearer <token>` using an [`AccessTokenProvider`].
#[derive(Clone)]
pub struct BaseBearerTokenAuthenticationProvider {
    token_provider: Arc<dyn AccessTokenProvider>,
}

impl BaseBearerTokenAuthenticationProvider {
    pub fn new(token_provider: Arc<dyn AccessTokenProvider>) -> Self {
        Self { token_provider }
    }

    pub fn token_provider(&self) -> &Arc<dyn AccessTokenProvider> {
        &self.token_provider
    }
}

#[async_trait]
impl AuthenticationProvider for BaseBearerTokenAuthenticationProvider {
    async fn authenticate_request(
        &self,
        request: &mut RequestInformation,
        context: &AdditionalContext,
    ) -> GraphResult<()> {
        if context.get(CLAIMS_KEY).map_or(false, |c| !c.is_empty()) {
            request.headers.remove(AUTHORIZATION_HEADER);
        }
        if request.headers.contains(AUTHORIZATION_HEADER) {
            return Ok(());
        }
        let url = request.uri()?;
        let token = self
            .token_provider
            .get_authorization_token(&url, context)
            .await?;
        if !token.is_empty() {
            request
                .headers
                .add(AUTHORIZATION_HEADER, format!("Bearer {}", token));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request_information::{HttpMethod, BASE_URL_KEY};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
        validator: AllowedHostsValidator,
        token: &'static str,
    }

    #[async_trait]
    impl AccessTokenProvider for Counting {
        async fn get_authorization_token(
            &self,
            _url: &Url,
            context: &AdditionalContext,
        ) -> GraphResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(match context.get(CLAIMS_KEY) {
                Some(_) => format!("{}-claims", self.token),
                None => self.token.to_string(),
            })
        }
        fn allowed_hosts_validator(&self) -> &AllowedHostsValidator {
            &self.validator
        }
    }

    fn provider(token: &'static str) -> (Arc<Counting>, BaseBearerTokenAuthenticationProvider) {
        let tp = Arc::new(Counting {
            calls: AtomicUsize::new(0),
            validator: AllowedHostsValidator::default(),
            token,
        });
        (tp.clone(), BaseBearerTokenAuthenticationProvider::new(tp))
    }

    fn request() -> RequestInformation {
        RequestInformation::new(
            HttpMethod::Get,
            "{+baseurl}/me",
            HashMap::from([(BASE_URL_KEY.to_string(), "https://graph.microsoft.com/v1.0".to_string())]),
        )
    }

    #[tokio::test]
    async fn test_adds_bearer_header() {
        let (_, auth) = provider("tok");
        let mut req = request();
        auth.authenticate_request(&mut req, &AdditionalContext::new()).await.unwrap();
        assert_eq!(req.headers.first("authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_existing_header_kept() {
        let (tp, auth) = provider("tok");
        let mut req = request();
        req.headers.add("Authorization", "Bearer old");
        auth.authenticate_request(&mut req, &AdditionalContext::new()).await.unwrap();
        assert_eq!(req.headers.first("authorization"), Some("Bearer old"));
        assert_eq!(tp.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_claims_replace_header() {
        let (_, auth) = provider("tok");
        let mut req = request();
        req.headers.add("Authorization", "Bearer old");
        let ctx = AdditionalContext::from([(CLAIMS_KEY.to_string(), "{}".to_string())]);
        auth.authenticate_request(&mut req, &ctx).await.unwrap();
        assert_eq!(req.headers.get("authorization").unwrap(), &["Bearer tok-claims".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_token_adds_nothing() {
        let (_, auth) = provider("");
        let mut req = request();
        auth.authenticate_request(&mut req, &AdditionalContext::new()).await.unwrap();
        assert!(!req.headers.contains("authorization"));
    }

    #[tokio::test]
    async fn test_anonymous() {
        let mut req = request();
        AnonymousAuthenticationProvider
            .authenticate_request(&mut req, &AdditionalContext::new())
            .await
            .unwrap();
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_allowed_hosts() {
        let v = AllowedHostsValidator::new(["Graph.Microsoft.com", " "]);
        assert_eq!(v.allowed_hosts(), vec!["graph.microsoft.com"]);
        assert!(v.is_url_host_valid(&Url::parse("https://GRAPH.microsoft.com/v1.0").unwrap()));
        assert!(!v.is_url_host_valid(&Url::parse("https://evil.example.com").unwrap()));
        assert!(AllowedHostsValidator::default().is_url_host_valid(&Url::parse("https://any.host").unwrap()));
    }
}
