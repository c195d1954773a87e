//! Client configuration and per-request handler options.

use msgraph_abstractions::RequestOption;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// SDK version advertised in the `SdkVersion` header.
pub const SDK_VERSION: &str = concat!("graph-rust/", env!("CARGO_PKG_VERSION"));

// ═══════════════════════════════════════════════════════════════════════
//  National clouds
// ═══════════════════════════════════════════════════════════════════════

/// Sovereign cloud deployments of Microsoft Graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NationalCloud {
    #[default]
    Global,
    UsGovL4,
    UsGovL5,
    China,
}

impl NationalCloud {
    pub const ALL: [NationalCloud; 4] = [
        NationalCloud::Global,
        NationalCloud::UsGovL4,
        NationalCloud::UsGovL5,
        NationalCloud::China,
    ];

    /// Graph service root without the API version.
    pub fn graph_endpoint(&self) -> &'static str {
        match self {
            NationalCloud::Global => "https://graph.microsoft.com",
            NationalCloud::UsGovL4 => "https://graph.microsoft.us",
            NationalCloud::UsGovL5 => "https://dod-graph.microsoft.us",
            NationalCloud::China => "https://microsoftgraph.chinacloudapi.cn",
        }
    }

    /// Microsoft identity platform authority host.
    pub fn login_endpoint(&self) -> &'static str {
        match self {
            NationalCloud::Global => "https://login.microsoftonline.com",
            NationalCloud::UsGovL4 | NationalCloud::UsGovL5 => "https://login.microsoftonline.us",
            NationalCloud::China => "https://login.chinacloudapi.cn",
        }
    }

    pub fn graph_host(&self) -> &'static str {
        self.graph_endpoint().trim_start_matches("https://")
    }

    /// Hosts of every national cloud Graph endpoint.
    pub fn all_graph_hosts() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.graph_host()).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Client options
// ═══════════════════════════════════════════════════════════════════════

/// Configuration for [`crate::ReqwestRequestAdapter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphClientOptions {
    pub national_cloud: NationalCloud,
    /// API version segment.  Default: `v1.0`.
    pub api_version: String,
    /// Full service root; overrides `national_cloud` + `api_version`.
    pub base_url: Option<String>,
    /// Timeout in seconds for HTTP calls.  Default: 100.
    pub timeout_sec: u64,
    /// Maximum automatic retries for throttled / unavailable responses.  Default: 3.
    pub max_retries: u32,
    /// Base back-off delay in seconds.  Default: 3.
    pub retry_delay_sec: u64,
    /// Upper bound for the cumulative back-off.  Default: 180.
    pub max_retry_delay_sec: u64,
    pub user_agent: String,
    /// Decode `%24`, `%2D`, `%2E` and `%7E` in query parameter names.
    pub decode_parameter_names: bool,
    /// Send only changed model properties in request bodies.
    pub enable_backing_store: bool,
}

impl Default for GraphClientOptions {
    fn default() -> Self {
        Self {
            national_cloud: NationalCloud::Global,
            api_version: "v1.0".into(),
            base_url: None,
            timeout_sec: 100,
            max_retries: 3,
            retry_delay_sec: 3,
            max_retry_delay_sec: 180,
            user_agent: format!("msgraph-rust/{}", env!("CARGO_PKG_VERSION")),
            decode_parameter_names: true,
            enable_backing_store: false,
        }
    }
}

impl GraphClientOptions {
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!(
                "{}/{}",
                self.national_cloud.graph_endpoint(),
                self.api_version.trim_matches('/')
            ),
        }
    }

    pub fn retry_option(&self) -> RetryHandlerOption {
        RetryHandlerOption {
            max_retries: self.max_retries,
            delay_sec: self.retry_delay_sec,
            max_delay_sec: self.max_retry_delay_sec,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Request options
// ═══════════════════════════════════════════════════════════════════════

/// Per-request override of the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryHandlerOption {
    pub max_retries: u32,
    pub delay_sec: u64,
    pub max_delay_sec: u64,
}

impl RetryHandlerOption {
    pub const KEY: &'static str = "RetryHandlerOptionKey";

    /// Disable retries for one request.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            delay_sec: 0,
            max_delay_sec: 0,
        }
    }
}

impl RequestOption for RetryHandlerOption {
    fn key(&self) -> &'static str {
        Self::KEY
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Per-request override of query parameter name decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametersNameDecodingOption {
    pub enable: bool,
    pub chars_to_decode: Vec<char>,
}

impl Default for ParametersNameDecodingOption {
    fn default() -> Self {
        Self {
            enable: true,
            chars_to_decode: vec!['$', '.', '-', '~'],
        }
    }
}

impl ParametersNameDecodingOption {
    pub const KEY: &'static str = "ParametersNameDecodingOptionKey";
}

impl RequestOption for ParametersNameDecodingOption {
    fn key(&self) -> &'static str {
        Self::KEY
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
