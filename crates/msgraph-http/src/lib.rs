//! HTTP transport for the Microsoft Graph client.
//!
//! [`ReqwestRequestAdapter`] implements the
//! [`RequestAdapter`](msgraph_abstractions::RequestAdapter) contract on top of
//! `reqwest`; the token providers in [`auth`] plug into
//! [`BaseBearerTokenAuthenticationProvider`](msgraph_abstractions::BaseBearerTokenAuthenticationProvider).

pub mod adapter;
pub mod auth;
pub mod decoding;
pub mod error;
pub mod options;
pub mod retry;

pub use adapter::ReqwestRequestAdapter;
pub use auth::{
    AccessToken, ClientCredentialsConfig, ClientCredentialsTokenProvider,
    StaticAccessTokenProvider,
};
pub use options::{
    GraphClientOptions, NationalCloud, ParametersNameDecodingOption, RetryHandlerOption,
};
