//! Transport-independent runtime for the Microsoft Graph client.
//!
//! Generated request builders only ever talk to the types in this crate:
//! they turn a URL template plus path and query parameters into a
//! [`RequestInformation`], hand it to a [`RequestAdapter`] together with the
//! operation's [`ErrorMappings`], and decode [`Parsable`] models.

pub mod authentication;
pub mod error;
pub mod headers;
pub mod request_adapter;
pub mod request_builder;
pub mod request_information;
pub mod request_option;
pub mod serialization;
pub mod store;
pub mod uri_template;

pub use authentication::{
    AccessTokenProvider, AdditionalContext, AllowedHostsValidator, AnonymousAuthenticationProvider,
    AuthenticationProvider, BaseBearerTokenAuthenticationProvider, CLAIMS_KEY,
};
pub use error::{
    error_from_response, ErrorFactory, ErrorMappings, ErrorModel, GraphError, GraphErrorCode,
    GraphResult,
};
pub use headers::{Headers, RequestHeaders, ResponseHeaders};
pub use request_adapter::{RequestAdapter, ResponseBody};
pub use request_builder::BaseRequestBuilder;
pub use request_information::{HttpMethod, RequestInformation, BASE_URL_KEY, RAW_URL_KEY};
pub use request_option::{NoQueryParameters, RequestConfiguration, RequestOption, RequestOptions};
pub use serialization::{JsonParseNode, Parsable};
pub use store::InMemoryBackingStore;
pub use uri_template::{TemplateValue, UriTemplate, UriTemplateError};
