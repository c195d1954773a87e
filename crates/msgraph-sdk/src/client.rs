//! Entry point of the fluent API.

use msgraph_abstractions::{BaseRequestBuilder, RequestAdapter, BASE_URL_KEY};
use std::collections::HashMap;
use std::sync::Arc;

use crate::drives::DrivesRequestBuilder;
use crate::groups::GroupsRequestBuilder;
use crate::users::{UserItemRequestBuilder, UsersRequestBuilder};

pub const ROOT_PATH: &str = "{+baseurl}";

/// Root request builder for Microsoft Graph v1.0.
///
/// Cloning is cheap; every clone shares the same request adapter.
#[derive(Debug, Clone)]
pub struct GraphServiceClient {
    base: BaseRequestBuilder,
}

impl GraphServiceClient {
    pub fn new(request_adapter: Arc<dyn RequestAdapter>) -> Self {
        let path_parameters =
            HashMap::from([(BASE_URL_KEY.to_string(), request_adapter.base_url())]);
        Self {
            base: BaseRequestBuilder::new(request_adapter, ROOT_PATH, &path_parameters),
        }
    }

    pub fn request_adapter(&self) -> Arc<dyn RequestAdapter> {
        self.base.request_adapter.clone()
    }

    pub fn users(&self) -> UsersRequestBuilder {
        self.child("/users", UsersRequestBuilder::new)
    }

    /// The signed-in user. Needs a delegated token.
    pub fn me(&self) -> UserItemRequestBuilder {
        self.child("/me", UserItemRequestBuilder::new)
    }

    pub fn groups(&self) -> GroupsRequestBuilder {
        self.child("/groups", GroupsRequestBuilder::new)
    }

    pub fn drives(&self) -> DrivesRequestBuilder {
        self.child("/drives", DrivesRequestBuilder::new)
    }

    fn child<B>(
        &self,
        segment: &str,
        make: fn(Arc<dyn RequestAdapter>, String, &HashMap<String, String>) -> B,
    ) -> B {
        make(
            self.base.request_adapter.clone(),
            format!("{}{}", ROOT_PATH, segment),
            &self.base.child_parameters(),
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
