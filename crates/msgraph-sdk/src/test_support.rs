//! In-process adapter that records requests and replays canned responses.

use async_trait::async_trait;
use msgraph_abstractions::{
    error_from_response, ErrorMappings, GraphResult, RequestAdapter, RequestInformation,
    ResponseBody, ResponseHeaders, BASE_URL_KEY,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://graph.microsoft.com/v1.0";

enum Canned {
    Body(&'static str, Vec<u8>),
    Failure(u16, Value),
}

#[derive(Default)]
pub struct RecordingAdapter {
    requests: Mutex<Vec<RequestInformation>>,
    responses: Mutex<VecDeque<Canned>>,
    backing_store: bool,
}

impl RecordingAdapter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_backing_store() -> Arc<Self> {
        Arc::new(Self {
            backing_store: true,
            ..Default::default()
        })
    }

    pub fn respond_json(&self, body: Value) {
        self.push(Canned::Body("application/json", body.to_string().into_bytes()));
    }

    pub fn respond_text(&self, body: &str) {
        self.push(Canned::Body("text/plain", body.as_bytes().to_vec()));
    }

    pub fn respond_bytes(&self, body: &[u8]) {
        self.push(Canned::Body("application/octet-stream", body.to_vec()));
    }

    pub fn respond_failure(&self, status: u16, body: Value) {
        self.push(Canned::Failure(status, body));
    }

    pub fn requests(&self) -> Vec<RequestInformation> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RequestInformation {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }

    /// The last request's URL as the service would see it.
    pub fn last_url(&self) -> String {
        self.last().uri().unwrap().to_string()
    }

    pub fn last_body(&self) -> Value {
        serde_json::from_slice(self.last().content.as_deref().unwrap_or(b"null")).unwrap()
    }

    fn push(&self, canned: Canned) {
        self.responses.lock().unwrap().push_back(canned);
    }
}

#[async_trait]
impl RequestAdapter for RecordingAdapter {
    fn base_url(&self) -> String {
        BASE_URL.to_string()
    }

    fn backing_store_enabled(&self) -> bool {
        self.backing_store
    }

    async fn send_raw(
        &self,
        mut request: RequestInformation,
        error_mappings: Option<&ErrorMappings>,
    ) -> GraphResult<Option<ResponseBody>> {
        request
            .path_parameters
            .insert(BASE_URL_KEY.to_string(), BASE_URL.to_string());
        request.uri()?;
        self.requests.lock().unwrap().push(request);

        match self.responses.lock().unwrap().pop_front() {
            None => Ok(None),
            Some(Canned::Body(content_type, body)) => Ok(Some(ResponseBody {
                status: 200,
                content_type: content_type.to_string(),
                headers: ResponseHeaders::new(),
                body,
            })),
            Some(Canned::Failure(status, body)) => Err(error_from_response(
                error_mappings,
                status,
                ResponseHeaders::new(),
                Some("application/json"),
                body.to_string().as_bytes(),
            )),
        }
    }
}
