//! Walk a paged collection by following `@odata.nextLink`.

use log::debug;
use msgraph_abstractions::request_builder::ACCEPT_HEADER;
use msgraph_abstractions::request_information::JSON_CONTENT_TYPE;
use msgraph_abstractions::{
    GraphResult, HttpMethod, RequestAdapter, RequestHeaders, RequestInformation, RequestOption,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use url::Url;

use crate::models::{odata_error_mappings, CollectionResponse};

/// Iterates every item of a collection, fetching pages on demand.
///
/// Iteration pauses when the callback returns `false`; calling
/// [`iterate`](Self::iterate) again resumes with the next item.
pub struct PageIterator<C: CollectionResponse> {
    adapter: Arc<dyn RequestAdapter>,
    items: VecDeque<C::Item>,
    next_link: Option<String>,
    headers: RequestHeaders,
    options: Vec<Arc<dyn RequestOption>>,
}

impl<C: CollectionResponse> std::fmt::Debug for PageIterator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageIterator")
            .field("buffered", &self.items.len())
            .field("next_link", &self.next_link)
            .finish()
    }
}

impl<C: CollectionResponse> PageIterator<C> {
    pub fn new(first_page: C, adapter: Arc<dyn RequestAdapter>) -> Self {
        Self {
            adapter,
            items: first_page.items().into(),
            next_link: first_page.next_link(),
            headers: RequestHeaders::new(),
            options: Vec::new(),
        }
    }

    /// Headers sent with every next-page request (e.g. `ConsistencyLevel`).
    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_option(mut self, option: Arc<dyn RequestOption>) -> Self {
        self.options.push(option);
        self
    }

    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Whether every item has been delivered.
    pub fn is_complete(&self) -> bool {
        self.items.is_empty() && self.next_link.is_none()
    }

    pub async fn iterate<F>(&mut self, mut callback: F) -> GraphResult<()>
    where
        F: FnMut(C::Item) -> bool + Send,
    {
        loop {
            while let Some(item) = self.items.pop_front() {
                if !callback(item) {
                    return Ok(());
                }
            }
            if !self.fetch_next_page().await? {
                return Ok(());
            }
        }
    }

    /// Drain the remaining items into a vector.
    pub async fn collect_all(mut self) -> GraphResult<Vec<C::Item>> {
        let mut all = Vec::new();
        self.iterate(|item| {
            all.push(item);
            true
        })
        .await?;
        Ok(all)
    }

    async fn fetch_next_page(&mut self) -> GraphResult<bool> {
        // Advanced only once the page arrives; a failed fetch is retried by
        // the next `iterate`.
        let Some(link) = self.next_link.clone() else {
            return Ok(false);
        };
        let mut info = RequestInformation::new(HttpMethod::Get, "{+baseurl}", HashMap::new());
        info.set_uri(&Url::parse(&link)?);
        info.add_request_headers(&self.headers);
        info.headers.try_add(ACCEPT_HEADER, JSON_CONTENT_TYPE);
        info.add_request_options(self.options.iter().cloned());

        debug!("Fetching next page {}", link);
        let page: Option<C> = self
            .adapter
            .send(info, Some(&odata_error_mappings()))
            .await?;
        let Some(page) = page else {
            self.next_link = None;
            return Ok(false);
        };
        self.items = page.items().into();
        self.next_link = page.next_link();
        Ok(true)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
