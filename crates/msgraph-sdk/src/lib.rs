//! Microsoft Graph v1.0 service library.
//!
//! ```ignore
//! let client = GraphServiceClient::new(adapter);
//! let me = client.me().get(None).await?;
//! let rows = client
//!     .drives().by_drive_id(drive_id)
//!     .items().by_drive_item_id(item_id)
//!     .workbook().tables().by_workbook_table_id("Sales")
//!     .rows().get(None).await?;
//! ```
//!
//! Every operation maps 4XX and 5XX responses to
//! [`ODataError`](models::ODataError), reachable through
//! [`GraphError::model`](msgraph_abstractions::GraphError::model).

#[macro_use]
mod macros;

pub mod client;
pub mod count;
pub mod directory_objects;
pub mod drives;
pub mod groups;
pub mod models;
pub mod page_iterator;
pub mod query;
pub mod users;
pub mod workbook;

#[cfg(test)]
mod test_support;

pub use client::GraphServiceClient;
pub use page_iterator::PageIterator;
