//! Graph v1.0 models backed by an in-memory store.

mod collections;
mod directory;
mod drives;
mod odata_errors;
mod workbook;

pub use collections::*;
pub use directory::*;
pub use drives::*;
pub use odata_errors::*;
pub use workbook::*;
