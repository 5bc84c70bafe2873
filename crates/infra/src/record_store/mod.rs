//! Record store clients.

pub mod http;
pub mod in_memory;
pub mod r#trait;

pub use http::HttpRecordStore;
pub use in_memory::InMemoryRecordStore;
pub use r#trait::{RecordStore, StoreError};

#[cfg(test)]
pub(crate) mod faulty;
