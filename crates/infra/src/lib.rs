//! Infrastructure layer: record store clients, movement orchestration,
//! configuration.

pub mod config;
pub mod guard;
pub mod movement;
pub mod record_store;
pub mod snapshot;

#[cfg(test)]
mod integration_tests;

pub use config::AppConfig;
pub use guard::{ScanDesk, ScanOutcome, guarded};
pub use movement::{BatchFailure, BatchProgress, BatchSummary, MovementEngine};
pub use record_store::{HttpRecordStore, InMemoryRecordStore, RecordStore, StoreError};
pub use snapshot::{LiveSnapshot, build_picklist, fetch_live_units};
