use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockflow_core::{DomainError, RecordId};
use stockflow_inventory::{ShipPayload, ShipSource, StationCollection, UnitRecord};

/// Record store failure.
///
/// Conflict and NotFound are answers the store gives on purpose; the rest
/// mean the request never produced a usable answer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists in {0}")]
    Conflict(String),

    #[error("record not found in {0}")]
    NotFound(String),

    #[error("store responded with status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode store response: {0}")]
    Decode(String),
}

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(msg) => DomainError::Conflict(msg),
            StoreError::NotFound(msg) => DomainError::NotFound(msg),
            other => DomainError::Upstream(other.to_string()),
        }
    }
}

/// Client of the external unit-record store: one endpoint family per
/// station collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records currently held in `collection`.
    async fn list(&self, collection: StationCollection) -> Result<Vec<UnitRecord>, StoreError>;

    /// Persist `unit` in `collection`, returning the stored record.
    ///
    /// Fails with `Conflict` when the same unit is already recorded there.
    async fn post(&self, collection: StationCollection, unit: &UnitRecord) -> Result<UnitRecord, StoreError>;

    async fn delete(&self, collection: StationCollection, id: &RecordId) -> Result<(), StoreError>;

    /// Ship a unit out of `source`, identified by `payload`.
    async fn ship(&self, source: ShipSource, payload: &ShipPayload) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn list(&self, collection: StationCollection) -> Result<Vec<UnitRecord>, StoreError> {
        (**self).list(collection).await
    }

    async fn post(&self, collection: StationCollection, unit: &UnitRecord) -> Result<UnitRecord, StoreError> {
        (**self).post(collection, unit).await
    }

    async fn delete(&self, collection: StationCollection, id: &RecordId) -> Result<(), StoreError> {
        (**self).delete(collection, id).await
    }

    async fn ship(&self, source: ShipSource, payload: &ShipPayload) -> Result<(), StoreError> {
        (**self).ship(source, payload).await
    }
}
