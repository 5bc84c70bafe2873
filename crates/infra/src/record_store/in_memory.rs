use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use stockflow_core::RecordId;
use stockflow_inventory::{ShipPayload, ShipSource, Station, StationCollection, UnitRecord};

use super::r#trait::{RecordStore, StoreError};

/// In-memory record store.
///
/// Intended for tests/dev. Mirrors the remote store's observable rules:
/// a second record with the same order id in one collection is a conflict,
/// and shipping moves the first matching unit into the shipped collection.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<StationCollection, Vec<UnitRecord>>>,
    next_id: AtomicU64,
}

fn poisoned() -> StoreError {
    StoreError::Network("in-memory store lock poisoned".to_string())
}

fn payload_matches(unit: &UnitRecord, payload: &ShipPayload) -> bool {
    match payload {
        ShipPayload::ByOrder { order_id } => unit.order_id == Some(*order_id),
        ShipPayload::PressBySku { style_number, size } | ShipPayload::BySku { style_number, size } => {
            unit.style_number == *style_number && unit.size == *size
        }
    }
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(&self) -> RecordId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        RecordId::new(format!("mem-{n}"))
    }

    /// Number of records in `collection`.
    pub fn count(&self, collection: StationCollection) -> usize {
        self.collections
            .read()
            .map(|map| map.get(&collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self, collection: StationCollection) -> Result<Vec<UnitRecord>, StoreError> {
        let map = self.collections.read().map_err(|_| poisoned())?;
        Ok(map.get(&collection).cloned().unwrap_or_default())
    }

    async fn post(&self, collection: StationCollection, unit: &UnitRecord) -> Result<UnitRecord, StoreError> {
        let mut map = self.collections.write().map_err(|_| poisoned())?;
        let records = map.entry(collection).or_default();

        if let Some(order_id) = unit.order_id {
            if records.iter().any(|r| r.order_id == Some(order_id)) {
                return Err(StoreError::Conflict(format!("{collection} (order {order_id})")));
            }
        }

        let stored = UnitRecord {
            id: Some(self.assign_id()),
            created_at: Some(Utc::now()),
            ..unit.clone()
        };
        records.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, collection: StationCollection, id: &RecordId) -> Result<(), StoreError> {
        let mut map = self.collections.write().map_err(|_| poisoned())?;
        let records = map.entry(collection).or_default();

        let position = records
            .iter()
            .position(|r| r.id.as_ref() == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("{collection} (id {id})")))?;
        records.remove(position);
        Ok(())
    }

    async fn ship(&self, source: ShipSource, payload: &ShipPayload) -> Result<(), StoreError> {
        let mut map = self.collections.write().map_err(|_| poisoned())?;
        let records = map.entry(source.collection()).or_default();

        let position = records
            .iter()
            .position(|r| payload_matches(r, payload))
            .ok_or_else(|| StoreError::NotFound(source.to_string()))?;
        let unit = records.remove(position);

        let shipped = UnitRecord {
            id: Some(self.assign_id()),
            created_at: Some(Utc::now()),
            ..unit.relocated(&Station::Shipped)
        };
        map.entry(StationCollection::Shipped).or_default().push(shipped);
        Ok(())
    }
}
