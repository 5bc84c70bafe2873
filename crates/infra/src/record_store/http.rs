//! `reqwest` client for the remote record store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use stockflow_core::RecordId;
use stockflow_inventory::{ShipPayload, ShipSource, StationCollection, UnitRecord};

use super::r#trait::{RecordStore, StoreError};

pub fn list_path(collection: StationCollection) -> &'static str {
    match collection {
        StationCollection::ReturnTable => "/api/v1/return-table/get-records",
        StationCollection::PressTable => "/api/v1/press-table/get-records",
        StationCollection::InventoryCart => "/api/v1/inventory-table/get-records",
        StationCollection::Shipped => "/api/v1/ship-record",
    }
}

pub fn post_path(collection: StationCollection) -> &'static str {
    match collection {
        StationCollection::ReturnTable => "/api/v1/return-table/add-record",
        StationCollection::PressTable => "/api/v1/press-table/add-record",
        StationCollection::InventoryCart => "/api/v1/inventory-table/add-record",
        StationCollection::Shipped => "/api/v1/ship-record/ship",
    }
}

pub fn delete_path(collection: StationCollection) -> &'static str {
    match collection {
        StationCollection::ReturnTable => "/api/v1/return-table/delete-record",
        StationCollection::PressTable => "/api/v1/press-table/delete-record",
        StationCollection::InventoryCart => "/api/v1/inventory-table/delete-record",
        StationCollection::Shipped => "/api/v1/ship-record/delete-shipped-record",
    }
}

/// Return Table ships through its delete endpoint; the store files the unit
/// as shipped on its side.
pub fn ship_path(source: ShipSource) -> &'static str {
    match source {
        ShipSource::ReturnTable => "/api/v1/return-table/delete-record",
        ShipSource::PressTable => "/api/v1/ship-record/ship",
        ShipSource::InventoryCart => "/api/v1/inventory-table/inventory/ship",
    }
}

/// The shipped list has been seen both wrapped and bare. Elements are
/// decoded one by one so a single bad record does not hide the rest.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Wrapped { data: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

fn decode_list(collection: StationCollection, body: &[u8]) -> Result<Vec<UnitRecord>, StoreError> {
    let values = match serde_json::from_slice::<ListBody>(body) {
        Ok(ListBody::Wrapped { data }) | Ok(ListBody::Bare(data)) => data,
        Err(e) => return Err(StoreError::Decode(e.to_string())),
    };

    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<UnitRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!(collection = %collection, error = %e, "skipping malformed record"),
        }
    }
    Ok(records)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordBody {
    Wrapped { data: UnitRecord },
    Bare(UnitRecord),
}

#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        what: &str,
        body: &T,
    ) -> Result<reqwest::Response, StoreError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        checked(resp, what).await
    }
}

async fn checked(resp: reqwest::Response, what: &str) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    match status {
        StatusCode::CONFLICT => Err(StoreError::Conflict(what.to_string())),
        StatusCode::NOT_FOUND => Err(StoreError::NotFound(what.to_string())),
        _ => Err(StoreError::Status {
            code: status.as_u16(),
            body: resp.text().await.unwrap_or_default(),
        }),
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self, collection: StationCollection) -> Result<Vec<UnitRecord>, StoreError> {
        let resp = self
            .client
            .get(self.url(list_path(collection)))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let resp = checked(resp, collection.as_str()).await?;

        let body = resp.bytes().await.map_err(|e| StoreError::Network(e.to_string()))?;
        let records = decode_list(collection, &body)?;

        debug!(collection = %collection, count = records.len(), "listed records");
        Ok(records)
    }

    async fn post(&self, collection: StationCollection, unit: &UnitRecord) -> Result<UnitRecord, StoreError> {
        let resp = self.post_json(post_path(collection), collection.as_str(), unit).await?;
        let body = resp.bytes().await.map_err(|e| StoreError::Network(e.to_string()))?;

        // Not every endpoint echoes the stored record.
        match serde_json::from_slice::<RecordBody>(&body) {
            Ok(RecordBody::Wrapped { data }) | Ok(RecordBody::Bare(data)) => Ok(data),
            Err(_) => {
                debug!(collection = %collection, "store did not echo the posted record");
                Ok(unit.clone())
            }
        }
    }

    async fn delete(&self, collection: StationCollection, id: &RecordId) -> Result<(), StoreError> {
        self.post_json(delete_path(collection), collection.as_str(), &json!({ "_id": id }))
            .await?;
        Ok(())
    }

    async fn ship(&self, source: ShipSource, payload: &ShipPayload) -> Result<(), StoreError> {
        self.post_json(ship_path(source), source.collection().as_str(), payload)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_collection_has_its_endpoint_family() {
        assert_eq!(list_path(StationCollection::InventoryCart), "/api/v1/inventory-table/get-records");
        assert_eq!(list_path(StationCollection::Shipped), "/api/v1/ship-record");
        assert_eq!(post_path(StationCollection::Shipped), "/api/v1/ship-record/ship");
        assert_eq!(
            delete_path(StationCollection::Shipped),
            "/api/v1/ship-record/delete-shipped-record"
        );
    }

    #[test]
    fn return_table_ships_through_its_delete_endpoint() {
        assert_eq!(ship_path(ShipSource::ReturnTable), delete_path(StationCollection::ReturnTable));
        assert_eq!(ship_path(ShipSource::InventoryCart), "/api/v1/inventory-table/inventory/ship");
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let store = HttpRecordStore::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            store.url(list_path(StationCollection::PressTable)),
            "http://localhost:8000/api/v1/press-table/get-records"
        );
    }

    #[test]
    fn list_body_accepts_wrapped_and_bare_arrays() {
        let record = r#"{"styleNumber":"10234","size":"M","location":"Shipped"}"#;
        let wrapped = format!(r#"{{"data":[{record}]}}"#);
        let bare = format!("[{record}]");

        for body in [wrapped, bare] {
            let records = decode_list(StationCollection::Shipped, body.as_bytes()).unwrap();
            assert_eq!(records.len(), 1);
        }
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let body = r#"{"data":[
            {"_id":"a","styleNumber":10234,"size":"M","location":"Press Table"},
            {"_id":"b","styleNumber":10235,"size":"L"},
            {"_id":"c","size":"XL","location":"Press Table"},
            {"_id":"d","styleNumber":10236,"size":"9XL","location":"Press Table"}
        ]}"#;

        let records = decode_list(StationCollection::PressTable, body.as_bytes()).unwrap();
        let ids: Vec<_> = records.iter().filter_map(|r| r.id.as_ref().map(|id| id.as_str())).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(records[1].location, "");
    }

    #[test]
    fn non_list_body_is_a_decode_error() {
        match decode_list(StationCollection::PressTable, br#"{"message":"oops"}"#) {
            Err(StoreError::Decode(_)) => {}
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_store_is_a_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let store = HttpRecordStore::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        match store.list(StationCollection::PressTable).await {
            Err(StoreError::Network(_)) => {}
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
