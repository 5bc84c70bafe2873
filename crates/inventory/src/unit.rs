use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockflow_core::{DomainError, DomainResult, OrderId, RecordId, StyleNumber};

use crate::size::Size;
use crate::station::Station;

/// A unit physically present at one station, in the store's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "styleNumber")]
    pub style_number: StyleNumber,
    pub size: Size,
    #[serde(default)]
    pub color: String,
    /// Free-text label; older records may lack it.
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(
        rename = "createdAt",
        alias = "dateAdded",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(rename = "rackSpace", default, skip_serializing_if = "Option::is_none")]
    pub rack_space: Option<String>,
}

impl UnitRecord {
    /// Copy of this unit addressed to `station`, ready to post.
    ///
    /// Store-assigned fields (`_id`, `createdAt`) are dropped so the
    /// destination assigns its own.
    pub fn relocated(&self, station: &Station) -> Self {
        Self {
            id: None,
            location: station.location(),
            created_at: None,
            ..self.clone()
        }
    }

    pub fn matches(&self, style_number: StyleNumber, size: &str) -> bool {
        self.style_number == style_number && self.size.as_str() == size
    }
}

/// Fully specified unit, as produced by a scan lookup or manual entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    pub style_number: StyleNumber,
    pub size: Size,
    pub color: String,
    pub channel: String,
    pub employee_name: String,
    pub order_id: Option<OrderId>,
}

impl UnitDescriptor {
    pub fn into_record(self, station: &Station) -> UnitRecord {
        UnitRecord {
            id: None,
            style_number: self.style_number,
            size: self.size,
            color: self.color,
            location: station.location(),
            order_id: self.order_id,
            channel: self.channel,
            employee_name: self.employee_name,
            created_at: None,
            session_id: None,
            rack_space: None,
        }
    }
}

/// Command: record a unit arriving at a station.
///
/// Every field the operator can leave blank is optional here; `validate`
/// turns it into a descriptor or a `Validation` error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalRequest {
    pub station: Option<String>,
    pub style_number: Option<StyleNumber>,
    pub size: Option<Size>,
    pub color: String,
    pub channel: String,
    pub employee_name: String,
    pub order_id: Option<OrderId>,
}

impl ArrivalRequest {
    pub fn validate(self) -> DomainResult<(Station, UnitDescriptor)> {
        let station: Station = self
            .station
            .as_deref()
            .ok_or_else(|| DomainError::validation("no station selected"))?
            .parse()?;
        let style_number = self
            .style_number
            .ok_or_else(|| DomainError::validation("style number is required"))?;
        let size = self
            .size
            .ok_or_else(|| DomainError::validation("size is required"))?;

        Ok((
            station,
            UnitDescriptor {
                style_number,
                size,
                color: self.color,
                channel: self.channel,
                employee_name: self.employee_name,
                order_id: self.order_id,
            },
        ))
    }
}
