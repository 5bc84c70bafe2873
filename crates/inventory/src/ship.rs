//! Ship-out requests.
//!
//! Each source station's ship endpoint expects its own payload field names.
//! Press Table wants `style_number`/`Size`, the others want `styleNumber`/`size`.
//! These shapes are part of the store contract and are kept distinct.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockflow_core::{DomainError, DomainResult, OrderId, StyleNumber};

use crate::size::Size;
use crate::station::StationCollection;

/// Station a unit can be shipped out of.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipSource {
    ReturnTable,
    PressTable,
    InventoryCart,
}

impl ShipSource {
    pub fn collection(self) -> StationCollection {
        match self {
            ShipSource::ReturnTable => StationCollection::ReturnTable,
            ShipSource::PressTable => StationCollection::PressTable,
            ShipSource::InventoryCart => StationCollection::InventoryCart,
        }
    }
}

impl fmt::Display for ShipSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShipSource::ReturnTable => "Return Table",
            ShipSource::PressTable => "Press Table",
            ShipSource::InventoryCart => "Inventory Cart",
        })
    }
}

impl FromStr for ShipSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Err(DomainError::validation("no ship location selected")),
            "return" | "return table" => Ok(ShipSource::ReturnTable),
            "press" | "press table" => Ok(ShipSource::PressTable),
            "inventory" | "inventory cart" => Ok(ShipSource::InventoryCart),
            other => Err(DomainError::validation(format!("cannot ship from {other:?}"))),
        }
    }
}

/// Operator input for a ship-out: an order id or a style/size pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipCriteria {
    pub order_id: Option<OrderId>,
    pub style_number: Option<StyleNumber>,
    pub size: Option<Size>,
}

/// Validated ship key.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShipKey {
    Order(OrderId),
    Sku { style_number: StyleNumber, size: Size },
}

impl ShipCriteria {
    /// Exactly one of `order_id` or the full `(style_number, size)` pair.
    pub fn resolve(&self) -> DomainResult<ShipKey> {
        match (self.order_id, self.style_number, self.size) {
            (Some(order_id), None, None) => Ok(ShipKey::Order(order_id)),
            (None, Some(style_number), Some(size)) => Ok(ShipKey::Sku { style_number, size }),
            (Some(_), _, _) => Err(DomainError::validation(
                "supply either an order id or a style number and size, not both",
            )),
            (None, None, None) => Err(DomainError::validation(
                "order id or both style number and size are required",
            )),
            (None, _, _) => Err(DomainError::validation(
                "style number and size must be supplied together",
            )),
        }
    }
}

/// Body of a ship-out request, per source station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ShipPayload {
    ByOrder {
        order_id: OrderId,
    },
    PressBySku {
        style_number: StyleNumber,
        #[serde(rename = "Size")]
        size: Size,
    },
    BySku {
        #[serde(rename = "styleNumber")]
        style_number: StyleNumber,
        size: Size,
    },
}

pub fn ship_payload(source: ShipSource, key: ShipKey) -> ShipPayload {
    match (key, source) {
        (ShipKey::Order(order_id), _) => ShipPayload::ByOrder { order_id },
        (ShipKey::Sku { style_number, size }, ShipSource::PressTable) => {
            ShipPayload::PressBySku { style_number, size }
        }
        (ShipKey::Sku { style_number, size }, _) => ShipPayload::BySku { style_number, size },
    }
}
