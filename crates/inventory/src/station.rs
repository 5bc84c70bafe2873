//! Stations and the store collections that hold them.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockflow_core::DomainError;

const CART_SUFFIX: &str = " Cart";

/// A named holding area for units.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Station {
    ReturnTable,
    PressTable,
    Shipped,
    /// A rack-named cart, e.g. `Cart("A12")` for location "A12 Cart".
    Cart(String),
}

/// Endpoint family in the record store. Every cart lives in `InventoryCart`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationCollection {
    ReturnTable,
    PressTable,
    InventoryCart,
    Shipped,
}

impl Station {
    /// Location string as stored on unit records.
    pub fn location(&self) -> String {
        match self {
            Station::ReturnTable => "Return Table".to_string(),
            Station::PressTable => "Press Table".to_string(),
            Station::Shipped => "Shipped".to_string(),
            Station::Cart(rack) => format!("{rack}{CART_SUFFIX}"),
        }
    }

    pub fn collection(&self) -> StationCollection {
        match self {
            Station::ReturnTable => StationCollection::ReturnTable,
            Station::PressTable => StationCollection::PressTable,
            Station::Shipped => StationCollection::Shipped,
            Station::Cart(_) => StationCollection::InventoryCart,
        }
    }

    /// Station named by a unit record's `location`, if it is one we know.
    pub fn from_location(location: &str) -> Option<Self> {
        match location {
            "Return Table" => Some(Station::ReturnTable),
            "Press Table" => Some(Station::PressTable),
            "Shipped" => Some(Station::Shipped),
            other => other
                .strip_suffix(CART_SUFFIX)
                .filter(|rack| !rack.trim().is_empty())
                .map(|rack| Station::Cart(rack.to_string())),
        }
    }

    /// Any "<rack> Cart" location counts as inventory cart stock.
    pub fn is_cart_location(location: &str) -> bool {
        location.ends_with(CART_SUFFIX)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location())
    }
}

impl FromStr for Station {
    type Err = DomainError;

    /// Accepts full location strings as well as the short department names
    /// operators type ("Return", "Press", "Ship").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Err(DomainError::validation("no station selected")),
            "return" => Ok(Station::ReturnTable),
            "press" => Ok(Station::PressTable),
            "ship" => Ok(Station::Shipped),
            _ => Station::from_location(trimmed)
                .ok_or_else(|| DomainError::validation(format!("unknown station: {trimmed:?}"))),
        }
    }
}

impl StationCollection {
    pub fn as_str(self) -> &'static str {
        match self {
            StationCollection::ReturnTable => "return-table",
            StationCollection::PressTable => "press-table",
            StationCollection::InventoryCart => "inventory-cart",
            StationCollection::Shipped => "shipped",
        }
    }
}

impl fmt::Display for StationCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_locations_round_trip_through_station() {
        let station = Station::from_location("A12 Cart").unwrap();
        assert_eq!(station, Station::Cart("A12".to_string()));
        assert_eq!(station.location(), "A12 Cart");
        assert_eq!(station.collection(), StationCollection::InventoryCart);
    }

    #[test]
    fn bare_cart_suffix_is_not_a_station() {
        assert_eq!(Station::from_location(" Cart"), None);
        assert_eq!(Station::from_location("Cart"), None);
        assert!(Station::is_cart_location("Inventory Cart"));
        assert!(!Station::is_cart_location("Carton"));
    }

    #[test]
    fn short_department_names_parse() {
        assert_eq!("Return".parse::<Station>().unwrap(), Station::ReturnTable);
        assert_eq!("press".parse::<Station>().unwrap(), Station::PressTable);
        assert_eq!("Ship".parse::<Station>().unwrap(), Station::Shipped);
        assert_eq!("Press Table".parse::<Station>().unwrap(), Station::PressTable);
        assert!(matches!("".parse::<Station>(), Err(DomainError::Validation(_))));
        assert!("Basement".parse::<Station>().is_err());
    }
}
