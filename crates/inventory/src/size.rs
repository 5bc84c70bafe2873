use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use stockflow_core::DomainError;

/// Garment size, smallest to largest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Size {
    XXS,
    XS,
    S,
    M,
    L,
    XL,
    XL2,
    XL3,
    XL4,
    XL5,
}

impl Size {
    pub const ALL: [Size; 10] = [
        Size::XXS,
        Size::XS,
        Size::S,
        Size::M,
        Size::L,
        Size::XL,
        Size::XL2,
        Size::XL3,
        Size::XL4,
        Size::XL5,
    ];

    /// Label as printed on the garment tag and in SKUs.
    pub fn as_str(self) -> &'static str {
        match self {
            Size::XXS => "XXS",
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XL2 => "2XL",
            Size::XL3 => "3XL",
            Size::XL4 => "4XL",
            Size::XL5 => "5XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unknown size: {wanted:?}")))
    }
}

impl Serialize for Size {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Size::from_str(&raw).map_err(serde::de::Error::custom)
    }
}
