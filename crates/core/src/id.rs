//! Strongly-typed identifiers used across the domain.

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::DomainError;

/// Garment style number.
///
/// Always a positive integer. This is the only place a style number is parsed,
/// whether it comes from a SKU segment, a form field or a store payload that
/// sent it as a string, so every comparison downstream is integer equality.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleNumber(u32);

/// Order identifier printed on the order label (unique only within one station).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(i64);

/// Identifier the record store assigns to a persisted unit record (`_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

/// Correlation id for one batch operation (log/trace correlation only).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(Uuid);

impl StyleNumber {
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::validation("style number must be positive"));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for StyleNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<u32>()
            .map_err(|_| DomainError::validation(format!("invalid style number: {trimmed:?}")))?;
        Self::new(value)
    }
}

impl OrderId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for OrderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::validation(format!("invalid order id: {trimmed:?}")))
    }
}

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl BatchId {
    /// Uses UUIDv7 so batch ids sort by start time in the logs.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_display {
    ($t:ty) => {
        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

impl_display!(StyleNumber);
impl_display!(OrderId);
impl_display!(RecordId);
impl_display!(BatchId);

// The store is loose about numeric fields: style numbers and order ids arrive
// as JSON numbers from some endpoints and as strings from others.
macro_rules! impl_lenient_integer_serde {
    ($t:ty, $repr:ty, $expecting:literal) => {
        impl Serialize for $t {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i64(i64::from(self.0))
            }
        }

        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct LenientVisitor;

                impl<'de> Visitor<'de> for LenientVisitor {
                    type Value = $t;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                        let raw = <$repr>::try_from(v).map_err(|_| E::custom("number out of range"))?;
                        <$t>::from_str(&raw.to_string()).map_err(E::custom)
                    }

                    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                        let raw = <$repr>::try_from(v).map_err(|_| E::custom("number out of range"))?;
                        <$t>::from_str(&raw.to_string()).map_err(E::custom)
                    }

                    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                        if v.fract() != 0.0 {
                            return Err(E::custom("expected a whole number"));
                        }
                        self.visit_i64(v as i64)
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                        <$t>::from_str(v).map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(LenientVisitor)
            }
        }
    };
}

impl_lenient_integer_serde!(StyleNumber, u32, "a positive style number as integer or string");
impl_lenient_integer_serde!(OrderId, i64, "an order id as integer or string");
