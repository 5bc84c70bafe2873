//! Manifest and rack-space CSV parsing.
//!
//! Header names are configuration; the defaults match the marketplace
//! packlog export and the warehouse rack-space export.

use std::collections::HashMap;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockflow_core::StyleNumber;

use crate::sku::parse_sku;

/// Rack-space label used when no rack-space data matches a row.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("missing required column {0:?}")]
    MissingColumn(String),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Header names of the manifest upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestColumns {
    pub sku: String,
    pub quantity: String,
    /// Used when present in the upload; otherwise rack space comes from a
    /// separate rack-space file.
    pub rack_space: String,
    pub listing_code: String,
}

impl Default for ManifestColumns {
    fn default() -> Self {
        Self {
            sku: "Product Sku Code".to_string(),
            quantity: "Qty".to_string(),
            rack_space: "Rack Space".to_string(),
            listing_code: "Listing Sku Code".to_string(),
        }
    }
}

/// One manifest line, before any SKU parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub sku: String,
    pub quantity: String,
    pub rack_space: Option<String>,
    pub listing_code: Option<String>,
}

impl ManifestRow {
    pub fn new(sku: impl Into<String>, quantity: impl Into<String>, rack_space: Option<&str>) -> Self {
        Self {
            sku: sku.into(),
            quantity: quantity.into(),
            rack_space: rack_space.map(str::to_string),
            listing_code: None,
        }
    }
}

/// Header name to column index, tolerant of a leading UTF-8 BOM.
struct HeaderIndex(HashMap<String, usize>);

impl HeaderIndex {
    fn read<R: io::Read>(reader: &mut csv::Reader<R>) -> Result<Self, ManifestError> {
        let headers = reader.headers()?;
        Ok(Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim_start_matches('\u{feff}').trim().to_string(), i))
                .collect(),
        ))
    }

    fn required(&self, name: &str) -> Result<usize, ManifestError> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| ManifestError::MissingColumn(name.to_string()))
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }
}

fn csv_reader<R: io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn cell(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a manifest upload. The SKU and quantity columns are required.
///
/// Every data line becomes a row, including ones whose SKU will not parse;
/// filtering is reconciliation's job so row counts stay auditable.
pub fn parse_manifest<R: io::Read>(input: R, columns: &ManifestColumns) -> Result<Vec<ManifestRow>, ManifestError> {
    let mut reader = csv_reader(input);
    let headers = HeaderIndex::read(&mut reader)?;

    let sku = headers.required(&columns.sku)?;
    let quantity = headers.required(&columns.quantity)?;
    let rack_space = headers.optional(&columns.rack_space);
    let listing_code = headers.optional(&columns.listing_code);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(ManifestRow {
            sku: cell(&record, Some(sku)).unwrap_or_default(),
            quantity: cell(&record, Some(quantity)).unwrap_or_else(|| "0".to_string()),
            rack_space: cell(&record, rack_space),
            listing_code: cell(&record, listing_code),
        });
    }

    Ok(rows)
}

/// Header names of the rack-space upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackSpaceColumns {
    pub sku: String,
    pub rack_space: String,
}

impl Default for RackSpaceColumns {
    fn default() -> Self {
        Self {
            sku: "Sku Id".to_string(),
            rack_space: "Rack Space".to_string(),
        }
    }
}

/// Rack-space labels keyed by `(style number, size)`. The first entry for a
/// key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RackSpaceIndex {
    entries: HashMap<(StyleNumber, String), String>,
}

impl RackSpaceIndex {
    pub fn insert(&mut self, style_number: StyleNumber, size: impl Into<String>, rack_space: impl Into<String>) {
        self.entries
            .entry((style_number, size.into()))
            .or_insert_with(|| rack_space.into());
    }

    pub fn lookup(&self, style_number: StyleNumber, size: &str) -> Option<&str> {
        self.entries
            .get(&(style_number, size.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a rack-space upload, dropping rows whose SKU has no usable style/size.
pub fn parse_rack_spaces<R: io::Read>(input: R, columns: &RackSpaceColumns) -> Result<RackSpaceIndex, ManifestError> {
    let mut reader = csv_reader(input);
    let headers = HeaderIndex::read(&mut reader)?;

    let sku = headers.required(&columns.sku)?;
    let rack_space = headers.optional(&columns.rack_space);

    let mut index = RackSpaceIndex::default();
    for record in reader.records() {
        let record = record?;
        let Some(parsed) = cell(&record, Some(sku)).as_deref().and_then(parse_sku) else {
            continue;
        };
        let label = cell(&record, rack_space).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        index.insert(parsed.style_number, parsed.size, label);
    }

    Ok(index)
}
