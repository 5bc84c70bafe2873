//! Manifest ⨝ live station counts.

use core::fmt;
use std::collections::HashMap;

use serde::{Serialize, Serializer};

use stockflow_core::StyleNumber;
use stockflow_inventory::{Size, Station, UnitRecord};

use crate::brand::{Brand, classify_brand};
use crate::manifest::{ManifestRow, NOT_AVAILABLE, RackSpaceIndex};
use crate::sku::parse_sku;

const PRESS_TABLE: &str = "Press Table";
const RETURN_TABLE: &str = "Return Table";

/// Number of matching units at a station. Zero renders as "-" so an empty
/// station reads differently from a count that was never computed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct StationCount(u32);

impl StationCount {
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn bump(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Display for StationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("-"),
            n => write!(f, "{n}"),
        }
    }
}

impl Serialize for StationCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
struct LiveCounts {
    press: StationCount,
    return_table: StationCount,
    inventory: StationCount,
}

/// A manifest row enriched with live per-station counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledRow {
    pub sku: String,
    pub style_number: StyleNumber,
    pub size: String,
    pub brand: Brand,
    pub quantity: String,
    pub rack_space: String,
    pub press_table: StationCount,
    pub return_table: StationCount,
    pub inventory: StationCount,
}

fn count_live_units(live: &[UnitRecord]) -> HashMap<(StyleNumber, Size), LiveCounts> {
    let mut counts: HashMap<(StyleNumber, Size), LiveCounts> = HashMap::new();

    for unit in live {
        let entry = counts.entry((unit.style_number, unit.size)).or_default();
        match unit.location.as_str() {
            PRESS_TABLE => entry.press.bump(),
            RETURN_TABLE => entry.return_table.bump(),
            location if Station::is_cart_location(location) => entry.inventory.bump(),
            _ => {}
        }
    }

    counts
}

/// Reconcile manifest rows against a live snapshot, using each row's own rack space.
pub fn reconcile(rows: &[ManifestRow], live: &[UnitRecord]) -> Vec<ReconciledRow> {
    reconcile_with_rack_spaces(rows, live, &RackSpaceIndex::default())
}

/// Reconcile manifest rows against a live snapshot.
///
/// - Rows without a positive style number or a size are dropped.
/// - Duplicate SKUs each produce their own row.
/// - Rack space comes from the row, then `rack_spaces`, then "N/A".
pub fn reconcile_with_rack_spaces(
    rows: &[ManifestRow],
    live: &[UnitRecord],
    rack_spaces: &RackSpaceIndex,
) -> Vec<ReconciledRow> {
    let counts = count_live_units(live);

    rows.iter()
        .filter_map(|row| {
            let parsed = parse_sku(&row.sku)?;
            // Exact tag match: "m" in a manifest is not the live size "M".
            let live = Size::ALL
                .into_iter()
                .find(|size| size.as_str() == parsed.size)
                .and_then(|size| counts.get(&(parsed.style_number, size)).copied())
                .unwrap_or_default();

            let brand_code = row
                .listing_code
                .as_deref()
                .filter(|code| !code.is_empty())
                .unwrap_or(&row.sku);

            let rack_space = row
                .rack_space
                .clone()
                .or_else(|| rack_spaces.lookup(parsed.style_number, &parsed.size).map(str::to_string))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());

            Some(ReconciledRow {
                sku: row.sku.clone(),
                style_number: parsed.style_number,
                size: parsed.size,
                brand: classify_brand(brand_code),
                quantity: row.quantity.clone(),
                rack_space,
                press_table: live.press,
                return_table: live.return_table,
                inventory: live.inventory,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockflow_core::OrderId;

    pub(crate) fn unit(style: u32, size: Size, location: &str) -> UnitRecord {
        UnitRecord {
            id: None,
            style_number: StyleNumber::new(style).unwrap(),
            size,
            color: "BLK".to_string(),
            location: location.to_string(),
            order_id: Some(OrderId::new(1)),
            channel: String::new(),
            employee_name: String::new(),
            created_at: None,
            session_id: None,
            rack_space: None,
        }
    }

    #[test]
    fn single_press_table_unit_scenario() {
        let rows = vec![ManifestRow::new("10234-BLK-M", "5", Some("Shelf-3"))];
        let live = vec![unit(10234, Size::M, "Press Table")];

        let out = reconcile(&rows, &live);
        assert_eq!(out.len(), 1);

        let row = &out[0];
        assert_eq!(row.style_number.get(), 10234);
        assert_eq!(row.size, "M");
        assert_eq!(row.brand, Brand::Qurvii);
        assert_eq!(row.quantity, "5");
        assert_eq!(row.rack_space, "Shelf-3");
        assert_eq!(row.press_table.to_string(), "1");
        assert_eq!(row.return_table.to_string(), "-");
        assert_eq!(row.inventory.to_string(), "-");
    }

    #[test]
    fn counts_each_station_and_any_cart() {
        let rows = vec![ManifestRow::new("10234-BLK-M", "1", None)];
        let live = vec![
            unit(10234, Size::M, "Press Table"),
            unit(10234, Size::M, "Press Table"),
            unit(10234, Size::M, "Return Table"),
            unit(10234, Size::M, "A1 Cart"),
            unit(10234, Size::M, "Inventory Cart"),
            unit(10234, Size::M, "B9 Cart"),
            unit(10234, Size::M, "Shipped"),
            unit(10234, Size::L, "Press Table"),
            unit(10235, Size::M, "Press Table"),
        ];

        let row = &reconcile(&rows, &live)[0];
        assert_eq!(row.press_table.get(), 2);
        assert_eq!(row.return_table.get(), 1);
        assert_eq!(row.inventory.get(), 3);
    }

    #[test]
    fn duplicate_skus_are_not_merged() {
        let rows = vec![
            ManifestRow::new("10234-BLK-M", "1", None),
            ManifestRow::new("10234-BLK-M", "2", None),
        ];
        let out = reconcile(&rows, &[]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].quantity, "2");
    }

    #[test]
    fn listing_code_drives_brand_when_present() {
        let mut row = ManifestRow::new("10234-BLK-M", "1", None);
        row.listing_code = Some("24-ETH-9".to_string());
        assert_eq!(reconcile(&[row], &[])[0].brand, Brand::QurviiDesi);

        let fallback = ManifestRow::new("5001-BLK-M", "1", None);
        assert_eq!(reconcile(&[fallback], &[])[0].brand, Brand::QurviiPlus);
    }

    #[test]
    fn rack_space_falls_back_to_index_then_not_available() {
        let mut index = RackSpaceIndex::default();
        index.insert(StyleNumber::new(10234).unwrap(), "M", "A-01");

        let rows = vec![
            ManifestRow::new("10234-BLK-M", "1", None),
            ManifestRow::new("10234-BLK-M", "1", Some("virtual")),
            ManifestRow::new("10234-BLK-S", "1", None),
        ];
        let out = reconcile_with_rack_spaces(&rows, &[], &index);
        let labels: Vec<_> = out.iter().map(|r| r.rack_space.as_str()).collect();
        assert_eq!(labels, vec!["A-01", "virtual", "N/A"]);
    }

    #[test]
    fn sizes_outside_the_tag_range_still_reconcile_with_zero_counts() {
        let rows = vec![ManifestRow::new("10234-BLK-FREE", "1", None)];
        let live = vec![unit(10234, Size::M, "Press Table")];
        let row = &reconcile(&rows, &live)[0];
        assert_eq!(row.size, "FREE");
        assert_eq!(row.press_table.get(), 0);
    }

    fn manifest_row() -> impl Strategy<Value = ManifestRow> {
        prop_oneof![
            (1u32..99_999, "[A-Z]{3}", prop::sample::select(vec!["S", "M", "L", "2XL"]))
                .prop_map(|(style, color, size)| format!("{style}-{color}-{size}")),
            Just("0-BLK-M".to_string()),
            Just("B-SKU".to_string()),
            Just("10234-BLK-".to_string()),
            "[a-z]{0,6}",
        ]
        .prop_map(|sku| ManifestRow::new(sku, "1", None))
    }

    proptest! {
        #[test]
        fn output_keeps_exactly_the_parseable_rows(rows in prop::collection::vec(manifest_row(), 0..40)) {
            let expected = rows.iter().filter(|r| parse_sku(&r.sku).is_some()).count();
            let out = reconcile(&rows, &[unit(10234, Size::M, "Press Table")]);
            prop_assert_eq!(out.len(), expected);
        }

        #[test]
        fn dash_rendered_exactly_when_zero(n in 0u32..50) {
            let rendered = StationCount::new(n).to_string();
            prop_assert_eq!(rendered == "-", n == 0);
        }
    }
}
