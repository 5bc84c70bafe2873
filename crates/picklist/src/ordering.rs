//! Export order for picklists.
//!
//! Normal stock is picked first, in-transit stock after it (not yet on the
//! floor), virtual stock last. Each bucket is ordered by SKU.

use core::cmp::Ordering;

use crate::reconcile::ReconciledRow;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RackBucket {
    Normal,
    InTransit,
    Virtual,
}

impl RackBucket {
    /// Bucket of a rack-space label (case-insensitive).
    pub fn of(rack_space: &str) -> Self {
        if rack_space.eq_ignore_ascii_case("virtual") {
            RackBucket::Virtual
        } else if rack_space.eq_ignore_ascii_case("intransit") {
            RackBucket::InTransit
        } else {
            RackBucket::Normal
        }
    }
}

fn export_order(a: &ReconciledRow, b: &ReconciledRow) -> Ordering {
    RackBucket::of(&a.rack_space)
        .cmp(&RackBucket::of(&b.rack_space))
        .then_with(|| a.sku.cmp(&b.sku))
}

/// Order rows for export. Stable, so rows with equal SKUs in the same bucket
/// keep their manifest order; applying it twice changes nothing.
pub fn order_for_export(mut rows: Vec<ReconciledRow>) -> Vec<ReconciledRow> {
    rows.sort_by(export_order);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::Brand;
    use crate::manifest::ManifestRow;
    use crate::reconcile::{StationCount, reconcile};
    use stockflow_core::StyleNumber;
    use proptest::prelude::*;

    fn rows(specs: &[(&str, &str)]) -> Vec<ReconciledRow> {
        let manifest: Vec<_> = specs
            .iter()
            .map(|(sku, rack)| ManifestRow::new(*sku, "1", Some(*rack)))
            .collect();
        reconcile(&manifest, &[])
    }

    fn skus(rows: &[ReconciledRow]) -> Vec<&str> {
        rows.iter().map(|r| r.sku.as_str()).collect()
    }

    fn bare_row(sku: &str, rack: &str) -> ReconciledRow {
        ReconciledRow {
            sku: sku.to_string(),
            style_number: StyleNumber::new(1).unwrap(),
            size: "M".to_string(),
            brand: Brand::Qurvii,
            quantity: "1".to_string(),
            rack_space: rack.to_string(),
            press_table: StationCount::default(),
            return_table: StationCount::default(),
            inventory: StationCount::default(),
        }
    }

    #[test]
    fn intransit_rows_follow_normal_rows() {
        let out = order_for_export(vec![bare_row("A-SKU", "intransit"), bare_row("B-SKU", "Shelf-1")]);
        assert_eq!(skus(&out), vec!["B-SKU", "A-SKU"]);
    }

    #[test]
    fn three_buckets_each_sorted_by_sku() {
        let out = order_for_export(rows(&[
            ("50000-A-M", "VIRTUAL"),
            ("40000-A-M", "Shelf-2"),
            ("30000-A-M", "InTransit"),
            ("10000-A-M", "Virtual"),
            ("20000-A-M", "intransit"),
            ("60000-A-M", "Shelf-1"),
        ]));
        assert_eq!(
            skus(&out),
            vec!["40000-A-M", "60000-A-M", "20000-A-M", "30000-A-M", "10000-A-M", "50000-A-M"]
        );
    }

    #[test]
    fn equal_skus_keep_manifest_order() {
        let mut input = rows(&[("10000-A-M", "Shelf"), ("10000-A-M", "Shelf")]);
        input[0].quantity = "first".to_string();
        input[1].quantity = "second".to_string();

        let out = order_for_export(input);
        assert_eq!(out[0].quantity, "first");
        assert_eq!(out[1].quantity, "second");
    }

    fn rack_label() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("intransit".to_string()),
            Just("InTransit".to_string()),
            Just("virtual".to_string()),
            Just("Virtual".to_string()),
            "Shelf-[0-9]",
            Just("N/A".to_string()),
        ]
    }

    fn picklist() -> impl Strategy<Value = Vec<ReconciledRow>> {
        prop::collection::vec((1u32..500, rack_label()), 0..30).prop_map(|specs| {
            let manifest: Vec<_> = specs
                .into_iter()
                .map(|(style, rack)| ManifestRow::new(format!("{style}-BLK-M"), "1", Some(&rack)))
                .collect();
            reconcile(&manifest, &[])
        })
    }

    proptest! {
        #[test]
        fn ordering_is_idempotent(rows in picklist()) {
            let once = order_for_export(rows);
            let twice = order_for_export(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn special_buckets_never_precede_normal_rows(rows in picklist()) {
            let out = order_for_export(rows);
            let buckets: Vec<_> = out.iter().map(|r| RackBucket::of(&r.rack_space)).collect();
            prop_assert!(buckets.windows(2).all(|w| w[0] <= w[1]));

            if let Some(last_normal) = buckets.iter().rposition(|b| *b == RackBucket::Normal) {
                prop_assert!(buckets[..last_normal].iter().all(|b| *b == RackBucket::Normal));
            }
        }
    }
}
