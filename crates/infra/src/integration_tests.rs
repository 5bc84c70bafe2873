//! Integration tests for the full picklist pipeline.
//!
//! Tests: scans → RecordStore → live snapshot → reconcile → export
//!
//! Verifies:
//! - Units moved between stations show up in the right picklist column
//! - Export order and serialization hold end to end
//! - Duplicate scans never inflate counts

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use stockflow_core::{OrderId, StyleNumber};
    use stockflow_inventory::{ArrivalRequest, MovePolicy, Size, Station};
    use stockflow_picklist::{
        ManifestColumns, RackSpaceColumns, ReportOptions, parse_manifest, parse_rack_spaces, render_report,
        write_picklist_csv,
    };

    use crate::guard::{ScanDesk, ScanOutcome};
    use crate::movement::MovementEngine;
    use crate::record_store::InMemoryRecordStore;
    use crate::snapshot::build_picklist;

    fn scan(station: &str, style: u32, size: Size, order: i64) -> ArrivalRequest {
        ArrivalRequest {
            station: Some(station.to_string()),
            style_number: Some(StyleNumber::new(style).unwrap()),
            size: Some(size),
            color: "BLK".to_string(),
            channel: "Myntra".to_string(),
            employee_name: "Asha".to_string(),
            order_id: Some(OrderId::new(order)),
        }
    }

    fn setup() -> MovementEngine<InMemoryRecordStore> {
        MovementEngine::new(InMemoryRecordStore::new(), MovePolicy::DoubleEntry)
    }

    const MANIFEST: &str = "Product Sku Code,Qty,Rack Space\n\
                            24001-RED-S,2,intransit\n\
                            10234-BLK-M,5,Shelf-3\n\
                            junk,1,Shelf-9\n\
                            30000-NVY-L,1,virtual\n";

    #[tokio::test]
    async fn scans_flow_into_picklist_export() {
        let engine = setup();
        let mut desk = ScanDesk::new(&engine);

        for request in [
            scan("Return", 10234, Size::M, 1),
            scan("Return", 10234, Size::M, 2),
            scan("Return", 24001, Size::S, 3),
        ] {
            desk.stage(request);
            assert!(desk.submit().await.is_recorded());
        }

        // A duplicate scan must not change any count.
        desk.stage(scan("Return", 10234, Size::M, 2));
        assert_eq!(desk.submit().await, ScanOutcome::AlreadyRecorded);

        engine
            .move_by_order_id(OrderId::new(1), &Station::ReturnTable, &Station::PressTable)
            .await
            .unwrap();

        let rows = parse_manifest(MANIFEST.as_bytes(), &ManifestColumns::default()).unwrap();
        let picklist = build_picklist(engine.store(), &rows, &Default::default()).await.unwrap();

        let mut csv = Vec::new();
        write_picklist_csv(&picklist, &mut csv).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        let lines: Vec<_> = csv.lines().skip(1).collect();

        assert_eq!(
            lines,
            vec![
                r#""1","10234-BLK-M","5","Qurvii","Shelf-3","1","1","-""#,
                r#""2","24001-RED-S","2","Qurvii Desi","intransit","-","1","-""#,
                r#""3","30000-NVY-L","1","Qurvii","virtual","-","-","-""#,
            ]
        );
    }

    #[tokio::test]
    async fn rack_space_file_fills_rows_without_rack_space() {
        let engine = setup();
        let mut desk = ScanDesk::new(&engine);
        desk.stage(scan("A3 Cart", 10234, Size::M, 9));
        assert!(desk.submit().await.is_recorded());

        let manifest = "Product Sku Code,Qty\n10234-BLK-M,1\n20001-RED-S,1\n";
        let rack_spaces = "Sku Id,Rack Space\n10234-BLK-M,A-01\n";

        let rows = parse_manifest(manifest.as_bytes(), &ManifestColumns::default()).unwrap();
        let index = parse_rack_spaces(rack_spaces.as_bytes(), &RackSpaceColumns::default()).unwrap();
        let picklist = build_picklist(engine.store(), &rows, &index).await.unwrap();

        assert_eq!(picklist[0].rack_space, "A-01");
        assert_eq!(picklist[0].inventory.get(), 1);
        assert_eq!(picklist[1].rack_space, "N/A");

        let generated_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let report = render_report(&picklist, &ReportOptions::new(generated_at)).unwrap();
        assert!(report.contains("A-01"));
        assert!(report.contains("Page 1 of 1"));
    }
}
