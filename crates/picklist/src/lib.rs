//! Picklist generation: manifest parsing, reconciliation against live
//! station counts, export ordering and serialization.
//!
//! Pure functions over in-memory data; fetching the live snapshot is the
//! caller's concern.

pub mod adjustment;
pub mod brand;
pub mod export;
pub mod manifest;
pub mod ordering;
pub mod reconcile;
pub mod report;
pub mod sku;

pub use adjustment::{
    ADJUSTMENT_HEADER, AdjustmentRow, InventoryAction, press_additions, press_resets, shipped_resets,
    write_adjustments_csv,
};
pub use brand::{Brand, classify_brand};
pub use export::{ExportError, PICKLIST_HEADER, write_picklist_csv};
pub use manifest::{
    ManifestColumns, ManifestError, ManifestRow, NOT_AVAILABLE, RackSpaceColumns, RackSpaceIndex, parse_manifest,
    parse_rack_spaces,
};
pub use ordering::{RackBucket, order_for_export};
pub use reconcile::{ReconciledRow, StationCount, reconcile, reconcile_with_rack_spaces};
pub use report::{ReportOptions, render_report};
pub use sku::{ParsedSku, parse_sku};
