//! Live station snapshot and picklist assembly.

use tracing::info;

use stockflow_core::DomainResult;
use stockflow_inventory::{StationCollection, UnitRecord};
use stockflow_picklist::{ManifestRow, RackSpaceIndex, ReconciledRow, order_for_export, reconcile_with_rack_spaces};

use crate::record_store::RecordStore;

/// Units at the live stations, read together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSnapshot {
    pub press_table: Vec<UnitRecord>,
    pub return_table: Vec<UnitRecord>,
    pub inventory_cart: Vec<UnitRecord>,
}

impl LiveSnapshot {
    pub fn len(&self) -> usize {
        self.press_table.len() + self.return_table.len() + self.inventory_cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_units(self) -> Vec<UnitRecord> {
        let mut units = self.press_table;
        units.extend(self.return_table);
        units.extend(self.inventory_cart);
        units
    }
}

/// Read Press Table, Return Table and Inventory Cart concurrently. Fails if
/// any of the three reads fails.
pub async fn fetch_live_units<S: RecordStore>(store: &S) -> DomainResult<LiveSnapshot> {
    let (press_table, return_table, inventory_cart) = tokio::try_join!(
        store.list(StationCollection::PressTable),
        store.list(StationCollection::ReturnTable),
        store.list(StationCollection::InventoryCart),
    )?;

    let snapshot = LiveSnapshot {
        press_table,
        return_table,
        inventory_cart,
    };
    info!(units = snapshot.len(), "live snapshot fetched");
    Ok(snapshot)
}

/// Reconcile `rows` against a fresh snapshot and put them in export order.
pub async fn build_picklist<S: RecordStore>(
    store: &S,
    rows: &[ManifestRow],
    rack_spaces: &RackSpaceIndex,
) -> DomainResult<Vec<ReconciledRow>> {
    let live = fetch_live_units(store).await?.into_units();
    let picklist = order_for_export(reconcile_with_rack_spaces(rows, &live, rack_spaces));

    info!(manifest_rows = rows.len(), picklist_rows = picklist.len(), "picklist built");
    Ok(picklist)
}
