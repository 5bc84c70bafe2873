//! Inventory adjustment sheets for the warehouse platform.

use core::fmt;
use std::collections::HashSet;
use std::io;

use stockflow_core::StyleNumber;
use stockflow_inventory::UnitRecord;

use crate::export::{ExportError, quoted_writer};

pub const ADJUSTMENT_HEADER: [&str; 8] = [
    "DropshipWarehouseId",
    "Item SkuCode",
    "InventoryAction",
    "QtyIncludesBlocked",
    "Qty",
    "RackSpace",
    "Last Purchase Price",
    "Notes",
];

/// Placeholder color on units scanned without a product lookup.
const UNRESOLVED_COLOR: &str = "other";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InventoryAction {
    Add,
    Reset,
}

impl InventoryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            InventoryAction::Add => "ADD",
            InventoryAction::Reset => "RESET",
        }
    }
}

impl fmt::Display for InventoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentRow {
    pub warehouse_id: String,
    pub item_sku_code: String,
    pub action: InventoryAction,
    pub quantity: u32,
    pub rack_space: String,
}

impl AdjustmentRow {
    fn for_unit(
        warehouse_id: &str,
        color: &str,
        unit: &UnitRecord,
        action: InventoryAction,
        quantity: u32,
        rack_space: &str,
    ) -> Self {
        Self {
            warehouse_id: warehouse_id.to_string(),
            item_sku_code: format!("{}-{}-{}", unit.style_number, color, unit.size),
            action,
            quantity,
            rack_space: rack_space.to_string(),
        }
    }
}

/// One `ADD 1` row per press-table unit.
pub fn press_additions(warehouse_id: &str, press: &[UnitRecord]) -> Vec<AdjustmentRow> {
    press
        .iter()
        .map(|unit| AdjustmentRow::for_unit(warehouse_id, &unit.color, unit, InventoryAction::Add, 1, "Press Table"))
        .collect()
}

/// One `RESET 0` row per press-table unit that has not come back to the
/// return table. Units without an order id are never treated as returned.
pub fn press_resets(warehouse_id: &str, press: &[UnitRecord], returns: &[UnitRecord]) -> Vec<AdjustmentRow> {
    let returned: HashSet<_> = returns.iter().filter_map(|unit| unit.order_id).collect();

    press
        .iter()
        .filter(|unit| !unit.order_id.is_some_and(|id| returned.contains(&id)))
        .map(|unit| AdjustmentRow::for_unit(warehouse_id, &unit.color, unit, InventoryAction::Reset, 0, "Return Table"))
        .collect()
}

/// One `RESET 0` row per shipped unit. A color of "other" is resolved with
/// `color_for`; when that finds nothing the placeholder stays.
pub fn shipped_resets<F>(warehouse_id: &str, shipped: &[UnitRecord], color_for: F) -> Vec<AdjustmentRow>
where
    F: Fn(StyleNumber) -> Option<String>,
{
    shipped
        .iter()
        .map(|unit| {
            let color = if unit.color == UNRESOLVED_COLOR {
                color_for(unit.style_number).unwrap_or_else(|| unit.color.clone())
            } else {
                unit.color.clone()
            };
            AdjustmentRow::for_unit(warehouse_id, &color, unit, InventoryAction::Reset, 0, "Intransit")
        })
        .collect()
}

pub fn write_adjustments_csv<W: io::Write>(rows: &[AdjustmentRow], out: W) -> Result<(), ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = quoted_writer(out);
    writer.write_record(ADJUSTMENT_HEADER)?;
    for row in rows {
        let quantity = row.quantity.to_string();
        writer.write_record([
            row.warehouse_id.as_str(),
            row.item_sku_code.as_str(),
            row.action.as_str(),
            "",
            quantity.as_str(),
            row.rack_space.as_str(),
            "",
            "",
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::tests::unit;
    use stockflow_core::OrderId;
    use stockflow_inventory::Size;

    fn with_order(mut unit: UnitRecord, order: i64) -> UnitRecord {
        unit.order_id = Some(OrderId::new(order));
        unit
    }

    #[test]
    fn press_additions_add_one_per_unit() {
        let press = vec![unit(10234, Size::M, "Press Table"), unit(5001, Size::XL2, "Press Table")];
        let rows = press_additions("22784", &press);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].item_sku_code, "5001-BLK-2XL");
        assert!(rows.iter().all(|r| r.action == InventoryAction::Add && r.quantity == 1));
        assert!(rows.iter().all(|r| r.rack_space == "Press Table"));
    }

    #[test]
    fn press_resets_skip_units_already_returned() {
        let press = vec![
            with_order(unit(10234, Size::M, "Press Table"), 1),
            with_order(unit(10235, Size::S, "Press Table"), 2),
        ];
        let returns = vec![with_order(unit(10234, Size::M, "Return Table"), 1)];

        let rows = press_resets("22784", &press, &returns);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_sku_code, "10235-BLK-S");
        assert_eq!(rows[0].action, InventoryAction::Reset);
        assert_eq!(rows[0].quantity, 0);
        assert_eq!(rows[0].rack_space, "Return Table");
    }

    #[test]
    fn press_resets_keep_units_without_order_id() {
        let mut press = unit(10234, Size::M, "Press Table");
        press.order_id = None;
        let mut returned = unit(10234, Size::M, "Return Table");
        returned.order_id = None;

        assert_eq!(press_resets("22784", &[press], &[returned]).len(), 1);
    }

    #[test]
    fn shipped_resets_resolve_placeholder_color() {
        let mut other = unit(10234, Size::L, "Shipped");
        other.color = "other".to_string();
        let mut unknown = unit(777, Size::S, "Shipped");
        unknown.color = "other".to_string();
        let known = unit(10235, Size::M, "Shipped");

        let rows = shipped_resets("22784", &[other, unknown, known], |style| {
            (style.get() == 10234).then(|| "NVY".to_string())
        });

        let skus: Vec<_> = rows.iter().map(|r| r.item_sku_code.as_str()).collect();
        assert_eq!(skus, vec!["10234-NVY-L", "777-other-S", "10235-BLK-M"]);
        assert!(rows.iter().all(|r| r.rack_space == "Intransit"));
    }

    #[test]
    fn sheet_has_fixed_schema_with_every_cell_quoted() {
        let rows = press_additions("22784", &[unit(10234, Size::M, "Press Table")]);
        let mut buf = Vec::new();
        write_adjustments_csv(&rows, &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\"DropshipWarehouseId\",\"Item SkuCode\",\"InventoryAction\",\"QtyIncludesBlocked\",\
             \"Qty\",\"RackSpace\",\"Last Purchase Price\",\"Notes\"\n\
             \"22784\",\"10234-BLK-M\",\"ADD\",\"\",\"1\",\"Press Table\",\"\",\"\"\n"
        );
    }
}
