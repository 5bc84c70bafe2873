//! Picklist CSV export.

use std::io;

use thiserror::Error;

use crate::reconcile::ReconciledRow;

pub const PICKLIST_HEADER: [&str; 8] = [
    "Sr.No",
    "SKU",
    "Qty",
    "Brand",
    "Rack Space",
    "Press Table",
    "Return Table",
    "Inventory",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data to export")]
    Empty,

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Writer with every cell quoted and `\n` line endings.
pub(crate) fn quoted_writer<W: io::Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

/// Write rows in the order given, numbering them from 1.
pub fn write_picklist_csv<W: io::Write>(rows: &[ReconciledRow], out: W) -> Result<(), ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = quoted_writer(out);
    writer.write_record(PICKLIST_HEADER)?;

    for (i, row) in rows.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            row.sku.clone(),
            row.quantity.clone(),
            row.brand.to_string(),
            row.rack_space.clone(),
            row.press_table.to_string(),
            row.return_table.to_string(),
            row.inventory.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
