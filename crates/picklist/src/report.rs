//! Paginated plain-text picklist report.

use core::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::export::{ExportError, PICKLIST_HEADER};
use crate::manifest::NOT_AVAILABLE;
use crate::reconcile::ReconciledRow;

const PAGE_BREAK: char = '\u{c}';
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: String,
    pub channel: Option<String>,
    pub generated_at: DateTime<Utc>,
    /// Clamped to at least 1.
    pub rows_per_page: usize,
}

impl ReportOptions {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            title: "Pick List Report".to_string(),
            channel: None,
            generated_at,
            rows_per_page: 40,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }
}

fn cells(index: usize, row: &ReconciledRow) -> [String; 8] {
    [
        (index + 1).to_string(),
        row.sku.clone(),
        row.quantity.clone(),
        row.brand.to_string(),
        row.rack_space.clone(),
        row.press_table.to_string(),
        row.return_table.to_string(),
        row.inventory.to_string(),
    ]
}

fn push_line<S: AsRef<str>>(out: &mut String, values: &[S], widths: &[usize; 8]) {
    let line = values
        .iter()
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render rows (already in export order) as a fixed-width report.
///
/// The title block appears once, on the first page. Every page repeats the
/// table header and ends with a `Page n of m` footer; pages are separated by
/// a form feed.
pub fn render_report(rows: &[ReconciledRow], options: &ReportOptions) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let table: Vec<[String; 8]> = rows.iter().enumerate().map(|(i, row)| cells(i, row)).collect();

    let mut widths = PICKLIST_HEADER.map(str::len);
    for line in &table {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let per_page = options.rows_per_page.max(1);
    let pages = table.len().div_ceil(per_page);

    let mut out = String::new();
    let _ = writeln!(out, "{}", options.title);
    let _ = writeln!(out, "Channel: {}", options.channel.as_deref().unwrap_or(NOT_AVAILABLE));
    let _ = writeln!(out, "Date: {}", options.generated_at.format("%Y-%m-%d"));
    let _ = writeln!(out, "Time: {}", options.generated_at.format("%H:%M:%S"));
    out.push('\n');

    for (page, chunk) in table.chunks(per_page).enumerate() {
        if page > 0 {
            out.push(PAGE_BREAK);
        }
        push_line(&mut out, &PICKLIST_HEADER, &widths);
        push_line(&mut out, &rule, &widths);
        for line in chunk {
            push_line(&mut out, line, &widths);
        }
        let _ = writeln!(out, "\nPage {} of {}", page + 1, pages);
    }

    Ok(out)
}
