//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stockflow_core::{OrderId, StyleNumber};
use stockflow_inventory::{ShipSource, Size, Station};
use stockflow_picklist::{ManifestColumns, RackSpaceColumns};

#[derive(Parser, Debug)]
#[command(name = "stockflow")]
#[command(about = "Warehouse station tracking and picklist generation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile a manifest against live station counts and export a picklist
    Picklist(PicklistArgs),
    /// Record a scanned unit at a station
    Arrive(ArriveArgs),
    /// Move one unit (by order id) or every unit at a station
    Move(MoveArgs),
    /// Ship a unit out by order id or by style and size
    Ship(ShipArgs),
    /// Search live and shipped units by style number or location
    Search(SearchArgs),
    /// Export an inventory adjustment sheet
    Adjustments(AdjustmentArgs),
    /// Delete every shipped record
    PurgeShipped(PurgeArgs),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PicklistFormat {
    Csv,
    Report,
}

#[derive(Args, Debug)]
pub struct PicklistArgs {
    /// Manifest CSV
    #[arg(short, long)]
    pub manifest: PathBuf,
    /// Separate rack-space CSV, used for rows without a rack space
    #[arg(long)]
    pub rack_spaces: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "csv")]
    pub format: PicklistFormat,
    /// Output file (if omitted, prints to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Channel printed in the report header
    #[arg(long)]
    pub channel: Option<String>,
    #[arg(long, default_value = "Product Sku Code")]
    pub sku_column: String,
    #[arg(long, default_value = "Qty")]
    pub qty_column: String,
    #[arg(long, default_value = "Rack Space")]
    pub rack_space_column: String,
    #[arg(long, default_value = "Listing Sku Code")]
    pub listing_column: String,
    #[arg(long, default_value = "Sku Id")]
    pub rack_file_sku_column: String,
}

impl PicklistArgs {
    pub fn manifest_columns(&self) -> ManifestColumns {
        ManifestColumns {
            sku: self.sku_column.clone(),
            quantity: self.qty_column.clone(),
            rack_space: self.rack_space_column.clone(),
            listing_code: self.listing_column.clone(),
        }
    }

    pub fn rack_space_columns(&self) -> RackSpaceColumns {
        RackSpaceColumns {
            sku: self.rack_file_sku_column.clone(),
            rack_space: self.rack_space_column.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ArriveArgs {
    /// "return", "press", "ship" or a "<rack> Cart" location
    #[arg(long)]
    pub station: String,
    #[arg(long)]
    pub style: StyleNumber,
    #[arg(long)]
    pub size: Size,
    #[arg(long, default_value = "")]
    pub color: String,
    #[arg(long, default_value = "")]
    pub channel: String,
    #[arg(long, default_value = "")]
    pub employee: String,
    #[arg(long)]
    pub order_id: Option<OrderId>,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    #[arg(long)]
    pub from: Station,
    #[arg(long)]
    pub to: Station,
    /// Move only the unit with this order id; otherwise every unit at `from`
    #[arg(long)]
    pub order_id: Option<OrderId>,
}

#[derive(Args, Debug)]
pub struct ShipArgs {
    /// "return", "press" or "inventory"
    #[arg(long)]
    pub from: ShipSource,
    #[arg(long, conflicts_with_all = ["style", "size"])]
    pub order_id: Option<OrderId>,
    #[arg(long, requires = "size")]
    pub style: Option<StyleNumber>,
    #[arg(long, requires = "style")]
    pub size: Option<Size>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Style number or location fragment; empty lists everything
    #[arg(default_value = "")]
    pub term: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AdjustmentKind {
    /// ADD 1 per press-table unit
    PressAdditions,
    /// RESET 0 per press-table unit not back at the return table
    PressResets,
    /// RESET 0 per shipped unit
    ShippedResets,
}

#[derive(Args, Debug)]
pub struct AdjustmentArgs {
    #[arg(value_enum)]
    pub kind: AdjustmentKind,
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// CSV with `style_code,color` columns, resolves the "other" color
    #[arg(long)]
    pub product_colors: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PurgeArgs {
    /// Confirm deleting every shipped record
    #[arg(long)]
    pub yes: bool,
}
