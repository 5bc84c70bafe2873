//! Command handlers.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use stockflow_core::StyleNumber;
use stockflow_infra::{
    AppConfig, BatchProgress, MovementEngine, RecordStore, ScanDesk, ScanOutcome, build_picklist,
    fetch_live_units,
};
use stockflow_inventory::{ArrivalRequest, ShipCriteria, StationCollection, UnitRecord, search_units};
use stockflow_picklist::{
    RackSpaceIndex, ReportOptions, parse_manifest, parse_rack_spaces, press_additions, press_resets, render_report,
    shipped_resets, write_adjustments_csv, write_picklist_csv,
};

use crate::args::{
    AdjustmentArgs, AdjustmentKind, ArriveArgs, Command, MoveArgs, PicklistArgs, PicklistFormat, PurgeArgs, SearchArgs,
    ShipArgs,
};

/// Open `path` for writing, or fall back to `stdout`.
fn output<'a>(path: Option<&Path>, stdout: &'a mut dyn Write) -> Result<Box<dyn Write + 'a>> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(stdout)),
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn progress_line(progress: BatchProgress) {
    eprintln!("{}/{}", progress.completed, progress.total);
}

pub async fn run<S: RecordStore>(
    command: Command,
    engine: &MovementEngine<S>,
    config: &AppConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Picklist(args) => picklist(args, engine.store(), config, stdout).await,
        Command::Arrive(args) => arrive(args, engine, stdout).await,
        Command::Move(args) => move_units(args, engine, stdout).await,
        Command::Ship(args) => ship(args, engine, stdout).await,
        Command::Search(args) => search(args, engine.store(), stdout).await,
        Command::Adjustments(args) => adjustments(args, engine.store(), config, stdout).await,
        Command::PurgeShipped(args) => purge_shipped(args, engine, stdout).await,
    }
}

async fn picklist<S: RecordStore>(
    args: PicklistArgs,
    store: &S,
    config: &AppConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    let rows = parse_manifest(open(&args.manifest)?, &args.manifest_columns())
        .with_context(|| format!("failed to parse manifest {}", args.manifest.display()))?;

    let rack_spaces = match &args.rack_spaces {
        Some(path) => parse_rack_spaces(open(path)?, &args.rack_space_columns())
            .with_context(|| format!("failed to parse rack spaces {}", path.display()))?,
        None => RackSpaceIndex::default(),
    };

    let picklist = build_picklist(store, &rows, &rack_spaces).await?;

    let mut out = output(args.out.as_deref(), stdout)?;
    match args.format {
        PicklistFormat::Csv => write_picklist_csv(&picklist, &mut out)?,
        PicklistFormat::Report => {
            let mut options = ReportOptions::new(Utc::now()).with_rows_per_page(config.report_rows_per_page);
            if let Some(channel) = args.channel {
                options = options.with_channel(channel);
            }
            out.write_all(render_report(&picklist, &options)?.as_bytes())?;
        }
    }
    out.flush()?;

    info!(rows = picklist.len(), "picklist exported");
    Ok(())
}

async fn arrive<S: RecordStore>(args: ArriveArgs, engine: &MovementEngine<S>, stdout: &mut dyn Write) -> Result<()> {
    let mut desk = ScanDesk::new(engine);
    desk.stage(ArrivalRequest {
        station: Some(args.station),
        style_number: Some(args.style),
        size: Some(args.size),
        color: args.color,
        channel: args.channel,
        employee_name: args.employee,
        order_id: args.order_id,
    });

    report_outcome(desk.submit().await, stdout)
}

fn report_outcome(outcome: ScanOutcome, stdout: &mut dyn Write) -> Result<()> {
    writeln!(stdout, "{}", outcome.message())?;
    match outcome {
        ScanOutcome::Failed { error } => Err(anyhow!(error)),
        _ => Ok(()),
    }
}

async fn move_units<S: RecordStore>(
    args: MoveArgs,
    engine: &MovementEngine<S>,
    stdout: &mut dyn Write,
) -> Result<()> {
    if let Some(order_id) = args.order_id {
        engine
            .move_by_order_id(order_id, &args.from, &args.to)
            .await
            .with_context(|| format!("failed to move order {order_id}"))?;
        writeln!(stdout, "Moved order {order_id} from {} to {}.", args.from, args.to)?;
        return Ok(());
    }

    let units = engine.units_at(&args.from).await?;
    if units.is_empty() {
        writeln!(stdout, "No units at {}.", args.from)?;
        return Ok(());
    }

    let summary = engine.move_batch(&units, &args.from, &args.to, progress_line).await?;
    writeln!(stdout, "Moved {} units from {} to {}.", summary.completed, args.from, args.to)?;
    Ok(())
}

async fn ship<S: RecordStore>(args: ShipArgs, engine: &MovementEngine<S>, stdout: &mut dyn Write) -> Result<()> {
    let criteria = ShipCriteria {
        order_id: args.order_id,
        style_number: args.style,
        size: args.size,
    };
    engine.ship_by_sku_or_order(&criteria, args.from).await?;
    writeln!(stdout, "Shipped from {}.", args.from)?;
    Ok(())
}

async fn search<S: RecordStore>(args: SearchArgs, store: &S, stdout: &mut dyn Write) -> Result<()> {
    let mut units = fetch_live_units(store).await?.into_units();
    units.extend(store.list(StationCollection::Shipped).await?);

    for unit in search_units(&units, &args.term) {
        writeln!(stdout, "{}", unit_line(unit))?;
    }
    Ok(())
}

fn unit_line(unit: &UnitRecord) -> String {
    let order = unit.order_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    format!(
        "{:<8} {:<4} {:<10} {:<16} {}",
        unit.style_number.to_string(),
        unit.size.as_str(),
        unit.color,
        unit.location,
        order
    )
}

#[derive(Debug, Deserialize)]
struct ProductColor {
    style_code: u32,
    color: String,
}

fn load_product_colors(path: &Path) -> Result<HashMap<u32, String>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(open(path)?);
    let mut colors = HashMap::new();
    for record in reader.deserialize::<ProductColor>() {
        let record = record.with_context(|| format!("bad row in {}", path.display()))?;
        colors.entry(record.style_code).or_insert(record.color);
    }
    Ok(colors)
}

async fn adjustments<S: RecordStore>(
    args: AdjustmentArgs,
    store: &S,
    config: &AppConfig,
    stdout: &mut dyn Write,
) -> Result<()> {
    let warehouse = config.warehouse_id.as_str();

    let rows = match args.kind {
        AdjustmentKind::PressAdditions => press_additions(warehouse, &store.list(StationCollection::PressTable).await?),
        AdjustmentKind::PressResets => {
            let snapshot = fetch_live_units(store).await?;
            press_resets(warehouse, &snapshot.press_table, &snapshot.return_table)
        }
        AdjustmentKind::ShippedResets => {
            let colors = match &args.product_colors {
                Some(path) => load_product_colors(path)?,
                None => HashMap::new(),
            };
            let shipped = store.list(StationCollection::Shipped).await?;
            shipped_resets(warehouse, &shipped, |style: StyleNumber| colors.get(&style.get()).cloned())
        }
    };

    let mut out = output(args.out.as_deref(), stdout)?;
    write_adjustments_csv(&rows, &mut out)?;
    out.flush()?;

    info!(kind = ?args.kind, rows = rows.len(), "adjustment sheet exported");
    Ok(())
}

async fn purge_shipped<S: RecordStore>(
    args: PurgeArgs,
    engine: &MovementEngine<S>,
    stdout: &mut dyn Write,
) -> Result<()> {
    let ids: Vec<_> = engine
        .store()
        .list(StationCollection::Shipped)
        .await?
        .into_iter()
        .filter_map(|unit| unit.id)
        .collect();

    if ids.is_empty() {
        writeln!(stdout, "No shipped records.")?;
        return Ok(());
    }
    if !args.yes {
        bail!("refusing to delete {} shipped records without --yes", ids.len());
    }

    let summary = engine.purge_shipped(&ids, progress_line).await?;
    writeln!(stdout, "Deleted {} shipped records.", summary.completed)?;
    Ok(())
}
