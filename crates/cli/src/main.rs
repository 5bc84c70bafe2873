use anyhow::Context;
use clap::Parser;

use stockflow_cli::args::Cli;
use stockflow_cli::commands;
use stockflow_infra::{AppConfig, HttpRecordStore, MovementEngine};
use stockflow_observability::LogFormat;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (format, rejected) = LogFormat::from_env();
    stockflow_observability::init(format);
    if let Some(raw) = rejected {
        tracing::warn!(value = %raw, "unknown STOCKFLOW_LOG_FORMAT; using json");
    }

    let config = AppConfig::from_env();
    let store = HttpRecordStore::new(config.store_url.clone(), config.store_timeout)
        .context("failed to build record store client")?;
    tracing::info!(store_url = %store.base_url(), policy = ?config.move_policy, "stockflow starting");

    let engine = MovementEngine::new(store, config.move_policy);
    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &engine, &config, &mut stdout).await
}
