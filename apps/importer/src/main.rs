use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roam_anki_import::{Cli, ImportConfig};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.apply(ImportConfig::from_env().context("Invalid configuration")?);

    let summary = roam_anki_import::run(&cli.export, &config, cli.dry_run)
        .with_context(|| format!("Failed to import {}", cli.export.display()))?;

    tracing::info!("{}", summary);
    println!("{}", summary);

    Ok(())
}
