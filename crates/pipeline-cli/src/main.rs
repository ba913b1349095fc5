//! Sensor Feature Pipeline - Main Entry Point
//!
//! Usage:
//!   sensor-features --data session/data.data --labels session/labels.label --output features.csv
//!   sensor-features --data data.csv --frequency --window 40 --channels torque,speed

use anyhow::{Context, Result};
use clap::Parser;
use pipeline_cli::io::{load_labels, load_table, write_table};
use pipeline_cli::{init_logging, run, Args, Settings};
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    args.apply(&mut settings);

    init_logging(&settings.logging)?;

    info!("=== Sensor Feature Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let table = load_table(&args.data, &settings.schema)?;
    let labels = match &args.labels {
        Some(path) => load_labels(path)?,
        None => None,
    };

    let output = run(&table, labels.as_deref(), &settings)?;

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_table(BufWriter::new(file), &output)?;
            info!("Wrote {}", path.display());
        }
        None => write_table(std::io::stdout().lock(), &output)?,
    }

    Ok(())
}
