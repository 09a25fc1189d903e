mod cli;

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use repositor::{
    build_message, default_chains, AggregatedEntry, ChainSet, Pipeline, PipelineOutcome, RuleSet,
};

use crate::cli::Cli;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let text = read_input(cli.input.as_deref())?;

    let rules = match &cli.rules {
        Some(path) => RuleSet::from_file(path)?,
        None => RuleSet::default(),
    };
    let chains = match &cli.chains {
        Some(path) => ChainSet::from_file(path)?,
        None => ChainSet::from_specs(default_chains())?,
    };

    let pipeline = Pipeline::with_tables(rules, chains);

    match pipeline.process(&text) {
        PipelineOutcome::Report { strategy, entries } => {
            info!(
                strategy = strategy.name(),
                products = entries.len(),
                "report ready"
            );

            if let Some(path) = &cli.csv {
                export_csv(path, &entries)?;
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", build_message(&cli.title, &entries));
            }

            Ok(())
        }
        PipelineOutcome::NoData { sample } => {
            // Nothing to report. Show what the PDF extraction produced so the
            // format mismatch can be diagnosed by eye.
            eprintln!("No se pudo leer el reporte. Muestra del texto recibido:");
            eprintln!("{}", sample);
            std::process::exit(2);
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read input from stdin")?;
            Ok(text)
        }
    }
}

fn export_csv(path: &Path, entries: &[AggregatedEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer
        .write_record(["category", "product", "quantity"])
        .context("Failed to write CSV header")?;

    for entry in entries {
        writer
            .write_record([
                entry.category.as_str(),
                entry.product_name.as_str(),
                &entry.total_quantity.to_string(),
            ])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV file")?;
    info!(path = %path.display(), rows = entries.len(), "CSV export written");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
