//! Licenses command - every license number in every document.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::warn;

use ocrex_core::extract::bulk::{bulk_extract_licenses, LICENSES_COLUMN, NOTES_COLUMN};
use ocrex_core::extract::add_summary_column;
use ocrex_core::models::document::{DocumentText, ExtractionRow};
use ocrex_core::LicenseExtractor;

use super::input::{expand_inputs, process_all};
use super::load_config;
use super::output::{write_rows, OutputFormat};

/// Arguments for the licenses command.
#[derive(Args)]
pub struct LicensesArgs {
    /// Input directory, file or glob pattern (.pdf, .txt, .csv)
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout); CSV output is appended
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Add a summary column
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: LicensesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let extractor = LicenseExtractor::with_taxonomy(&config.license)?;

    let items = expand_inputs(&args.input)?;
    let source = config.source.clone();
    let loaded = process_all(items, args.jobs, move |item| {
        let name = item.name();
        item.load(&source).map_err(|e| (name, e.to_string()))
    })
    .await?;

    let mut rows = Vec::with_capacity(loaded.len());
    let mut documents: Vec<DocumentText> = Vec::new();
    let mut failures = 0;
    for result in loaded {
        match result {
            Ok(document) => documents.push(document),
            Err((name, reason)) => {
                warn!("Failed to read {}: {}", name, reason);
                failures += 1;
                // Keep extracted rows and failures in input order.
                rows.extend(bulk_extract_licenses(&documents, &extractor));
                documents.clear();
                let mut row = ExtractionRow::new(name);
                row.set(LICENSES_COLUMN, "");
                row.set(NOTES_COLUMN, format!("Error: {}", reason));
                rows.push(row);
            }
        }
    }
    rows.extend(bulk_extract_licenses(&documents, &extractor));

    if args.summary {
        add_summary_column::<fn(&ExtractionRow) -> String>(&mut rows, None, None);
    }
    write_rows(&rows, args.output.as_deref(), args.format)?;

    let found = rows
        .iter()
        .filter(|r| r.get(LICENSES_COLUMN).is_some_and(|v| !v.is_empty()))
        .count();
    eprintln!(
        "{} License numbers found in {} of {} documents",
        style("✓").green(),
        found,
        rows.len()
    );
    if failures > 0 {
        eprintln!("   {} could not be read", style(failures).red());
    }

    Ok(())
}
