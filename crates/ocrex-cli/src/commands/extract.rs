//! Extract command - built-in pipeline over a batch of documents.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::warn;

use ocrex_core::extract::add_summary_column;
use ocrex_core::models::document::{ExtractionResult, ExtractionRow};
use ocrex_core::Pipeline;

use super::input::{expand_inputs, process_all};
use super::load_config;
use super::output::{write_rows, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
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

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let pipeline = Arc::new(Pipeline::from_config(&config)?);
    for skipped in pipeline.builtin_fields().skipped() {
        warn!("Built-in pattern skipped: {}", skipped);
    }

    let items = expand_inputs(&args.input)?;
    eprintln!(
        "{} Found {} documents to process",
        style("ℹ").blue(),
        items.len()
    );

    let source = config.source.clone();
    let results: Vec<ExtractionResult> = process_all(items, args.jobs, move |item| {
        let name = item.name();
        match item.load(&source) {
            Ok(document) => pipeline.process_document(&document),
            Err(e) => {
                warn!("Failed to read {}: {}", name, e);
                ExtractionResult::failed(name, e)
            }
        }
    })
    .await?;

    let failed = results
        .iter()
        .filter(|r| r.notes.as_deref().is_some_and(|n| n.starts_with("Error:")))
        .count();

    let mut rows: Vec<ExtractionRow> = results.iter().map(ExtractionResult::to_row).collect();
    if args.summary {
        add_summary_column::<fn(&ExtractionRow) -> String>(&mut rows, None, None);
    }
    write_rows(&rows, args.output.as_deref(), args.format)?;

    eprintln!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    if failed > 0 {
        eprintln!("   {} could not be read", style(failed).red());
    }

    Ok(())
}
