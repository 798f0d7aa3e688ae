//! Fields command - resolve the fields of a saved session over documents.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::warn;

use ocrex_core::extract::bulk::NOTES_COLUMN;
use ocrex_core::extract::{add_summary_column, annotate_unmatched};
use ocrex_core::models::document::ExtractionRow;
use ocrex_core::FieldSession;

use super::input::{expand_inputs, process_all};
use super::load_config;
use super::output::{write_rows, OutputFormat};

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// Input directory, file or glob pattern (.pdf, .txt, .csv)
    #[arg(required = true)]
    input: String,

    /// Session file with learned fields
    #[arg(short, long)]
    session: PathBuf,

    /// Output file (default: stdout); CSV output is appended
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Leave out the notes column that flags documents where nothing matched
    #[arg(long)]
    no_notes: bool,

    /// Add a summary column
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: FieldsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let session = FieldSession::from_json(&std::fs::read_to_string(&args.session)?)?;
    if session.is_empty() {
        anyhow::bail!("Session {} defines no fields", args.session.display());
    }

    let fields = Arc::new(session.compile(&config.extraction));
    for skipped in fields.skipped() {
        eprintln!("{} Skipped pattern {}", style("⚠").yellow(), skipped);
    }

    let items = expand_inputs(&args.input)?;
    let source = config.source.clone();
    let resolved: Vec<(ExtractionRow, bool)> = {
        let fields = Arc::clone(&fields);
        process_all(items, args.jobs, move |item| {
            let name = item.name();
            match item.load(&source) {
                Ok(document) => (fields.resolve_document(&document), true),
                Err(e) => {
                    warn!("Failed to read {}: {}", name, e);
                    let mut row = ExtractionRow::new(name);
                    for field in fields.field_names() {
                        row.set(field, "");
                    }
                    row.set(NOTES_COLUMN, format!("Error: {}", e));
                    (row, false)
                }
            }
        })
        .await?
    };

    let mut failed = 0;
    let mut out = Vec::with_capacity(resolved.len());
    for (mut row, read) in resolved {
        if !read {
            failed += 1;
        } else if !args.no_notes {
            annotate_unmatched(std::slice::from_mut(&mut row));
        }
        out.push(row);
    }

    if args.summary {
        add_summary_column::<fn(&ExtractionRow) -> String>(&mut out, None, None);
    }
    write_rows(&out, args.output.as_deref(), args.format)?;

    eprintln!(
        "{} Extracted {} fields from {} documents",
        style("✓").green(),
        fields.field_names().len(),
        out.len()
    );
    if failed > 0 {
        eprintln!("   {} could not be read", style(failed).red());
    }

    Ok(())
}
