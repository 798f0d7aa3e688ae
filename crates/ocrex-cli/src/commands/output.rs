//! Result sinks: appended CSV files and JSON.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use console::style;
use tracing::debug;

use ocrex_core::models::document::ExtractionRow;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV rows, appended to the output file
    Csv,
    /// JSON array of row objects
    Json,
}

/// Columns of all rows, in first-seen order.
pub fn columns(rows: &[ExtractionRow]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for column in row.columns() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    columns
}

/// Write rows to `output`, or stdout when no output file is given.
///
/// If the output file cannot be written the rows go to stdout instead, and
/// the write error is returned afterwards.
pub fn write_rows(
    rows: &[ExtractionRow],
    output: Option<&Path>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let Some(path) = output else {
        return write_stdout(rows, format);
    };

    let written = match format {
        OutputFormat::Csv => append_csv(rows, path),
        OutputFormat::Json => serde_json::to_string_pretty(rows)
            .map_err(anyhow::Error::from)
            .and_then(|json| Ok(std::fs::write(path, json)?)),
    }
    .with_context(|| format!("writing {}", path.display()));

    if let Err(e) = written {
        eprintln!(
            "{} Could not write {}, printing {} rows to stdout",
            style("⚠").yellow(),
            path.display(),
            rows.len()
        );
        write_stdout(rows, format)?;
        return Err(e);
    }

    eprintln!(
        "{} Wrote {} rows to {}",
        style("✓").green(),
        rows.len(),
        path.display()
    );
    Ok(())
}

fn write_stdout(rows: &[ExtractionRow], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let columns = columns(rows);
            let stdout = std::io::stdout();
            write_csv(rows, &columns, stdout.lock(), true)
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
            Ok(())
        }
    }
}

/// Append rows to a CSV file.
///
/// A new file gets a header from the batch's columns. An existing file keeps
/// its header: values are written in that column order, and a batch with a
/// column the file lacks is refused.
pub fn append_csv(rows: &[ExtractionRow], path: &Path) -> anyhow::Result<()> {
    let batch = columns(rows);
    let existing = existing_header(path)?;

    let (order, header): (Vec<&str>, bool) = match &existing {
        None => (batch, true),
        Some(header) => {
            let unknown: Vec<&str> = batch
                .iter()
                .filter(|c| !header.iter().any(|h| h == *c))
                .copied()
                .collect();
            if !unknown.is_empty() {
                anyhow::bail!(
                    "existing header lacks columns {:?} (has {:?})",
                    unknown,
                    header
                );
            }
            (header.iter().map(String::as_str).collect(), false)
        }
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    write_csv(rows, &order, file, header)?;
    debug!(
        "Appended {} rows to {} (header: {})",
        rows.len(),
        path.display(),
        header
    );
    Ok(())
}

/// Header of a non-empty CSV file, `None` when the file is missing or empty.
fn existing_header(path: &Path) -> anyhow::Result<Option<Vec<String>>> {
    if !path.exists() || std::fs::metadata(path)?.len() == 0 {
        return Ok(None);
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    match reader.records().next() {
        Some(record) => Ok(Some(record?.iter().map(str::to_string).collect())),
        None => Ok(None),
    }
}

fn write_csv<W: Write>(
    rows: &[ExtractionRow],
    columns: &[&str],
    writer: W,
    header: bool,
) -> anyhow::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    if header {
        wtr.write_record(columns)?;
    }
    for row in rows {
        wtr.write_record(row.values_for(columns))?;
    }

    wtr.flush()?;
    Ok(())
}
