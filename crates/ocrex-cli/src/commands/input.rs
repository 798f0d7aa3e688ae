//! Input expansion and parallel per-document processing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use ocrex_core::models::config::SourceConfig;
use ocrex_core::models::document::{DocumentText, FILE_NAME_COLUMN, TEXT_COLUMN};
use ocrex_core::source::{collect_inputs, display_name, load_document};
use ocrex_core::SourceError;

/// Extensions accepted as inputs.
const INPUT_EXTENSIONS: &[&str] = &["pdf", "txt", "csv"];

/// One unit of work: a file still to be read, or text imported from a CSV.
pub enum InputItem {
    File(PathBuf),
    Text(DocumentText),
}

impl InputItem {
    pub fn name(&self) -> String {
        match self {
            InputItem::File(path) => display_name(path),
            InputItem::Text(doc) => doc.file_name.clone(),
        }
    }

    /// Obtain the document's text.
    pub fn load(self, config: &SourceConfig) -> Result<DocumentText, SourceError> {
        match self {
            InputItem::File(path) => load_document(&path, config),
            InputItem::Text(doc) => Ok(doc),
        }
    }
}

/// Expand a directory, file or glob pattern into work items.
///
/// CSV files contribute one item per row (`File Name`, `Text` columns).
pub fn expand_inputs(input: &str) -> anyhow::Result<Vec<InputItem>> {
    let path = Path::new(input);
    let files: Vec<PathBuf> = if path.is_dir() {
        collect_inputs(path, INPUT_EXTENSIONS)?
    } else {
        glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file() && has_input_extension(p))
            .collect()
    };

    let mut items = Vec::with_capacity(files.len());
    for file in files {
        if is_csv(&file) {
            let rows = read_csv_documents(&file)?;
            debug!("Imported {} rows from {}", rows.len(), file.display());
            items.extend(rows.into_iter().map(InputItem::Text));
        } else {
            items.push(InputItem::File(file));
        }
    }

    if items.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", input);
    }
    Ok(items)
}

/// Read a CSV of previously OCR'd documents.
///
/// A CSV without `File Name` and `Text` columns (a results file, say) holds
/// no documents and is skipped.
pub fn read_csv_documents(path: &Path) -> anyhow::Result<Vec<DocumentText>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?;
    for column in [FILE_NAME_COLUMN, TEXT_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            warn!("Skipping {}: no {} column", path.display(), column);
            return Ok(Vec::new());
        }
    }

    let mut documents = Vec::new();
    for (line, record) in reader.deserialize::<DocumentText>().enumerate() {
        match record {
            Ok(doc) => documents.push(doc),
            Err(e) => warn!("Skipping row {} of {}: {}", line + 1, path.display(), e),
        }
    }
    Ok(documents)
}

/// Run `task` over every item on the blocking pool, at most `jobs` at a
/// time. Results come back in input order.
pub async fn process_all<T, F>(items: Vec<InputItem>, jobs: usize, task: F) -> anyhow::Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(InputItem) -> T + Send + Sync + 'static,
{
    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let task = Arc::new(task);
    let mut handles = Vec::with_capacity(items.len());

    for item in items {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let task = Arc::clone(&task);
        let pb = pb.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let result = task(item);
            pb.inc(1);
            drop(permit);
            result
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await?);
    }
    pb.finish_and_clear();
    Ok(results)
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| INPUT_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
