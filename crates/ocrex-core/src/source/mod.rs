//! Document text sources.
//!
//! A source turns one input file into its full text. Scanned documents need
//! an OCR engine, which lives outside this crate; anything that produces
//! text can plug in by implementing [`TextSource`].

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "pdf")]
pub use pdf::PdfTextSource;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SourceError;
use crate::models::config::SourceConfig;
use crate::models::document::DocumentText;

/// Result type for text sources.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Trait for anything that can turn an input file into text.
pub trait TextSource {
    /// Lowercase file extensions this source handles.
    fn extensions(&self) -> &[&str];

    /// Read the document's full text.
    fn load(&self, path: &Path) -> Result<DocumentText>;

    /// Whether this source handles `path`, by extension.
    fn accepts(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }
}

/// Plain text files, such as the output of an external OCR run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn load(&self, path: &Path) -> Result<DocumentText> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        debug!("Read {} bytes of text from {}", bytes.len(), path.display());
        Ok(DocumentText::new(display_name(path), text))
    }
}

/// Load one document with the source matching its extension.
pub fn load_document(path: &Path, config: &SourceConfig) -> Result<DocumentText> {
    if PlainTextSource.accepts(path) {
        return PlainTextSource.load(path);
    }

    #[cfg(feature = "pdf")]
    {
        let pdf = PdfTextSource::new(config.clone());
        if pdf.accepts(path) {
            return pdf.load(path);
        }
    }
    #[cfg(not(feature = "pdf"))]
    let _ = config;

    Err(SourceError::Unsupported(path.display().to_string()))
}

/// Files directly inside `folder` whose extension is one of `extensions`.
///
/// Extensions match case-insensitively, paths that resolve to the same
/// file (ignoring case) appear once, and the result is sorted by lowercase
/// file name.
pub fn collect_inputs(folder: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut unique: BTreeMap<String, PathBuf> = BTreeMap::new();

    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = extension_of(&path) else {
            continue;
        };
        if !extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            continue;
        }
        let key = path
            .canonicalize()
            .unwrap_or_else(|_| path.clone())
            .to_string_lossy()
            .to_lowercase();
        unique.insert(key, path);
    }

    let mut files: Vec<PathBuf> = unique.into_values().collect();
    files.sort_by_key(|p| display_name(p).to_lowercase());
    debug!("Collected {} inputs from {}", files.len(), folder.display());
    Ok(files)
}

/// File name used for a path in result rows.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}
