//! Born-digital PDF text via lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::{display_name, Result, TextSource};
use crate::error::SourceError;
use crate::models::config::SourceConfig;
use crate::models::document::DocumentText;

/// Text layer of PDFs that were generated digitally.
///
/// Scanned PDFs carry no text layer and are rejected with
/// [`SourceError::TextExtraction`] so they can be routed to OCR.
#[derive(Debug, Clone, Default)]
pub struct PdfTextSource {
    config: SourceConfig,
}

impl PdfTextSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Extract text from PDF bytes.
    pub fn extract(&self, file_name: &str, data: &[u8]) -> Result<DocumentText> {
        let (doc, raw) = open(data)?;
        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(SourceError::NoPages);
        }

        let document = match pdf_extract::extract_text_from_mem(&raw) {
            Ok(text) => DocumentText::new(file_name, text),
            Err(e) => {
                // Fall back to lopdf's own text layer, page by page.
                warn!("pdf-extract failed for {}: {}, trying lopdf", file_name, e);
                let numbers: Vec<u32> = pages.keys().copied().collect();
                let texts = numbers
                    .iter()
                    .map(|n| doc.extract_text(&[*n]))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| SourceError::TextExtraction(e.to_string()))?;
                DocumentText::from_pages(file_name, texts, &self.config.page_separator)
            }
        };

        let chars = document.text.trim().chars().count();
        if chars < self.config.min_text_length {
            return Err(SourceError::TextExtraction(format!(
                "{} has no text layer ({} chars), OCR required",
                file_name, chars
            )));
        }

        debug!(
            "Extracted {} chars from {} ({} pages)",
            chars,
            file_name,
            pages.len()
        );
        Ok(document)
    }
}

impl TextSource for PdfTextSource {
    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn load(&self, path: &Path) -> Result<DocumentText> {
        let data = std::fs::read(path)?;
        self.extract(&display_name(path), &data)
    }
}

/// Parse the PDF, decrypting documents protected by an empty password.
///
/// Returns the document plus the bytes pdf-extract should read.
fn open(data: &[u8]) -> Result<(Document, Vec<u8>)> {
    let mut doc = Document::load_mem(data).map_err(|e| SourceError::Parse(e.to_string()))?;
    if !doc.is_encrypted() {
        return Ok((doc, data.to_vec()));
    }

    if doc.decrypt("").is_err() {
        return Err(SourceError::Encrypted);
    }
    debug!("Decrypted PDF with empty password");

    let mut decrypted = Vec::new();
    doc.save_to(&mut decrypted)
        .map_err(|e| SourceError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
    Ok((doc, decrypted))
}
