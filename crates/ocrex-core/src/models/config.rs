//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::extract::rules::builtin::BuiltinPatterns;
use crate::extract::rules::license::LicenseTaxonomy;

/// Main configuration for the ocrex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrexConfig {
    /// Pattern synthesis and resolution configuration.
    pub extraction: ExtractionConfig,

    /// License number taxonomy shapes.
    pub license: LicenseTaxonomy,

    /// Pattern table for the built-in fields.
    pub builtin: BuiltinPatterns,

    /// Document text source configuration.
    pub source: SourceConfig,
}

/// Pattern synthesis and resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum characters between a date and the word "to" on either side.
    pub date_range_max_gap: usize,

    /// Maximum intervening words between a window anchor and the value.
    pub window_max_words: usize,

    /// Number of smart patterns kept per captured sample.
    pub smart_pattern_limit: usize,

    /// Characters of context captured on each side of a sample.
    pub context_radius: usize,

    /// Compiled size limit (bytes) for a single candidate pattern.
    pub regex_size_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_range_max_gap: 40,
            window_max_words: 3,
            smart_pattern_limit: 6,
            context_radius: 50,
            regex_size_limit: 1 << 20,
        }
    }
}

/// Document text source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Minimum text length for a PDF to count as born-digital.
    pub min_text_length: usize,

    /// Separator placed between page texts.
    pub page_separator: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            page_separator: "\n".to_string(),
        }
    }
}

impl OcrexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
