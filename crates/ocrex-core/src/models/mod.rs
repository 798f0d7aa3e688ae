//! Data models for documents, rows and configuration.

pub mod config;
pub mod document;

pub use config::{ExtractionConfig, OcrexConfig, SourceConfig};
pub use document::{
    DocumentText, ExtractionResult, ExtractionRow, FILE_NAME_COLUMN, TEXT_COLUMN,
};
