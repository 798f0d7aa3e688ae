//! Core library for extracting structured fields from noisy OCR text.
//!
//! This crate provides:
//! - Pattern synthesis from a single example value (smart and window patterns)
//! - Ordered first-match field resolution over candidate pattern lists
//! - Structured extractors for license numbers, date ranges and addresses
//! - Batch extraction producing one row per document
//! - Document text sources (plain text, born-digital PDF)

pub mod error;
pub mod extract;
pub mod models;
pub mod source;
pub mod synth;

pub use error::{OcrexError, PatternError, Result, SourceError};
pub use extract::{
    add_summary_column, bulk_extract, bulk_extract_licenses, process_document, CompiledFieldSet,
    FieldExtractor, FieldResolver, Pipeline, Resolution,
};
pub use extract::rules::{AddressExtractor, DateRange, DateRangeExtractor, LicenseExtractor};
pub use models::config::OcrexConfig;
pub use models::document::{DocumentText, ExtractionResult, ExtractionRow};
pub use source::{collect_inputs, load_document, TextSource};
pub use synth::{
    generate_smart_patterns, generate_window_patterns, infer_token_shape, FieldSession, FieldSpec,
    Sample,
};
