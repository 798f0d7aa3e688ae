//! Error types for the ocrex-core library.

use thiserror::Error;

/// Main error type for the ocrex library.
#[derive(Error, Debug)]
pub enum OcrexError {
    /// Document text acquisition error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Pattern compilation or synthesis error.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning an input document into text.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// No text source handles this file type.
    #[error("unsupported input: {0}")]
    Unsupported(String),

    /// I/O error while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to candidate patterns.
#[derive(Error, Debug)]
pub enum PatternError {
    /// A candidate regex failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The sample is empty after trimming.
    #[error("sample text is empty")]
    EmptySample,

    /// The sample does not occur in the document it was taken from.
    #[error("sample `{0}` not found in document")]
    SampleNotFound(String),

    /// Byte range does not fall on character boundaries of the document.
    #[error("invalid selection {start}..{end}")]
    InvalidSelection { start: usize, end: usize },
}

impl PatternError {
    pub(crate) fn compile(pattern: &str, source: regex::Error) -> Self {
        Self::Compile {
            pattern: pattern.to_string(),
            source,
        }
    }
}

/// Result type for the ocrex library.
pub type Result<T> = std::result::Result<T, OcrexError>;
