//! Samples: a selected value plus the text around it.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::PatternError;

/// Default number of context characters captured on each side.
pub const DEFAULT_CONTEXT_RADIUS: usize = 50;

/// Line words taken from each end of the line as window anchors.
const LINE_ANCHOR_WORDS: usize = 3;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").unwrap();
}

/// A user-selected value with its context window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Selected value, trimmed.
    pub value: String,
    /// Text surrounding the value, the value included.
    pub context: String,
    /// Words of the line(s) containing the value.
    pub line_words: Vec<String>,
}

impl Sample {
    /// Build a sample without document context.
    pub fn new(value: &str) -> Result<Self, PatternError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(PatternError::EmptySample);
        }
        Ok(Self {
            value: value.to_string(),
            context: String::new(),
            line_words: Vec::new(),
        })
    }

    /// Locate the first occurrence of `selection` in `text` and capture its context.
    pub fn locate(text: &str, selection: &str, radius: usize) -> Result<Self, PatternError> {
        let value = selection.trim();
        if value.is_empty() {
            return Err(PatternError::EmptySample);
        }
        let start = text
            .find(value)
            .ok_or_else(|| PatternError::SampleNotFound(value.to_string()))?;
        Self::from_range(text, start, start + value.len(), radius)
    }

    /// Build a sample from a byte range of `text`.
    pub fn from_range(
        text: &str,
        start: usize,
        end: usize,
        radius: usize,
    ) -> Result<Self, PatternError> {
        let selection = text
            .get(start..end)
            .ok_or(PatternError::InvalidSelection { start, end })?;
        let value = selection.trim();
        if value.is_empty() {
            return Err(PatternError::EmptySample);
        }

        let ctx_start = text[..start]
            .char_indices()
            .rev()
            .take(radius)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(start);
        let ctx_end = text[end..]
            .char_indices()
            .nth(radius)
            .map(|(i, _)| end + i)
            .unwrap_or(text.len());

        let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = text[end..]
            .find('\n')
            .map(|i| end + i)
            .unwrap_or(text.len());
        let line_words = NON_WORD
            .split(&text[line_start..line_end])
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            value: value.to_string(),
            context: text[ctx_start..ctx_end].to_string(),
            line_words,
        })
    }

    /// Context text, if any was captured.
    pub fn context(&self) -> Option<&str> {
        if self.context.is_empty() {
            None
        } else {
            Some(&self.context)
        }
    }

    /// Leading words of the line, used as "before" anchors.
    pub fn before_words(&self) -> &[String] {
        let n = self.line_words.len().min(LINE_ANCHOR_WORDS);
        &self.line_words[..n]
    }

    /// Trailing words of the line, used as "after" anchors.
    pub fn after_words(&self) -> &[String] {
        let n = self.line_words.len().saturating_sub(LINE_ANCHOR_WORDS);
        &self.line_words[n..]
    }
}
