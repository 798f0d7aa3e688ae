//! Address extraction between a tower/transmission phrase and a terminating keyword.

use super::patterns::{ADDRESS_BETWEEN_MARKERS, DOT_WITH_SPACES, OCR_NOISE, WHITESPACE_RUN};
use super::FieldExtractor;

/// Characters trimmed from both ends of a captured address.
const TRIM_CHARS: &[char] = &[' ', ',', '.', ';', ':', '-', '"', '\'', '“', '”'];

/// Address extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressExtractor;

impl AddressExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for AddressExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let cleaned = OCR_NOISE.replace_all(text, " ");
        ADDRESS_BETWEEN_MARKERS
            .captures_iter(&cleaned)
            .filter_map(|caps| clean_address(&caps[1]))
            .collect()
    }
}

fn clean_address(raw: &str) -> Option<String> {
    let spaced = DOT_WITH_SPACES.replace_all(raw, ". ");
    let collapsed = WHITESPACE_RUN.replace_all(&spaced, " ");
    let trimmed = collapsed.trim_matches(TRIM_CHARS);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract the first address from text.
pub fn extract_address_between_markers(text: &str) -> Option<String> {
    AddressExtractor::new().extract(text)
}
