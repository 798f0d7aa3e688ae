//! Smart pattern generation from a single sample and its context.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use super::dedup_preserving_order;

/// Number of leading context words considered as anchors.
pub const CONTEXT_ANCHOR_WORDS: usize = 3;

lazy_static! {
    static ref NUMERIC_DATE_SAMPLE: Regex =
        Regex::new(r"(?i)^\d{1,2}[/-]\d{1,2}[/-]\d{4}").unwrap();

    static ref ALPHA_CODE_SAMPLE: Regex = Regex::new(r"(?i)^[A-Z]{2,}\d+").unwrap();

    static ref NUMERIC_SAMPLE: Regex = Regex::new(r"^\d+").unwrap();
}

/// Coarse category of a sample value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCategory {
    /// `d/m/yyyy`-like dates.
    NumericDate,
    /// Letter prefix followed by digits.
    AlphaCode,
    /// Starts with digits.
    Numeric,
}

impl SampleCategory {
    /// Detect the category of a sample, testing categories in precedence order.
    ///
    /// `None` means detection was inconclusive.
    pub fn detect(sample: &str) -> Option<Self> {
        if NUMERIC_DATE_SAMPLE.is_match(sample) {
            Some(Self::NumericDate)
        } else if ALPHA_CODE_SAMPLE.is_match(sample) {
            Some(Self::AlphaCode)
        } else if NUMERIC_SAMPLE.is_match(sample) {
            Some(Self::Numeric)
        } else {
            None
        }
    }

    /// Generalized patterns contributed by this category.
    pub fn patterns(&self) -> [&'static str; 3] {
        match self {
            Self::NumericDate => [
                r"\d{1,2}[/-]\d{1,2}[/-]\d{4}",
                r"\d{4}[/-]\d{1,2}[/-]\d{1,2}",
                r"\d{1,2}\s+\d{1,2}\s+\d{4}",
            ],
            Self::AlphaCode => [
                r"[A-Z]{2,}\d+",
                r"[A-Z]{2,}[-_\s]?\d+",
                r"[A-Z]*\d+",
            ],
            Self::Numeric => [r"\d+", r"[A-Z]*\d+", r"\d+[A-Z]*"],
        }
    }
}

/// Generate candidate patterns for a sample value.
///
/// Order: escaped literal, category generalizations, context-anchored
/// patterns. Duplicates are removed keeping the first occurrence. A blank
/// sample yields no patterns.
pub fn generate_smart_patterns(sample: &str, context: Option<&str>) -> Vec<String> {
    if sample.trim().is_empty() {
        return Vec::new();
    }

    let literal = regex::escape(sample);
    let mut patterns = vec![literal.clone()];

    match SampleCategory::detect(sample) {
        Some(category) => {
            trace!("Sample {:?} categorized as {:?}", sample, category);
            patterns.extend(category.patterns().iter().map(|p| p.to_string()));
        }
        None => trace!("Sample {:?} has no category", sample),
    }

    if let Some(context) = context {
        patterns.extend(
            context
                .split_whitespace()
                .take(CONTEXT_ANCHOR_WORDS)
                .filter(|word| word.chars().count() > 2)
                .map(|word| format!(r"\b{}.*?{}", regex::escape(word), literal)),
        );
    }

    dedup_preserving_order(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_comes_first_and_matches_verbatim() {
        for sample in ["LIC-001", "a+b (c)", "12.5$", "Tower [A]"] {
            let patterns = generate_smart_patterns(sample, Some("some context words"));
            let re = Regex::new(&patterns[0]).unwrap();
            assert_eq!(re.find(sample).map(|m| m.as_str()), Some(sample));
        }
    }

    #[test]
    fn test_date_sample_gets_date_patterns() {
        let patterns = generate_smart_patterns("12/05/2024", None);
        assert_eq!(patterns.len(), 4);
        assert_eq!(&patterns[1..], &SampleCategory::NumericDate.patterns().map(String::from));
    }

    #[test]
    fn test_category_precedence() {
        assert_eq!(SampleCategory::detect("1-2-2024"), Some(SampleCategory::NumericDate));
        assert_eq!(SampleCategory::detect("ABC123"), Some(SampleCategory::AlphaCode));
        assert_eq!(SampleCategory::detect("12345"), Some(SampleCategory::Numeric));
        assert_eq!(SampleCategory::detect("Colombo"), None);
    }

    #[test]
    fn test_uncategorized_sample_yields_literal_only() {
        assert_eq!(generate_smart_patterns("Colombo", None), vec!["Colombo".to_string()]);
    }

    #[test]
    fn test_context_anchors_skip_short_words() {
        let patterns = generate_smart_patterns("Colombo", Some("at No 5 Galle Road"));
        assert_eq!(patterns, vec!["Colombo".to_string()]);

        let patterns = generate_smart_patterns("Colombo", Some("Address: Main Street, Colombo"));
        assert_eq!(patterns, vec![
            "Colombo".to_string(),
            r"\bAddress:.*?Colombo".to_string(),
            r"\bMain.*?Colombo".to_string(),
            r"\bStreet,.*?Colombo".to_string(),
        ]);
    }

    #[test]
    fn test_context_words_are_escaped() {
        let patterns = generate_smart_patterns("42", Some("Ref.(x) No. 42"));
        assert!(patterns.contains(&r"\bRef\.\(x\).*?42".to_string()));
        for p in &patterns {
            assert!(Regex::new(p).is_ok(), "{} did not compile", p);
        }
    }

    #[test]
    fn test_output_is_deduplicated() {
        let patterns = generate_smart_patterns("123", Some("Total Total Total"));
        let unique: std::collections::HashSet<_> = patterns.iter().collect();
        assert_eq!(unique.len(), patterns.len());
    }

    #[test]
    fn test_blank_sample() {
        assert!(generate_smart_patterns("  ", Some("context")).is_empty());
    }
}
