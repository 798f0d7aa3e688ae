//! License number extraction with a two-taxonomy precedence rule.

use std::collections::HashSet;

use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::patterns::{
    LICENSE_TYPE_A, LICENSE_TYPE_A_PATTERN, LICENSE_TYPE_B, LICENSE_TYPE_B_PATTERN, PAREN_SPAN,
    WHITESPACE_RUN,
};
use super::FieldExtractor;
use crate::error::PatternError;

/// The two license number shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseTaxonomy {
    /// Type A shape (takes precedence).
    pub type_a: String,
    /// Type B shape.
    pub type_b: String,
}

impl Default for LicenseTaxonomy {
    fn default() -> Self {
        Self {
            type_a: LICENSE_TYPE_A.to_string(),
            type_b: LICENSE_TYPE_B.to_string(),
        }
    }
}

/// Which taxonomy a document's license numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseType {
    A,
    B,
}

/// License numbers found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseMatches {
    /// Winning taxonomy, `None` when nothing matched.
    pub taxonomy: Option<LicenseType>,
    /// Matches in order of appearance, deduplicated.
    pub numbers: Vec<String>,
}

/// License number extractor.
#[derive(Debug, Clone)]
pub struct LicenseExtractor {
    type_a: Regex,
    type_b: Regex,
}

impl LicenseExtractor {
    /// Create an extractor with the default taxonomy.
    pub fn new() -> Self {
        Self {
            type_a: LICENSE_TYPE_A_PATTERN.clone(),
            type_b: LICENSE_TYPE_B_PATTERN.clone(),
        }
    }

    /// Create an extractor with custom taxonomy shapes.
    pub fn with_taxonomy(taxonomy: &LicenseTaxonomy) -> Result<Self, PatternError> {
        let compile = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| PatternError::compile(pattern, e))
        };
        Ok(Self {
            type_a: compile(&taxonomy.type_a)?,
            type_b: compile(&taxonomy.type_b)?,
        })
    }

    /// Find license numbers, returning Type A matches if any exist, else Type B.
    pub fn classify(&self, text: &str) -> LicenseMatches {
        let normalized = normalize_text_for_license(text);

        let type_a = collect_unique(&self.type_a, &normalized);
        if !type_a.is_empty() {
            debug!("Found {} Type A license numbers", type_a.len());
            return LicenseMatches {
                taxonomy: Some(LicenseType::A),
                numbers: type_a,
            };
        }

        let type_b = collect_unique(&self.type_b, &normalized);
        if !type_b.is_empty() {
            debug!("Found {} Type B license numbers", type_b.len());
            return LicenseMatches {
                taxonomy: Some(LicenseType::B),
                numbers: type_b,
            };
        }

        trace!("No license numbers found");
        LicenseMatches::default()
    }
}

impl Default for LicenseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LicenseExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.classify(text).numbers
    }
}

fn collect_unique(pattern: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    pattern
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| seen.insert(value.to_uppercase()))
        .collect()
}

/// Normalize OCR noise before license matching.
///
/// Full-width and square brackets become ASCII parentheses, the text is
/// uppercased, whitespace runs collapse to one space, zero-width spaces are
/// dropped, and inside short parenthesized spans an `O` between two digits
/// becomes `0`.
pub fn normalize_text_for_license(text: &str) -> String {
    let unified: String = text
        .chars()
        .map(|c| match c {
            '（' | '[' | '［' => '(',
            '）' | ']' | '］' => ')',
            other => other,
        })
        .collect();
    let upper = unified.to_uppercase();
    let collapsed = WHITESPACE_RUN.replace_all(&upper, " ").replace('\u{200B}', "");

    PAREN_SPAN
        .replace_all(&collapsed, |caps: &Captures| {
            format!("({})", fix_letter_o_between_digits(&caps[1]))
        })
        .into_owned()
}

fn fix_letter_o_between_digits(span: &str) -> String {
    let chars: Vec<char> = span.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let next_digit = chars.get(i + 1).is_some_and(char::is_ascii_digit);
            if c == 'O' && prev_digit && next_digit {
                '0'
            } else {
                c
            }
        })
        .collect()
}

/// Extract all license numbers from text with the default taxonomy.
pub fn extract_all_license_numbers(text: &str) -> Vec<String> {
    LicenseExtractor::new().extract_all(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_a_wins_over_type_b() {
        let text = "Licence AB 12345(R05) granted; ref 123/45 R2";
        let matches = LicenseExtractor::new().classify(text);
        assert_eq!(matches.taxonomy, Some(LicenseType::A));
        assert_eq!(matches.numbers, vec!["AB 12345(R05)".to_string()]);
    }

    #[test]
    fn test_type_b_when_no_type_a() {
        let text = "Approval number 123/45 R2 dated today";
        let matches = LicenseExtractor::new().classify(text);
        assert_eq!(matches.taxonomy, Some(LicenseType::B));
        assert_eq!(matches.numbers, vec!["123/45 R2".to_string()]);
    }

    #[test]
    fn test_full_width_parenthesis_matches_identically() {
        let full_width = extract_all_license_numbers("AB 12345（R0)");
        let ascii = extract_all_license_numbers("AB 12345(R0)");
        assert_eq!(full_width, ascii);
        assert_eq!(ascii, vec!["AB 12345(R0)".to_string()]);
    }

    #[test]
    fn test_square_brackets_and_lowercase() {
        assert_eq!(
            extract_all_license_numbers("ref tx 889 [r12]"),
            vec!["TX 889 (R12)".to_string()]
        );
    }

    #[test]
    fn test_letter_o_between_digits_in_parens() {
        assert_eq!(normalize_text_for_license("AB 1(R1O5)"), "AB 1(R105)");
        assert_eq!(normalize_text_for_license("1O5 (RO5)"), "1O5 (RO5)");
    }

    #[test]
    fn test_whitespace_and_zero_width_space() {
        assert_eq!(
            normalize_text_for_license("ab\n\t 12\u{200B}3"),
            "AB 123"
        );
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let text = "AB 1(R1) then CD 2(R2) then ab 1(r1)";
        assert_eq!(
            extract_all_license_numbers(text),
            vec!["AB 1(R1)".to_string(), "CD 2(R2)".to_string()]
        );
    }

    #[test]
    fn test_empty_text() {
        let matches = LicenseExtractor::new().classify("");
        assert_eq!(matches, LicenseMatches::default());
    }

    #[test]
    fn test_custom_taxonomy() {
        let taxonomy = LicenseTaxonomy {
            type_a: r"\bTRC/\d+".to_string(),
            type_b: r"\bLIC\d+".to_string(),
        };
        let extractor = LicenseExtractor::with_taxonomy(&taxonomy).unwrap();
        assert_eq!(extractor.extract_all("lic77 and trc/12"), vec!["TRC/12".to_string()]);
        assert_eq!(extractor.extract_all("lic77"), vec!["LIC77".to_string()]);
    }

    #[test]
    fn test_invalid_taxonomy() {
        let taxonomy = LicenseTaxonomy {
            type_a: "(".to_string(),
            ..LicenseTaxonomy::default()
        };
        assert!(matches!(
            LicenseExtractor::with_taxonomy(&taxonomy),
            Err(PatternError::Compile { .. })
        ));
    }
}
