//! Token shape inference: generalize one example into a character-class range.

use std::fmt;

/// Fragment used when the sample is blank.
pub const FALLBACK_SHAPE: &str = r"\S{2,20}";

/// Character class inferred from a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeClass {
    /// Letters and digits both present.
    Mixed,
    /// Digits without letters.
    Numeric,
    /// Letters only, or neither.
    Alphabetic,
}

impl ShapeClass {
    fn classify(sample: &str) -> Self {
        let has_alpha = sample.chars().any(char::is_alphabetic);
        let has_digit = sample.chars().any(char::is_numeric);
        match (has_alpha, has_digit) {
            (true, true) => Self::Mixed,
            (false, true) => Self::Numeric,
            _ => Self::Alphabetic,
        }
    }

    /// Regex character class for this shape.
    pub fn as_class(&self) -> &'static str {
        match self {
            Self::Mixed => r"[A-Za-z0-9/()\-\s]",
            Self::Numeric => r"[0-9/()\-\s]",
            Self::Alphabetic => r"[A-Za-z/()\-\s]",
        }
    }
}

/// A character class plus a length bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenShape {
    pub class: ShapeClass,
    pub min_len: usize,
    pub max_len: usize,
}

impl TokenShape {
    /// Infer the shape of a sample. Returns `None` for blank input.
    pub fn infer(sample: &str) -> Option<Self> {
        let s = sample.trim();
        if s.is_empty() {
            return None;
        }

        let len = s.chars().count();
        Some(Self {
            class: ShapeClass::classify(s),
            min_len: len.clamp(2, 4),
            max_len: (len + 6).clamp(8, 40),
        })
    }

    /// Whether a length lies within the bound.
    pub fn admits_len(&self, len: usize) -> bool {
        (self.min_len..=self.max_len).contains(&len)
    }
}

impl fmt::Display for TokenShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{},{}}}", self.class.as_class(), self.min_len, self.max_len)
    }
}

/// Infer a permissive regex fragment describing values shaped like `sample`.
///
/// Never fails: blank input yields [`FALLBACK_SHAPE`].
pub fn infer_token_shape(sample: &str) -> String {
    TokenShape::infer(sample)
        .map(|shape| shape.to_string())
        .unwrap_or_else(|| FALLBACK_SHAPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_mixed_sample() {
        assert_eq!(infer_token_shape("AB1234"), r"[A-Za-z0-9/()\-\s]{4,12}");
    }

    #[test]
    fn test_numeric_sample() {
        assert_eq!(infer_token_shape("123"), r"[0-9/()\-\s]{3,9}");
    }

    #[test]
    fn test_alphabetic_sample() {
        assert_eq!(infer_token_shape("Colombo"), r"[A-Za-z/()\-\s]{4,13}");
    }

    #[test]
    fn test_punctuation_only_is_alphabetic() {
        let shape = TokenShape::infer("--").unwrap();
        assert_eq!(shape.class, ShapeClass::Alphabetic);
    }

    #[test]
    fn test_bounds_are_clamped() {
        let short = TokenShape::infer("7").unwrap();
        assert_eq!((short.min_len, short.max_len), (2, 8));

        let long = TokenShape::infer(&"x".repeat(60)).unwrap();
        assert_eq!((long.min_len, long.max_len), (4, 40));
    }

    #[test]
    fn test_blank_sample_falls_back() {
        assert_eq!(infer_token_shape("   "), FALLBACK_SHAPE);
        assert_eq!(infer_token_shape(""), FALLBACK_SHAPE);
    }

    #[test]
    fn test_sample_length_within_bounds() {
        for len in 2..=34 {
            let sample = "9".repeat(len);
            let shape = TokenShape::infer(&sample).unwrap();
            assert!(shape.admits_len(len), "length {} outside {:?}", len, shape);
        }
    }

    #[test]
    fn test_fragment_compiles_and_matches_sample() {
        for sample in ["LIC-2024/77", "12/05", "Kandy Road"] {
            let fragment = infer_token_shape(sample);
            let re = Regex::new(&format!("^(?:{})$", fragment)).unwrap();
            assert!(re.is_match(sample), "{} did not match {}", fragment, sample);
        }
    }
}
