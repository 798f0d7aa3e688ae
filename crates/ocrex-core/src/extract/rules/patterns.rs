//! Common regex patterns for structured field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// License Type A: letter prefix, digits, parenthesized alphanumeric suffix.
pub const LICENSE_TYPE_A: &str =
    r"\b[A-Z]{1,5}[ \-/]*\d{1,10}[ \t]*\(\s*[A-Z0-9/\-\s]{1,24}\s*\)";

/// License Type B: digit/digit fraction followed by an `R` revision number.
pub const LICENSE_TYPE_B: &str = r"\b\d{1,6}/\d{1,6}\s*R\d+\b";

/// Numeric date: day, month, four-digit year with noisy dot/hyphen separators.
pub const NUMERIC_DATE: &str =
    r"\b\d{1,2}[\s.\-]*[.\-][\s.\-]*\d{1,2}[\s.\-]*[.\-][\s.\-]*\d{4}\b";

/// Textual date: day with optional ordinal (or OCR quote), month name, year.
pub const TEXTUAL_DATE: &str = concat!(
    r#"\b\d{1,2}(?:st|nd|rd|th|["“”])?\s*"#,
    r"(?:january|february|march|april|may|june|july|august|september|october|november|december",
    r"|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)",
    r"\.?,?\s*\d{4}\b",
);

lazy_static! {
    pub static ref LICENSE_TYPE_A_PATTERN: Regex =
        Regex::new(&format!("(?i){}", LICENSE_TYPE_A)).unwrap();

    pub static ref LICENSE_TYPE_B_PATTERN: Regex =
        Regex::new(&format!("(?i){}", LICENSE_TYPE_B)).unwrap();

    // Parenthesized span inside normalized license text
    pub static ref PAREN_SPAN: Regex = Regex::new(r"\(([^)]{1,20})\)").unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // OCR artifacts that should read as a plain space
    pub static ref OCR_NOISE: Regex = Regex::new(r"[\u{200B}\r]+").unwrap();

    // Components of a captured textual date
    pub static ref TEXTUAL_DATE_PARTS: Regex = Regex::new(
        r#"(?i)^(\d{1,2})(?:st|nd|rd|th|["“”])?\s*([a-z]+)\.?,?\s*(\d{4})$"#
    ).unwrap();

    pub static ref DATE_SEPARATOR_RUN: Regex = Regex::new(r"[\s.\-]+").unwrap();

    // Address between a tower/transmission phrase and a terminating keyword
    pub static ref ADDRESS_BETWEEN_MARKERS: Regex = Regex::new(concat!(
        r#"(?is)\b(?:Telecommunication|Transmission)[\w\s/&,.()\-]{0,60}?\s+at\s+["“”']?"#,
        r#"(.*?)["“”']?\s*(?:\bof\s+Dialog\b|\bsituated\b|\bwithin\b|\bunder\b|\z)"#,
    )).unwrap();

    pub static ref DOT_WITH_SPACES: Regex = Regex::new(r"\s*\.\s*").unwrap();

    // Leading digits of a license revision code
    pub static ref DIGIT_RUN: Regex = Regex::new(r"(\d+)").unwrap();
}
