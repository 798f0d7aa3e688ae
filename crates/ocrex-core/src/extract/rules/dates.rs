//! Date range extraction ("<date> to <date>") for noisy OCR text.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::{Captures, Regex, RegexBuilder};
use tracing::trace;

use super::patterns::{DATE_SEPARATOR_RUN, NUMERIC_DATE, OCR_NOISE, TEXTUAL_DATE, TEXTUAL_DATE_PARTS};
use super::FieldExtractor;
use crate::error::PatternError;

/// Default maximum characters between each date and the word "to".
pub const DEFAULT_MAX_GAP: usize = 40;

lazy_static! {
    static ref DEFAULT_RANGE_PATTERN: Regex = build_range_pattern(DEFAULT_MAX_GAP).unwrap();
}

fn build_range_pattern(max_gap: usize) -> Result<Regex, regex::Error> {
    let date = format!("(?:{}|{})", NUMERIC_DATE, TEXTUAL_DATE);
    let pattern = format!(
        r"(?P<start>{date}).{{0,{gap}}}?\bto\b.{{0,{gap}}}?(?P<end>{date})",
        date = date,
        gap = max_gap,
    );
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

/// A normalized `day.month.year` date pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    /// Both dates as calendar dates, if both are valid.
    pub fn parsed(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((parse_normalized(&self.start)?, parse_normalized(&self.end)?))
    }

    /// True when both dates are valid and the range ends before it starts.
    pub fn is_reversed(&self) -> bool {
        self.parsed().is_some_and(|(start, end)| end < start)
    }
}

/// Date range extractor.
#[derive(Debug, Clone)]
pub struct DateRangeExtractor {
    pattern: Regex,
}

impl DateRangeExtractor {
    /// Create an extractor with the default gap of 40 characters.
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_RANGE_PATTERN.clone(),
        }
    }

    /// Create an extractor allowing up to `max_gap` characters around "to".
    pub fn with_max_gap(max_gap: usize) -> Result<Self, PatternError> {
        let pattern = build_range_pattern(max_gap)
            .map_err(|e| PatternError::compile(&format!("date range (gap {})", max_gap), e))?;
        Ok(Self { pattern })
    }

    fn to_range(caps: &Captures) -> DateRange {
        DateRange {
            start: normalize_date(&caps["start"]),
            end: normalize_date(&caps["end"]),
        }
    }
}

impl Default for DateRangeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateRangeExtractor {
    type Output = DateRange;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let cleaned = OCR_NOISE.replace_all(text, " ");
        let range = self.pattern.captures(&cleaned).map(|caps| Self::to_range(&caps));
        trace!("Date range: {:?}", range);
        range
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let cleaned = OCR_NOISE.replace_all(text, " ");
        self.pattern
            .captures_iter(&cleaned)
            .map(|caps| Self::to_range(&caps))
            .collect()
    }
}

/// Normalize a captured date to `day.month.year`.
///
/// Ordinal suffixes and OCR quotes are dropped, month names map to their
/// number, and separator runs collapse to a single dot.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(caps) = TEXTUAL_DATE_PARTS.captures(raw) {
        if let Some(month) = month_to_number(&caps[2]) {
            return format!("{}.{}.{}", &caps[1], month, &caps[3]);
        }
    }

    DATE_SEPARATOR_RUN
        .split(raw)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

fn month_to_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn parse_normalized(date: &str) -> Option<NaiveDate> {
    let mut parts = date.split('.').map(str::parse::<u32>);
    let day = parts.next()?.ok()?;
    let month = parts.next()?.ok()?;
    let year = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Extract a date range, returning `(None, None)` when absent.
pub fn extract_date_range(text: &str) -> (Option<String>, Option<String>) {
    match DateRangeExtractor::new().extract(text) {
        Some(range) => (Some(range.start), Some(range.end)),
        None => (None, None),
    }
}
