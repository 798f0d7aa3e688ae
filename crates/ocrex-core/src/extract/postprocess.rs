//! Derived columns computed from already-extracted rows.

use lazy_static::lazy_static;
use regex::Regex;

use super::bulk::LICENSES_COLUMN;
use super::rules::patterns::DIGIT_RUN;
use crate::models::document::ExtractionRow;

pub const SUMMARY_COLUMN: &str = "Summary";
pub const ADDRESS_COLUMN: &str = "Address";

lazy_static! {
    static ref PARENTHESIZED: Regex = Regex::new(r"\(([^)]+)\)").unwrap();
}

/// Default summary for one row.
///
/// The first digit run of the licenses' parenthesized part (or of the whole
/// value when there are no parentheses) renders as `"<n> times"`. Otherwise
/// the licenses and address are joined with `" | "`, or whichever of the two
/// is present is used alone.
pub fn default_summary(row: &ExtractionRow) -> String {
    let licenses = row.get(LICENSES_COLUMN).unwrap_or_default().trim();
    let address = row.get(ADDRESS_COLUMN).unwrap_or_default().trim();

    let code = PARENTHESIZED
        .captures(licenses)
        .and_then(|caps| caps.get(1))
        .map_or(licenses, |m| m.as_str());
    if let Some(digits) = DIGIT_RUN.captures(code) {
        let count = digits[1].trim_start_matches('0');
        return format!("{} times", if count.is_empty() { "0" } else { count });
    }

    match (licenses.is_empty(), address.is_empty()) {
        (false, false) => format!("{} | {}", licenses, address),
        (false, true) => licenses.to_string(),
        (true, false) => address.to_string(),
        (true, true) => String::new(),
    }
}

/// Append a summary column to every row.
///
/// `rule` replaces [`default_summary`] when given; `column` defaults to
/// `"Summary"`.
pub fn add_summary_column<F>(rows: &mut [ExtractionRow], rule: Option<F>, column: Option<&str>)
where
    F: Fn(&ExtractionRow) -> String,
{
    let column = column.unwrap_or(SUMMARY_COLUMN);
    for row in rows.iter_mut() {
        let summary = match &rule {
            Some(rule) => rule(row),
            None => default_summary(row),
        };
        row.set(column, summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(licenses: &str, address: &str) -> ExtractionRow {
        let mut row = ExtractionRow::new("a.pdf");
        row.set(LICENSES_COLUMN, licenses);
        row.set(ADDRESS_COLUMN, address);
        row
    }

    #[test]
    fn test_count_in_parentheses() {
        assert_eq!(default_summary(&row("TX 12(R3)", "Colombo")), "3 times");
        assert_eq!(default_summary(&row("AB 1 (x 007 y)", "")), "7 times");
        assert_eq!(default_summary(&row("TX 9(R000)", "")), "0 times");
    }

    #[test]
    fn test_count_without_parentheses() {
        assert_eq!(default_summary(&row("123/45 R6", "")), "123 times");
    }

    #[test]
    fn test_joined_fallback() {
        assert_eq!(default_summary(&row("TX 12(R)", "Colombo")), "TX 12(R) | Colombo");
        assert_eq!(default_summary(&row("", "Colombo")), "Colombo");
        assert_eq!(default_summary(&row("NOREF", "")), "NOREF");
        assert_eq!(default_summary(&ExtractionRow::new("x")), "");
    }

    #[test]
    fn test_add_default_column() {
        let mut rows = vec![row("TX 1(R2)", ""), row("", "Kandy")];
        add_summary_column::<fn(&ExtractionRow) -> String>(&mut rows, None, None);
        assert_eq!(rows[0].get(SUMMARY_COLUMN), Some("2 times"));
        assert_eq!(rows[1].get(SUMMARY_COLUMN), Some("Kandy"));
    }

    #[test]
    fn test_custom_rule_and_column() {
        let mut rows = vec![row("TX 1(R2)", "Kandy")];
        add_summary_column(&mut rows, Some(|r: &ExtractionRow| r.file_name.to_uppercase()), Some("Tag"));
        assert_eq!(rows[0].get("Tag"), Some("A.PDF"));
        assert_eq!(rows[0].get(SUMMARY_COLUMN), None);
    }
}
