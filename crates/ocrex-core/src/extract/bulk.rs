//! Batch extraction: one output row per document.

use tracing::{debug, info};

use super::resolver::CompiledFieldSet;
use super::rules::license::LicenseExtractor;
use crate::models::document::{DocumentText, ExtractionRow};

pub const LICENSES_COLUMN: &str = "Licenses";
pub const NOTES_COLUMN: &str = "Notes";
pub const NO_MATCH_NOTE: &str = "No patterns matched";

/// Resolve every field of `fields` for every document, in input order.
pub fn bulk_extract(documents: &[DocumentText], fields: &CompiledFieldSet) -> Vec<ExtractionRow> {
    let rows: Vec<ExtractionRow> = documents
        .iter()
        .map(|doc| fields.resolve_document(doc))
        .collect();

    let unmatched = rows.iter().filter(|r| r.is_blank()).count();
    info!(
        "Extracted {} fields from {} documents ({} without any match)",
        fields.field_names().len(),
        rows.len(),
        unmatched
    );
    rows
}

/// License numbers for every document, joined by `"; "`.
pub fn bulk_extract_licenses(
    documents: &[DocumentText],
    extractor: &LicenseExtractor,
) -> Vec<ExtractionRow> {
    documents
        .iter()
        .map(|doc| {
            let matches = extractor.classify(&doc.text);
            debug!(
                "{}: {} license numbers ({:?})",
                doc.file_name,
                matches.numbers.len(),
                matches.taxonomy
            );
            let mut row = ExtractionRow::new(&doc.file_name);
            row.set(LICENSES_COLUMN, matches.numbers.join("; "));
            row
        })
        .collect()
}

/// Add a notes column, flagging rows where no field matched.
pub fn annotate_unmatched(rows: &mut [ExtractionRow]) {
    for row in rows {
        let note = if row.is_blank() { NO_MATCH_NOTE } else { "" };
        row.set(NOTES_COLUMN, note);
    }
}
