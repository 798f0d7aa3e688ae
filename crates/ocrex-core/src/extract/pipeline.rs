//! Built-in, non-interactive extraction pipeline.

use std::time::Instant;

use tracing::debug;

use super::bulk::NO_MATCH_NOTE;
use super::resolver::CompiledFieldSet;
use super::rules::builtin::{DATE_FIELD, LICENSE_ID_FIELD, REFERENCE_ID_FIELD};
use super::rules::{AddressExtractor, DateRangeExtractor, FieldExtractor, LicenseExtractor};
use crate::error::Result;
use crate::models::config::OcrexConfig;
use crate::models::document::{DocumentText, ExtractionResult};

const REVERSED_RANGE_NOTE: &str = "Date range ends before it starts";

/// Built-in fields plus the structured extractors, compiled once per batch.
#[derive(Debug, Clone)]
pub struct Pipeline {
    builtin: CompiledFieldSet,
    dates: DateRangeExtractor,
    address: AddressExtractor,
    licenses: LicenseExtractor,
}

impl Pipeline {
    /// Build the pipeline from configuration.
    pub fn from_config(config: &OcrexConfig) -> Result<Self> {
        let builtin = CompiledFieldSet::compile(&config.builtin.to_session(), &config.extraction);
        Ok(Self {
            builtin,
            dates: DateRangeExtractor::with_max_gap(config.extraction.date_range_max_gap)?,
            address: AddressExtractor::new(),
            licenses: LicenseExtractor::with_taxonomy(&config.license)?,
        })
    }

    /// Extractor used for license numbers.
    pub fn licenses(&self) -> &LicenseExtractor {
        &self.licenses
    }

    /// Built-in field resolvers.
    pub fn builtin_fields(&self) -> &CompiledFieldSet {
        &self.builtin
    }

    /// Run the built-in fields, address and date range over one document.
    pub fn process_document(&self, document: &DocumentText) -> ExtractionResult {
        let start = Instant::now();
        let text = document.text.as_str();
        let resolve = |name: &str| {
            self.builtin
                .field(name)
                .and_then(|field| field.resolve(text))
                .map(|r| r.value)
        };

        let license_id = resolve(LICENSE_ID_FIELD);
        let date = resolve(DATE_FIELD);
        let reference_id = resolve(REFERENCE_ID_FIELD);
        let address = self.address.extract(text);
        let range = self.dates.extract(text);

        let mut notes = Vec::new();
        if license_id.is_none() && date.is_none() && reference_id.is_none() {
            notes.push(NO_MATCH_NOTE);
        }
        if range.as_ref().is_some_and(|r| r.is_reversed()) {
            notes.push(REVERSED_RANGE_NOTE);
        }

        debug!(
            "Processed {} in {}ms",
            document.file_name,
            start.elapsed().as_millis()
        );

        ExtractionResult {
            file_name: document.file_name.clone(),
            license_id,
            date,
            reference_id,
            address,
            start_date: range.as_ref().map(|r| r.start.clone()),
            end_date: range.map(|r| r.end),
            notes: if notes.is_empty() {
                None
            } else {
                Some(notes.join("; "))
            },
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            builtin: CompiledFieldSet::compile(
                &OcrexConfig::default().builtin.to_session(),
                &OcrexConfig::default().extraction,
            ),
            dates: DateRangeExtractor::new(),
            address: AddressExtractor::new(),
            licenses: LicenseExtractor::new(),
        }
    }
}

/// Process one document with the default pipeline.
pub fn process_document(document: &DocumentText) -> ExtractionResult {
    Pipeline::default().process_document(document)
}
