//! Fixed, domain-specific field extractors.

pub mod address;
pub mod builtin;
pub mod dates;
pub mod license;
pub mod patterns;

pub use address::{extract_address_between_markers, AddressExtractor};
pub use builtin::BuiltinPatterns;
pub use dates::{extract_date_range, normalize_date, DateRange, DateRangeExtractor};
pub use license::{
    extract_all_license_numbers, normalize_text_for_license, LicenseExtractor, LicenseMatches,
    LicenseTaxonomy, LicenseType,
};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
