//! Pattern table for the built-in fields of the non-interactive pipeline.

use serde::{Deserialize, Serialize};

use crate::synth::session::FieldSession;

pub const LICENSE_ID_FIELD: &str = "license_id";
pub const DATE_FIELD: &str = "date";
pub const REFERENCE_ID_FIELD: &str = "reference_id";

/// Ordered candidate patterns for the three built-in fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltinPatterns {
    pub license_id: Vec<String>,
    pub date: Vec<String>,
    pub reference_id: Vec<String>,
}

impl Default for BuiltinPatterns {
    fn default() -> Self {
        Self {
            license_id: owned(&[
                r"\bLIC[-_\s]?\d{3,}\b",
                r"\bLicense\s*ID[#:\-]*\s*([A-Z0-9]{6,20})\b",
                r"\b[A-Z0-9]{6,20}\b",
            ]),
            date: owned(&[
                r"\b\d{2}[/\-]\d{2}[/\-]\d{4}\b",
                r"\b\d{4}[/\-]\d{2}[/\-]\d{2}\b",
            ]),
            reference_id: owned(&[
                r"\bREF[-_\s]*([A-Z0-9]{4,10})\b",
                r"\b(?:Reference|Ref)[\s#:\-]*([A-Z0-9\-]{4,10})\b",
                r"\b[A-Z0-9]{4,10}\b",
            ]),
        }
    }
}

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

impl BuiltinPatterns {
    /// The table as a field session, fields in `license_id, date, reference_id` order.
    pub fn to_session(&self) -> FieldSession {
        let mut session = FieldSession::new();
        session.add_patterns(LICENSE_ID_FIELD, self.license_id.iter().cloned());
        session.add_patterns(DATE_FIELD, self.date.iter().cloned());
        session.add_patterns(REFERENCE_ID_FIELD, self.reference_id.iter().cloned());
        session
    }
}
