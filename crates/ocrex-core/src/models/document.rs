//! Documents and extraction output rows.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Column name used for the file name in every output row.
pub const FILE_NAME_COLUMN: &str = "File Name";

/// Column holding a document's text in imported CSV files.
pub const TEXT_COLUMN: &str = "Text";

/// Full OCR text of one document.
///
/// Page texts are joined by the source's page separator, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentText {
    /// File name (not the full path).
    #[serde(rename = "File Name")]
    pub file_name: String,
    /// Concatenated text. May be empty, but must be present when read back.
    #[serde(rename = "Text")]
    pub text: String,
}

impl DocumentText {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }

    /// Build a document from per-page texts.
    pub fn from_pages<I, S>(file_name: impl Into<String>, pages: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = pages
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(separator);
        Self::new(file_name, text)
    }
}

/// One output row: a file name plus field values in field definition order.
///
/// Fields that did not resolve hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionRow {
    pub file_name: String,
    pub fields: Vec<(String, String)>,
}

impl ExtractionRow {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            fields: Vec::new(),
        }
    }

    /// Set a field value, replacing an existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Value of a field, if the row has that column.
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == FILE_NAME_COLUMN {
            return Some(&self.file_name);
        }
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Column names, starting with the file name column.
    pub fn columns(&self) -> Vec<&str> {
        std::iter::once(FILE_NAME_COLUMN)
            .chain(self.fields.iter().map(|(n, _)| n.as_str()))
            .collect()
    }

    /// Values aligned with `columns`, missing columns as empty strings.
    pub fn values_for<'a>(&'a self, columns: &[&str]) -> Vec<&'a str> {
        columns
            .iter()
            .map(|c| self.get(c).unwrap_or(""))
            .collect()
    }

    /// True when every field value is empty.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }
}

impl Serialize for ExtractionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(FILE_NAME_COLUMN, &self.file_name)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Result of the built-in (non-interactive) pipeline for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "File Name")]
    pub file_name: String,
    #[serde(rename = "License ID")]
    pub license_id: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Reference ID")]
    pub reference_id: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Start Date")]
    pub start_date: Option<String>,
    #[serde(rename = "End Date")]
    pub end_date: Option<String>,
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
}

impl ExtractionResult {
    /// Result for a document whose text could not be obtained.
    pub fn failed(file_name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            file_name: file_name.into(),
            notes: Some(format!("Error: {}", reason)),
            ..Self::default()
        }
    }

    /// Flatten into a generic row, keeping the column order of the CSV output.
    pub fn to_row(&self) -> ExtractionRow {
        let mut row = ExtractionRow::new(&self.file_name);
        let columns = [
            ("License ID", &self.license_id),
            ("Date", &self.date),
            ("Reference ID", &self.reference_id),
            ("Address", &self.address),
            ("Start Date", &self.start_date),
            ("End Date", &self.end_date),
            ("Notes", &self.notes),
        ];
        for (name, value) in columns {
            row.set(name, value.clone().unwrap_or_default());
        }
        row
    }
}
