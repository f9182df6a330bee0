// ABOUTME: Record models produced by extraction: ExtractionResult and LinkRecord.
// ABOUTME: Serialized field names form the persisted output; optional fields are omitted when empty.

use serde::{Deserialize, Serialize};

/// Outer HTML of the elements a detail record was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMarkup {
    pub descriptions: Vec<String>,
    pub tags: Vec<String>,
}

/// One record per detail-page target, successful or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub source: String,
    pub name: String,
    pub descriptions: Vec<String>,
    pub tags: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawMarkup>,
}

impl ExtractionResult {
    /// An error-shaped record: every content field left empty.
    pub fn failed(source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Returns true if this record carries an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A cross-reference link found in a listing page's title cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub title: String,
    pub href: String,
    pub lang: String,
    pub text: String,
    pub source: String,
}
