//! Core data models for the ingest pipelines.
//!
//! [`RawRecord`] is the typed, tolerant view of one externally-sourced Q&A
//! item. Every field the normalizer reads is optional; everything else is
//! preserved verbatim through the flattened `extra` map so the archive can
//! store records unmodified. [`IndexEntry`] and [`DocEntry`] are the two
//! shapes that land in the site index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One Q&A item as found in a source dump, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RawMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Nested metadata block of a raw record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecord {
    /// The record identifier rendered as a trimmed string. Numeric ids are
    /// accepted the same way string ids are; any other shape yields an empty
    /// string and the record is skipped upstream.
    pub fn id_str(&self) -> String {
        match &self.id {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

/// Canonical entry appended to the site index for one merged Q&A record.
///
/// The front end only understands the fields up to `type`; the provenance
/// tail (`source` through `src`) is carried for traceability and ignored by
/// other consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub number: i64,
    pub title_he: String,
    pub title_en: String,
    pub summary_he: String,
    pub summary_en: String,
    pub category: String,
    pub category_he: String,
    pub category_en: String,
    pub date: String,
    pub year: i32,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    pub source_url: Option<String>,
    pub tags: Vec<String>,
    pub source_id: String,
    pub src: String,
}

/// Index entry for one document file from the responsa tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocEntry {
    pub title_he: String,
    pub title_en: String,
    pub summary_he: String,
    pub summary_en: String,
    pub category: String,
    pub category_he: String,
    pub category_en: String,
    pub date: String,
    pub year: i32,
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub number: i64,
}
