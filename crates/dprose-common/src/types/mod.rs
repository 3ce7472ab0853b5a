//! Common types shared between the converter and the served output

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Identifiers
// ============================================================================

/// Prefix joining raw dprose ids to metadata ids
pub const ID_PREFIX: &str = "dprose_";

/// Name of the index file written next to the per-record files
pub const INDEX_FILE_NAME: &str = "index.json";

/// Key holding the raw id in classification records
pub const RAW_ID_FIELD: &str = "dprose_id";

/// Build the canonical cross-reference id for a raw id.
pub fn prefixed_id(raw: &str) -> String {
    format!("{ID_PREFIX}{raw}")
}

/// Name of the output file for a record.
///
/// Uses the raw id: `dprose_{raw}.json`. The file name happens to share the
/// prefix with the prefixed id but is derived from the raw form.
pub fn record_file_name(raw: &str) -> String {
    format!("dprose_{raw}.json")
}

/// Textual form of a raw `dprose_id` value.
///
/// Strings are used verbatim and numbers keep their JSON representation.
/// Other JSON kinds have no id form.
pub fn raw_id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Metadata describing one source text, as served in `index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Prefixed id (`dprose_<ID>`)
    pub id: String,

    /// Origin repository name
    pub source: String,

    pub author: String,

    pub title: String,

    /// Serialized as `null` when unknown
    pub release_year: Option<String>,
}

impl MetadataRecord {
    /// Create a record from an unprefixed id
    pub fn new(
        raw_id: &str,
        source: impl Into<String>,
        author: impl Into<String>,
        title: impl Into<String>,
        release_year: Option<String>,
    ) -> Self {
        Self {
            id: prefixed_id(raw_id),
            source: source.into(),
            author: author.into(),
            title: title.into(),
            release_year,
        }
    }
}
