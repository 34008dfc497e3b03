//! Raw record shapes as they appear in the index file.
//!
//! These mirror the JSON loosely; [`super::model`] resolves every default
//! once when converting them into typed values.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One top-level record: `{"type": "...", "metadata": {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAlbum {
    pub name: String,
    pub file_id: String,
    pub release_date: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub length: Option<String>,
    #[serde(default)]
    pub discs: Option<Value>,
    #[serde(default)]
    pub sides: Option<Value>,
    #[serde(default, deserialize_with = "opt_text")]
    pub image_file_name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub producers: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub label: Option<String>,
    #[serde(default, rename = "with", deserialize_with = "opt_text")]
    pub with_: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub live: Option<String>,
    #[serde(default)]
    pub songs: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSong {
    pub index: u32,
    #[serde(default, deserialize_with = "opt_text")]
    pub actual_name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub file_id: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub instrumental: bool,
    #[serde(default)]
    pub written_and_performed_by: Option<RawCredits>,
    #[serde(default, deserialize_with = "opt_text")]
    pub sung_by: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub written_by: Option<String>,
    #[serde(default, alias = "from")]
    pub source: Option<RawSource>,
    #[serde(default, deserialize_with = "opt_text")]
    pub duet: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub live: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCredits {
    #[serde(default, deserialize_with = "opt_text")]
    pub performed_by: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub written_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSource {
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub file_id: Option<String>,
}

/// Accept strings, numbers and booleans as text; empty strings and `null`
/// become `None`.
fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("yes".to_string()),
        _ => None,
    })
}

/// Truthiness of a flag attribute: `true`, a non-empty string, or a
/// non-zero number.
fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    })
}
