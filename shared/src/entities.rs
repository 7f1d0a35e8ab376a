//! Typed records decoded from raw store documents.
//!
//! The store is schema-flexible, so decoding is lenient: missing or `null`
//! text fields become empty, a favourite flag counts only when it is the
//! boolean `true`, and timestamps are accepted as epoch millis or as a
//! `{seconds, nanoseconds}` object. The store-issued id always wins over a
//! document field of the same name. Legacy key spellings are folded into
//! the current key before decoding.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    capabilities::Document,
    model::{AddressId, CategoryId, EventId, ExampleId, UnixTimeMs},
    strings,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("document has no id")]
    MissingId,

    #[error("document {id} is malformed: {reason}")]
    Malformed { id: String, reason: String },
}

/// A record that knows its own store id.
pub trait Record: DeserializeOwned {
    /// Legacy field spellings as `(legacy, current)` pairs. The current key
    /// wins when a document carries both.
    const LEGACY_KEYS: &'static [(&'static str, &'static str)] = &[];

    fn record_id(&self) -> &str;
}

pub fn decode<T: Record>(doc: Document) -> Result<T, DecodeError> {
    let Document { id, mut fields } = doc;
    if id.trim().is_empty() {
        return Err(DecodeError::MissingId);
    }
    fields.insert("id".to_string(), Value::String(id.clone()));
    for &(legacy, current) in T::LEGACY_KEYS {
        let Some(value) = fields.remove(legacy) else {
            continue;
        };
        if fields.get(current).map_or(true, Value::is_null) {
            fields.insert(current.to_string(), value);
        }
    }
    serde_json::from_value(Value::Object(fields)).map_err(|e| DecodeError::Malformed {
        id,
        reason: e.to_string(),
    })
}

/// Decodes every document, skipping the malformed ones with a warning.
pub fn decode_all<T: Record>(docs: Vec<Document>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match decode(doc) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable document");
                None
            }
        })
        .collect()
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = lenient_string(deserializer)?;
    Ok((!s.trim().is_empty()).then_some(s))
}

fn strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<UnixTimeMs>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().map(UnixTimeMs),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_u64);
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            seconds.map(|s| UnixTimeMs(s.saturating_mul(1000).saturating_add(nanos / 1_000_000)))
        }
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityEvent {
    pub id: EventId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, rename = "imageUrl", deserialize_with = "lenient_opt_string")]
    pub image_url: Option<String>,
    #[serde(default, rename = "organizator", deserialize_with = "lenient_opt_string")]
    pub organizer: Option<String>,
    #[serde(default, rename = "createdAt", deserialize_with = "lenient_timestamp")]
    pub created_at: Option<UnixTimeMs>,
}

impl Record for CommunityEvent {
    const LEGACY_KEYS: &'static [(&'static str, &'static str)] = &[("organizer", "organizator")];

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    #[serde(default, rename = "naziv", deserialize_with = "lenient_string")]
    pub name: String,
    /// Free-text pickup schedule for the current week.
    #[serde(default, rename = "odvoz", deserialize_with = "lenient_string")]
    pub pickup: String,
    #[serde(default, rename = "slika", deserialize_with = "lenient_opt_string")]
    pub image: Option<String>,
    #[serde(default, rename = "heart", deserialize_with = "strict_true")]
    pub favorite: bool,
}

impl Address {
    #[must_use]
    pub fn is_favorite(&self) -> bool {
        self.favorite
    }
}

impl Record for Address {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceCategory {
    pub id: CategoryId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

impl Record for AdviceCategory {
    const LEGACY_KEYS: &'static [(&'static str, &'static str)] = &[("naziv", "title")];

    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceExample {
    pub id: ExampleId,
    #[serde(default, rename = "primjer", deserialize_with = "lenient_string")]
    pub example: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
}

impl AdviceExample {
    /// Display title, with a placeholder for examples saved without one.
    #[must_use]
    pub fn title(&self) -> &str {
        if self.example.is_empty() {
            strings::UNTITLED
        } else {
            &self.example
        }
    }
}

impl Record for AdviceExample {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}

/// The advice document re-read by the detail screen; only its description
/// is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceDocument {
    pub id: ExampleId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

impl Record for AdviceDocument {
    fn record_id(&self) -> &str {
        self.id.as_str()
    }
}
