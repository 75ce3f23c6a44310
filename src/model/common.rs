use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference to another entity.
///
/// The backend sends references either as a bare id string or as a
/// populated document (`{ "_id": ..., "nombre": ... }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRef")]
pub struct EntityRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRef {
    Id(String),
    Document(RefDocument),
}

#[derive(Deserialize)]
struct RefDocument {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "nombreCompleto", default)]
    full_name: Option<String>,
    #[serde(rename = "nombre", default)]
    nombre: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<RawRef> for EntityRef {
    fn from(raw: RawRef) -> Self {
        match raw {
            RawRef::Id(id) => EntityRef::new(id),
            RawRef::Document(doc) => EntityRef {
                id: pick_id(doc.mongo_id, doc.id),
                name: non_empty(doc.full_name)
                    .or_else(|| non_empty(doc.nombre))
                    .or_else(|| non_empty(doc.name)),
            },
        }
    }
}

/// Pick the identity of a document that may carry `_id`, `id`, or both.
pub(crate) fn pick_id(mongo_id: Option<String>, id: Option<String>) -> String {
    non_empty(mongo_id).or_else(|| non_empty(id)).unwrap_or_default()
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a backend date into a calendar date.
///
/// Accepts RFC 3339 timestamps (the UTC date is kept), bare `YYYY-MM-DD`
/// dates, and offset-less `YYYY-MM-DDTHH:MM:SS` timestamps.
pub(crate) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
