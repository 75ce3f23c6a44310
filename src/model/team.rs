use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::EntityRef;
use crate::standings::normalize_team;

/// A team's standing statistics as delivered by the backend.
///
/// Deserialising always goes through [`RawTeamRecord`] and the normalizer,
/// so the four numeric fields are definite integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTeamRecord")]
pub struct TeamRecord {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "puntos")]
    pub points: i64,
    #[serde(rename = "golesAFavor")]
    pub goals_for: i64,
    #[serde(rename = "golesEnContra")]
    pub goals_against: i64,
    #[serde(rename = "diferenciaGoles")]
    pub goal_difference: i64,
    #[serde(rename = "escudo", skip_serializing_if = "Option::is_none")]
    pub crest_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "torneoId", skip_serializing_if = "Option::is_none")]
    pub tournament: Option<EntityRef>,
    #[serde(rename = "zonaId", skip_serializing_if = "Option::is_none")]
    pub zone: Option<EntityRef>,
    #[serde(rename = "jugadores", skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<EntityRef>,
}

/// A team document exactly as the backend sends it. Any numeric field may be
/// missing, `null`, a string or a float.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeamRecord {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "puntos", default)]
    pub points: Option<Value>,
    #[serde(rename = "golesAFavor", default)]
    pub goals_for: Option<Value>,
    #[serde(rename = "golesEnContra", default)]
    pub goals_against: Option<Value>,
    #[serde(rename = "diferenciaGoles", default)]
    pub goal_difference: Option<Value>,
    #[serde(rename = "escudo", default)]
    pub crest_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "torneoId", default)]
    pub tournament: Option<EntityRef>,
    #[serde(rename = "zonaId", default)]
    pub zone: Option<EntityRef>,
    #[serde(rename = "jugadores", default)]
    pub players: Option<Vec<EntityRef>>,
}

impl From<RawTeamRecord> for TeamRecord {
    fn from(raw: RawTeamRecord) -> Self {
        normalize_team(raw)
    }
}

impl TeamRecord {
    /// A team with the given identity and all statistics at zero.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            crest_url: None,
            color: None,
            tournament: None,
            zone: None,
            players: Vec::new(),
        }
    }
}
