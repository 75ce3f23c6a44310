use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::EntityRef;
use crate::standings::normalize_scorer;

/// A single entry of the top scorers leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawScorerRecord")]
pub struct ScorerRecord {
    #[serde(rename = "id")]
    pub player_id: String,
    #[serde(rename = "nombreCompleto")]
    pub name: String,
    #[serde(rename = "equipo", skip_serializing_if = "Option::is_none")]
    pub team: Option<EntityRef>,
    #[serde(rename = "totalGoles")]
    pub total_goals: i64,
}

/// A scorer document as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScorerRecord {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(rename = "nombreCompleto", default)]
    pub full_name: Option<String>,
    #[serde(rename = "equipo", default)]
    pub team: Option<EntityRef>,
    #[serde(rename = "equipoId", default)]
    pub team_id: Option<EntityRef>,
    #[serde(rename = "totalGoles", default)]
    pub total_goals: Option<Value>,
    #[serde(rename = "goles", default)]
    pub goals: Option<Value>,
}

impl From<RawScorerRecord> for ScorerRecord {
    fn from(raw: RawScorerRecord) -> Self {
        normalize_scorer(raw)
    }
}

impl ScorerRecord {
    pub fn new(player_id: impl Into<String>, name: impl Into<String>, total_goals: i64) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            team: None,
            total_goals,
        }
    }
}
