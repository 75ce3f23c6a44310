use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::EnumString;

use super::common::{non_empty, parse_calendar_date, pick_id};
use crate::standings::coerce_int;

/// A tournament (league or cup) managed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTournament")]
pub struct Tournament {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "fechaInicio", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "estado")]
    pub status: TournamentStatus,
    #[serde(rename = "maxEquipos")]
    pub max_teams: i64,
    #[serde(rename = "reglamento", skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
}

/// Lifecycle state of a tournament.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumString,
    strum_macros::Display,
)]
pub enum TournamentStatus {
    #[serde(rename = "planificado")]
    #[strum(serialize = "planificado")]
    Planned,
    #[serde(rename = "en_curso")]
    #[strum(to_string = "en_curso", serialize = "activo")]
    InProgress,
    #[serde(rename = "finalizado")]
    #[strum(serialize = "finalizado")]
    Finished,
    #[default]
    #[serde(rename = "desconocido")]
    #[strum(serialize = "desconocido")]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawTournament {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "nombre", default)]
    name: Option<String>,
    #[serde(rename = "descripcion", default)]
    description: Option<String>,
    #[serde(rename = "fechaInicio", default)]
    start_date: Option<String>,
    #[serde(rename = "fechaFin", default)]
    end_date: Option<String>,
    #[serde(rename = "estado", default)]
    status: Option<String>,
    #[serde(rename = "maxEquipos", default)]
    max_teams: Option<Value>,
    #[serde(rename = "reglamento", default)]
    rules: Option<String>,
}

impl From<RawTournament> for Tournament {
    fn from(raw: RawTournament) -> Self {
        Tournament {
            id: pick_id(raw.mongo_id, raw.id),
            name: raw.name.unwrap_or_default(),
            description: non_empty(raw.description),
            start_date: raw.start_date.as_deref().and_then(parse_calendar_date),
            end_date: raw.end_date.as_deref().and_then(parse_calendar_date),
            status: raw
                .status
                .as_deref()
                .and_then(|s| TournamentStatus::from_str(s).ok())
                .unwrap_or_default(),
            max_teams: coerce_int(raw.max_teams.as_ref()),
            rules: non_empty(raw.rules),
        }
    }
}

impl Tournament {
    pub fn is_active(&self) -> bool {
        self.status == TournamentStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_tournament() {
        let t: Tournament = serde_json::from_value(json!({
            "_id": "t1",
            "nombre": "Apertura 2024",
            "descripcion": "",
            "fechaInicio": "2024-03-01T00:00:00.000Z",
            "fechaFin": "2024-06-30",
            "estado": "en_curso",
            "maxEquipos": "16",
            "reglamento": "Victoria: 3 puntos"
        }))
        .unwrap();

        assert_eq!(t.id, "t1");
        assert_eq!(t.description, None);
        assert_eq!(t.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(t.end_date, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert!(t.is_active());
        assert_eq!(t.max_teams, 16);
    }

    #[test]
    fn test_status_aliases() {
        assert_eq!(
            TournamentStatus::from_str("activo").unwrap(),
            TournamentStatus::InProgress
        );
        assert_eq!(TournamentStatus::InProgress.to_string(), "en_curso");

        let t: Tournament =
            serde_json::from_value(json!({ "id": "t2", "estado": "archivado" })).unwrap();
        assert_eq!(t.status, TournamentStatus::Unknown);
    }
}
