use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{non_empty, pick_id, EntityRef};
use super::team::{RawTeamRecord, TeamRecord};
use crate::standings::{coerce_int, rank_teams};

/// A group within a tournament, with the teams assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawZone")]
pub struct Zone {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "torneoId", skip_serializing_if = "Option::is_none")]
    pub tournament: Option<EntityRef>,
    #[serde(rename = "equipos")]
    pub teams: Vec<TeamRecord>,
}

impl Zone {
    /// The zone's teams ranked by points, then goal difference.
    pub fn standings(&self) -> Vec<TeamRecord> {
        rank_teams(&self.teams)
    }
}

/// One row of a zone table as computed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStandingRow")]
pub struct StandingRow {
    #[serde(rename = "equipoId")]
    pub team_id: String,
    #[serde(rename = "equipoNombre")]
    pub team_name: String,
    #[serde(rename = "puntos")]
    pub points: i64,
    #[serde(rename = "partidosJugados")]
    pub played: i64,
    #[serde(rename = "partidosGanados")]
    pub won: i64,
    #[serde(rename = "partidosEmpatados")]
    pub drawn: i64,
    #[serde(rename = "partidosPerdidos")]
    pub lost: i64,
    #[serde(rename = "golesAFavor")]
    pub goals_for: i64,
    #[serde(rename = "golesEnContra")]
    pub goals_against: i64,
    #[serde(rename = "diferenciaGoles")]
    pub goal_difference: i64,
    #[serde(rename = "posicion")]
    pub position: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawStandingRow {
    #[serde(rename = "equipoId", default)]
    team_id: Option<String>,
    #[serde(rename = "equipoNombre", default)]
    team_name: Option<String>,
    #[serde(rename = "puntos", default)]
    points: Option<Value>,
    #[serde(rename = "partidosJugados", default)]
    played: Option<Value>,
    #[serde(rename = "partidosGanados", default)]
    won: Option<Value>,
    #[serde(rename = "partidosEmpatados", default)]
    drawn: Option<Value>,
    #[serde(rename = "partidosPerdidos", default)]
    lost: Option<Value>,
    #[serde(rename = "golesAFavor", default)]
    goals_for: Option<Value>,
    #[serde(rename = "golesEnContra", default)]
    goals_against: Option<Value>,
    #[serde(rename = "diferenciaGoles", default)]
    goal_difference: Option<Value>,
    #[serde(rename = "posicion", default)]
    position: Option<Value>,
}

impl From<RawStandingRow> for StandingRow {
    fn from(raw: RawStandingRow) -> Self {
        StandingRow {
            team_id: raw.team_id.unwrap_or_default(),
            team_name: raw.team_name.unwrap_or_default(),
            points: coerce_int(raw.points.as_ref()),
            played: coerce_int(raw.played.as_ref()),
            won: coerce_int(raw.won.as_ref()),
            drawn: coerce_int(raw.drawn.as_ref()),
            lost: coerce_int(raw.lost.as_ref()),
            goals_for: coerce_int(raw.goals_for.as_ref()),
            goals_against: coerce_int(raw.goals_against.as_ref()),
            goal_difference: coerce_int(raw.goal_difference.as_ref()),
            position: coerce_int(raw.position.as_ref()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawZone {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "nombre", default)]
    name: Option<String>,
    #[serde(rename = "descripcion", default)]
    description: Option<String>,
    #[serde(rename = "torneoId", default)]
    tournament: Option<EntityRef>,
    #[serde(rename = "equipos", default)]
    teams: Vec<ZoneTeam>,
}

/// Zone members arrive populated on reads and as bare ids after writes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ZoneTeam {
    Id(String),
    Team(TeamRecord),
}

impl From<RawZone> for Zone {
    fn from(raw: RawZone) -> Self {
        Zone {
            id: pick_id(raw.mongo_id, raw.id),
            name: raw.name.unwrap_or_default(),
            description: non_empty(raw.description),
            tournament: raw.tournament,
            teams: raw
                .teams
                .into_iter()
                .map(|team| match team {
                    ZoneTeam::Id(id) => TeamRecord::from(RawTeamRecord {
                        id: Some(id),
                        ..RawTeamRecord::default()
                    }),
                    ZoneTeam::Team(team) => team,
                })
                .collect(),
        }
    }
}
