use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{non_empty, parse_calendar_date, pick_id, EntityRef};
use crate::standings::coerce_int;

/// A registered player with their season counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPlayer")]
pub struct Player {
    pub id: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "posicion", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "dorsal", skip_serializing_if = "Option::is_none")]
    pub shirt_number: Option<i64>,
    #[serde(rename = "equipoId", skip_serializing_if = "Option::is_none")]
    pub team: Option<EntityRef>,
    #[serde(rename = "fechaNacimiento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "nacionalidad", skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(rename = "altura", skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "peso", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "foto", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(rename = "goles")]
    pub goals: i64,
    #[serde(rename = "tarjetasAmarillas")]
    pub yellow_cards: i64,
    #[serde(rename = "tarjetasRojas")]
    pub red_cards: i64,
    #[serde(rename = "partidos")]
    pub matches_played: i64,
}

impl Player {
    /// First and last name joined, ignoring blank parts.
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawPlayer {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "nombre", default)]
    first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    last_name: Option<String>,
    #[serde(rename = "posicion", default)]
    position: Option<String>,
    #[serde(rename = "dorsal", default)]
    shirt_number: Option<Value>,
    #[serde(rename = "equipoId", default)]
    team_id: Option<EntityRef>,
    #[serde(rename = "equipo", default)]
    team: Option<EntityRef>,
    #[serde(rename = "fechaNacimiento", default)]
    birth_date: Option<String>,
    #[serde(rename = "nacionalidad", default)]
    nationality: Option<String>,
    #[serde(rename = "altura", default)]
    height: Option<Value>,
    #[serde(rename = "peso", default)]
    weight: Option<Value>,
    #[serde(rename = "foto", default)]
    photo_url: Option<String>,
    #[serde(rename = "goles", default)]
    goals: Option<Value>,
    #[serde(rename = "tarjetasAmarillas", default)]
    yellow_cards: Option<Value>,
    #[serde(rename = "tarjetasRojas", default)]
    red_cards: Option<Value>,
    #[serde(rename = "partidos", default)]
    matches_played: Option<Value>,
}

fn measure(value: Option<Value>) -> Option<f64> {
    let measured = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    measured.filter(|m| m.is_finite() && *m > 0.0)
}

impl From<RawPlayer> for Player {
    fn from(raw: RawPlayer) -> Self {
        let shirt_number = raw
            .shirt_number
            .filter(|v| !v.is_null())
            .map(|v| coerce_int(Some(&v)))
            .filter(|n| *n > 0);

        Player {
            id: pick_id(raw.mongo_id, raw.id),
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            position: non_empty(raw.position),
            shirt_number,
            // The populated `equipo` carries the team name.
            team: raw.team.or(raw.team_id),
            birth_date: raw.birth_date.as_deref().and_then(parse_calendar_date),
            nationality: non_empty(raw.nationality),
            height: measure(raw.height),
            weight: measure(raw.weight),
            photo_url: non_empty(raw.photo_url),
            goals: coerce_int(raw.goals.as_ref()),
            yellow_cards: coerce_int(raw.yellow_cards.as_ref()),
            red_cards: coerce_int(raw.red_cards.as_ref()),
            matches_played: coerce_int(raw.matches_played.as_ref()),
        }
    }
}
