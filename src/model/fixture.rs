use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::EnumString;
use tracing::warn;

use super::common::{non_empty, parse_calendar_date, pick_id, EntityRef};
use crate::error::{Result, TorneoError};
use crate::standings::coerce_int;

const KICKOFF_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];
const STRICT_KICKOFF_FORMAT: &str = "%H:%M";

/// A single fixture: scheduling data plus the result once it is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMatchRecord", into = "RawMatchRecord")]
pub struct MatchRecord {
    pub id: String,
    pub tournament: Option<EntityRef>,
    pub home_team: EntityRef,
    pub away_team: EntityRef,
    pub date: Option<NaiveDate>,
    pub kickoff: KickoffTime,
    pub venue: String,
    pub phase: Option<String>,
    pub status: MatchStatus,
    pub score: Option<Score>,
    pub zone: Option<EntityRef>,
    pub goals: Vec<Goal>,
}

/// Final or running score of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Score {
    pub home: i64,
    pub away: i64,
}

/// Which side of a fixture something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString)]
pub enum Side {
    #[serde(rename = "local")]
    #[strum(serialize = "local")]
    Home,
    #[serde(rename = "visitante")]
    #[strum(serialize = "visitante")]
    Away,
}

/// A goal scored in a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Goal {
    pub player: Option<EntityRef>,
    pub minute: i64,
    pub side: Side,
}

/// Lifecycle state of a match.
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
pub enum MatchStatus {
    #[serde(rename = "programado")]
    #[strum(serialize = "programado")]
    Scheduled,
    #[serde(rename = "en_curso")]
    #[strum(serialize = "en_curso")]
    InProgress,
    #[serde(rename = "jugado")]
    #[strum(serialize = "jugado")]
    Played,
    #[serde(rename = "suspendido")]
    #[strum(serialize = "suspendido")]
    Suspended,
    #[default]
    #[serde(rename = "desconocido")]
    #[strum(serialize = "desconocido")]
    Unknown,
}

/// Kickoff time of a match as entered by an administrator.
///
/// The raw text is kept for display. Ordering uses the parsed time of day;
/// parsable times sort before unparsable ones and the raw text breaks ties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct KickoffTime {
    raw: String,
    parsed: Option<NaiveTime>,
}

impl KickoffTime {
    /// Parse leniently. Accepts `H:MM`, `HH:MM`, `HH:MM:SS` and 12-hour
    /// `h:MM AM`; anything else is kept as unparsed text.
    pub fn lenient(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        let parsed = KICKOFF_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok());
        Self { raw, parsed }
    }

    /// Parse a zero-padded 24-hour `HH:MM` time, the only format accepted
    /// when creating or editing a match.
    pub fn parse_strict(raw: &str) -> Result<Self> {
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !well_formed {
            return Err(TorneoError::InvalidKickoff(raw.to_owned()));
        }
        let parsed = NaiveTime::parse_from_str(raw, STRICT_KICKOFF_FORMAT)
            .map_err(|_| TorneoError::InvalidKickoff(raw.to_owned()))?;
        Ok(Self {
            raw: raw.to_owned(),
            parsed: Some(parsed),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.parsed
    }
}

impl Ord for KickoffTime {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.parsed, other.parsed) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for KickoffTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for KickoffTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.raw)
    }
}

impl From<String> for KickoffTime {
    fn from(raw: String) -> Self {
        Self::lenient(raw)
    }
}

impl From<KickoffTime> for String {
    fn from(kickoff: KickoffTime) -> Self {
        kickoff.raw
    }
}

impl MatchRecord {
    /// The side that won, or `None` for a draw or a match without a score.
    pub fn winner(&self) -> Option<Side> {
        let score = self.score?;
        match score.home.cmp(&score.away) {
            Ordering::Greater => Some(Side::Home),
            Ordering::Less => Some(Side::Away),
            Ordering::Equal => None,
        }
    }

    pub fn team(&self, side: Side) -> &EntityRef {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }
}

/// A match document in the backend's wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawMatchRecord {
    #[serde(rename = "_id", default, skip_serializing)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "torneoId", default, skip_serializing_if = "Option::is_none")]
    tournament: Option<EntityRef>,
    #[serde(rename = "equipoLocal", default)]
    home_team: Option<EntityRef>,
    #[serde(rename = "equipoVisitante", default)]
    away_team: Option<EntityRef>,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(rename = "horario", default)]
    kickoff: Option<String>,
    #[serde(rename = "cancha", default)]
    venue: Option<String>,
    #[serde(rename = "fase", default, skip_serializing_if = "Option::is_none")]
    phase: Option<String>,
    #[serde(rename = "estado", default)]
    status: Option<String>,
    #[serde(rename = "golesLocal", default, skip_serializing_if = "Option::is_none")]
    home_goals: Option<Value>,
    #[serde(rename = "golesVisitante", default, skip_serializing_if = "Option::is_none")]
    away_goals: Option<Value>,
    #[serde(rename = "tieneResultado", default, skip_serializing_if = "Option::is_none")]
    has_result: Option<bool>,
    #[serde(rename = "zonaId", default, skip_serializing_if = "Option::is_none")]
    zone: Option<EntityRef>,
    #[serde(rename = "goles", default, skip_serializing_if = "Vec::is_empty")]
    goals: Vec<RawGoal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawGoal {
    #[serde(rename = "jugadorId", default, skip_serializing_if = "Option::is_none")]
    player: Option<EntityRef>,
    #[serde(rename = "minuto", default)]
    minute: Option<Value>,
    #[serde(rename = "equipo", default)]
    side: Option<String>,
}

impl From<RawMatchRecord> for MatchRecord {
    fn from(raw: RawMatchRecord) -> Self {
        let id = pick_id(raw.mongo_id, raw.id);

        let date = raw.date.as_deref().and_then(|d| {
            let parsed = parse_calendar_date(d);
            if parsed.is_none() {
                warn!(match_id = %id, date = d, "unparsable match date");
            }
            parsed
        });

        let status = match raw.status.as_deref() {
            Some(s) => MatchStatus::from_str(s).unwrap_or_else(|_| {
                warn!(match_id = %id, status = s, "unknown match status");
                MatchStatus::Unknown
            }),
            None => MatchStatus::Unknown,
        };

        let has_numeric_goals = matches!(raw.home_goals, Some(Value::Number(_)))
            && matches!(raw.away_goals, Some(Value::Number(_)));
        let score = raw
            .has_result
            .unwrap_or(has_numeric_goals)
            .then(|| Score {
                home: coerce_int(raw.home_goals.as_ref()),
                away: coerce_int(raw.away_goals.as_ref()),
            });

        let goals = raw
            .goals
            .into_iter()
            .filter_map(|goal| {
                let side = goal.side.as_deref().and_then(|s| Side::from_str(s).ok());
                if side.is_none() {
                    warn!(match_id = %id, side = ?goal.side, "skipping goal without a side");
                }
                Some(Goal {
                    player: goal.player,
                    minute: coerce_int(goal.minute.as_ref()),
                    side: side?,
                })
            })
            .collect();

        MatchRecord {
            tournament: raw.tournament,
            home_team: raw.home_team.unwrap_or_else(|| EntityRef::new("")),
            away_team: raw.away_team.unwrap_or_else(|| EntityRef::new("")),
            date,
            kickoff: KickoffTime::lenient(raw.kickoff.unwrap_or_default()),
            venue: raw.venue.unwrap_or_default(),
            phase: non_empty(raw.phase),
            status,
            score,
            zone: raw.zone,
            goals,
            id,
        }
    }
}

impl From<MatchRecord> for RawMatchRecord {
    fn from(record: MatchRecord) -> Self {
        RawMatchRecord {
            mongo_id: None,
            id: Some(record.id),
            tournament: record.tournament,
            home_team: Some(record.home_team),
            away_team: Some(record.away_team),
            date: record.date.map(|d| d.format("%Y-%m-%d").to_string()),
            kickoff: Some(record.kickoff.into()),
            venue: Some(record.venue),
            phase: record.phase,
            status: Some(record.status.to_string()),
            home_goals: record.score.map(|s| Value::from(s.home)),
            away_goals: record.score.map(|s| Value::from(s.away)),
            has_result: Some(record.score.is_some()),
            zone: record.zone,
            goals: record
                .goals
                .into_iter()
                .map(|goal| RawGoal {
                    player: goal.player,
                    minute: Some(Value::from(goal.minute)),
                    side: Some(
                        match goal.side {
                            Side::Home => "local",
                            Side::Away => "visitante",
                        }
                        .to_owned(),
                    ),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "_id": "m1",
            "id": "m1",
            "torneoId": { "_id": "t1", "nombre": "Apertura" },
            "equipoLocal": { "_id": "a", "nombre": "Atlético Norte", "diferenciaGoles": null },
            "equipoVisitante": { "_id": "b", "nombre": "Deportivo Sur" },
            "golesLocal": 2,
            "golesVisitante": 1,
            "fecha": "2024-03-01T00:00:00.000Z",
            "cancha": "Field A",
            "horario": "15:00",
            "fase": "grupos",
            "estado": "jugado",
            "tieneResultado": true,
            "goles": [
                { "jugadorId": { "_id": "p1", "nombreCompleto": "Ana Pérez" }, "minuto": 12, "equipo": "local" },
                { "jugadorId": "p2", "minuto": "40", "equipo": "visitante" },
                { "jugadorId": "p3", "minuto": 77, "equipo": "local" }
            ]
        })
    }

    #[test]
    fn test_decode_match() {
        let record: MatchRecord = serde_json::from_value(sample()).unwrap();

        assert_eq!(record.id, "m1");
        assert_eq!(record.tournament, Some(EntityRef::named("t1", "Apertura")));
        assert_eq!(record.home_team.name.as_deref(), Some("Atlético Norte"));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(record.kickoff.time(), NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(record.status, MatchStatus::Played);
        assert_eq!(record.score, Some(Score { home: 2, away: 1 }));
        assert_eq!(record.winner(), Some(Side::Home));
        assert_eq!(record.goals.len(), 3);
        assert_eq!(record.goals[1].minute, 40);
        assert_eq!(record.goals[1].side, Side::Away);
    }

    #[test]
    fn test_scheduled_match_has_no_score() {
        let record: MatchRecord = serde_json::from_value(json!({
            "_id": "m2",
            "equipoLocal": "a",
            "equipoVisitante": "b",
            "golesLocal": 0,
            "golesVisitante": 0,
            "tieneResultado": false,
            "fecha": "2024-03-08",
            "horario": "9:30",
            "cancha": "Field B",
            "estado": "programado"
        }))
        .unwrap();

        assert_eq!(record.status, MatchStatus::Scheduled);
        assert_eq!(record.score, None);
        assert_eq!(record.winner(), None);
        assert_eq!(record.kickoff.time(), NaiveTime::from_hms_opt(9, 30, 0));
    }

    #[test]
    fn test_score_inferred_without_flag() {
        let record: MatchRecord = serde_json::from_value(json!({
            "_id": "m3",
            "golesLocal": 1,
            "golesVisitante": 1,
            "estado": "en_curso"
        }))
        .unwrap();

        assert_eq!(record.status, MatchStatus::InProgress);
        assert_eq!(record.score, Some(Score { home: 1, away: 1 }));
        assert_eq!(record.winner(), None);
    }

    #[test]
    fn test_unknown_status_and_bad_date() {
        let record: MatchRecord = serde_json::from_value(json!({
            "_id": "m4",
            "estado": "postergado",
            "fecha": "sometime"
        }))
        .unwrap();

        assert_eq!(record.status, MatchStatus::Unknown);
        assert_eq!(record.date, None);
        assert_eq!(record.kickoff.time(), None);
    }

    #[test]
    fn test_match_survives_its_own_serialization() {
        let record: MatchRecord = serde_json::from_value(sample()).unwrap();
        let back: MatchRecord =
            serde_json::from_value(serde_json::to_value(&record).unwrap()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_kickoff_strict_parsing() {
        assert!(KickoffTime::parse_strict("09:05").is_ok());
        assert!(KickoffTime::parse_strict("23:59").is_ok());
        assert!(matches!(
            KickoffTime::parse_strict("9:05"),
            Err(TorneoError::InvalidKickoff(_))
        ));
        assert!(KickoffTime::parse_strict("24:00").is_err());
        assert!(KickoffTime::parse_strict("3:00 PM").is_err());
        assert!(KickoffTime::parse_strict("12-30").is_err());
    }

    #[test]
    fn test_kickoff_ordering_is_numeric() {
        let early = KickoffTime::lenient("9:30");
        let late = KickoffTime::lenient("13:30");
        let pm = KickoffTime::lenient("03:00 PM");
        let garbage = KickoffTime::lenient("a definir");

        // "9:30" > "13:30" as strings, but not as times of day.
        assert!(early < late);
        assert!(late < pm);
        assert!(pm < garbage);
    }
}
