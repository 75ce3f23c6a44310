use chrono::NaiveDate;
use serde::Serialize;

use super::fixture::{KickoffTime, MatchStatus};
use super::tournament::TournamentStatus;
use crate::error::{Result, TorneoError};

/// Payload for creating or updating a tournament. Unset fields are left
/// untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TournamentInput {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "fechaInicio", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fechaFin", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<TournamentStatus>,
    #[serde(rename = "maxEquipos", skip_serializing_if = "Option::is_none")]
    pub max_teams: Option<u32>,
    #[serde(rename = "reglamento", skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
}

/// Payload for creating or updating a team.
///
/// `crest_url` is the address of an already uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamInput {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "escudo", skip_serializing_if = "Option::is_none")]
    pub crest_url: Option<String>,
    #[serde(rename = "torneoId", skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    #[serde(rename = "zonaId", skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "fundacion", skip_serializing_if = "Option::is_none")]
    pub founded: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "estadio", skip_serializing_if = "Option::is_none")]
    pub stadium: Option<String>,
}

/// Payload for creating a match or recording its result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchInput {
    #[serde(rename = "torneoId", skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    #[serde(rename = "equipoLocal", skip_serializing_if = "Option::is_none")]
    pub home_team_id: Option<String>,
    #[serde(rename = "equipoVisitante", skip_serializing_if = "Option::is_none")]
    pub away_team_id: Option<String>,
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "horario", skip_serializing_if = "Option::is_none")]
    pub kickoff: Option<String>,
    #[serde(rename = "cancha", skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(rename = "fase", skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(rename = "zonaId", skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
    #[serde(rename = "golesLocal", skip_serializing_if = "Option::is_none")]
    pub home_goals: Option<u32>,
    #[serde(rename = "golesVisitante", skip_serializing_if = "Option::is_none")]
    pub away_goals: Option<u32>,
}

impl MatchInput {
    /// A new scheduled fixture. `date` must be `YYYY-MM-DD` and `kickoff`
    /// a zero-padded 24-hour `HH:MM`.
    pub fn scheduled(
        tournament_id: impl Into<String>,
        home_team_id: impl Into<String>,
        away_team_id: impl Into<String>,
        date: &str,
        kickoff: &str,
        venue: impl Into<String>,
    ) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| TorneoError::InvalidDate(date.to_owned()))?;
        let kickoff = KickoffTime::parse_strict(kickoff)?;
        Ok(Self {
            tournament_id: Some(tournament_id.into()),
            home_team_id: Some(home_team_id.into()),
            away_team_id: Some(away_team_id.into()),
            date: Some(date),
            kickoff: Some(kickoff.into()),
            venue: Some(venue.into()),
            status: Some(MatchStatus::Scheduled),
            ..Self::default()
        })
    }

    /// A result update for a finished match.
    pub fn result(home_goals: u32, away_goals: u32) -> Self {
        Self {
            home_goals: Some(home_goals),
            away_goals: Some(away_goals),
            status: Some(MatchStatus::Played),
            ..Self::default()
        }
    }

    /// Check the kickoff format before the payload leaves the client.
    pub fn validate(&self) -> Result<()> {
        if let Some(kickoff) = &self.kickoff {
            KickoffTime::parse_strict(kickoff)?;
        }
        Ok(())
    }
}

/// Payload for registering or editing a player.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerInput {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "posicion", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "dorsal", skip_serializing_if = "Option::is_none")]
    pub shirt_number: Option<u32>,
    #[serde(rename = "equipoId", skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
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
}

impl PlayerInput {
    /// A new player on `team_id`.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position: impl Into<String>,
        team_id: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            position: Some(position.into()),
            team_id: Some(team_id.into()),
            ..Self::default()
        }
    }
}

/// Payload for creating or updating a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneInput {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "torneoId", skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    #[serde(rename = "equipos", skip_serializing_if = "Option::is_none")]
    pub team_ids: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scheduled_match_payload() {
        let input = MatchInput::scheduled("t1", "a", "b", "2024-03-01", "13:30", "Field B").unwrap();
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "torneoId": "t1",
                "equipoLocal": "a",
                "equipoVisitante": "b",
                "fecha": "2024-03-01",
                "horario": "13:30",
                "cancha": "Field B",
                "estado": "programado"
            })
        );
    }

    #[test]
    fn test_scheduled_match_rejects_bad_formats() {
        assert!(matches!(
            MatchInput::scheduled("t1", "a", "b", "01/03/2024", "13:30", "Field B"),
            Err(TorneoError::InvalidDate(_))
        ));
        assert!(matches!(
            MatchInput::scheduled("t1", "a", "b", "2024-03-01", "1:30", "Field B"),
            Err(TorneoError::InvalidKickoff(_))
        ));
    }

    #[test]
    fn test_result_payload_and_validation() {
        let input = MatchInput::result(3, 1);
        assert!(input.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "estado": "jugado", "golesLocal": 3, "golesVisitante": 1 })
        );

        let bad = MatchInput {
            kickoff: Some("15h".into()),
            ..MatchInput::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_zone_payload() {
        let input = ZoneInput {
            team_ids: Some(vec!["a".into(), "b".into()]),
            ..ZoneInput::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({ "equipos": ["a", "b"] })
        );
    }

    #[test]
    fn test_player_payload() {
        let input = PlayerInput {
            shirt_number: Some(9),
            birth_date: NaiveDate::from_ymd_opt(2001, 2, 3),
            ..PlayerInput::new("Ana", "Ruiz", "Defensora", "a")
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "nombre": "Ana",
                "apellido": "Ruiz",
                "posicion": "Defensora",
                "dorsal": 9,
                "equipoId": "a",
                "fechaNacimiento": "2001-02-03"
            })
        );
    }
}
