use serde_json::Value;

use crate::model::{
    non_empty, pick_id, RawScorerRecord, RawTeamRecord, ScorerRecord, TeamRecord,
};

/// Coerce a loosely typed numeric field to an integer.
///
/// Missing values, `null`, booleans, non-numeric strings and non-finite
/// floats all become 0. Floats and numeric strings are truncated toward zero.
pub fn coerce_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn truncate(f: f64) -> Option<i64> {
    f.is_finite().then(|| f.trunc() as i64)
}

/// Turn a raw team document into a [`TeamRecord`] whose points, goals for,
/// goals against and goal difference are all definite integers.
pub fn normalize_team(raw: RawTeamRecord) -> TeamRecord {
    TeamRecord {
        id: pick_id(raw.mongo_id, raw.id),
        name: raw.name.unwrap_or_default(),
        points: coerce_int(raw.points.as_ref()),
        goals_for: coerce_int(raw.goals_for.as_ref()),
        goals_against: coerce_int(raw.goals_against.as_ref()),
        goal_difference: coerce_int(raw.goal_difference.as_ref()),
        crest_url: non_empty(raw.crest_url),
        color: non_empty(raw.color),
        tournament: raw.tournament,
        zone: raw.zone,
        players: raw.players.unwrap_or_default(),
    }
}

/// Turn a raw leaderboard entry into a [`ScorerRecord`].
///
/// The goal count is `totalGoles`, falling back to `goles` when the total is
/// missing or zero.
pub fn normalize_scorer(raw: RawScorerRecord) -> ScorerRecord {
    let total_goals = match coerce_int(raw.total_goals.as_ref()) {
        0 => coerce_int(raw.goals.as_ref()),
        total => total,
    };
    let name = non_empty(raw.full_name).unwrap_or_else(|| {
        [raw.first_name, raw.last_name]
            .into_iter()
            .flatten()
            .map(|part| part.trim().to_owned())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    });

    ScorerRecord {
        player_id: pick_id(raw.mongo_id, raw.id),
        name,
        team: raw.team.or(raw.team_id),
        total_goals,
    }
}
