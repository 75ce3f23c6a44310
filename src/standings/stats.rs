use serde::Serialize;

use crate::model::{MatchRecord, MatchStatus, ScorerRecord, TeamRecord, Tournament};

// Each statistic is its own fold over the snapshot. Maxima and averages of
// an empty collection are `None`; sums of an empty collection are 0. Sums
// saturate at the `i64` bounds.

/// Goals scored across all teams.
pub fn total_goals_for(teams: &[TeamRecord]) -> i64 {
    teams.iter().map(|t| t.goals_for).fold(0, i64::saturating_add)
}

/// The highest points total.
pub fn max_points(teams: &[TeamRecord]) -> Option<i64> {
    teams.iter().map(|t| t.points).max()
}

/// The largest goal difference in absolute value, positive or negative.
pub fn max_abs_goal_difference(teams: &[TeamRecord]) -> Option<i64> {
    teams
        .iter()
        .map(|t| t.goal_difference.saturating_abs())
        .max()
}

/// Players registered across all teams.
pub fn total_players(teams: &[TeamRecord]) -> usize {
    teams.iter().map(|t| t.players.len()).sum()
}

/// Goals across the whole leaderboard.
pub fn total_scorer_goals(scorers: &[ScorerRecord]) -> i64 {
    scorers
        .iter()
        .map(|s| s.total_goals)
        .fold(0, i64::saturating_add)
}

/// The leader's goal count.
pub fn max_scorer_goals(scorers: &[ScorerRecord]) -> Option<i64> {
    scorers.iter().map(|s| s.total_goals).max()
}

/// Mean goals per scorer, `None` when there are no scorers.
pub fn average_goals_per_scorer(scorers: &[ScorerRecord]) -> Option<f64> {
    if scorers.is_empty() {
        return None;
    }
    Some(total_scorer_goals(scorers) as f64 / scorers.len() as f64)
}

/// Matches currently in `status`.
pub fn count_with_status(matches: &[MatchRecord], status: MatchStatus) -> usize {
    matches.iter().filter(|m| m.status == status).count()
}

/// Tournaments in progress.
pub fn active_tournaments(tournaments: &[Tournament]) -> usize {
    tournaments.iter().filter(|t| t.is_active()).count()
}

/// Figures shown on the teams dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub team_count: usize,
    pub total_goals_for: i64,
    pub max_points: Option<i64>,
    pub max_goal_difference: Option<i64>,
    pub total_players: usize,
}

impl TeamSummary {
    /// Summarize a team snapshot.
    pub fn from_teams(teams: &[TeamRecord]) -> Self {
        Self {
            team_count: teams.len(),
            total_goals_for: total_goals_for(teams),
            max_points: max_points(teams),
            max_goal_difference: max_abs_goal_difference(teams),
            total_players: total_players(teams),
        }
    }
}

/// Figures shown under the top scorers leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorerSummary {
    pub scorer_count: usize,
    pub total_goals: i64,
    pub top_goals: Option<i64>,
    pub average_goals: Option<f64>,
}

impl ScorerSummary {
    /// Summarize a leaderboard.
    pub fn from_scorers(scorers: &[ScorerRecord]) -> Self {
        Self {
            scorer_count: scorers.len(),
            total_goals: total_scorer_goals(scorers),
            top_goals: max_scorer_goals(scorers),
            average_goals: average_goals_per_scorer(scorers),
        }
    }
}

/// Match counters shown above a tournament fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixtureSummary {
    pub total: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub played: usize,
    pub suspended: usize,
}

impl FixtureSummary {
    /// Count a fixture by status.
    pub fn from_matches(matches: &[MatchRecord]) -> Self {
        Self {
            total: matches.len(),
            scheduled: count_with_status(matches, MatchStatus::Scheduled),
            in_progress: count_with_status(matches, MatchStatus::InProgress),
            played: count_with_status(matches, MatchStatus::Played),
            suspended: count_with_status(matches, MatchStatus::Suspended),
        }
    }
}
