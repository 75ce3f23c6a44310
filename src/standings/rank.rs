use std::cmp::Ordering;

use crate::model::TeamRecord;

/// Standings order: more points first, then better goal difference.
///
/// Teams level on both keys compare equal; [`rank_teams`] keeps them in
/// input order.
pub fn compare_standing(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
}

/// Rank teams into a new standings table. The input slice is not touched.
pub fn rank_teams(teams: &[TeamRecord]) -> Vec<TeamRecord> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(compare_standing);
    ranked
}

/// Rank teams and pair each with its 1-based table position.
pub fn ranked_positions(teams: &[TeamRecord]) -> Vec<(usize, TeamRecord)> {
    rank_teams(teams)
        .into_iter()
        .enumerate()
        .map(|(index, team)| (index + 1, team))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn team(id: &str, points: i64, goal_difference: i64) -> TeamRecord {
        TeamRecord {
            points,
            goal_difference,
            ..TeamRecord::new(id, id)
        }
    }

    fn ids(teams: &[TeamRecord]) -> Vec<&str> {
        teams.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_points_dominate_goal_difference() {
        let teams = vec![team("a", 9, 5), team("b", 9, 2), team("c", 6, 10)];
        assert_eq!(ids(&rank_teams(&teams)), ["a", "b", "c"]);

        let shuffled = vec![team("c", 6, 10), team("b", 9, 2), team("a", 9, 5)];
        assert_eq!(ids(&rank_teams(&shuffled)), ["a", "b", "c"]);
    }

    #[test]
    fn test_empty_table() {
        assert!(rank_teams(&[]).is_empty());
        assert!(ranked_positions(&[]).is_empty());
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let teams = vec![team("x", 4, 1), team("y", 4, 1), team("z", 4, 1)];
        assert_eq!(ids(&rank_teams(&teams)), ["x", "y", "z"]);

        let reversed = vec![team("z", 4, 1), team("y", 4, 1), team("x", 4, 1)];
        assert_eq!(ids(&rank_teams(&reversed)), ["z", "y", "x"]);
    }

    #[test]
    fn test_input_is_left_untouched() {
        let teams = vec![team("low", 1, 0), team("high", 3, 0)];
        let _ = rank_teams(&teams);
        assert_eq!(ids(&teams), ["low", "high"]);
    }

    #[test]
    fn test_positions_are_one_based() {
        let teams = vec![team("b", 1, 0), team("a", 3, 0)];
        let ranked = ranked_positions(&teams);
        let positions: Vec<(usize, &str)> = ranked
            .iter()
            .map(|(p, t)| (*p, t.id.as_str()))
            .collect();
        assert_eq!(positions, [(1, "a"), (2, "b")]);
    }

    fn arb_teams() -> impl Strategy<Value = Vec<TeamRecord>> {
        prop::collection::vec((0i64..30, -20i64..20), 0..24).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (points, gd))| team(&format!("t{i}"), points, gd))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_ranking_is_a_permutation(teams in arb_teams()) {
            let mut before: Vec<String> = teams.iter().map(|t| t.id.clone()).collect();
            let mut after: Vec<String> = rank_teams(&teams).into_iter().map(|t| t.id).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_more_points_rank_first(teams in arb_teams()) {
            let ranked = rank_teams(&teams);
            for (i, a) in ranked.iter().enumerate() {
                for b in &ranked[i + 1..] {
                    prop_assert!(a.points >= b.points);
                    if a.points == b.points {
                        prop_assert!(a.goal_difference >= b.goal_difference);
                    }
                }
            }
        }

        #[test]
        fn prop_ranking_is_idempotent(teams in arb_teams()) {
            let once = rank_teams(&teams);
            prop_assert_eq!(rank_teams(&once), once);
        }
    }
}
