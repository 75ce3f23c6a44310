use std::cmp::Ordering;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::model::MatchRecord;

/// Calendar order for fixtures: date, then kickoff time, then venue.
///
/// Undated matches go last. Kickoff times compare as times of day, so `9:30`
/// precedes `13:30` even without zero padding. Venues compare by Unicode
/// scalar order. The order is for display only.
pub fn compare_fixture(a: &MatchRecord, b: &MatchRecord) -> Ordering {
    compare_dates(a.date, b.date)
        .then_with(|| a.kickoff.cmp(&b.kickoff))
        .then_with(|| a.venue.cmp(&b.venue))
}

fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort matches into calendar order. The input slice is not touched.
pub fn sequence_fixtures(matches: &[MatchRecord]) -> Vec<MatchRecord> {
    let mut sequenced = matches.to_vec();
    sequenced.sort_by(compare_fixture);
    sequenced
}

/// A day of the fixture calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDay {
    /// `None` collects matches that have no date yet.
    pub date: Option<NaiveDate>,
    pub matches: Vec<MatchRecord>,
}

/// Sequence matches and group them into consecutive days.
pub fn fixtures_by_date(matches: &[MatchRecord]) -> Vec<MatchDay> {
    let chunks = sequence_fixtures(matches).into_iter().chunk_by(|m| m.date);
    let days: Vec<MatchDay> = chunks
        .into_iter()
        .map(|(date, day)| MatchDay {
            date,
            matches: day.collect_vec(),
        })
        .collect();
    days
}
