use std::env;

use torneo_client::{
    fixtures_by_date, ranked_positions, ClientConfig, FixtureSummary, Repository, ScorerSummary,
    TeamSummary, TorneoClient,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> torneo_client::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env()?;
    let repo = Repository::new(TorneoClient::from_config(&config)?);

    let tournament_id = match env::args().nth(1) {
        Some(id) => id,
        None => {
            let tournaments = repo.tournaments().await?;
            let Some(first) = tournaments.iter().find(|t| t.is_active()).or(tournaments.first())
            else {
                println!("No tournaments found");
                return Ok(());
            };
            println!("Using tournament {} ({})", first.name, first.id);
            first.id.clone()
        }
    };

    let teams = repo.teams(&tournament_id).await?;
    println!("\n{:>3}  {:<24} {:>4} {:>4} {:>4} {:>5}", "#", "Team", "Pts", "GF", "GA", "GD");
    for (position, team) in ranked_positions(&teams) {
        println!(
            "{position:>3}  {:<24} {:>4} {:>4} {:>4} {:>+5}",
            team.name, team.points, team.goals_for, team.goals_against, team.goal_difference
        );
    }
    let summary = TeamSummary::from_teams(&teams);
    println!(
        "{} teams, {} goals, best {} pts, widest goal difference {}",
        summary.team_count,
        summary.total_goals_for,
        summary.max_points.map_or("-".to_owned(), |p| p.to_string()),
        summary.max_goal_difference.map_or("-".to_owned(), |d| d.to_string())
    );

    let matches = repo.matches(&tournament_id).await?;
    let counts = FixtureSummary::from_matches(&matches);
    println!(
        "\nFixture: {} matches, {} played, {} scheduled",
        counts.total, counts.played, counts.scheduled
    );
    for day in fixtures_by_date(&matches) {
        match day.date {
            Some(date) => println!("{}", date.format("%a %d %b %Y")),
            None => println!("Date to be confirmed"),
        }
        for m in &day.matches {
            let score = m
                .score
                .map_or("vs".to_owned(), |s| format!("{} - {}", s.home, s.away));
            println!(
                "  {:>5}  {:<12} {} {} {}",
                m.kickoff,
                m.venue,
                m.home_team.name.as_deref().unwrap_or(&m.home_team.id),
                score,
                m.away_team.name.as_deref().unwrap_or(&m.away_team.id),
            );
        }
    }

    let scorers = repo.scorers().await?;
    let summary = ScorerSummary::from_scorers(&scorers);
    println!(
        "\nTop scorer: {} goals, {} in total, {} per scorer",
        summary.top_goals.map_or("-".to_owned(), |g| g.to_string()),
        summary.total_goals,
        summary
            .average_goals
            .map_or("-".to_owned(), |a| format!("{a:.1}"))
    );

    Ok(())
}
