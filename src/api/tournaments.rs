use tracing::{debug, instrument};

use super::Api;
use crate::error::Result;
use crate::model::{TeamRecord, Tournament, TournamentInput};

#[instrument(skip(api))]
pub(crate) async fn get_tournaments(api: &Api) -> Result<Vec<Tournament>> {
    let tournaments: Vec<Tournament> = api.get("torneos").await?;
    debug!(count = tournaments.len(), "fetched tournaments");
    Ok(tournaments)
}

#[instrument(skip(api))]
pub(crate) async fn get_tournament(api: &Api, id: &str) -> Result<Tournament> {
    api.get(&format!("torneos/{id}")).await
}

#[instrument(skip(api))]
pub(crate) async fn get_tournament_teams(api: &Api, tournament_id: &str) -> Result<Vec<TeamRecord>> {
    let teams: Vec<TeamRecord> = api.get(&format!("torneos/{tournament_id}/equipos")).await?;
    debug!(count = teams.len(), tournament_id, "fetched tournament teams");
    Ok(teams)
}

#[instrument(skip(api, input))]
pub(crate) async fn create_tournament(api: &Api, input: &TournamentInput) -> Result<Tournament> {
    let tournament: Tournament = api.post("torneos", input).await?;
    debug!(id = %tournament.id, "created tournament");
    Ok(tournament)
}

#[instrument(skip(api, input))]
pub(crate) async fn update_tournament(
    api: &Api,
    id: &str,
    input: &TournamentInput,
) -> Result<Tournament> {
    api.put(&format!("torneos/{id}"), input).await
}

#[instrument(skip(api))]
pub(crate) async fn delete_tournament(api: &Api, id: &str) -> Result<()> {
    api.delete(&format!("torneos/{id}")).await
}
