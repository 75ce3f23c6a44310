use tracing::{debug, instrument};

use super::Api;
use crate::error::Result;
use crate::model::{TeamInput, TeamRecord};

#[instrument(skip(api))]
pub(crate) async fn get_teams(api: &Api) -> Result<Vec<TeamRecord>> {
    let teams: Vec<TeamRecord> = api.get("equipos").await?;
    debug!(count = teams.len(), "fetched teams");
    Ok(teams)
}

#[instrument(skip(api))]
pub(crate) async fn get_team(api: &Api, id: &str) -> Result<TeamRecord> {
    api.get(&format!("equipos/{id}")).await
}

#[instrument(skip(api, input))]
pub(crate) async fn create_team(api: &Api, input: &TeamInput) -> Result<TeamRecord> {
    let team: TeamRecord = api.post("equipos", input).await?;
    debug!(id = %team.id, "created team");
    Ok(team)
}

#[instrument(skip(api, input))]
pub(crate) async fn update_team(api: &Api, id: &str, input: &TeamInput) -> Result<TeamRecord> {
    api.put(&format!("equipos/{id}"), input).await
}

#[instrument(skip(api))]
pub(crate) async fn delete_team(api: &Api, id: &str) -> Result<()> {
    api.delete(&format!("equipos/{id}")).await
}
