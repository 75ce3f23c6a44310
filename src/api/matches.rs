use tracing::{debug, instrument};

use super::Api;
use crate::error::Result;
use crate::model::{MatchInput, MatchRecord};

#[instrument(skip(api))]
pub(crate) async fn get_matches(api: &Api) -> Result<Vec<MatchRecord>> {
    let matches: Vec<MatchRecord> = api.get("partidos").await?;
    debug!(count = matches.len(), "fetched matches");
    Ok(matches)
}

#[instrument(skip(api))]
pub(crate) async fn get_sorted_matches(api: &Api) -> Result<Vec<MatchRecord>> {
    let matches: Vec<MatchRecord> = api.get("partidos/ordenados").await?;
    debug!(count = matches.len(), "fetched sorted matches");
    Ok(matches)
}

#[instrument(skip(api))]
pub(crate) async fn get_match(api: &Api, id: &str) -> Result<MatchRecord> {
    api.get(&format!("partidos/{id}")).await
}

#[instrument(skip(api))]
pub(crate) async fn get_tournament_matches(
    api: &Api,
    tournament_id: &str,
) -> Result<Vec<MatchRecord>> {
    let matches: Vec<MatchRecord> = api
        .get(&format!("partidos/torneo/{tournament_id}"))
        .await?;
    debug!(count = matches.len(), tournament_id, "fetched tournament matches");
    Ok(matches)
}

#[instrument(skip(api, input))]
pub(crate) async fn create_match(api: &Api, input: &MatchInput) -> Result<MatchRecord> {
    input.validate()?;
    let record: MatchRecord = api.post("partidos", input).await?;
    debug!(id = %record.id, "created match");
    Ok(record)
}

#[instrument(skip(api, input))]
pub(crate) async fn update_match(api: &Api, id: &str, input: &MatchInput) -> Result<MatchRecord> {
    input.validate()?;
    api.put(&format!("partidos/{id}"), input).await
}

#[instrument(skip(api))]
pub(crate) async fn delete_match(api: &Api, id: &str) -> Result<()> {
    api.delete(&format!("partidos/{id}")).await
}
