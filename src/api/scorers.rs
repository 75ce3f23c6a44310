use tracing::{debug, instrument};

use super::Api;
use crate::error::Result;
use crate::model::ScorerRecord;

#[instrument(skip(api))]
pub(crate) async fn get_scorers(api: &Api) -> Result<Vec<ScorerRecord>> {
    let scorers: Vec<ScorerRecord> = api.get("jugadores/goleadores").await?;
    debug!(count = scorers.len(), "fetched top scorers");
    Ok(scorers)
}
