use tracing::{debug, instrument};

use super::Api;
use crate::error::Result;
use crate::model::{StandingRow, Zone, ZoneInput};

#[instrument(skip(api))]
pub(crate) async fn get_tournament_zones(api: &Api, tournament_id: &str) -> Result<Vec<Zone>> {
    let zones: Vec<Zone> = api.get(&format!("zonas/torneo/{tournament_id}")).await?;
    debug!(count = zones.len(), tournament_id, "fetched zones");
    Ok(zones)
}

#[instrument(skip(api))]
pub(crate) async fn get_zone(api: &Api, id: &str) -> Result<Zone> {
    api.get(&format!("zonas/{id}")).await
}

/// The zone table as computed by the backend, in the order it was sent.
#[instrument(skip(api))]
pub(crate) async fn get_zone_table(api: &Api, zone_id: &str) -> Result<Vec<StandingRow>> {
    let rows: Vec<StandingRow> = api.get(&format!("zonas/{zone_id}/tabla")).await?;
    debug!(count = rows.len(), zone_id, "fetched zone table");
    Ok(rows)
}

#[instrument(skip(api, input))]
pub(crate) async fn create_zone(api: &Api, input: &ZoneInput) -> Result<Zone> {
    let zone: Zone = api.post("zonas", input).await?;
    debug!(id = %zone.id, "created zone");
    Ok(zone)
}

#[instrument(skip(api, input))]
pub(crate) async fn update_zone(api: &Api, id: &str, input: &ZoneInput) -> Result<Zone> {
    api.put(&format!("zonas/{id}"), input).await
}

#[instrument(skip(api))]
pub(crate) async fn delete_zone(api: &Api, id: &str) -> Result<()> {
    api.delete(&format!("zonas/{id}")).await
}
