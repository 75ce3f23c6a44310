use tracing::{debug, instrument};

use super::Api;
use crate::error::Result;
use crate::model::{Player, PlayerInput};

#[instrument(skip(api))]
pub(crate) async fn get_players(api: &Api) -> Result<Vec<Player>> {
    let players: Vec<Player> = api.get("jugadores").await?;
    debug!(count = players.len(), "fetched players");
    Ok(players)
}

#[instrument(skip(api))]
pub(crate) async fn get_player(api: &Api, id: &str) -> Result<Player> {
    api.get(&format!("jugadores/{id}")).await
}

#[instrument(skip(api, input))]
pub(crate) async fn create_player(api: &Api, input: &PlayerInput) -> Result<Player> {
    let player: Player = api.post("jugadores", input).await?;
    debug!(id = %player.id, "created player");
    Ok(player)
}

#[instrument(skip(api, input))]
pub(crate) async fn update_player(api: &Api, id: &str, input: &PlayerInput) -> Result<Player> {
    api.put(&format!("jugadores/{id}"), input).await
}

#[instrument(skip(api))]
pub(crate) async fn delete_player(api: &Api, id: &str) -> Result<()> {
    api.delete(&format!("jugadores/{id}")).await
}
