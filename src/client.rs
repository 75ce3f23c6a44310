use tracing::instrument;

use crate::api::{self, Api};
use crate::config::ClientConfig;
use crate::error::{Result, TorneoError};
use crate::model::*;
use crate::repository::{Resource, ResourceKey, ResourceSource};

/// The main entry point for talking to the tournament backend.
///
/// `TorneoClient` wraps a [`reqwest::Client`], the API base URL and an
/// optional bearer token, and exposes one method per backend endpoint.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> torneo_client::Result<()> {
/// use torneo_client::{rank_teams, TorneoClient};
///
/// let client = TorneoClient::new("http://localhost:8080/api");
/// let teams = client.get_tournament_teams("66f0c2").await?;
/// for (position, team) in rank_teams(&teams).iter().enumerate() {
///     println!("{}. {} ({} pts)", position + 1, team.name, team.points);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TorneoClient {
    api: Api,
}

impl TorneoClient {
    /// Create a new client with default HTTP settings.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            api: Api::new(client, base_url, None),
        }
    }

    /// Create a client from a [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TorneoError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self {
            api: Api::new(http, &config.base_url, config.token.clone()),
        })
    }

    /// Attach a bearer token to every following request.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            api: self.api.with_token(Some(token.into())),
        }
    }

    /// Exchange credentials for a [`Session`]. Pass `session.token` to
    /// [`with_token`](Self::with_token) to make authorised calls.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        api::auth::login(&self.api, email, password).await
    }

    /// Fetch the user the current token belongs to.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        api::auth::me(&self.api).await
    }

    #[instrument(skip(self))]
    pub async fn get_tournaments(&self) -> Result<Vec<Tournament>> {
        api::tournaments::get_tournaments(&self.api).await
    }

    #[instrument(skip(self))]
    pub async fn get_tournament(&self, id: &str) -> Result<Tournament> {
        api::tournaments::get_tournament(&self.api, id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_tournament(&self, input: &TournamentInput) -> Result<Tournament> {
        api::tournaments::create_tournament(&self.api, input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_tournament(&self, id: &str, input: &TournamentInput) -> Result<Tournament> {
        api::tournaments::update_tournament(&self.api, id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_tournament(&self, id: &str) -> Result<()> {
        api::tournaments::delete_tournament(&self.api, id).await
    }

    #[instrument(skip(self))]
    pub async fn get_teams(&self) -> Result<Vec<TeamRecord>> {
        api::teams::get_teams(&self.api).await
    }

    #[instrument(skip(self))]
    pub async fn get_team(&self, id: &str) -> Result<TeamRecord> {
        api::teams::get_team(&self.api, id).await
    }

    /// Fetch the teams registered in a tournament, with their statistics.
    #[instrument(skip(self))]
    pub async fn get_tournament_teams(&self, tournament_id: &str) -> Result<Vec<TeamRecord>> {
        api::tournaments::get_tournament_teams(&self.api, tournament_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_team(&self, input: &TeamInput) -> Result<TeamRecord> {
        api::teams::create_team(&self.api, input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_team(&self, id: &str, input: &TeamInput) -> Result<TeamRecord> {
        api::teams::update_team(&self.api, id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_team(&self, id: &str) -> Result<()> {
        api::teams::delete_team(&self.api, id).await
    }

    #[instrument(skip(self))]
    pub async fn get_matches(&self) -> Result<Vec<MatchRecord>> {
        api::matches::get_matches(&self.api).await
    }

    /// Fetch every match in the order the backend sorts them. The backend's
    /// ordering is not guaranteed to match [`compare_fixture`](crate::compare_fixture).
    #[instrument(skip(self))]
    pub async fn get_sorted_matches(&self) -> Result<Vec<MatchRecord>> {
        api::matches::get_sorted_matches(&self.api).await
    }

    #[instrument(skip(self))]
    pub async fn get_match(&self, id: &str) -> Result<MatchRecord> {
        api::matches::get_match(&self.api, id).await
    }

    /// Fetch a tournament's fixture in the order the backend sends it. Use
    /// [`sequence_fixtures`](crate::sequence_fixtures) for calendar order.
    #[instrument(skip(self))]
    pub async fn get_tournament_matches(&self, tournament_id: &str) -> Result<Vec<MatchRecord>> {
        api::matches::get_tournament_matches(&self.api, tournament_id).await
    }

    /// Create a match. The kickoff must be a zero-padded `HH:MM`.
    #[instrument(skip(self, input))]
    pub async fn create_match(&self, input: &MatchInput) -> Result<MatchRecord> {
        api::matches::create_match(&self.api, input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_match(&self, id: &str, input: &MatchInput) -> Result<MatchRecord> {
        api::matches::update_match(&self.api, id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_match(&self, id: &str) -> Result<()> {
        api::matches::delete_match(&self.api, id).await
    }

    /// Fetch the top scorers leaderboard.
    #[instrument(skip(self))]
    pub async fn get_scorers(&self) -> Result<Vec<ScorerRecord>> {
        api::scorers::get_scorers(&self.api).await
    }

    #[instrument(skip(self))]
    pub async fn get_players(&self) -> Result<Vec<Player>> {
        api::players::get_players(&self.api).await
    }

    #[instrument(skip(self))]
    pub async fn get_player(&self, id: &str) -> Result<Player> {
        api::players::get_player(&self.api, id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_player(&self, input: &PlayerInput) -> Result<Player> {
        api::players::create_player(&self.api, input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_player(&self, id: &str, input: &PlayerInput) -> Result<Player> {
        api::players::update_player(&self.api, id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_player(&self, id: &str) -> Result<()> {
        api::players::delete_player(&self.api, id).await
    }

    #[instrument(skip(self))]
    pub async fn get_tournament_zones(&self, tournament_id: &str) -> Result<Vec<Zone>> {
        api::zones::get_tournament_zones(&self.api, tournament_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_zone(&self, id: &str) -> Result<Zone> {
        api::zones::get_zone(&self.api, id).await
    }

    /// Fetch the standings table the backend computes for a zone.
    #[instrument(skip(self))]
    pub async fn get_zone_table(&self, zone_id: &str) -> Result<Vec<StandingRow>> {
        api::zones::get_zone_table(&self.api, zone_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_zone(&self, input: &ZoneInput) -> Result<Zone> {
        api::zones::create_zone(&self.api, input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_zone(&self, id: &str, input: &ZoneInput) -> Result<Zone> {
        api::zones::update_zone(&self.api, id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_zone(&self, id: &str) -> Result<()> {
        api::zones::delete_zone(&self.api, id).await
    }
}

impl ResourceSource for TorneoClient {
    async fn fetch(&self, key: &ResourceKey) -> Result<Resource> {
        Ok(match key {
            ResourceKey::Tournaments => Resource::Tournaments(self.get_tournaments().await?),
            ResourceKey::TournamentTeams(id) => Resource::Teams(self.get_tournament_teams(id).await?),
            ResourceKey::TournamentMatches(id) => {
                Resource::Matches(self.get_tournament_matches(id).await?)
            }
            ResourceKey::TournamentZones(id) => Resource::Zones(self.get_tournament_zones(id).await?),
            ResourceKey::ZoneTable(id) => Resource::ZoneTable(self.get_zone_table(id).await?),
            ResourceKey::Scorers => Resource::Scorers(self.get_scorers().await?),
            ResourceKey::Players => Resource::Players(self.get_players().await?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_from_config() {
        let config = ClientConfig {
            base_url: "http://localhost:9000/api/".into(),
            token: Some("abc".into()),
            timeout: Duration::from_secs(2),
        };
        let client = TorneoClient::from_config(&config).unwrap();
        assert_eq!(client.api.url("torneos"), "http://localhost:9000/api/torneos");
    }

    #[tokio::test]
    async fn test_invalid_kickoff_is_rejected_before_sending() {
        // Nothing listens on this port; the call must fail on validation first.
        let client = TorneoClient::new("http://127.0.0.1:9");
        let input = MatchInput {
            kickoff: Some("7pm".into()),
            ..MatchInput::default()
        };
        let err = client.create_match(&input).await.unwrap_err();
        assert!(matches!(err, TorneoError::InvalidKickoff(_)));
    }

    #[tokio::test]
    async fn test_player_and_sorted_match_paths() {
        let client = TorneoClient::new("http://127.0.0.1:9/api");
        let url_of = |err: TorneoError| match err {
            TorneoError::Http { url, .. } => url,
            other => panic!("unexpected error: {other}"),
        };

        let err = client.get_sorted_matches().await.unwrap_err();
        assert_eq!(url_of(err), "http://127.0.0.1:9/api/partidos/ordenados");
        let err = client.get_players().await.unwrap_err();
        assert_eq!(url_of(err), "http://127.0.0.1:9/api/jugadores");
        let err = client.delete_player("p1").await.unwrap_err();
        assert_eq!(url_of(err), "http://127.0.0.1:9/api/jugadores/p1");
    }
}
