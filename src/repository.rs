//! Read-through cache of fetched collections.
//!
//! A [`Repository`] remembers the latest snapshot per [`ResourceKey`] and
//! drops snapshots when a successful write may have changed them. Pure
//! functions in [`crate::standings`] take those snapshots as arguments; they
//! never reach into the repository themselves.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::{Result, TorneoError};
use crate::model::{
    MatchRecord, Player, ScorerRecord, StandingRow, TeamRecord, Tournament, Zone,
};

/// Identifies one cacheable collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Tournaments,
    TournamentTeams(String),
    TournamentMatches(String),
    TournamentZones(String),
    ZoneTable(String),
    Scorers,
    Players,
}

impl ResourceKey {
    fn tournament_id(&self) -> Option<&str> {
        match self {
            ResourceKey::TournamentTeams(id)
            | ResourceKey::TournamentMatches(id)
            | ResourceKey::TournamentZones(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKey::Tournaments => write!(f, "tournaments"),
            ResourceKey::TournamentTeams(id) => write!(f, "tournament {id} teams"),
            ResourceKey::TournamentMatches(id) => write!(f, "tournament {id} matches"),
            ResourceKey::TournamentZones(id) => write!(f, "tournament {id} zones"),
            ResourceKey::ZoneTable(id) => write!(f, "zone {id} table"),
            ResourceKey::Scorers => write!(f, "scorers"),
            ResourceKey::Players => write!(f, "players"),
        }
    }
}

/// A fetched collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Tournaments(Vec<Tournament>),
    Teams(Vec<TeamRecord>),
    Matches(Vec<MatchRecord>),
    Zones(Vec<Zone>),
    ZoneTable(Vec<StandingRow>),
    Scorers(Vec<ScorerRecord>),
    Players(Vec<Player>),
}

/// Where a [`Repository`] loads collections from.
pub trait ResourceSource {
    fn fetch(&self, key: &ResourceKey) -> impl Future<Output = Result<Resource>> + Send;
}

/// A write that was accepted by the backend, described by what it may have
/// changed. `None` for the tournament means "any tournament".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Tournament,
    Team { tournament_id: Option<String> },
    Match { tournament_id: Option<String> },
    Zone { tournament_id: Option<String> },
    Player { tournament_id: Option<String> },
}

impl Mutation {
    /// Whether a snapshot under `key` may be stale after this write.
    ///
    /// Points and goal counts are recomputed by the backend, so a match
    /// result also invalidates teams, zones, zone tables, scorers and
    /// players.
    pub fn affects(&self, key: &ResourceKey) -> bool {
        use ResourceKey as K;

        let same_tournament = |scope: &Option<String>| match (scope, key.tournament_id()) {
            (None, _) => true,
            (Some(scope), Some(id)) => scope == id,
            (Some(_), None) => false,
        };

        match self {
            Mutation::Tournament => matches!(key, K::Tournaments),
            Mutation::Team { tournament_id } => match key {
                K::TournamentTeams(_) | K::TournamentZones(_) => same_tournament(tournament_id),
                K::ZoneTable(_) | K::Scorers | K::Players => true,
                _ => false,
            },
            Mutation::Match { tournament_id } => match key {
                K::TournamentTeams(_) | K::TournamentMatches(_) | K::TournamentZones(_) => {
                    same_tournament(tournament_id)
                }
                K::ZoneTable(_) | K::Scorers | K::Players => true,
                K::Tournaments => false,
            },
            Mutation::Zone { tournament_id } => match key {
                K::TournamentZones(_) | K::TournamentTeams(_) => same_tournament(tournament_id),
                K::ZoneTable(_) => true,
                _ => false,
            },
            Mutation::Player { tournament_id } => match key {
                K::TournamentTeams(_) => same_tournament(tournament_id),
                K::Scorers | K::Players => true,
                _ => false,
            },
        }
    }
}

/// Read-through cache over a [`ResourceSource`].
pub struct Repository<S> {
    source: S,
    cache: RwLock<Snapshots>,
}

#[derive(Default)]
struct Snapshots {
    entries: HashMap<ResourceKey, Arc<Resource>>,
    /// Bumped by every invalidation. A fetch that began under an older
    /// generation may predate a write, so its result is not stored.
    generation: u64,
}

impl Snapshots {
    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<S: ResourceSource> Repository<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(Snapshots::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cached snapshot for `key`, fetching it on a miss.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn get(&self, key: ResourceKey) -> Result<Arc<Resource>> {
        if let Some(hit) = self.cache.read().await.entries.get(&key) {
            debug!("cache hit");
            return Ok(Arc::clone(hit));
        }
        self.refresh(key).await
    }

    /// Fetch `key` again and replace whatever was cached.
    ///
    /// If an invalidation lands while the fetch is in flight, the result is
    /// still returned but not cached.
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn refresh(&self, key: ResourceKey) -> Result<Arc<Resource>> {
        let started = self.cache.read().await.generation;
        let fresh = Arc::new(self.source.fetch(&key).await?);

        let mut cache = self.cache.write().await;
        if cache.generation == started {
            cache.entries.insert(key, Arc::clone(&fresh));
            debug!("cache filled");
        } else {
            debug!("invalidated during fetch, not cached");
        }
        Ok(fresh)
    }

    /// Drop the snapshot for `key`. Returns whether one was cached.
    pub async fn invalidate(&self, key: &ResourceKey) -> bool {
        let mut cache = self.cache.write().await;
        cache.bump();
        cache.entries.remove(key).is_some()
    }

    /// Drop every snapshot.
    pub async fn invalidate_all(&self) {
        let mut cache = self.cache.write().await;
        cache.bump();
        cache.entries.clear();
    }

    /// Drop every snapshot `mutation` may have made stale.
    #[instrument(skip(self))]
    pub async fn apply(&self, mutation: &Mutation) {
        let mut cache = self.cache.write().await;
        cache.bump();
        let before = cache.entries.len();
        cache.entries.retain(|key, _| !mutation.affects(key));
        debug!(dropped = before - cache.entries.len(), "invalidated after write");
    }

    /// Run a write and, only if it succeeds, invalidate what it affects.
    pub async fn mutate<T, F>(&self, mutation: Mutation, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let value = call.await?;
        self.apply(&mutation).await;
        Ok(value)
    }

    pub async fn tournaments(&self) -> Result<Vec<Tournament>> {
        self.typed(ResourceKey::Tournaments, "tournaments", |r| match r {
            Resource::Tournaments(v) => Some(v.clone()),
            _ => None,
        })
        .await
    }

    pub async fn teams(&self, tournament_id: &str) -> Result<Vec<TeamRecord>> {
        let key = ResourceKey::TournamentTeams(tournament_id.to_owned());
        self.typed(key, "teams", |r| match r {
            Resource::Teams(v) => Some(v.clone()),
            _ => None,
        })
        .await
    }

    pub async fn matches(&self, tournament_id: &str) -> Result<Vec<MatchRecord>> {
        let key = ResourceKey::TournamentMatches(tournament_id.to_owned());
        self.typed(key, "matches", |r| match r {
            Resource::Matches(v) => Some(v.clone()),
            _ => None,
        })
        .await
    }

    pub async fn zones(&self, tournament_id: &str) -> Result<Vec<Zone>> {
        let key = ResourceKey::TournamentZones(tournament_id.to_owned());
        self.typed(key, "zones", |r| match r {
            Resource::Zones(v) => Some(v.clone()),
            _ => None,
        })
        .await
    }

    pub async fn zone_table(&self, zone_id: &str) -> Result<Vec<StandingRow>> {
        let key = ResourceKey::ZoneTable(zone_id.to_owned());
        self.typed(key, "a zone table", |r| match r {
            Resource::ZoneTable(v) => Some(v.clone()),
            _ => None,
        })
        .await
    }

    pub async fn scorers(&self) -> Result<Vec<ScorerRecord>> {
        self.typed(ResourceKey::Scorers, "scorers", |r| match r {
            Resource::Scorers(v) => Some(v.clone()),
            _ => None,
        })
        .await
    }

    pub async fn players(&self) -> Result<Vec<Player>> {
        self.typed(ResourceKey::Players, "players", |r| match r {
            Resource::Players(v) => Some(v.clone()),
            _ => None,
        })
        .await
    }

    async fn typed<T>(
        &self,
        key: ResourceKey,
        expected: &'static str,
        extract: impl Fn(&Resource) -> Option<T>,
    ) -> Result<T> {
        let resource = self.get(key.clone()).await?;
        extract(resource.as_ref()).ok_or_else(|| TorneoError::ResourceMismatch {
            key: key.to_string(),
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use tokio::sync::Notify;

    /// Serves teams whose points grow with every fetch, so a refetch is
    /// observable.
    #[derive(Default)]
    struct FakeSource {
        fetches: AtomicUsize,
        fail: Mutex<bool>,
    }

    impl FakeSource {
        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl ResourceSource for FakeSource {
        async fn fetch(&self, key: &ResourceKey) -> Result<Resource> {
            if *self.fail.lock().unwrap() {
                return Err(TorneoError::Config("source offline".into()));
            }
            let n = self.fetches.fetch_add(1, Ordering::SeqCst) as i64 + 1;
            Ok(match key {
                ResourceKey::TournamentTeams(id) => Resource::Teams(vec![TeamRecord {
                    points: n,
                    ..TeamRecord::new(format!("{id}-team"), "Team")
                }]),
                ResourceKey::Scorers => Resource::Scorers(vec![ScorerRecord::new("p", "P", n)]),
                _ => Resource::Matches(Vec::new()),
            })
        }
    }

    /// Reads the backend version, then waits until released before answering.
    #[derive(Default)]
    struct GatedSource {
        version: AtomicI64,
        started: Notify,
        release: Notify,
    }

    impl ResourceSource for GatedSource {
        async fn fetch(&self, _key: &ResourceKey) -> Result<Resource> {
            let seen = self.version.load(Ordering::SeqCst);
            self.started.notify_one();
            self.release.notified().await;
            Ok(Resource::Teams(vec![TeamRecord {
                points: seen,
                ..TeamRecord::new("a", "A")
            }]))
        }
    }

    fn teams_key(id: &str) -> ResourceKey {
        ResourceKey::TournamentTeams(id.to_owned())
    }

    #[tokio::test]
    async fn test_get_reads_through_once() {
        let repo = Repository::new(FakeSource::default());

        let first = repo.teams("t1").await.unwrap();
        let second = repo.teams("t1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.source().fetches(), 1);
    }

    #[tokio::test]
    async fn test_refresh_and_invalidate_refetch() {
        let repo = Repository::new(FakeSource::default());

        assert_eq!(repo.teams("t1").await.unwrap()[0].points, 1);
        repo.refresh(teams_key("t1")).await.unwrap();
        assert_eq!(repo.teams("t1").await.unwrap()[0].points, 2);

        assert!(repo.invalidate(&teams_key("t1")).await);
        assert!(!repo.invalidate(&teams_key("t1")).await);
        assert_eq!(repo.teams("t1").await.unwrap()[0].points, 3);
        assert_eq!(repo.source().fetches(), 3);
    }

    #[tokio::test]
    async fn test_successful_mutation_invalidates_affected_keys() {
        let repo = Repository::new(FakeSource::default());
        repo.teams("t1").await.unwrap();
        repo.teams("t2").await.unwrap();
        repo.scorers().await.unwrap();

        let value = repo
            .mutate(
                Mutation::Match {
                    tournament_id: Some("t1".into()),
                },
                async { Ok::<_, TorneoError>("saved") },
            )
            .await
            .unwrap();
        assert_eq!(value, "saved");

        repo.teams("t1").await.unwrap();
        repo.teams("t2").await.unwrap();
        repo.scorers().await.unwrap();
        // t1 teams and scorers refetched, t2 teams still cached.
        assert_eq!(repo.source().fetches(), 5);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let repo = Repository::new(FakeSource::default());
        repo.teams("t1").await.unwrap();

        let result = repo
            .mutate(
                Mutation::Team {
                    tournament_id: None,
                },
                async { Err::<(), _>(TorneoError::InvalidKickoff("25:00".into())) },
            )
            .await;
        assert!(result.is_err());

        repo.teams("t1").await.unwrap();
        assert_eq!(repo.source().fetches(), 1);
    }

    #[tokio::test]
    async fn test_write_during_fetch_is_not_lost() {
        let repo = Repository::new(GatedSource::default());

        let (read, ()) = tokio::join!(repo.teams("t1"), async {
            repo.source().started.notified().await;
            repo.mutate(
                Mutation::Team {
                    tournament_id: Some("t1".into()),
                },
                async {
                    repo.source().version.store(1, Ordering::SeqCst);
                    Ok::<_, TorneoError>(())
                },
            )
            .await
            .unwrap();
            repo.source().release.notify_one();
        });
        assert_eq!(read.unwrap()[0].points, 0);

        repo.source().release.notify_one();
        assert_eq!(repo.teams("t1").await.unwrap()[0].points, 1);
    }

    #[tokio::test]
    async fn test_fetch_errors_are_not_cached() {
        let repo = Repository::new(FakeSource::default());
        *repo.source().fail.lock().unwrap() = true;
        assert!(repo.teams("t1").await.is_err());

        *repo.source().fail.lock().unwrap() = false;
        assert_eq!(repo.teams("t1").await.unwrap()[0].points, 1);
    }

    #[tokio::test]
    async fn test_mismatched_resource() {
        let repo = Repository::new(FakeSource::default());
        let err = repo.tournaments().await.unwrap_err();
        assert!(matches!(err, TorneoError::ResourceMismatch { .. }));
    }

    #[test]
    fn test_mutation_scopes() {
        let t1 = |k: fn(String) -> ResourceKey| k("t1".to_owned());
        let t2 = |k: fn(String) -> ResourceKey| k("t2".to_owned());
        let match_t1 = Mutation::Match {
            tournament_id: Some("t1".into()),
        };

        assert!(match_t1.affects(&t1(ResourceKey::TournamentMatches)));
        assert!(match_t1.affects(&t1(ResourceKey::TournamentTeams)));
        assert!(!match_t1.affects(&t2(ResourceKey::TournamentTeams)));
        assert!(match_t1.affects(&ResourceKey::ZoneTable("z1".into())));
        assert!(match_t1.affects(&ResourceKey::Scorers));
        assert!(!match_t1.affects(&ResourceKey::Tournaments));

        assert!(Mutation::Tournament.affects(&ResourceKey::Tournaments));
        assert!(!Mutation::Tournament.affects(&ResourceKey::Scorers));

        let any_team = Mutation::Team {
            tournament_id: None,
        };
        assert!(any_team.affects(&t2(ResourceKey::TournamentTeams)));
        assert!(!any_team.affects(&t2(ResourceKey::TournamentMatches)));

        let player_t1 = Mutation::Player {
            tournament_id: Some("t1".into()),
        };
        assert!(player_t1.affects(&ResourceKey::Players));
        assert!(player_t1.affects(&ResourceKey::Scorers));
        assert!(player_t1.affects(&t1(ResourceKey::TournamentTeams)));
        assert!(!player_t1.affects(&t2(ResourceKey::TournamentTeams)));
        assert!(!player_t1.affects(&t1(ResourceKey::TournamentMatches)));
        assert!(match_t1.affects(&ResourceKey::Players));

        let zone = Mutation::Zone {
            tournament_id: Some("t1".into()),
        };
        assert!(zone.affects(&t1(ResourceKey::TournamentZones)));
        assert!(!zone.affects(&ResourceKey::Scorers));
    }
}
