use chrono::{Duration, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::{
    client::roblox::{GameSort, RobloxClient},
    core::{
        category::Category,
        game::GameRecord,
        leaderboard::{Leaderboard, Source},
        ranking::rank,
        sample::{sample_records, Jitter},
    },
    error::AppResult,
    storage::{MemoryCache, SortsCache},
};

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 100;

// Rows requested upstream per displayed row, so the local comparator has candidates to reorder.
const UPSTREAM_ROWS_FACTOR: usize = 2;
const SORTS_FRESHNESS_SEC: i64 = 300;

/// Clamps a requested limit into `[1, MAX_LIMIT]`.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(1, MAX_LIMIT as i64) as usize
}

/// Picks the upstream sort serving `category`: the first one whose name matches,
/// else the upstream default sort, else whatever comes first.
pub fn select_sort(sorts: &[GameSort], category: Category) -> Option<&GameSort> {
    sorts
        .iter()
        .find(|s| category.matches_sort(&s.name, &s.display_name))
        .or_else(|| sorts.iter().find(|s| s.is_default_sort))
        .or_else(|| sorts.first())
}

/// Serves ranked leaderboards: from cache while fresh, from the upstream API
/// otherwise, and from the local sample set when the upstream has nothing to give.
pub struct LeaderboardProvider {
    client: RobloxClient,
    cache: MemoryCache,
    sorts: SortsCache,
    jitter: Jitter,
}

impl LeaderboardProvider {
    pub fn new(client: RobloxClient, cache: MemoryCache, jitter: Jitter) -> Self {
        LeaderboardProvider {
            client,
            cache,
            sorts: SortsCache::new(Duration::seconds(SORTS_FRESHNESS_SEC)),
            jitter,
        }
    }

    pub fn freshness(&self) -> Duration {
        self.cache.freshness()
    }

    pub fn client(&self) -> &RobloxClient {
        &self.client
    }

    /// Never fails: upstream trouble degrades to sample data, and an empty
    /// leaderboard is still a leaderboard.
    pub async fn games(&self, category: Category, limit: usize) -> Leaderboard {
        let limit = limit.clamp(1, MAX_LIMIT);
        if let Some(leaderboard) = self.cache.get(category, limit, Utc::now()) {
            debug!("Serving cached {category} leaderboard (limit {limit}).");
            return leaderboard;
        }
        self.refresh(category, limit).await
    }

    /// Same as [`LeaderboardProvider::games`], without looking at the cache first.
    pub async fn refresh(&self, category: Category, limit: usize) -> Leaderboard {
        let limit = limit.clamp(1, MAX_LIMIT);
        let timestamp = Utc::now();

        let (games, source) = match self.fetch_upstream(category, limit).await {
            Ok(games) if !games.is_empty() => (games, Source::Upstream),
            Ok(_) => {
                warn!("Upstream returned no games for {category}, serving sample data.");
                (self.sample_games(), Source::Fallback)
            }
            Err(e) => {
                warn!("Could not fetch {category} leaderboard, serving sample data. {e}");
                (self.sample_games(), Source::Fallback)
            }
        };

        let leaderboard = Leaderboard {
            category,
            limit,
            timestamp,
            source,
            games: rank(games, category, limit),
        };
        info!(
            "Refreshed {category} leaderboard (limit {limit}): {} games from {source}.",
            leaderboard.games.len()
        );

        self.cache.insert(leaderboard.clone());
        leaderboard
    }

    fn sample_games(&self) -> Vec<GameRecord> {
        let mut games = sample_records();
        self.jitter.apply(&mut games);
        games
    }

    async fn fetch_upstream(&self, category: Category, limit: usize) -> AppResult<Vec<GameRecord>> {
        let max_rows = limit * UPSTREAM_ROWS_FACTOR;

        // A failed sorts or sorted listing call still leaves the search listing to try.
        let sorts = self.game_sorts().await.unwrap_or_else(|e| {
            warn!("Could not fetch game sorts. {e}");
            Vec::new()
        });
        let mut entries = match select_sort(&sorts, category) {
            Some(sort) => {
                debug!("Using upstream sort '{}' for {category}.", sort.name);
                self.client
                    .games_list(&sort.token, max_rows)
                    .await
                    .unwrap_or_else(|e| {
                        warn!("Could not fetch '{}' listing for {category}. {e}", sort.name);
                        Vec::new()
                    })
            }
            None => Vec::new(),
        };

        if entries.is_empty() {
            debug!("No sorted listing for {category}, trying the search listing.");
            entries = self.client.search_games("", max_rows).await?;
        }

        let mut games = entries
            .into_iter()
            .map(GameRecord::from_list_entry)
            .filter(|game| !game.name.is_empty())
            .collect::<Vec<GameRecord>>();

        if !games.is_empty() {
            self.enrich(&mut games).await;
        }
        Ok(games)
    }

    async fn game_sorts(&self) -> AppResult<Vec<GameSort>> {
        if let Some(sorts) = self.sorts.get(Utc::now()) {
            return Ok(sorts);
        }
        let sorts = self.client.game_sorts().await?;
        if !sorts.is_empty() {
            self.sorts.insert(sorts.clone(), Utc::now());
        }
        Ok(sorts)
    }

    /// Best effort: a failed lookup leaves the corresponding fields at their defaults.
    async fn enrich(&self, games: &mut [GameRecord]) {
        let ids = games.iter().map(|game| game.id).collect::<Vec<u64>>();

        let (details, thumbnails, icons) = tokio::join!(
            self.client.game_details(&ids),
            self.client.thumbnails(&ids),
            self.client.icons(&ids),
        );

        let details = details.unwrap_or_else(|e| {
            warn!("Could not fetch game details. {e}");
            HashMap::new()
        });
        let mut thumbnails = thumbnails.unwrap_or_else(|e| {
            warn!("Could not fetch game thumbnails. {e}");
            HashMap::new()
        });
        let mut icons = icons.unwrap_or_else(|e| {
            warn!("Could not fetch game icons. {e}");
            HashMap::new()
        });

        for game in games.iter_mut() {
            if let Some(d) = details.get(&game.id) {
                game.merge_details(d);
            }
            if let Some(url) = thumbnails.remove(&game.id) {
                game.thumbnail_url = url;
            }
            if let Some(url) = icons.remove(&game.id) {
                game.icon_url = url;
            }
        }
    }
}
