use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::roblox::GameSort;
use crate::core::{category::Category, leaderboard::Leaderboard};

type CacheKey = (Category, usize);
type SharedLeaderboards = Arc<Mutex<HashMap<CacheKey, Leaderboard>>>;

/// Process-local leaderboard cache, keyed by category and limit.
///
/// Entries older than the freshness window are misses. Nothing is evicted:
/// a refresh overwrites the previous entry for its key, last write wins.
#[derive(Clone)]
pub struct MemoryCache {
    data: SharedLeaderboards,
    freshness: Duration,
}

impl MemoryCache {
    pub fn new(freshness: Duration) -> MemoryCache {
        MemoryCache {
            data: Arc::new(Mutex::new(HashMap::new())),
            freshness,
        }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    pub fn get(&self, category: Category, limit: usize, now: DateTime<Utc>) -> Option<Leaderboard> {
        self.lock()
            .get(&(category, limit))
            .filter(|board| board.is_fresh(now, self.freshness))
            .cloned()
    }

    pub fn insert(&self, leaderboard: Leaderboard) {
        let key = (leaderboard.category, leaderboard.limit);
        self.lock().insert(key, leaderboard);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Entries are plain snapshots, a panic while holding the lock cannot leave one half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Leaderboard>> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Last upstream sorts listing. Sort tokens change rarely, so one listing
/// serves every category until it expires.
#[derive(Clone)]
pub struct SortsCache {
    data: Arc<Mutex<Option<(DateTime<Utc>, Vec<GameSort>)>>>,
    freshness: Duration,
}

impl SortsCache {
    pub fn new(freshness: Duration) -> SortsCache {
        SortsCache {
            data: Arc::new(Mutex::new(None)),
            freshness,
        }
    }

    pub fn get(&self, now: DateTime<Utc>) -> Option<Vec<GameSort>> {
        let data = self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match &*data {
            Some((fetched, sorts)) if now - *fetched < self.freshness => Some(sorts.clone()),
            _ => None,
        }
    }

    pub fn insert(&self, sorts: Vec<GameSort>, now: DateTime<Utc>) {
        let mut data = self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *data = Some((now, sorts));
    }
}
