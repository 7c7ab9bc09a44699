use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use strum::Display;

use crate::core::{category::Category, game::GameRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Source {
    Upstream,
    /// Local sample data, served when the upstream failed or had nothing.
    Fallback,
}

/// One ranked snapshot of a category, as fetched at `timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    pub category: Category,
    pub limit: usize,
    pub timestamp: DateTime<Utc>,
    pub source: Source,
    pub games: Vec<GameRecord>,
}

impl Leaderboard {
    pub fn is_fresh(&self, now: DateTime<Utc>, freshness: Duration) -> bool {
        now - self.timestamp < freshness
    }

    pub fn next_update(&self, freshness: Duration) -> DateTime<Utc> {
        self.timestamp + freshness
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }
}
