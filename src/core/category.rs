use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::core::game::GameRecord;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[strum(to_string = "top-playing-now", serialize = "top-playing")]
    TopPlayingNow,
    #[strum(to_string = "trending")]
    Trending,
    #[strum(to_string = "top-visited")]
    TopVisited,
    #[strum(to_string = "top-rated")]
    TopRated,
    #[strum(to_string = "top-earning")]
    TopEarning,
}

/// How a category is fetched upstream and ordered locally.
pub struct Ranking {
    pub category: Category,
    pub title: &'static str,
    /// Matched (case-insensitively) against upstream sort names to select a sort token.
    pub sort_keywords: &'static [&'static str],
    /// Higher scores rank first.
    pub score: fn(&GameRecord) -> f64,
}

// Indexed by `Category as usize`, keep in declaration order.
static RANKINGS: [Ranking; 5] = [
    Ranking {
        category: Category::TopPlayingNow,
        title: "Top Playing Now",
        sort_keywords: &["top playing", "most engaging", "popular"],
        score: score_players,
    },
    Ranking {
        category: Category::Trending,
        title: "Trending",
        sort_keywords: &["trending", "up and coming", "popular"],
        score: score_trending,
    },
    Ranking {
        category: Category::TopVisited,
        title: "Top Visited",
        sort_keywords: &["visited", "popular"],
        score: score_visits,
    },
    Ranking {
        category: Category::TopRated,
        title: "Top Rated",
        sort_keywords: &["top rated", "rated", "popular"],
        score: score_rated,
    },
    Ranking {
        category: Category::TopEarning,
        title: "Top Earning",
        sort_keywords: &["earning", "revenue", "top grossing", "popular"],
        score: score_earning,
    },
];

fn score_players(game: &GameRecord) -> f64 {
    game.player_count as f64
}

// Approximation: no trend signal is published, so current players are blended with up votes.
fn score_trending(game: &GameRecord) -> f64 {
    game.player_count as f64 * 0.7 + game.up_votes as f64 * 0.3
}

fn score_visits(game: &GameRecord) -> f64 {
    game.visits as f64
}

// Rating weighted by vote volume, so a handful of perfect votes does not top the chart.
fn score_rated(game: &GameRecord) -> f64 {
    let votes = game.up_votes.saturating_add(game.down_votes).saturating_add(1) as f64;
    game.rating as f64 * votes.log10()
}

// Approximation: no revenue data is public, players times favorites stands in for it.
fn score_earning(game: &GameRecord) -> f64 {
    game.player_count as f64 * game.favorited_count as f64
}

impl Category {
    pub fn ranking(&self) -> &'static Ranking {
        &RANKINGS[*self as usize]
    }

    pub fn score(&self, game: &GameRecord) -> f64 {
        (self.ranking().score)(game)
    }

    pub fn title(&self) -> &'static str {
        self.ranking().title
    }

    /// Rankings that stand in for data Roblox does not publish.
    pub fn is_approximate(&self) -> bool {
        matches!(self, Category::Trending | Category::TopEarning)
    }

    /// Whether an upstream sort (by its name and display name) serves this category.
    pub fn matches_sort(&self, name: &str, display_name: &str) -> bool {
        let name = name.to_lowercase();
        let display_name = display_name.to_lowercase();
        self.ranking()
            .sort_keywords
            .iter()
            .any(|k| name.contains(k) || display_name.contains(k))
    }
}
