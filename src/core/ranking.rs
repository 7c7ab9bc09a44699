use itertools::Itertools;
use std::cmp::Ordering;

use crate::core::{category::Category, game::GameRecord};

/// Orders the full set by the category score, then keeps the `limit` best and
/// numbers them from 1. Equal scores keep their input order.
pub fn rank(games: Vec<GameRecord>, category: Category, limit: usize) -> Vec<GameRecord> {
    games
        .into_iter()
        .map(|game| (category.score(&game), game))
        // stable sort, descending
        .sorted_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal))
        .take(limit)
        .enumerate()
        .map(|(idx, (_score, mut game))| {
            // idx is zero-based
            game.rank = idx + 1;
            game
        })
        .collect()
}
