use axum::{
    extract::{Query, State},
    response::Html,
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    core::{category::Category, game::GameRecord, leaderboard::Leaderboard},
    error::AppResult,
    server::{
        api::{parse_category, parse_limit},
        templates::PageTemplate,
        AppState,
    },
    utils::{format_count, format_rank},
};

const TIMESTAMP_FORMAT: &str = "%H:%M:%S UTC";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub category: Option<String>,
    pub limit: Option<String>,
}

#[derive(Serialize)]
struct Tab {
    slug: String,
    title: &'static str,
    active: bool,
}

#[derive(Serialize)]
struct GameCard {
    rank: String,
    name: String,
    url: String,
    creator: String,
    creator_type: String,
    genre: String,
    players: String,
    visits: String,
    favorites: String,
    rating: u8,
    thumbnail: String,
}

impl From<&GameRecord> for GameCard {
    fn from(game: &GameRecord) -> Self {
        // Icons are square but still better than an empty frame.
        let thumbnail = if game.thumbnail_url.is_empty() {
            game.icon_url.clone()
        } else {
            game.thumbnail_url.clone()
        };

        GameCard {
            rank: format_rank(game.rank),
            name: game.name.clone(),
            url: game.game_url(),
            creator: game.creator_name.clone(),
            creator_type: game.creator_type.to_string(),
            genre: game.genre.clone(),
            players: format_count(game.player_count),
            visits: format_count(game.visits),
            favorites: format_count(game.favorited_count),
            rating: game.rating,
            thumbnail,
        }
    }
}

fn tabs(active: Category) -> Vec<Tab> {
    Category::iter()
        .map(|category| Tab {
            slug: category.to_string(),
            title: category.title(),
            active: category == active,
        })
        .collect()
}

pub fn render(leaderboard: &Leaderboard, freshness: chrono::Duration) -> AppResult<String> {
    let category = leaderboard.category;
    let games: Vec<GameCard> = leaderboard.games.iter().map(GameCard::from).collect();

    let html = PageTemplate::Leaderboard.get()?.render(context! {
        title => category.title(),
        tabs => tabs(category),
        limit => leaderboard.limit,
        games => games,
        fallback => leaderboard.is_fallback(),
        approximate => category.is_approximate(),
        updated => leaderboard.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        next_update => leaderboard.next_update(freshness).format(TIMESTAMP_FORMAT).to_string(),
        refresh_sec => freshness.num_seconds().max(1),
    })?;

    Ok(html)
}

pub async fn leaderboard_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let category = match query.category.as_deref() {
        Some(category) if !category.is_empty() => parse_category(category)?,
        _ => Category::TopPlayingNow,
    };
    let limit = parse_limit(query.limit.as_deref());

    let leaderboard = state.provider.games(category, limit).await;

    Ok(Html(render(&leaderboard, state.provider.freshness())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{leaderboard::Source, ranking::rank, sample::sample_records};
    use chrono::{Duration, TimeZone, Utc};

    fn board(category: Category, source: Source) -> Leaderboard {
        Leaderboard {
            category,
            limit: 3,
            timestamp: Utc.with_ymd_and_hms(2024, 12, 1, 12, 0, 0).unwrap(),
            source,
            games: rank(sample_records(), category, 3),
        }
    }

    #[test]
    fn tabs_mark_only_the_active_category() {
        let tabs = tabs(Category::TopRated);
        assert_eq!(tabs.len(), 5);
        assert_eq!(tabs.iter().filter(|t| t.active).count(), 1);
        assert_eq!(tabs[3].slug, "top-rated");
        assert!(tabs[3].active);
    }

    #[test]
    fn page_lists_ranked_cards() {
        let html = render(&board(Category::TopVisited, Source::Upstream), Duration::seconds(30)).unwrap();

        assert!(html.contains("<h1>Top Visited</h1>"));
        assert!(html.contains("1st"));
        assert!(html.contains("3rd"));
        assert!(html.contains("Blox Fruits"));
        assert!(html.contains(r#"content="30""#));
        assert!(html.contains("Updated 12:00:00 UTC"));
        assert!(!html.contains("showing sample data"));
    }

    #[test]
    fn page_flags_fallback_and_approximate_rankings() {
        let html = render(&board(Category::TopEarning, Source::Fallback), Duration::seconds(30)).unwrap();

        assert!(html.contains("showing sample data"));
        assert!(html.contains("approximation"));
    }

    #[test]
    fn empty_leaderboard_renders_placeholder() {
        let mut board = board(Category::Trending, Source::Upstream);
        board.games.clear();
        let html = render(&board, Duration::seconds(30)).unwrap();

        assert!(html.contains("No games to show yet"));
    }
}
