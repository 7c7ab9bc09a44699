use serde::Serialize;
use strum::{Display, EnumString};

use crate::client::roblox::{GameDetails, ListEntry};

const DEFAULT_GENRE: &str = "All";
const DEFAULT_AGE_RECOMMENDATION: &str = "All Ages";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
pub enum CreatorType {
    #[default]
    User,
    Group,
}

impl CreatorType {
    /// Unknown or missing creator types are reported as `User`.
    pub fn from_upstream(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<CreatorType>().ok())
            .unwrap_or_default()
    }
}

/// A game as shown on a leaderboard, whatever upstream shape it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub rank: usize,
    pub id: u64,
    pub place_id: u64,
    pub name: String,
    pub description: String,
    pub player_count: u64,
    pub up_votes: u64,
    pub down_votes: u64,
    pub rating: u8,
    pub visits: u64,
    pub favorited_count: u64,
    pub creator_name: String,
    pub creator_type: CreatorType,
    pub genre: String,
    pub age_recommendation: String,
    pub thumbnail_url: String,
    pub icon_url: String,
}

/// Share of up votes, as a rounded percentage. No votes at all rates 0.
pub fn rating(up_votes: u64, down_votes: u64) -> u8 {
    let total = up_votes.saturating_add(down_votes);
    if total == 0 {
        return 0;
    }
    (up_votes as f64 / total as f64 * 100.0).round() as u8
}

fn or_default_text(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

impl GameRecord {
    pub fn from_list_entry(entry: ListEntry) -> Self {
        let id = match entry.universe_id {
            0 => entry.place_id,
            id => id,
        };

        GameRecord {
            rank: 0,
            id,
            place_id: entry.place_id,
            name: entry.name.unwrap_or_default(),
            description: entry.game_description.unwrap_or_default(),
            player_count: entry.player_count,
            up_votes: entry.total_up_votes,
            down_votes: entry.total_down_votes,
            rating: rating(entry.total_up_votes, entry.total_down_votes),
            visits: 0,
            favorited_count: 0,
            creator_name: entry.creator_name.unwrap_or_default(),
            creator_type: CreatorType::from_upstream(entry.creator_type.as_deref()),
            genre: or_default_text(entry.genre, DEFAULT_GENRE),
            age_recommendation: or_default_text(
                entry.age_recommendation_display_name,
                DEFAULT_AGE_RECOMMENDATION,
            ),
            thumbnail_url: String::new(),
            icon_url: String::new(),
        }
    }

    /// Completes a listing record with the counters only the details endpoint carries.
    /// Values already known from the listing win over the details ones.
    pub fn merge_details(&mut self, details: &GameDetails) {
        self.visits = details.visits;
        self.favorited_count = details.favorited_count;
        if self.player_count == 0 {
            self.player_count = details.playing;
        }
        if self.place_id == 0 {
            self.place_id = details.root_place_id;
        }
        if self.description.is_empty() {
            if let Some(description) = &details.description {
                self.description = description.clone();
            }
        }
        if self.genre == DEFAULT_GENRE {
            self.genre = or_default_text(details.genre.clone(), DEFAULT_GENRE);
        }
        if let Some(creator) = &details.creator {
            if self.creator_name.is_empty() {
                self.creator_name = creator.name.clone().unwrap_or_default();
                self.creator_type = CreatorType::from_upstream(creator.creator_type.as_deref());
            }
        }
    }

    pub fn game_url(&self) -> String {
        format!("https://www.roblox.com/games/{}", self.place_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_is_rounded_share_of_up_votes() {
        assert_eq!(rating(80, 20), 80);
        assert_eq!(rating(2, 1), 67);
        assert_eq!(rating(5, 0), 100);
        assert_eq!(rating(0, 7), 0);
    }

    #[test]
    fn rating_without_votes_is_zero() {
        assert_eq!(rating(0, 0), 0);
    }

    #[test]
    fn listing_entry_without_optional_fields_gets_defaults() {
        let entry: ListEntry = serde_json::from_str(r#"{"universeId": 42, "name": "Obby"}"#).unwrap();
        let record = GameRecord::from_list_entry(entry);

        assert_eq!(record.id, 42);
        assert_eq!(record.name, "Obby");
        assert_eq!(record.player_count, 0);
        assert_eq!(record.up_votes, 0);
        assert_eq!(record.down_votes, 0);
        assert_eq!(record.rating, 0);
        assert_eq!(record.creator_name, "");
        assert_eq!(record.creator_type, CreatorType::User);
        assert_eq!(record.genre, "All");
        assert_eq!(record.age_recommendation, "All Ages");
        assert_eq!(record.thumbnail_url, "");

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.as_object().unwrap().values().all(|v| !v.is_null()));
    }

    #[test]
    fn listing_entry_accepts_nulls_and_playing_alias() {
        let entry: ListEntry = serde_json::from_str(
            r#"{"placeId": 7, "name": "Jailbreak", "playing": 1200, "totalUpVotes": null,
                "creatorName": null, "creatorType": "Group", "genre": ""}"#,
        )
        .unwrap();
        let record = GameRecord::from_list_entry(entry);

        assert_eq!(record.id, 7);
        assert_eq!(record.player_count, 1200);
        assert_eq!(record.up_votes, 0);
        assert_eq!(record.creator_type, CreatorType::Group);
        assert_eq!(record.genre, "All");
    }

    #[test]
    fn details_fill_in_counters_without_overriding_listing() {
        let entry: ListEntry = serde_json::from_str(
            r#"{"universeId": 1, "placeId": 10, "name": "Doors", "playerCount": 500, "genre": "Horror"}"#,
        )
        .unwrap();
        let details: GameDetails = serde_json::from_str(
            r#"{"id": 1, "rootPlaceId": 99, "playing": 1, "visits": 12345, "favoritedCount": 678,
                "genre": "Adventure", "creator": {"name": "LSPLASH", "type": "Group"}}"#,
        )
        .unwrap();

        let mut record = GameRecord::from_list_entry(entry);
        record.merge_details(&details);

        assert_eq!(record.visits, 12345);
        assert_eq!(record.favorited_count, 678);
        assert_eq!(record.player_count, 500);
        assert_eq!(record.place_id, 10);
        assert_eq!(record.genre, "Horror");
        assert_eq!(record.creator_name, "LSPLASH");
        assert_eq!(record.creator_type, CreatorType::Group);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let entry: ListEntry = serde_json::from_str(r#"{"universeId": 3, "name": "Piggy"}"#).unwrap();
        let json = serde_json::to_value(GameRecord::from_list_entry(entry)).unwrap();

        for key in ["playerCount", "upVotes", "downVotes", "favoritedCount", "thumbnailUrl", "creatorType"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["creatorType"], "User");
    }

    #[test]
    fn rating_survives_huge_vote_counts() {
        assert_eq!(rating(u64::MAX, u64::MAX), 100);
        assert_eq!(rating(0, u64::MAX), 0);
    }
}
