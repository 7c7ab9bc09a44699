use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::config::Settings;
use crate::error::{AppError, AppResult};

// Batched lookups are split so that a single request never carries more ids than this.
const IDS_PER_REQUEST: usize = 50;
const IMAGE_STATE_COMPLETED: &str = "Completed";

enum Endpoint<'a> {
    GameSorts,
    GamesList(&'a str, usize),
    SearchGames(&'a str, usize),
    GameDetails(&'a [u64]),
    Thumbnails(&'a [u64]),
    Icons(&'a [u64]),
    PlaceDetails(u64),
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::GameSorts => write!(f, "/v1/games/sorts"),
            Endpoint::GamesList(..) | Endpoint::SearchGames(..) => write!(f, "/v1/games/list"),
            Endpoint::GameDetails(_) => write!(f, "/v1/games"),
            Endpoint::Thumbnails(_) => write!(f, "/v1/games/multiget/thumbnails"),
            Endpoint::Icons(_) => write!(f, "/v1/games/icons"),
            Endpoint::PlaceDetails(_) => write!(f, "/v1/games/multiget-place-details"),
        }
    }
}

impl Endpoint<'_> {
    fn is_thumbnails_api(&self) -> bool {
        matches!(self, Endpoint::Thumbnails(_) | Endpoint::Icons(_))
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::GameSorts => vec![("gameSortsContext", "HomeSorts".to_string())],
            Endpoint::GamesList(sort_token, max_rows) => vec![
                ("sortToken", sort_token.to_string()),
                ("startRows", "0".to_string()),
                ("maxRows", max_rows.to_string()),
            ],
            Endpoint::SearchGames(keyword, max_rows) => vec![
                ("keyword", keyword.to_string()),
                ("startRows", "0".to_string()),
                ("maxRows", max_rows.to_string()),
                ("isKeywordSuggestionEnabled", "true".to_string()),
            ],
            Endpoint::GameDetails(ids) => vec![("universeIds", join_ids(ids))],
            Endpoint::Thumbnails(ids) => vec![
                ("universeIds", join_ids(ids)),
                ("countPerUniverse", "1".to_string()),
                ("defaults", "true".to_string()),
                ("size", "768x432".to_string()),
                ("format", "Png".to_string()),
                ("isCircular", "false".to_string()),
            ],
            Endpoint::Icons(ids) => vec![
                ("universeIds", join_ids(ids)),
                ("returnPolicy", "PlaceHolder".to_string()),
                ("size", "150x150".to_string()),
                ("format", "Png".to_string()),
                ("isCircular", "false".to_string()),
            ],
            Endpoint::PlaceDetails(place_id) => vec![("placeIds", place_id.to_string())],
        }
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Upstream sends `null` for fields it has no value for; treat those as absent.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct GameSortsResponse {
    #[serde(default, deserialize_with = "nullable")]
    sorts: Vec<GameSort>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSort {
    #[serde(deserialize_with = "nullable")]
    pub token: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub display_name: String,
    #[serde(deserialize_with = "nullable")]
    pub is_default_sort: bool,
}

#[derive(Debug, Deserialize)]
struct GamesListResponse {
    #[serde(default, deserialize_with = "nullable")]
    games: Vec<ListEntry>,
}

/// Entry of the games listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListEntry {
    #[serde(deserialize_with = "nullable")]
    pub universe_id: u64,
    #[serde(deserialize_with = "nullable")]
    pub place_id: u64,
    pub name: Option<String>,
    pub game_description: Option<String>,
    #[serde(alias = "playing", deserialize_with = "nullable")]
    pub player_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub total_up_votes: u64,
    #[serde(deserialize_with = "nullable")]
    pub total_down_votes: u64,
    pub creator_name: Option<String>,
    pub creator_type: Option<String>,
    pub genre: Option<String>,
    pub age_recommendation_display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct DataResponse<T> {
    #[serde(default, deserialize_with = "nullable")]
    data: Vec<T>,
}

/// Entry of the game details endpoint, the only one carrying visits and favorites.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameDetails {
    #[serde(deserialize_with = "nullable")]
    pub id: u64,
    #[serde(deserialize_with = "nullable")]
    pub root_place_id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub playing: u64,
    #[serde(deserialize_with = "nullable")]
    pub visits: u64,
    #[serde(deserialize_with = "nullable")]
    pub favorited_count: u64,
    pub genre: Option<String>,
    pub creator: Option<Creator>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Creator {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub creator_type: Option<String>,
}

/// Entry of the place details endpoint, relayed as is by `/api/game/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceDetails {
    #[serde(deserialize_with = "nullable")]
    pub place_id: u64,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub source_name: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub builder: String,
    #[serde(deserialize_with = "nullable")]
    pub builder_id: u64,
    #[serde(deserialize_with = "nullable")]
    pub has_verified_badge: bool,
    #[serde(deserialize_with = "nullable")]
    pub is_playable: bool,
    pub reason_prohibited: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub universe_id: u64,
    #[serde(deserialize_with = "nullable")]
    pub universe_root_place_id: u64,
    pub price: Option<u64>,
    pub image_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImageData {
    #[serde(deserialize_with = "nullable")]
    target_id: u64,
    #[serde(deserialize_with = "nullable")]
    state: String,
    image_url: Option<String>,
}

impl ImageData {
    fn usable_url(self) -> Option<String> {
        match (self.state.as_str(), self.image_url) {
            (IMAGE_STATE_COMPLETED, Some(url)) if !url.is_empty() => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UniverseThumbnails {
    #[serde(deserialize_with = "nullable")]
    universe_id: u64,
    #[serde(deserialize_with = "nullable")]
    thumbnails: Vec<ImageData>,
}

pub struct RobloxClient {
    http_client: Client,
    games_base_url: String,
    thumbnails_base_url: String,
}

impl RobloxClient {
    pub fn new(
        games_base_url: String,
        thumbnails_base_url: String,
        timeout: Duration,
        user_agent: &str,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http_client,
            games_base_url,
            thumbnails_base_url,
        })
    }

    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        RobloxClient::new(
            settings.games_api_base_url.clone(),
            settings.thumbnails_api_base_url.clone(),
            settings.upstream_timeout(),
            &settings.user_agent,
        )
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint<'_>) -> AppResult<T> {
        let base_url = if endpoint.is_thumbnails_api() {
            &self.thumbnails_base_url
        } else {
            &self.games_base_url
        };
        let url = format!("{}{}", base_url, endpoint);
        debug!("GET {url}");

        let response = self
            .http_client
            .get(&url)
            .header("accept", "application/json")
            .query(&endpoint.query())
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(serde_json::from_str::<T>(&body)?)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::Upstream(format!(
                "{} on {endpoint}. Requests are being rate limited.",
                StatusCode::TOO_MANY_REQUESTS
            ))),
            status => Err(AppError::Upstream(format!("{status} on {endpoint}"))),
        }
    }

    pub async fn game_sorts(&self) -> AppResult<Vec<GameSort>> {
        let resp: GameSortsResponse = self.get(&Endpoint::GameSorts).await?;
        Ok(resp.sorts)
    }

    pub async fn games_list(&self, sort_token: &str, max_rows: usize) -> AppResult<Vec<ListEntry>> {
        let resp: GamesListResponse = self
            .get(&Endpoint::GamesList(sort_token, max_rows))
            .await?;
        Ok(resp.games)
    }

    pub async fn search_games(&self, keyword: &str, max_rows: usize) -> AppResult<Vec<ListEntry>> {
        let resp: GamesListResponse = self
            .get(&Endpoint::SearchGames(keyword, max_rows))
            .await?;
        Ok(resp.games)
    }

    /// universe id => details
    pub async fn game_details(&self, universe_ids: &[u64]) -> AppResult<HashMap<u64, GameDetails>> {
        let mut details = HashMap::new();
        for ids in universe_ids.chunks(IDS_PER_REQUEST) {
            let resp: DataResponse<GameDetails> = self.get(&Endpoint::GameDetails(ids)).await?;
            details.extend(resp.data.into_iter().map(|d| (d.id, d)));
        }
        Ok(details)
    }

    pub async fn place_details(&self, place_id: u64) -> AppResult<Vec<PlaceDetails>> {
        self.get(&Endpoint::PlaceDetails(place_id)).await
    }

    /// universe id => thumbnail url, for completed thumbnails only
    pub async fn thumbnails(&self, universe_ids: &[u64]) -> AppResult<HashMap<u64, String>> {
        let mut urls = HashMap::new();
        for ids in universe_ids.chunks(IDS_PER_REQUEST) {
            let resp: DataResponse<UniverseThumbnails> =
                self.get(&Endpoint::Thumbnails(ids)).await?;
            // the nested target id is the thumbnail asset, the universe is on the outer entry
            urls.extend(resp.data.into_iter().filter_map(|universe| {
                universe
                    .thumbnails
                    .into_iter()
                    .find_map(ImageData::usable_url)
                    .map(|url| (universe.universe_id, url))
            }));
        }
        Ok(urls)
    }

    /// universe id => icon url, for completed icons only
    pub async fn icons(&self, universe_ids: &[u64]) -> AppResult<HashMap<u64, String>> {
        let mut urls = HashMap::new();
        for ids in universe_ids.chunks(IDS_PER_REQUEST) {
            let resp: DataResponse<ImageData> = self.get(&Endpoint::Icons(ids)).await?;
            urls.extend(resp.data.into_iter().filter_map(|icon| {
                let universe_id = icon.target_id;
                icon.usable_url().map(|url| (universe_id, url))
            }));
        }
        Ok(urls)
    }
}
