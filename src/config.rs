use crate::cli::Cli;
use crate::error::AppResult;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

const TRACE_LEVELS: [&'static str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
const LOCAL_SETTINGS_YAML_FILE: &str = ".env.local.yaml";

// All settings may be configured via environment variables. Example:
// PORT="8080" would set port to 8080.
// Command line flags take precedence over the environment, which takes
// precedence over the local yaml file.
#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(default = "default_trace_level")]
    trace_level: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_games_api_base_url")]
    pub games_api_base_url: String,
    #[serde(default = "default_thumbnails_api_base_url")]
    pub thumbnails_api_base_url: String,
    #[serde(default = "default_upstream_timeout_sec")]
    pub upstream_timeout_sec: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    // Maximum age of a cached leaderboard before it is fetched again
    #[serde(default = "default_cache_freshness_sec")]
    pub cache_freshness_sec: u64,
    // Relative amplitude of the random variation applied to sample player counts
    #[serde(default = "default_fallback_jitter_ratio")]
    pub fallback_jitter_ratio: f64,
    pub fallback_jitter_seed: Option<u64>,
    #[serde(default = "default_refresh_schedule")]
    pub refresh_schedule: String,
    #[serde(default)]
    pub no_refresh: bool,
}

impl Settings {
    pub fn load(cli: Cli) -> AppResult<Self> {
        Settings::from_figment(Settings::figment(cli))
    }

    pub fn figment(cli: Cli) -> Figment {
        let mut figment = Figment::new();
        if Path::new(LOCAL_SETTINGS_YAML_FILE).exists() {
            println!(
                "\n######################################\n\
                   ##   Found '.env.local.yaml' file,  ##\n\
                   ##   loading local configuration.   ##\n\
                   ######################################\n\
                "
            );
            figment = figment.merge(Yaml::file(LOCAL_SETTINGS_YAML_FILE));
        }
        figment.merge(Env::raw()).merge(Serialized::defaults(cli))
    }

    pub fn from_figment(figment: Figment) -> AppResult<Self> {
        Ok(figment.extract()?)
    }

    pub fn get_trace_level(&self) -> Level {
        get_trace_level(&self.trace_level)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_sec)
    }

    pub fn cache_freshness(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_freshness_sec as i64)
    }
}

fn get_trace_level(level_str: &str) -> Level {
    match level_str.to_uppercase().as_str() {
        level if level == TRACE_LEVELS[0] => Level::TRACE,
        level if level == TRACE_LEVELS[1] => Level::DEBUG,
        level if level == TRACE_LEVELS[2] => Level::INFO,
        level if level == TRACE_LEVELS[3] => Level::WARN,
        level if level == TRACE_LEVELS[4] => Level::ERROR,
        // Default trace level
        _ => Level::INFO,
    }
}

fn default_trace_level() -> String {
    "INFO".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_games_api_base_url() -> String {
    "https://games.roblox.com".to_string()
}

fn default_thumbnails_api_base_url() -> String {
    "https://thumbnails.roblox.com".to_string()
}

fn default_upstream_timeout_sec() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("blox-charts/{}", env!("CARGO_PKG_VERSION"))
}

fn default_cache_freshness_sec() -> u64 {
    30
}

fn default_fallback_jitter_ratio() -> f64 {
    0.05
}

fn default_refresh_schedule() -> String {
    "0/30 * * * * *".to_string()
}
