use clap::Parser;
use serde::Serialize;

fn is_false(b: &bool) -> bool {
    !b
}

#[derive(Debug, Default, Parser, Serialize)]
#[command(about = "Real-time leaderboard of popular Roblox experiences")]
pub struct Cli {
    /// Port the HTTP server listens on (overrides PORT)
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// One of TRACE, DEBUG, INFO, WARN, ERROR
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_level: Option<String>,
    /// Do not run the background cache revalidation job
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub no_refresh: bool,
}
