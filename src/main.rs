use blox_charts::cli::Cli;
use blox_charts::client::roblox::RobloxClient;
use blox_charts::config::Settings;
use blox_charts::core::{provider::LeaderboardProvider, sample::Jitter};
use blox_charts::scheduler::{JobProcess, Scheduler};
use blox_charts::server::{self, AppState};
use blox_charts::storage::MemoryCache;

use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = Settings::load(Cli::parse())?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(settings.get_trace_level())
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let client = RobloxClient::from_settings(&settings)?;
    let cache = MemoryCache::new(settings.cache_freshness());
    let jitter = Jitter::new(settings.fallback_jitter_ratio, settings.fallback_jitter_seed);
    let provider = Arc::new(LeaderboardProvider::new(client, cache, jitter));

    // Kept in scope for as long as the server runs.
    let _sched = if settings.no_refresh {
        info!("Background refresh disabled, leaderboards are fetched on demand.");
        None
    } else {
        let sched = Scheduler::new(provider.clone()).await?;

        let jobs = vec![
            JobProcess::WarmCache, // only ran once, at startup.
            JobProcess::RefreshLeaderboards(&settings.refresh_schedule),
        ];
        for job in jobs {
            sched.add_job(job).await?;
        }

        info!("Starting scheduler.");
        sched.start().await?;
        Some(sched)
    };

    let listener = TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    info!("Serving leaderboards on http://{}", listener.local_addr()?);

    axum::serve(listener, server::router(AppState::new(provider))).await?;

    Ok(())
}
