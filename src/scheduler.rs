use tokio_cron_scheduler::{Job, JobScheduler};

use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;
use tracing::{error, info};

use crate::core::category::Category;
use crate::core::provider::{LeaderboardProvider, DEFAULT_LIMIT};
use crate::error::AppResult;

pub struct Scheduler {
    scheduler: JobScheduler,
    provider: Arc<LeaderboardProvider>,
}

pub enum JobProcess<'schedule> {
    WarmCache,
    RefreshLeaderboards(&'schedule str),
}

impl Scheduler {
    pub async fn new(provider: Arc<LeaderboardProvider>) -> AppResult<Self> {
        let scheduler = JobScheduler::new().await?;
        Ok(Scheduler {
            scheduler,
            provider,
        })
    }

    pub async fn add_job(&self, job_process: JobProcess<'_>) -> AppResult<uuid::Uuid> {
        let job = match job_process {
            JobProcess::WarmCache => warm_cache_job(self.provider.clone()).await?,
            JobProcess::RefreshLeaderboards(schedule) => {
                refresh_leaderboards_job(schedule, self.provider.clone()).await?
            }
        };
        Ok(self.scheduler.add(job).await?)
    }

    pub async fn start(&self) -> AppResult<()> {
        Ok(self.scheduler.start().await?)
    }
}

/// Refreshes every category at the default limit, the one the page and
/// most API calls ask for.
pub(crate) async fn refresh_all(provider: &LeaderboardProvider) {
    for category in Category::iter() {
        let leaderboard = provider.refresh(category, DEFAULT_LIMIT).await;
        if leaderboard.is_fallback() {
            info!("Cache for {category} holds sample data until the next refresh.");
        }
    }
}

//////////////////
// Jobs definition
//////////////////

async fn warm_cache_job(provider: Arc<LeaderboardProvider>) -> AppResult<Job> {
    let job = Job::new_one_shot_async(Duration::from_secs(0), move |_uuid, _l| {
        let provider = provider.clone();
        Box::pin(async move {
            info!("Warming leaderboard cache.");
            refresh_all(&provider).await;
        })
    })?;
    Ok(job)
}

async fn refresh_leaderboards_job(
    schedule: &str,
    provider: Arc<LeaderboardProvider>,
) -> AppResult<Job> {
    let job = Job::new_async(schedule, move |uuid, mut l| {
        let provider = provider.clone();
        Box::pin(async move {
            refresh_all(&provider).await;

            // Query the next execution time for this job
            let next_tick = l.next_tick_for_job(uuid).await;
            match next_tick {
                Ok(Some(ts)) => info!("Next leaderboards refresh at {:?}", ts),
                _ => error!("Could not get next tick for refresh leaderboards job"),
            }
        })
    })?;
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::roblox::RobloxClient;
    use crate::core::sample::Jitter;
    use crate::storage::MemoryCache;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn refresh_all_fills_one_entry_per_category() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/games/sorts")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client =
            RobloxClient::new(server.url(), server.url(), Duration::from_secs(2), "blox-charts-test")
                .unwrap();
        let cache = MemoryCache::new(chrono::Duration::seconds(60));
        let provider = LeaderboardProvider::new(client, cache.clone(), Jitter::none());

        refresh_all(&provider).await;

        assert_eq!(cache.len(), 5);
        for category in Category::iter() {
            let board = cache.get(category, DEFAULT_LIMIT, chrono::Utc::now()).unwrap();
            assert!(board.is_fallback());
            assert_eq!(board.games.len(), DEFAULT_LIMIT);
        }
    }

    #[tokio::test]
    async fn invalid_schedule_is_a_scheduler_error() {
        let server = Server::new_async().await;
        let client =
            RobloxClient::new(server.url(), server.url(), Duration::from_secs(2), "blox-charts-test")
                .unwrap();
        let provider = Arc::new(LeaderboardProvider::new(
            client,
            MemoryCache::new(chrono::Duration::seconds(60)),
            Jitter::none(),
        ));

        let scheduler = Scheduler::new(provider).await.unwrap();
        assert!(scheduler
            .add_job(JobProcess::RefreshLeaderboards("every now and then"))
            .await
            .is_err());
    }
}
