use std::{future::Future, sync::Arc};

use marquee_config::RefreshConfig;
use marquee_core::FetchFailure;
use marquee_model::Movie;
use tokio::{sync::RwLock, time::Instant};
use tracing::{debug, info, warn};

#[derive(Debug)]
struct CachedSnapshot {
    movies: Arc<Vec<Movie>>,
    fetched_at: Instant,
}

impl CachedSnapshot {
    fn is_fresh(&self, refresh: &RefreshConfig) -> bool {
        let ttl = if self.movies.is_empty() {
            refresh.failure_interval
        } else {
            refresh.interval
        };
        self.fetched_at.elapsed() < ttl
    }
}

/// One aggregated listing held in memory and revalidated on read.
///
/// A snapshot is replaced wholesale, never edited. Concurrent readers that
/// find it stale wait on a single refresh instead of each hitting upstream.
/// If a refresh fails while an older snapshot exists, the older one keeps
/// being served.
#[derive(Debug)]
pub struct SnapshotCache {
    name: &'static str,
    refresh: RefreshConfig,
    slot: RwLock<Option<CachedSnapshot>>,
}

impl SnapshotCache {
    pub fn new(name: &'static str, refresh: RefreshConfig) -> Self {
        Self {
            name,
            refresh,
            slot: RwLock::new(None),
        }
    }

    pub async fn get_or_refresh<F, Fut>(
        &self,
        load: F,
    ) -> Result<Arc<Vec<Movie>>, FetchFailure>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Movie>, FetchFailure>>,
    {
        {
            let slot = self.slot.read().await;
            if let Some(cached) = slot.as_ref().filter(|c| c.is_fresh(&self.refresh)) {
                return Ok(Arc::clone(&cached.movies));
            }
        }

        let mut slot = self.slot.write().await;
        // Another request may have refreshed while this one waited.
        if let Some(cached) = slot.as_ref().filter(|c| c.is_fresh(&self.refresh)) {
            return Ok(Arc::clone(&cached.movies));
        }

        debug!(snapshot = self.name, "refreshing snapshot");
        match load().await {
            Ok(movies) => {
                info!(snapshot = self.name, movies = movies.len(), "snapshot refreshed");
                let movies = Arc::new(movies);
                *slot = Some(CachedSnapshot {
                    movies: Arc::clone(&movies),
                    fetched_at: Instant::now(),
                });
                Ok(movies)
            }
            Err(err) => match slot.as_ref() {
                Some(stale) => {
                    warn!(
                        snapshot = self.name,
                        error = %err,
                        "refresh failed; serving previous snapshot"
                    );
                    Ok(Arc::clone(&stale.movies))
                }
                None => Err(err),
            },
        }
    }
}
