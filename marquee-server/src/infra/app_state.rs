use std::{fmt, sync::Arc};

use marquee_config::Config;
use marquee_core::{
    BatchedAggregator, CatalogClient, FetchFailure, SequentialAggregator,
    TmdbClient,
};
use marquee_model::{ImageBase, Movie};

use super::snapshot_cache::SnapshotCache;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn CatalogClient>,
    pub images: ImageBase,
    pub popular: Arc<SnapshotCache>,
    pub top_rated: Arc<SnapshotCache>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn CatalogClient>) -> Self {
        let refresh = config.refresh;
        Self {
            images: ImageBase::new(config.tmdb.image_base_url.clone()),
            config: Arc::new(config),
            catalog,
            popular: Arc::new(SnapshotCache::new("popular", refresh)),
            top_rated: Arc::new(SnapshotCache::new("top_rated", refresh)),
        }
    }

    /// State backed by the real TMDB client described by `config`.
    pub fn from_config(config: Config) -> Self {
        let client = TmdbClient::with_base_url(
            config.tmdb.api_key.clone(),
            config.tmdb.base_url.clone(),
        )
        .with_language(config.tmdb.language.clone());
        Self::new(config, Arc::new(client))
    }

    /// The browse snapshot: popular pages aggregated in batches.
    ///
    /// Page failures only shrink the snapshot, so this never fails.
    pub async fn popular_movies(&self) -> Arc<Vec<Movie>> {
        let result = self
            .popular
            .get_or_refresh(|| async {
                let aggregator = BatchedAggregator::new(
                    Arc::clone(&self.catalog),
                    self.config.aggregation.clone(),
                );
                Ok(aggregator
                    .aggregate_popular(
                        self.config.catalog.popular_start_page,
                        self.config.catalog.popular_pages,
                    )
                    .await)
            })
            .await;
        result.unwrap_or_default()
    }

    /// The home list: top-rated pages fetched one by one, first N kept.
    pub async fn top_rated_movies(
        &self,
    ) -> Result<Arc<Vec<Movie>>, FetchFailure> {
        self.top_rated
            .get_or_refresh(|| async {
                let mut movies =
                    SequentialAggregator::new(Arc::clone(&self.catalog))
                        .aggregate_top_rated(1, self.config.catalog.top_rated_pages)
                        .await?;
                movies.truncate(self.config.catalog.top_rated_limit);
                Ok(movies)
            })
            .await
    }
}
