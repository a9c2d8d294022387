use std::sync::Arc;

use futures::future::join_all;
use marquee_model::Movie;
use tracing::{debug, info, warn};

use super::{AggregationSettings, PageOutcome, dedup_by_id, plan_batches};
use crate::providers::{CatalogClient, Listing};

/// Summary of one batched aggregation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    /// Deduplicated items in first-seen order.
    pub movies: Vec<Movie>,
    pub pages_loaded: u32,
    /// Pages whose fetch failed and were treated as empty.
    pub failed_pages: Vec<u32>,
    pub batches_run: usize,
    /// The upstream reported a final page before the requested range ran out.
    pub reached_end: bool,
    pub duplicates_dropped: usize,
}

/// Fetches a page range in bounded concurrent batches.
///
/// Pages inside a batch run concurrently and are joined before the next batch
/// starts. Results are merged in page order regardless of completion order.
/// A failing page never aborts its batch; when every page fails the result is
/// simply empty.
#[derive(Debug)]
pub struct BatchedAggregator<C: ?Sized> {
    client: Arc<C>,
    settings: AggregationSettings,
}

impl<C: CatalogClient + ?Sized> BatchedAggregator<C> {
    pub fn new(client: Arc<C>, settings: AggregationSettings) -> Self {
        Self { client, settings }
    }

    /// Popular movies for `[start_page, start_page + page_count)`.
    pub async fn aggregate_popular(
        &self,
        start_page: u32,
        page_count: u32,
    ) -> Vec<Movie> {
        self.aggregate(Listing::Popular, start_page, page_count)
            .await
            .movies
    }

    pub async fn aggregate(
        &self,
        listing: Listing,
        start_page: u32,
        page_count: u32,
    ) -> Aggregate {
        let batches =
            plan_batches(start_page, page_count, self.settings.batch_size);
        let batch_total = batches.len();
        let mut merged: Vec<Movie> = Vec::new();
        let mut report = Aggregate::default();

        for (index, batch) in batches.into_iter().enumerate() {
            debug!(
                %listing,
                batch = index + 1,
                of = batch_total,
                first_page = batch.start,
                last_page = batch.end - 1,
                "fetching batch"
            );

            let outcomes =
                join_all(batch.map(|page| self.fetch_page(listing, page)))
                    .await;
            report.batches_run += 1;

            for outcome in outcomes {
                if outcome.is_last_page() {
                    report.reached_end = true;
                }
                match outcome {
                    PageOutcome::Loaded(page) => {
                        report.pages_loaded += 1;
                        merged.extend(page.results);
                    }
                    PageOutcome::Failed { page, error } => {
                        warn!(
                            %listing,
                            page,
                            endpoint = error.endpoint(),
                            error = %error,
                            "page fetch failed; treating as empty"
                        );
                        report.failed_pages.push(page);
                    }
                }
            }

            if report.reached_end {
                debug!(%listing, batch = index + 1, "upstream reported last page");
                break;
            }

            let more_batches = index + 1 < batch_total;
            if more_batches && !self.settings.inter_batch_delay.is_zero() {
                tokio::time::sleep(self.settings.inter_batch_delay).await;
            }
        }

        let (movies, duplicates_dropped) = dedup_by_id(merged);
        report.movies = movies;
        report.duplicates_dropped = duplicates_dropped;

        info!(
            %listing,
            pages_requested = page_count,
            pages_loaded = report.pages_loaded,
            pages_failed = report.failed_pages.len(),
            unique = report.movies.len(),
            duplicates = report.duplicates_dropped,
            reached_end = report.reached_end,
            "aggregation finished"
        );

        report
    }

    async fn fetch_page(&self, listing: Listing, page: u32) -> PageOutcome {
        match self.client.fetch_listing_page(listing, page).await {
            Ok(result) => PageOutcome::Loaded(result),
            Err(error) => PageOutcome::Failed { page, error },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use marquee_model::{ListingPage, MovieDetails, MovieId};
    use reqwest::StatusCode;

    use super::*;
    use crate::providers::{FetchFailure, MockCatalogClient};

    /// Later pages answer first: page `p` takes `(last_page - p) * 10ms`.
    struct StaggeredClient {
        last_page: u32,
        completed: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl CatalogClient for StaggeredClient {
        async fn fetch_listing_page(
            &self,
            _listing: Listing,
            page: u32,
        ) -> Result<ListingPage, FetchFailure> {
            let wait = u64::from(self.last_page - page) * 10;
            tokio::time::sleep(Duration::from_millis(wait)).await;
            self.completed.lock().unwrap().push(page);
            Ok(listing(page, 500))
        }

        async fn fetch_movie_details(
            &self,
            id: MovieId,
        ) -> Result<MovieDetails, FetchFailure> {
            Err(FetchFailure::NotFound {
                endpoint: format!("/movie/{id}"),
            })
        }
    }

    fn no_delay() -> AggregationSettings {
        AggregationSettings {
            batch_size: 5,
            inter_batch_delay: Duration::ZERO,
        }
    }

    /// Two movies per page: ids `page * 10` and `page * 10 + 1`.
    fn listing(page: u32, total_pages: u32) -> ListingPage {
        let base = u64::from(page) * 10;
        ListingPage {
            page,
            results: vec![
                Movie::new(base, format!("Movie {base}")),
                Movie::new(base + 1, format!("Movie {}", base + 1)),
            ],
            total_pages,
            total_results: total_pages * 2,
        }
    }

    fn ids(movies: &[Movie]) -> Vec<u64> {
        movies.iter().map(|m| m.id.as_u64()).collect()
    }

    #[tokio::test]
    async fn merges_pages_in_order() {
        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_listing_page()
            .times(3)
            .returning(|_, page| Ok(listing(page, 500)));

        let aggregator = BatchedAggregator::new(Arc::new(client), no_delay());
        let movies = aggregator.aggregate_popular(1, 3).await;

        assert_eq!(ids(&movies), vec![10, 11, 20, 21, 30, 31]);
    }

    #[tokio::test]
    async fn requests_every_page_of_the_range() {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requested);
        let mut client = MockCatalogClient::new();
        client.expect_fetch_listing_page().returning(move |_, page| {
            seen.lock().unwrap().push(page);
            Ok(listing(page, 500))
        });

        let aggregator = BatchedAggregator::new(Arc::new(client), no_delay());
        let report = aggregator.aggregate(Listing::Popular, 1, 12).await;

        let mut pages = requested.lock().unwrap().clone();
        pages.sort_unstable();
        assert_eq!(pages, (1..=12).collect::<Vec<_>>());
        assert_eq!(report.batches_run, 3);
        assert_eq!(report.pages_loaded, 12);
        assert!(!report.reached_end);
    }

    #[tokio::test]
    async fn failed_page_is_isolated() {
        let mut client = MockCatalogClient::new();
        client.expect_fetch_listing_page().returning(|_, page| {
            if page == 2 {
                Err(FetchFailure::Status {
                    endpoint: format!("/movie/popular?page={page}"),
                    status: StatusCode::BAD_GATEWAY,
                })
            } else {
                Ok(listing(page, 500))
            }
        });

        let aggregator = BatchedAggregator::new(Arc::new(client), no_delay());
        let report = aggregator.aggregate(Listing::Popular, 1, 3).await;

        assert_eq!(ids(&report.movies), vec![10, 11, 30, 31]);
        assert_eq!(report.failed_pages, vec![2]);
        assert_eq!(report.pages_loaded, 2);
    }

    #[tokio::test]
    async fn total_failure_yields_empty_list() {
        let mut client = MockCatalogClient::new();
        client.expect_fetch_listing_page().returning(|_, page| {
            Err(FetchFailure::RateLimited {
                endpoint: format!("/movie/popular?page={page}"),
            })
        });

        let aggregator = BatchedAggregator::new(Arc::new(client), no_delay());
        let report = aggregator.aggregate(Listing::Popular, 1, 7).await;

        assert!(report.movies.is_empty());
        assert_eq!(report.failed_pages, (1..=7).collect::<Vec<_>>());
        assert_eq!(report.batches_run, 2);
    }

    #[tokio::test]
    async fn end_of_data_stops_after_current_batch() {
        // Upstream only has 3 pages; pages 4 and 5 are already in flight in the
        // first batch and still get merged.
        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_listing_page()
            .times(5)
            .returning(|_, page| {
                if page <= 3 {
                    Ok(listing(page, 3))
                } else {
                    Ok(ListingPage {
                        page,
                        results: vec![Movie::new(900 + u64::from(page), "Late")],
                        total_pages: 3,
                        total_results: 6,
                    })
                }
            });

        let aggregator = BatchedAggregator::new(Arc::new(client), no_delay());
        let report = aggregator.aggregate(Listing::Popular, 1, 12).await;

        assert!(report.reached_end);
        assert_eq!(report.batches_run, 1);
        assert_eq!(ids(&report.movies), vec![10, 11, 20, 21, 30, 31, 904, 905]);
    }

    #[tokio::test]
    async fn duplicates_across_pages_are_dropped() {
        let mut client = MockCatalogClient::new();
        client.expect_fetch_listing_page().returning(|_, page| {
            // Popularity shifts between requests re-list page 1's lead on page 2.
            let mut result = listing(page, 500);
            if page == 2 {
                result.results.insert(1, Movie::new(10, "Movie 10 again"));
            }
            Ok(result)
        });

        let aggregator = BatchedAggregator::new(Arc::new(client), no_delay());
        let report = aggregator.aggregate(Listing::Popular, 1, 2).await;

        assert_eq!(ids(&report.movies), vec![10, 11, 20, 21]);
        assert_eq!(report.duplicates_dropped, 1);
        assert_eq!(report.movies[0].title, "Movie 10");

        let unique: std::collections::HashSet<MovieId> =
            report.movies.iter().map(|m| m.id).collect();
        assert_eq!(unique.len(), report.movies.len());
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_between_batches_only() {
        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_listing_page()
            .returning(|_, page| Ok(listing(page, 500)));

        let settings = AggregationSettings {
            batch_size: 5,
            inter_batch_delay: Duration::from_millis(100),
        };
        let aggregator = BatchedAggregator::new(Arc::new(client), settings);

        let started = tokio::time::Instant::now();
        let report = aggregator.aggregate(Listing::Popular, 1, 12).await;

        assert_eq!(report.batches_run, 3);
        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn batch_pages_run_concurrently_and_merge_in_page_order() {
        let client = Arc::new(StaggeredClient {
            last_page: 10,
            completed: Mutex::new(Vec::new()),
        });
        let aggregator =
            BatchedAggregator::new(Arc::clone(&client), no_delay());

        let started = tokio::time::Instant::now();
        let report = aggregator.aggregate(Listing::Popular, 1, 10).await;

        // Each batch costs only its slowest page: 90ms for 1..=5, 40ms for 6..=10.
        assert_eq!(started.elapsed(), Duration::from_millis(130));
        assert_eq!(
            *client.completed.lock().unwrap(),
            vec![5, 4, 3, 2, 1, 10, 9, 8, 7, 6]
        );
        let expected: Vec<u64> =
            (1..=10u64).flat_map(|p| [p * 10, p * 10 + 1]).collect();
        assert_eq!(ids(&report.movies), expected);
        assert_eq!(report.batches_run, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn no_pause_after_end_of_data() {
        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_listing_page()
            .returning(|_, page| Ok(listing(page, 2)));

        let aggregator = BatchedAggregator::new(
            Arc::new(client),
            AggregationSettings {
                batch_size: 2,
                inter_batch_delay: Duration::from_secs(5),
            },
        );

        let started = tokio::time::Instant::now();
        let report = aggregator.aggregate(Listing::TopRated, 1, 10).await;

        assert!(report.reached_end);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
