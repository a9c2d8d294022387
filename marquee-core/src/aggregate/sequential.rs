use std::sync::Arc;

use marquee_model::Movie;
use tracing::debug;

use crate::providers::{CatalogClient, FetchFailure, Listing};

/// Fetches a small page range strictly one page at a time.
///
/// All-or-nothing: the first failing page aborts the run and its error is
/// returned. Pages are assumed disjoint, so no deduplication happens.
#[derive(Debug)]
pub struct SequentialAggregator<C: ?Sized> {
    client: Arc<C>,
}

impl<C: CatalogClient + ?Sized> SequentialAggregator<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn aggregate_top_rated(
        &self,
        start_page: u32,
        page_count: u32,
    ) -> Result<Vec<Movie>, FetchFailure> {
        self.aggregate(Listing::TopRated, start_page, page_count)
            .await
    }

    pub async fn aggregate(
        &self,
        listing: Listing,
        start_page: u32,
        page_count: u32,
    ) -> Result<Vec<Movie>, FetchFailure> {
        let mut movies = Vec::new();
        let end = start_page.saturating_add(page_count);

        for page in start_page..end {
            let result = self.client.fetch_listing_page(listing, page).await?;
            let last = result.is_last_page();
            movies.extend(result.results);
            if last {
                debug!(%listing, page, "upstream reported last page");
                break;
            }
        }

        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use marquee_model::ListingPage;
    use reqwest::StatusCode;

    use super::*;
    use crate::providers::MockCatalogClient;

    fn listing(page: u32, total_pages: u32, ids: &[u64]) -> ListingPage {
        ListingPage {
            page,
            results: ids.iter().map(|id| Movie::new(*id, format!("#{id}"))).collect(),
            total_pages,
            total_results: 0,
        }
    }

    #[tokio::test]
    async fn fetches_pages_in_request_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&order);
        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_listing_page()
            .times(3)
            .returning(move |kind, page| {
                assert_eq!(kind, Listing::TopRated);
                seen.lock().unwrap().push(page);
                Ok(listing(page, 100, &[u64::from(page)]))
            });

        let aggregator = SequentialAggregator::new(Arc::new(client));
        let movies = aggregator.aggregate_top_rated(2, 3).await.unwrap();

        assert_eq!(*order.lock().unwrap(), vec![2, 3, 4]);
        let ids: Vec<u64> = movies.iter().map(|m| m.id.as_u64()).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn stops_at_last_page() {
        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_listing_page()
            .times(2)
            .returning(|_, page| Ok(listing(page, 2, &[u64::from(page)])));

        let aggregator = SequentialAggregator::new(Arc::new(client));
        let movies = aggregator
            .aggregate(Listing::TopRated, 1, 5)
            .await
            .unwrap();
        assert_eq!(movies.len(), 2);
    }

    #[tokio::test]
    async fn first_failure_propagates() {
        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_listing_page()
            .times(2)
            .returning(|_, page| {
                if page == 2 {
                    Err(FetchFailure::Status {
                        endpoint: "/movie/top_rated?page=2".into(),
                        status: StatusCode::INTERNAL_SERVER_ERROR,
                    })
                } else {
                    Ok(listing(page, 10, &[1]))
                }
            });

        let aggregator = SequentialAggregator::new(Arc::new(client));
        let err = aggregator
            .aggregate(Listing::TopRated, 1, 5)
            .await
            .unwrap_err();
        assert_eq!(err.endpoint(), "/movie/top_rated?page=2");
    }

    #[tokio::test]
    async fn keeps_duplicates() {
        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_listing_page()
            .returning(|_, page| Ok(listing(page, 10, &[7])));

        let aggregator = SequentialAggregator::new(Arc::new(client));
        let movies = aggregator
            .aggregate(Listing::Popular, 1, 2)
            .await
            .unwrap();
        assert_eq!(movies.len(), 2);
    }
}
