use std::fmt;

use async_trait::async_trait;
use marquee_model::{ListingPage, MovieDetails, MovieId};
use reqwest::StatusCode;

/// A single upstream call that did not produce a usable result.
///
/// Every variant names the endpoint (path and non-secret query) so callers can
/// log or surface which request failed without leaking the credential.
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    #[error("{endpoint}: not found")]
    NotFound { endpoint: String },

    #[error("{endpoint}: rate limited")]
    RateLimited { endpoint: String },

    #[error("{endpoint}: invalid API key")]
    InvalidApiKey { endpoint: String },

    #[error("{endpoint}: upstream returned {status}")]
    Status { endpoint: String, status: StatusCode },

    #[error("{endpoint}: network error: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint}: parse error: {reason}")]
    Parse { endpoint: String, reason: String },
}

impl FetchFailure {
    pub fn endpoint(&self) -> &str {
        match self {
            FetchFailure::NotFound { endpoint }
            | FetchFailure::RateLimited { endpoint }
            | FetchFailure::InvalidApiKey { endpoint }
            | FetchFailure::Status { endpoint, .. }
            | FetchFailure::Network { endpoint, .. }
            | FetchFailure::Parse { endpoint, .. } => endpoint,
        }
    }

    /// Upstream HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchFailure::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            FetchFailure::RateLimited { .. } => {
                Some(StatusCode::TOO_MANY_REQUESTS)
            }
            FetchFailure::InvalidApiKey { .. } => Some(StatusCode::UNAUTHORIZED),
            FetchFailure::Status { status, .. } => Some(*status),
            FetchFailure::Network { .. } | FetchFailure::Parse { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchFailure::NotFound { .. })
    }
}

/// Paginated listings exposed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    Popular,
    TopRated,
}

impl Listing {
    pub fn path(&self) -> &'static str {
        match self {
            Listing::Popular => "/movie/popular",
            Listing::TopRated => "/movie/top_rated",
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Popular => f.write_str("popular"),
            Listing::TopRated => f.write_str("top_rated"),
        }
    }
}

/// Read-only access to a remote movie catalog.
///
/// Implementations perform no retries, caching or rate limiting; those
/// policies belong to the callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of a listing.
    async fn fetch_listing_page(
        &self,
        listing: Listing,
        page: u32,
    ) -> Result<ListingPage, FetchFailure>;

    /// Fetch the full detail record, including credits and videos. Any failing
    /// sub-request fails the whole call.
    async fn fetch_movie_details(
        &self,
        id: MovieId,
    ) -> Result<MovieDetails, FetchFailure>;
}
