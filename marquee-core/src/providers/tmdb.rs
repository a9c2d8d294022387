use async_trait::async_trait;
use marquee_model::{Credits, ListingPage, MovieDetails, MovieId, VideoList};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::credentials::ApiKey;
use super::traits::{CatalogClient, FetchFailure, Listing};

/// Default TMDB v3 REST root.
pub const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";

/// TMDB v3 client over reqwest.
///
/// The API key is supplied at construction and required for the client's
/// whole lifetime; there is no process-wide credential.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    api_key: ApiKey,
    base_url: String,
    language: Option<String>,
    client: Client,
}

impl TmdbClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(api_key, TMDB_API_BASE)
    }

    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: None,
            client: Client::new(),
        }
    }

    /// Request localized results (`en-US`, `fr-FR`, ...).
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchFailure> {
        let endpoint = describe_endpoint(path, params);
        let url = format!("{}{}", self.base_url, path);
        debug!(endpoint = %endpoint, "TMDB request");

        let mut request = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.expose())])
            .query(params);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }

        let response =
            request
                .send()
                .await
                .map_err(|source| FetchFailure::Network {
                    endpoint: endpoint.clone(),
                    source: source.without_url(),
                })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchFailure::InvalidApiKey { endpoint });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(FetchFailure::NotFound { endpoint });
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchFailure::RateLimited { endpoint });
        }
        if !status.is_success() {
            return Err(FetchFailure::Status { endpoint, status });
        }

        response.json::<T>().await.map_err(|e| FetchFailure::Parse {
            endpoint,
            reason: e.without_url().to_string(),
        })
    }
}

/// Render `path?k=v` without the credential, for logs and errors.
fn describe_endpoint(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{path}?{query}")
}

#[async_trait]
impl CatalogClient for TmdbClient {
    async fn fetch_listing_page(
        &self,
        listing: Listing,
        page: u32,
    ) -> Result<ListingPage, FetchFailure> {
        self.get_json(listing.path(), &[("page", page.to_string())])
            .await
    }

    async fn fetch_movie_details(
        &self,
        id: MovieId,
    ) -> Result<MovieDetails, FetchFailure> {
        let mut details: MovieDetails =
            self.get_json(&format!("/movie/{id}"), &[]).await?;

        let credits: Credits =
            self.get_json(&format!("/movie/{id}/credits"), &[]).await?;

        let videos: VideoList =
            self.get_json(&format!("/movie/{id}/videos"), &[]).await?;

        details.credits = credits;
        details.videos = videos;
        Ok(details)
    }
}
