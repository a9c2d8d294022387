use axum::{
    extract::{Path, RawQuery, State},
    response::Json,
};
use serde_json::{Value, json};
use tracing::{debug, info};

use marquee_core::{
    NavigationQuery,
    browse::{self, DEFAULT_WINDOW, page_window},
};
use marquee_model::{ImageBase, Movie, MovieId};

use super::views::{BrowseResponse, DetailView, MovieCard, TopRatedResponse};
use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn top_rated_handler(
    State(state): State<AppState>,
) -> AppResult<Json<TopRatedResponse>> {
    let movies = state.top_rated_movies().await?;
    let movies = movies
        .iter()
        .map(|movie| MovieCard::from_movie(movie, &state.images))
        .collect();
    Ok(Json(TopRatedResponse { movies }))
}

pub async fn browse_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Json<BrowseResponse> {
    let query = NavigationQuery::parse(raw.as_deref().unwrap_or_default());
    let movies = state.popular_movies().await;
    Json(browse_response(
        &movies,
        &query,
        state.config.browse.page_size,
        &state.images,
    ))
}

pub async fn movie_details_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<DetailView>> {
    let id = MovieId::new(id);
    info!(%id, "fetching movie details");
    let details = state.catalog.fetch_movie_details(id).await?;
    Ok(Json(DetailView::from_details(&details, &state.images)))
}

/// Reconcile `query` against the snapshot and render the resulting page.
pub fn browse_response(
    movies: &[Movie],
    query: &NavigationQuery,
    page_size: usize,
    images: &ImageBase,
) -> BrowseResponse {
    let reconciled = browse::reconcile(query, movies, page_size);
    let view = reconciled.state.derive(movies, page_size);
    let query_rewritten = reconciled.rewrite.is_some();
    let canonical = reconciled
        .rewrite
        .unwrap_or_else(|| reconciled.state.to_query());

    if query_rewritten {
        debug!(
            requested = ?query.get("page"),
            rewritten = %canonical.to_query_string(),
            "browse query pointed past the last page"
        );
    }

    BrowseResponse {
        movies: view
            .page_items
            .iter()
            .map(|movie| MovieCard::from_movie(movie, images))
            .collect(),
        current_page: view.current_page,
        total_pages: view.total_pages,
        total_matches: view.filtered.len(),
        filter: view.filter.to_string(),
        query: canonical.to_query_string(),
        query_rewritten,
        pager: page_window(view.current_page, view.total_pages, DEFAULT_WINDOW),
    }
}
