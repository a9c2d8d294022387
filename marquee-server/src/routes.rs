use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers::movie_handlers, infra::app_state::AppState};

/// Create the application router with all routes and shared state.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(movie_handlers::health_handler))
        .nest("/api", create_api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(movie_handlers::browse_handler))
        .route("/movies/top-rated", get(movie_handlers::top_rated_handler))
        .route("/movies/{id}", get(movie_handlers::movie_details_handler))
}
