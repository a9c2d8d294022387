//! # Marquee Server
//!
//! JSON API over the TMDB movie catalog.
//!
//! - `GET /health`
//! - `GET /api/movies/top-rated`: the home list
//! - `GET /api/movies?page=&filter=`: browse the popular snapshot by letter
//! - `GET /api/movies/{id}`: detail view with trailer, clips and top cast
//!
//! Listing snapshots are aggregated on first use and kept in memory until
//! their refresh interval runs out.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
