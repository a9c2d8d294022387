pub mod movie_handlers;
pub mod views;
