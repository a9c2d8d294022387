//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod details;
pub mod image;
pub mod movie;

// Intentionally curated re-exports for downstream consumers.
pub use details::{
    CastMember, Credits, Genre, MovieDetails, ProductionCompany,
    ProductionCountry, Video, VideoList,
};
pub use image::{ImageBase, PosterSize, ProfileSize};
pub use movie::{ListingPage, Movie, MovieId};
