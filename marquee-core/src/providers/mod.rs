pub mod credentials;
pub mod tmdb;
pub mod traits;

pub use credentials::ApiKey;
pub use tmdb::TmdbClient;
pub use traits::{CatalogClient, FetchFailure, Listing};

#[cfg(test)]
pub use traits::MockCatalogClient;
