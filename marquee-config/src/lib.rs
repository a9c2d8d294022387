//! Configuration library for Marquee.
//!
//! Settings are layered: `.env.local` / `.env` files feed the process
//! environment, an optional `marquee.toml` supplies file values, and
//! environment variables win over both. The result is validated once and
//! handed to the server as a [`Config`] plus any non-fatal [`ConfigWarnings`].

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    BrowseConfig, CatalogConfig, Config, ConfigMetadata, RefreshConfig,
    ServerConfig, TmdbConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
