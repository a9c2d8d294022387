pub mod sources;

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use marquee_core::{AggregationSettings, ApiKey};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_POPULAR_PAGES: u32 = 20;
pub const DEFAULT_TOP_RATED_PAGES: u32 = 1;
pub const DEFAULT_TOP_RATED_LIMIT: usize = 10;
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_FAILURE_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub tmdb: TmdbConfig,
    pub aggregation: AggregationSettings,
    pub catalog: CatalogConfig,
    pub browse: BrowseConfig,
    pub server: ServerConfig,
    pub refresh: RefreshConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub image_base_url: String,
    /// ISO 639-1 language sent with every request; upstream default when unset.
    pub language: Option<String>,
}

/// Which listing pages feed the two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub popular_start_page: u32,
    pub popular_pages: u32,
    pub top_rated_pages: u32,
    /// Items kept from the top-rated aggregate.
    pub top_rated_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            popular_start_page: 1,
            popular_pages: DEFAULT_POPULAR_PAGES,
            top_rated_pages: DEFAULT_TOP_RATED_PAGES,
            top_rated_limit: DEFAULT_TOP_RATED_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseConfig {
    pub page_size: usize,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: marquee_core::browse::DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// How long an aggregated snapshot stays fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshConfig {
    pub interval: Duration,
    /// Used instead of `interval` when the last aggregate came back empty.
    pub failure_interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            failure_interval: DEFAULT_FAILURE_REFRESH_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
