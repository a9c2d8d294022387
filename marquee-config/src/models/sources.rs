use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub tmdb: FileTmdbConfig,
    #[serde(default)]
    pub aggregation: FileAggregationConfig,
    #[serde(default)]
    pub catalog: FileCatalogConfig,
    #[serde(default)]
    pub browse: FileBrowseConfig,
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub refresh: FileRefreshConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAggregationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    /// Humantime string such as `"100ms"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inter_batch_delay: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_start_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_rated_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_rated_limit: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileBrowseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileRefreshConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_interval: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub tmdb_image_base_url: Option<String>,
    pub tmdb_language: Option<String>,
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub batch_size: Option<usize>,
    pub inter_batch_delay: Option<String>,
    pub popular_pages: Option<u32>,
    pub page_size: Option<usize>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        let mut env_config = Self::default();

        env_config.tmdb_api_key = std::env::var("TMDB_API_KEY").ok();
        env_config.tmdb_base_url = std::env::var("TMDB_BASE_URL").ok();
        env_config.tmdb_image_base_url =
            std::env::var("TMDB_IMAGE_BASE_URL").ok();
        env_config.tmdb_language = std::env::var("TMDB_LANGUAGE").ok();
        env_config.config_path =
            std::env::var("MARQUEE_CONFIG").ok().map(PathBuf::from);

        env_config.server_host = std::env::var("SERVER_HOST").ok();
        env_config.server_port = parse_var("SERVER_PORT");

        env_config.batch_size = parse_var("MARQUEE_BATCH_SIZE");
        env_config.inter_batch_delay =
            std::env::var("MARQUEE_BATCH_DELAY").ok();
        env_config.popular_pages = parse_var("MARQUEE_POPULAR_PAGES");
        env_config.page_size = parse_var("MARQUEE_PAGE_SIZE");

        env_config
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}
