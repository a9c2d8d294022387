pub mod error;

use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use marquee_core::{AggregationSettings, ApiKey, aggregate};

use crate::{
    models::{
        BrowseConfig, CatalogConfig, Config, ConfigMetadata,
        DEFAULT_IMAGE_BASE_URL, RefreshConfig, ServerConfig, TmdbConfig,
        sources::{EnvConfig, FileConfig},
    },
    validation::{self, ConfigWarnings},
};
use error::ConfigLoadError;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("marquee.toml"),
        PathBuf::from("config/marquee.toml"),
    ]
});

/// Loaded in order; values already in the environment are never overwritten,
/// so earlier files win.
const DEFAULT_ENV_FILES: [&str; 2] = [".env.local", ".env"];

#[derive(Debug, Default, Clone)]
struct ConfigLoaderOptions {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load env files, read the process environment, then compose.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_files()?;
        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Compose against an already gathered environment. The process
    /// environment and env files are not consulted.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let mut warnings = ConfigWarnings::default();

        if config_path.is_none() {
            warnings.push_with_hint(
                "No marquee.toml detected; using environment variables and defaults",
                "Create marquee.toml or set MARQUEE_CONFIG to point at one",
            );
        }

        let metadata = ConfigMetadata {
            config_path,
            env_file_loaded: false,
        };
        let (config, compose_warnings) =
            compose(file_config.unwrap_or_default(), env, metadata)?;
        warnings.extend(compose_warnings);

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_files(&self) -> Result<bool, ConfigLoadError> {
        let candidates: Vec<PathBuf> = match &self.options.env_file {
            Some(path) => vec![path.clone()],
            None => DEFAULT_ENV_FILES.iter().map(PathBuf::from).collect(),
        };

        let mut loaded = false;
        for path in candidates {
            match dotenvy::from_path(&path) {
                Ok(()) => loaded = true,
                Err(dotenvy::Error::Io(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(loaded)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge file and environment values over defaults (env beats file beats
/// default), then validate.
pub fn compose(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let FileConfig {
        tmdb: file_tmdb,
        aggregation: file_aggregation,
        catalog: file_catalog,
        browse: file_browse,
        server: file_server,
        refresh: file_refresh,
    } = file;

    let api_key = env
        .tmdb_api_key
        .or(file_tmdb.api_key)
        .and_then(ApiKey::new)
        .ok_or(ConfigLoadError::MissingCredential)?;

    let tmdb = TmdbConfig {
        api_key,
        base_url: resolve_url(
            "tmdb.base_url",
            env.tmdb_base_url.or(file_tmdb.base_url),
            marquee_core::providers::tmdb::TMDB_API_BASE,
        )?,
        image_base_url: resolve_url(
            "tmdb.image_base_url",
            env.tmdb_image_base_url.or(file_tmdb.image_base_url),
            DEFAULT_IMAGE_BASE_URL,
        )?,
        language: env
            .tmdb_language
            .or(file_tmdb.language)
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty()),
    };

    let aggregation = AggregationSettings {
        batch_size: env
            .batch_size
            .or(file_aggregation.batch_size)
            .unwrap_or(aggregate::DEFAULT_BATCH_SIZE),
        inter_batch_delay: resolve_duration(
            "aggregation.inter_batch_delay",
            env.inter_batch_delay.or(file_aggregation.inter_batch_delay),
            aggregate::DEFAULT_INTER_BATCH_DELAY,
        )?,
    };

    let catalog_defaults = CatalogConfig::default();
    let catalog = CatalogConfig {
        popular_start_page: file_catalog
            .popular_start_page
            .unwrap_or(catalog_defaults.popular_start_page),
        popular_pages: env
            .popular_pages
            .or(file_catalog.popular_pages)
            .unwrap_or(catalog_defaults.popular_pages),
        top_rated_pages: file_catalog
            .top_rated_pages
            .unwrap_or(catalog_defaults.top_rated_pages),
        top_rated_limit: file_catalog
            .top_rated_limit
            .unwrap_or(catalog_defaults.top_rated_limit),
    };

    let browse = BrowseConfig {
        page_size: env
            .page_size
            .or(file_browse.page_size)
            .unwrap_or(BrowseConfig::default().page_size),
    };

    let server_defaults = ServerConfig::default();
    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or(server_defaults.host),
        port: env
            .server_port
            .or(file_server.port)
            .unwrap_or(server_defaults.port),
    };

    let refresh_defaults = RefreshConfig::default();
    let refresh = RefreshConfig {
        interval: resolve_duration(
            "refresh.interval",
            file_refresh.interval,
            refresh_defaults.interval,
        )?,
        failure_interval: resolve_duration(
            "refresh.failure_interval",
            file_refresh.failure_interval,
            refresh_defaults.failure_interval,
        )?,
    };

    let config = Config {
        tmdb,
        aggregation,
        catalog,
        browse,
        server,
        refresh,
        metadata,
    };

    let warnings = validation::apply_guard_rails(&config)?;
    Ok((config, warnings))
}

fn resolve_url(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<String, ConfigLoadError> {
    let Some(raw) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    else {
        return Ok(default.to_string());
    };
    Url::parse(&raw).map_err(|source| ConfigLoadError::InvalidUrl {
        field,
        value: raw.clone(),
        source,
    })?;
    Ok(raw.trim_end_matches('/').to_string())
}

fn resolve_duration(
    field: &'static str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigLoadError> {
    match value {
        Some(raw) => humantime::parse_duration(raw.trim()).map_err(|source| {
            ConfigLoadError::InvalidDuration {
                field,
                value: raw,
                source,
            }
        }),
        None => Ok(default),
    }
}
