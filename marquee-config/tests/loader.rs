use std::{fs, time::Duration};

use marquee_config::{
    ConfigGuardRailError, ConfigLoadError, ConfigLoader, EnvConfig,
};
use tempfile::tempdir;

fn env_with_key() -> EnvConfig {
    EnvConfig {
        tmdb_api_key: Some("test-key".to_string()),
        ..EnvConfig::default()
    }
}

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("marquee.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

#[test]
fn defaults_apply_without_file() {
    let load = ConfigLoader::new()
        .load_with_env(env_with_key())
        .expect("load");
    let config = load.config;

    assert_eq!(config.tmdb.api_key.expose(), "test-key");
    assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
    assert_eq!(config.tmdb.image_base_url, "https://image.tmdb.org/t/p");
    assert_eq!(config.aggregation.batch_size, 5);
    assert_eq!(
        config.aggregation.inter_batch_delay,
        Duration::from_millis(100)
    );
    assert_eq!(config.catalog.popular_pages, 20);
    assert_eq!(config.catalog.top_rated_pages, 1);
    assert_eq!(config.catalog.top_rated_limit, 10);
    assert_eq!(config.browse.page_size, 12);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.refresh.interval, Duration::from_secs(3600));
    assert_eq!(config.refresh.failure_interval, Duration::from_secs(60));
    assert!(config.metadata.config_path.is_none());

    assert_eq!(load.warnings.items.len(), 1);
    assert!(load.warnings.items[0].message.contains("marquee.toml"));
}

#[test]
fn missing_credential_is_fatal() {
    let err = ConfigLoader::new()
        .load_with_env(EnvConfig::default())
        .expect_err("no key");
    assert!(matches!(err, ConfigLoadError::MissingCredential));

    let blank = EnvConfig {
        tmdb_api_key: Some("   ".to_string()),
        ..EnvConfig::default()
    };
    let err = ConfigLoader::new()
        .load_with_env(blank)
        .expect_err("blank key");
    assert!(matches!(err, ConfigLoadError::MissingCredential));
}

#[test]
fn file_values_override_defaults() {
    let (_dir, path) = write_config(
        r#"
[tmdb]
api_key = "file-key"
base_url = "http://localhost:9999/3/"
language = "de-DE"

[aggregation]
batch_size = 3
inter_batch_delay = "250ms"

[catalog]
popular_pages = 4
top_rated_limit = 5

[browse]
page_size = 24

[server]
port = 8080

[refresh]
interval = "30m"
failure_interval = "10s"
"#,
    );

    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(EnvConfig::default())
        .expect("load");
    let config = load.config;

    assert_eq!(config.tmdb.api_key.expose(), "file-key");
    assert_eq!(config.tmdb.base_url, "http://localhost:9999/3");
    assert_eq!(config.tmdb.language.as_deref(), Some("de-DE"));
    assert_eq!(config.aggregation.batch_size, 3);
    assert_eq!(
        config.aggregation.inter_batch_delay,
        Duration::from_millis(250)
    );
    assert_eq!(config.catalog.popular_pages, 4);
    assert_eq!(config.catalog.top_rated_limit, 5);
    assert_eq!(config.browse.page_size, 24);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.refresh.interval, Duration::from_secs(30 * 60));
    assert_eq!(config.metadata.config_path.as_deref(), Some(path.as_path()));
    assert!(load.warnings.items.is_empty());
}

#[test]
fn environment_beats_file() {
    let (_dir, path) = write_config(
        r#"
[tmdb]
api_key = "file-key"

[aggregation]
batch_size = 3

[server]
host = "127.0.0.1"
port = 8080
"#,
    );

    let env = EnvConfig {
        tmdb_api_key: Some("env-key".to_string()),
        batch_size: Some(7),
        server_port: Some(9000),
        page_size: Some(6),
        ..EnvConfig::default()
    };
    let config = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env)
        .expect("load")
        .config;

    assert_eq!(config.tmdb.api_key.expose(), "env-key");
    assert_eq!(config.aggregation.batch_size, 7);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.browse.page_size, 6);
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nope.toml");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env_with_key())
        .expect_err("missing file");
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));

    let env = EnvConfig {
        config_path: Some(path),
        ..env_with_key()
    };
    let err = ConfigLoader::new()
        .load_with_env(env)
        .expect_err("missing file from env");
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}

#[test]
fn malformed_file_reports_parse_error() {
    let (_dir, path) = write_config("[aggregation]\nbatch_size = \"many\"\n");
    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_with_env(env_with_key())
        .expect_err("parse");
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}

#[test]
fn zero_sizes_are_rejected() {
    let env = EnvConfig {
        batch_size: Some(0),
        ..env_with_key()
    };
    let err = ConfigLoader::new().load_with_env(env).expect_err("zero batch");
    assert!(matches!(
        err,
        ConfigLoadError::Invalid(ConfigGuardRailError::ZeroBatchSize)
    ));

    let env = EnvConfig {
        page_size: Some(0),
        ..env_with_key()
    };
    let err = ConfigLoader::new().load_with_env(env).expect_err("zero page");
    assert!(matches!(
        err,
        ConfigLoadError::Invalid(ConfigGuardRailError::ZeroPageSize)
    ));
}

#[test]
fn large_batch_size_only_warns() {
    let env = EnvConfig {
        batch_size: Some(40),
        ..env_with_key()
    };
    let load = ConfigLoader::new().load_with_env(env).expect("load");

    assert_eq!(load.config.aggregation.batch_size, 40);
    assert!(
        load.warnings
            .items
            .iter()
            .any(|w| w.message.contains("batch_size") && w.hint.is_some())
    );
}

#[test]
fn bad_duration_and_url_are_reported() {
    let env = EnvConfig {
        inter_batch_delay: Some("soon".to_string()),
        ..env_with_key()
    };
    let err = ConfigLoader::new().load_with_env(env).expect_err("duration");
    assert!(matches!(
        err,
        ConfigLoadError::InvalidDuration {
            field: "aggregation.inter_batch_delay",
            ..
        }
    ));

    let env = EnvConfig {
        tmdb_base_url: Some("not a url".to_string()),
        ..env_with_key()
    };
    let err = ConfigLoader::new().load_with_env(env).expect_err("url");
    assert!(matches!(err, ConfigLoadError::InvalidUrl { .. }));
}

#[test]
fn env_file_feeds_process_environment() {
    let dir = tempdir().expect("tempdir");
    let env_path = dir.path().join(".env");
    fs::write(&env_path, "MARQUEE_TEST_ONLY_VALUE=from-file\n")
        .expect("write env");

    // Fails on the missing credential unless the host sets one; the env file
    // must be applied either way.
    let _ = ConfigLoader::new().with_env_file(&env_path).load();

    assert_eq!(
        std::env::var("MARQUEE_TEST_ONLY_VALUE").as_deref(),
        Ok("from-file")
    );
}
