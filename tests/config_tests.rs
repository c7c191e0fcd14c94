//! Configuration parsing

use fairmap::infrastructure::config::{parse_config, Config, DEFAULT_ENDPOINT};
use std::time::Duration;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.theme, "field");
    assert!(config.enable_emoji);
    assert!(config.http_proxy.is_none());
    assert_eq!(config.dataset_path, "feiras.json");
    assert!(config.exhibitors_path.is_none());
    assert!(config.logging.enable);
    assert_eq!(config.logging.level, "WARN");
    assert_eq!(config.geocoder.endpoint, DEFAULT_ENDPOINT);
    assert!(config.geocoder.client_identifier.starts_with("fairmap/"));
    assert!(config.cache.persist);
}

#[test]
fn test_config_toml_format() {
    let toml_content = r#"
theme = "harvest"
enable_emoji = false
http_proxy = "http://proxy.local:3128"
dataset_path = "data/feiras-2025.json"
exhibitors_path = "data/expositores.json"

[logging]
enable = true
path = "/tmp/fairmap.log"
level = "DEBUG"

[geocoder]
endpoint = "https://nominatim.example.org/"
client_identifier = "streamlit-app-studio-data-v4"
min_delay_ms = 1100
max_retries = 2
timeout_secs = 5

[cache]
persist = false
path = "/tmp/fairmap.db"
"#;

    let config = parse_config(toml_content).unwrap();

    assert_eq!(config.theme, "harvest");
    assert!(!config.enable_emoji);
    assert_eq!(config.http_proxy.as_deref(), Some("http://proxy.local:3128"));
    assert_eq!(
        config.exhibitors_path.as_deref(),
        Some("data/expositores.json")
    );
    assert_eq!(config.logging.path.as_deref(), Some("/tmp/fairmap.log"));
    assert_eq!(config.geocoder.timeout_secs, 5);
    assert!(!config.cache.persist);

    let resolver = config.geocoder.resolver_config();
    assert_eq!(resolver.min_delay, Duration::from_millis(1100));
    assert_eq!(resolver.max_retries, 2);
    assert_eq!(resolver.client_identifier, "streamlit-app-studio-data-v4");
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = parse_config("[geocoder]\nmax_retries = 0\n").unwrap();

    assert_eq!(config.geocoder.max_retries, 0);
    assert_eq!(config.geocoder.min_delay_ms, 1000);
    assert_eq!(config.geocoder.timeout_secs, 10);
    assert_eq!(config.logging.level, "WARN");
}
