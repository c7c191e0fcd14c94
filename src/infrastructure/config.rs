use crate::domain::error::FairError;
use crate::domain::resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    pub http_proxy: Option<String>,
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    pub exhibitors_path: Option<String>,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeocoderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_client_identifier")]
    pub client_identifier: String,
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_enable")]
    pub persist: bool,
    pub path: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            client_identifier: default_client_identifier(),
            min_delay_ms: default_min_delay_ms(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeocoderConfig {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_retries: self.max_retries,
            client_identifier: self.client_identifier.clone(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            persist: true,
            path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            enable_emoji: true,
            http_proxy: None,
            dataset_path: default_dataset_path(),
            exhibitors_path: None,
            logging: Logging::default(),
            geocoder: GeocoderConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

// Defaults
fn default_theme() -> String {
    "field".to_string()
}
fn default_enable_emoji() -> bool {
    true
}
fn default_dataset_path() -> String {
    "feiras.json".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_client_identifier() -> String {
    concat!("fairmap/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_min_delay_ms() -> u64 {
    1000
}
fn default_max_retries() -> u32 {
    1
}
fn default_timeout_secs() -> u64 {
    10
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fairmap").join("config.toml"))
}

/// Get the resolution store path (config directory unless overridden)
pub fn get_database_path(config: &Config) -> PathBuf {
    if let Some(path) = config.cache.path.as_deref().filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fairmap")
        .join("fairmap.db")
}

/// Map the configured level name onto a tracing filter directive
pub fn log_level_directive(level: &str) -> &'static str {
    match level.to_ascii_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    }
}

pub fn parse_config(content: &str) -> Result<Config, FairError> {
    Ok(toml::from_str::<Config>(content)?)
}

pub fn load_config() -> Result<Config, FairError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

pub fn generate_config_sample() -> Result<(), FairError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sample = Config::default();
        let toml_content = toml::to_string_pretty(&sample)
            .map_err(|e| FairError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, toml_content)
            .map_err(|e| FairError::Config(format!("Failed to write config file: {}", e)))?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(FairError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}
