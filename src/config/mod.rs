//! Service configuration
//!
//! Configuration is loaded from a TOML file (auto-created with
//! defaults when missing), then overridden by the documented
//! environment variables; CLI flags are applied last in `main`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory the image files are materialized into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Emoji catalog document (asset hash -> emoji ids)
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    /// Item index document (item name -> asset hash)
    #[serde(default = "default_item_index_url")]
    pub item_index_url: String,
    /// CDN base the binary assets are fetched from
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,
    /// HTTP proxy host; an empty string disables the proxy
    #[serde(default = "default_proxy_host")]
    pub proxy_host: String,
    #[serde(default = "default_proxy_port")]
    pub proxy_port: u16,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Cron expression with a seconds field; the default fires daily
    /// at midnight
    #[serde(default = "default_refresh_cron")]
    pub refresh_cron: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8006
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_catalog_url() -> String {
    "https://raw.githubusercontent.com/skyblock-emoji/catalog/main/emojis.json".to_string()
}

fn default_item_index_url() -> String {
    "https://raw.githubusercontent.com/skyblock-emoji/catalog/main/items.json".to_string()
}

fn default_cdn_base_url() -> String {
    "https://cdn.discordapp.com/emojis".to_string()
}

fn default_proxy_host() -> String {
    "192.168.2.6".to_string()
}

fn default_proxy_port() -> u16 {
    25566
}

fn default_timeout_ms() -> u64 {
    10000
}

fn default_refresh_cron() -> String {
    "0 0 0 * * *".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_web_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            item_index_url: default_item_index_url(),
            cdn_base_url: default_cdn_base_url(),
            proxy_host: default_proxy_host(),
            proxy_port: default_proxy_port(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_cron: default_refresh_cron(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let mut config = if std::path::Path::new(config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// The documented environment variables win over file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("PROXY") {
            self.upstream.proxy_host = host;
        }
        if let Ok(value) = std::env::var("PROXY_PORT") {
            match value.parse() {
                Ok(port) => self.upstream.proxy_port = port,
                Err(_) => warn!("Ignoring invalid PROXY_PORT value: {}", value),
            }
        }
        if let Ok(value) = std::env::var("TIMEOUT") {
            match value.parse() {
                Ok(ms) => self.upstream.timeout_ms = ms,
                Err(_) => warn!("Ignoring invalid TIMEOUT value: {}", value),
            }
        }
        if let Ok(value) = std::env::var("PORT") {
            match value.parse() {
                Ok(port) => self.web.port = port,
                Err(_) => warn!("Ignoring invalid PORT value: {}", value),
            }
        }
    }
}
