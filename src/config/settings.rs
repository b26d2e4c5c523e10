//! Configuration settings
//!
//! Settings are read from a TOML file and can be overridden by environment
//! variables and, in the CLI, by command-line flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::types::ConfigParams;

/// Identity service endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "https://id.sharedid.org/id";

// Helper functions for serde defaults
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_id_field() -> String {
    "sharedId".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    crate::utils::version::user_agent()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_cookie_name() -> String {
    "sharedid".to_string()
}

fn default_expires_days() -> u32 {
    28
}

fn default_log_level() -> String {
    "info".to_string()
}

// Duration serialization module
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Main configuration settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Identity service configuration
    #[serde(default)]
    pub service: ServiceSettings,
    /// Network and proxy configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Record persistence configuration
    #[serde(default)]
    pub storage: StorageSettings,
    /// Params handed to the submodule
    #[serde(default)]
    pub params: ConfigParams,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Identity service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Endpoint for both the GET (mint) and POST (sync) calls
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Response field carrying the remote id
    #[serde(default = "default_id_field")]
    pub remote_id_field: String,
    /// Request field carrying the stored id on sync
    #[serde(default = "default_id_field")]
    pub payload_field: String,
    /// Send and accept cookies with requests
    #[serde(default = "default_true")]
    pub with_credentials: bool,
    /// Request timeout
    #[serde(with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Network and proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// HTTPS proxy URL
    #[serde(default)]
    pub https_proxy: Option<String>,
    /// HTTP proxy URL
    #[serde(default)]
    pub http_proxy: Option<String>,
    /// All protocols proxy URL
    #[serde(default)]
    pub all_proxy: Option<String>,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

/// Record persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Cookie the identity record is stored under
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Record lifetime in days
    #[serde(default = "default_expires_days")]
    pub expires_days: u32,
    /// Path of the JSON cookie file
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            remote_id_field: default_id_field(),
            payload_field: default_id_field(),
            with_credentials: default_true(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            https_proxy: None,
            http_proxy: None,
            all_proxy: None,
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            expires_days: default_expires_days(),
            store_path: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Override fields with whatever environment variables are set
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(endpoint) = std::env::var("SHAREDID_ENDPOINT") {
            self.service.endpoint = endpoint;
        }

        if let Ok(timeout) = std::env::var("SHAREDID_TIMEOUT") {
            let timeout_secs: u64 = timeout
                .parse()
                .map_err(|e| crate::Error::config("timeout", &format!("Invalid timeout: {}", e)))?;
            self.service.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(store) = std::env::var("SHAREDID_STORE") {
            self.storage.store_path = Some(PathBuf::from(store));
        }

        if let Ok(cookie_name) = std::env::var("SHAREDID_COOKIE_NAME") {
            self.params.cookie_name = Some(cookie_name);
        }

        // Proxy settings always override if present
        if let Ok(proxy) = std::env::var("HTTPS_PROXY") {
            self.network.https_proxy = Some(proxy);
        }
        if let Ok(proxy) = std::env::var("HTTP_PROXY") {
            self.network.http_proxy = Some(proxy);
        }
        if let Ok(proxy) = std::env::var("ALL_PROXY") {
            self.network.all_proxy = Some(proxy);
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(verbose) = std::env::var("VERBOSE") {
            self.logging.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(self)
    }

    /// Get effective proxy URL: HTTPS, then HTTP, then ALL
    pub fn get_proxy_url(&self) -> Option<String> {
        self.network
            .https_proxy
            .as_ref()
            .or(self.network.http_proxy.as_ref())
            .or(self.network.all_proxy.as_ref())
            .cloned()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        let endpoint = url::Url::parse(&self.service.endpoint).map_err(|e| {
            crate::Error::config(
                "endpoint",
                &format!("Invalid endpoint '{}': {}", self.service.endpoint, e),
            )
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(crate::Error::config(
                "endpoint",
                &format!("Unsupported scheme: {}", endpoint.scheme()),
            ));
        }

        for (name, field) in [
            ("remote_id_field", &self.service.remote_id_field),
            ("payload_field", &self.service.payload_field),
            ("cookie_name", &self.storage.cookie_name),
        ] {
            if field.is_empty() {
                return Err(crate::Error::config(name, "cannot be empty"));
            }
        }

        if self.service.timeout.is_zero() {
            return Err(crate::Error::config("timeout", "Invalid timeout: cannot be 0"));
        }

        if self.storage.expires_days == 0 {
            return Err(crate::Error::config(
                "expires_days",
                "Invalid record lifetime: cannot be 0",
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        for (name, proxy_url) in [
            ("https_proxy", &self.network.https_proxy),
            ("http_proxy", &self.network.http_proxy),
            ("all_proxy", &self.network.all_proxy),
        ] {
            if let Some(url_str) = proxy_url
                && let Err(e) = url::Url::parse(url_str)
            {
                return Err(crate::Error::config(
                    name,
                    &format!("Invalid proxy URL '{}': {}", url_str, e),
                ));
            }
        }

        Ok(())
    }
}
