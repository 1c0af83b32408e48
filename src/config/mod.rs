//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/moto-atlas/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for searches
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Map widget settings
    #[serde(default)]
    pub map: MapConfig,

    /// Image delivery settings
    #[serde(default)]
    pub media: MediaConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Default values for searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default sort key
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Default result limit (0 = unlimited)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Catalog source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a catalog JSON file; empty means the built-in catalog
    #[serde(default)]
    pub path: String,
}

/// Location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Whether location lookups are allowed at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Timeout for a single location request
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,
}

/// Map widget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Access token for the map tile provider
    #[serde(default)]
    pub access_token: String,

    /// Map style URL
    #[serde(default = "default_map_style")]
    pub style: String,

    /// Marker colors by category label
    #[serde(default = "default_category_colors")]
    pub colors: HashMap<String, String>,
}

/// Image delivery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// CDN cloud name; empty means serve local fallback images
    #[serde(default)]
    pub cloud_name: String,

    /// CDN transformation string
    #[serde(default = "default_image_transformation")]
    pub transformation: String,

    /// URL prefix for local fallback images
    #[serde(default = "default_static_image_prefix")]
    pub static_prefix: String,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_sort() -> String {
    DEFAULT_SORT.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_limit() -> usize {
    DEFAULT_LIMIT
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}
fn default_true() -> bool {
    true
}
fn default_location_timeout() -> u64 {
    DEFAULT_LOCATION_TIMEOUT_SECS
}
fn default_map_style() -> String {
    DEFAULT_MAP_STYLE.to_string()
}
fn default_category_colors() -> HashMap<String, String> {
    [
        ("sales", "#dc2626"),
        ("service", "#2563eb"),
        ("training", "#16a34a"),
        ("spares", "#f59e0b"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
fn default_image_transformation() -> String {
    DEFAULT_IMAGE_TRANSFORMATION.to_string()
}
fn default_static_image_prefix() -> String {
    DEFAULT_STATIC_IMAGE_PREFIX.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/search/?api=1&query={lat},{lng}".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=16/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            sort: default_sort(),
            format: default_format(),
            limit: default_limit(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: default_location_timeout(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            style: default_map_style(),
            colors: default_category_colors(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            transformation: default_image_transformation(),
            static_prefix: default_static_image_prefix(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"; `map.colors.<category>` reads a marker color.
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "sort"] => Some(self.defaults.sort.clone()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "limit"] => Some(self.defaults.limit.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["server", "static_dir"] => Some(self.server.static_dir.clone()),

            ["catalog", "path"] => Some(self.catalog.path.clone()),

            ["location", "enabled"] => Some(self.location.enabled.to_string()),
            ["location", "timeout_secs"] => Some(self.location.timeout_secs.to_string()),

            ["map", "access_token"] => Some(self.map.access_token.clone()),
            ["map", "style"] => Some(self.map.style.clone()),
            ["map", "colors", category] => self.map.colors.get(*category).cloned(),

            ["media", "cloud_name"] => Some(self.media.cloud_name.clone()),
            ["media", "transformation"] => Some(self.media.transformation.clone()),
            ["media", "static_prefix"] => Some(self.media.static_prefix.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "sort"] => {
                value
                    .parse::<crate::query::SortKey>()
                    .map_err(Error::Config)?;
                self.defaults.sort = value.to_string();
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }
            ["defaults", "limit"] => {
                self.defaults.limit = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid limit value: {}", value))
                })?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }
            ["server", "static_dir"] => {
                self.server.static_dir = value.to_string();
            }

            ["catalog", "path"] => {
                self.catalog.path = value.to_string();
            }

            ["location", "enabled"] => {
                self.location.enabled = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }
            ["location", "timeout_secs"] => {
                self.location.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["map", "access_token"] => {
                self.map.access_token = value.to_string();
            }
            ["map", "style"] => {
                self.map.style = value.to_string();
            }
            ["map", "colors", category] => {
                self.map.colors.insert(category.to_lowercase(), value.to_string());
            }

            ["media", "cloud_name"] => {
                self.media.cloud_name = value.to_string();
            }
            ["media", "transformation"] => {
                self.media.transformation = value.to_string();
            }
            ["media", "static_prefix"] => {
                self.media.static_prefix = value.to_string();
            }

            ["url", "default"] => {
                if !self.url.providers.contains_key(value) {
                    return Err(Error::Config(format!("Unknown URL provider: {}", value)));
                }
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.sort",
            "defaults.format",
            "defaults.limit",
            "server.host",
            "server.port",
            "server.static_dir",
            "catalog.path",
            "location.enabled",
            "location.timeout_secs",
            "map.access_token",
            "map.style",
            "map.colors.<category>",
            "media.cloud_name",
            "media.transformation",
            "media.static_prefix",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Catalog file path, if one is configured
    pub fn catalog_path(&self) -> Option<PathBuf> {
        let path = self.catalog.path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }

    /// Timeout for a single location request
    pub fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.sort, "default");
        assert_eq!(config.defaults.format, "text");
        assert_eq!(config.server.port, 7878);
        assert!(config.location.enabled);
        assert!(config.map.access_token.is_empty());
        assert_eq!(config.map.colors.get("training").map(String::as_str), Some("#16a34a"));
        assert!(config.catalog_path().is_none());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("defaults.sort"), Some("default".to_string()));

        config.set("defaults.sort", "rating").unwrap();
        assert_eq!(config.get("defaults.sort"), Some("rating".to_string()));

        config.set("location.timeout_secs", "3").unwrap();
        assert_eq!(config.location_timeout(), Duration::from_secs(3));

        config.set("map.colors.Sales", "#000000").unwrap();
        assert_eq!(config.get("map.colors.sales"), Some("#000000".to_string()));

        config.set("catalog.path", "/srv/catalog.json").unwrap();
        assert_eq!(config.catalog_path(), Some(PathBuf::from("/srv/catalog.json")));
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
        assert_eq!(config.get("map.colors.racing"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("defaults.sort", "price").is_err());
        assert!(config.set("location.enabled", "maybe").is_err());
        assert!(config.set("url.default", "bing").is_err());
    }

    #[test]
    fn test_format_url() {
        let config = Config::default();

        let url = config.format_url(Some("apple"), 5.6037, -0.187).unwrap();
        assert_eq!(url, "https://maps.apple.com/?ll=5.6037,-0.187");

        let url = config.format_url(None, 5.6037, -0.187).unwrap();
        assert!(url.contains("google.com"));

        assert!(config.format_url(Some("unknown"), 5.6037, -0.187).is_err());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.defaults.sort = "name".to_string();
            config.map.access_token = "pk.test".to_string();
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.defaults.sort, "name");
            assert_eq!(loaded.map.access_token, "pk.test");
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert!(loaded.location.enabled);
        assert_eq!(loaded.map.colors.len(), 4);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[location]"));
        assert!(toml.contains("[map.colors]"));
        assert!(toml.contains("[url.providers]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        assert!(keys.contains(&"defaults.sort"));
        assert!(keys.contains(&"map.access_token"));
        assert!(keys.contains(&"media.cloud_name"));
    }
}
