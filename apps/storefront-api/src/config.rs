//! API server configuration.
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. Config file (`STOREFRONT_CONFIG`, or `<platform config dir>/api.toml`)
//! 3. Environment variables
//!
//! ## Example `api.toml`
//! ```toml
//! port = 3001
//! database_path = "/var/lib/storefront/storefront.db"
//! allowed_origins = ["https://shop.example.com"]
//! featured_limit = 5
//! seed = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use storefront_core::DEFAULT_FEATURED_LIMIT;

/// Upper bound for `featured_limit`.
pub const MAX_FEATURED_LIMIT: u32 = 50;

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// HTTP port.
    pub port: u16,

    /// Interface to bind.
    pub bind_addr: String,

    /// SQLite database file.
    pub database_path: PathBuf,

    /// Origins allowed by CORS. Credentials are allowed for these.
    pub allowed_origins: Vec<String>,

    /// Products returned by `/api/featured`.
    pub featured_limit: u32,

    /// Insert the demo catalog on startup if the catalog is empty.
    pub seed: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 3001,
            bind_addr: "0.0.0.0".to_string(),
            database_path: default_database_path(),
            allowed_origins: (3000..=3006)
                .map(|port| format!("http://localhost:{port}"))
                .collect(),
            featured_limit: DEFAULT_FEATURED_LIMIT,
            seed: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var("STOREFRONT_CONFIG").ok().map(PathBuf::from))
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading API config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("STOREFRONT_PORT").or_else(|| lookup("PORT")) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_PORT".to_string()))?;
            debug!(port = self.port, "Overriding port from environment");
        }

        if let Some(path) = lookup("STOREFRONT_DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }

        if let Some(origins) = lookup("STOREFRONT_ALLOWED_ORIGINS") {
            self.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(limit) = lookup("STOREFRONT_FEATURED_LIMIT") {
            self.featured_limit = limit
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_FEATURED_LIMIT".to_string()))?;
        }

        if let Some(seed) = lookup("STOREFRONT_SEED") {
            self.seed = matches!(seed.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be greater than 0".into()));
        }
        if self.allowed_origins.is_empty() {
            return Err(ConfigError::Invalid(
                "allowed_origins must list at least one origin".into(),
            ));
        }
        if !(1..=MAX_FEATURED_LIMIT).contains(&self.featured_limit) {
            return Err(ConfigError::Invalid(format!(
                "featured_limit must be between 1 and {MAX_FEATURED_LIMIT}"
            )));
        }
        Ok(())
    }

    /// `bind_addr:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "storefront", "storefront")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("api.toml"))
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("storefront.db"))
        .unwrap_or_else(|| PathBuf::from("storefront.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.featured_limit, 5);
        assert_eq!(config.allowed_origins.len(), 7);
        assert_eq!(config.allowed_origins[0], "http://localhost:3000");
        assert_eq!(config.allowed_origins[6], "http://localhost:3006");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        config
            .apply_overrides(lookup(&[
                ("PORT", "8080"),
                ("STOREFRONT_ALLOWED_ORIGINS", "https://a.example, https://b.example ,"),
                ("STOREFRONT_FEATURED_LIMIT", "8"),
                ("STOREFRONT_SEED", "true"),
                ("STOREFRONT_DATABASE_PATH", "/tmp/shop.db"),
            ]))
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(config.featured_limit, 8);
        assert!(config.seed);
        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
    }

    #[test]
    fn test_storefront_port_wins_over_port() {
        let mut config = ApiConfig::default();
        config
            .apply_overrides(lookup(&[("PORT", "8080"), ("STOREFRONT_PORT", "9090")]))
            .unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_overrides(lookup(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = ApiConfig::default();
        config.featured_limit = 0;
        assert!(config.validate().is_err());

        config.featured_limit = MAX_FEATURED_LIMIT + 1;
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.allowed_origins.clear();
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ApiConfig = toml::from_str("port = 4000\nseed = true\n").unwrap();
        assert_eq!(config.port, 4000);
        assert!(config.seed);
        assert_eq!(config.featured_limit, DEFAULT_FEATURED_LIMIT);
        assert_eq!(config.allowed_origins.len(), 7);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let path = std::env::temp_dir().join(format!("storefront-api-{}.toml", std::process::id()));
        std::fs::write(&path, "featured_limit = 3\n").unwrap();

        let config = ApiConfig::from_file(&path).unwrap();
        assert_eq!(config.featured_limit, 3);

        std::fs::write(&path, "featured_limit = \"many\"\n").unwrap();
        assert!(matches!(ApiConfig::from_file(&path), Err(ConfigError::Parse(_))));

        let _ = std::fs::remove_file(path);
    }
}
