use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    #[error("{0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub fetch: FetchConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// Outbound page fetching
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            user_agent: concat!("recipe-box/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
        }
    }
}

impl AppConfig {
    /// Load defaults, then the optional TOML file, then environment overrides.
    ///
    /// The file path comes from `RECIPE_BOX_CONFIG`; without it `config.toml`
    /// is read only when it exists.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("RECIPE_BOX_CONFIG").ok();
        let mut config = match &explicit {
            Some(path) => Self::from_file(Path::new(path))?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Overlay `PORT`, `HOST` and `DATABASE_URL` using `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.is_empty()) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(host) = lookup("HOST").filter(|h| !h.is_empty()) {
            self.server.host = host;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database.url = Some(url);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.database.url.as_deref() {
            Some(url) if !url.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingDatabaseUrl),
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch.timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Database URL; only meaningful after `validate` succeeded.
    pub fn database_url(&self) -> &str {
        self.database.url.as_deref().unwrap_or_default()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.fetch.timeout_secs, 20);
        assert_eq!(config.assets.dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [database]
            url = "mysql://u:p@localhost/recipes"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database_url(), "mysql://u:p@localhost/recipes");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::from_toml_str("[server]\nport = 8080\n").unwrap();
        config
            .apply_env(env(&[("PORT", "9000"), ("DATABASE_URL", "sqlite::memory:")]))
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_empty_port_uses_default() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("PORT", "")])).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_bad_port_rejected() {
        let mut config = AppConfig::default();
        let err = config.apply_env(env(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_missing_database_url() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingDatabaseUrl)
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[fetch]\ntimeout_secs = 5\nuser_agent = \"test-agent\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.user_agent, "test-agent");
        assert_eq!(config.fetch.max_redirects, 8);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = AppConfig::from_file(Path::new("/nonexistent/recipe-box.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
