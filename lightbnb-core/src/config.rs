//! Connection and fixture configuration
//!
//! Loaded from `~/.lightbnb/config.toml` (optional) and then overridden by
//! environment variables:
//! - `DATABASE_URL`: full connection string, wins over the individual parts
//! - `LIGHTBNB_DB_HOST`, `LIGHTBNB_DB_PORT`, `LIGHTBNB_DB_NAME`
//! - `LIGHTBNB_DB_USER`, `LIGHTBNB_DB_PASSWORD`
//! - `LIGHTBNB_DB_MAX_CONNECTIONS`
//! - `LIGHTBNB_FIXTURES_DIR`: directory holding `users.json` and `properties.json`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Default pool size. Small on purpose: the web layer is the only client.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightbnbConfig {
    pub database: DatabaseConfig,
    pub fixtures: FixturesConfig,
}

/// PostgreSQL connection settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection string; when set the individual parts are ignored
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            name: "lightbnb".to_string(),
            user: None,
            password: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

// Hand-written so passwords never reach the logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Where the seed fixtures live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    pub dir: PathBuf,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("fixtures"),
        }
    }
}

impl FixturesConfig {
    pub fn users_path(&self) -> PathBuf {
        self.dir.join("users.json")
    }

    pub fn properties_path(&self) -> PathBuf {
        self.dir.join("properties.json")
    }
}

impl LightbnbConfig {
    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, `~/.lightbnb/config.toml`
    /// is read when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Config file path: ~/.lightbnb/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lightbnb/config.toml")
    }

    /// Parse a TOML config file without environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        toml::from_str(&content).map_err(|source| CoreError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = &mut self.database;

        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            db.url = Some(url);
        }
        if let Some(host) = lookup("LIGHTBNB_DB_HOST") {
            db.host = host;
        }
        if let Some(port) = lookup("LIGHTBNB_DB_PORT") {
            db.port = port.parse().map_err(|_| {
                CoreError::config(format!("LIGHTBNB_DB_PORT must be a port number, got '{}'", port))
            })?;
        }
        if let Some(name) = lookup("LIGHTBNB_DB_NAME") {
            db.name = name;
        }
        if let Some(user) = lookup("LIGHTBNB_DB_USER") {
            db.user = Some(user);
        }
        if let Some(password) = lookup("LIGHTBNB_DB_PASSWORD") {
            db.password = Some(password);
        }
        if let Some(max) = lookup("LIGHTBNB_DB_MAX_CONNECTIONS") {
            db.max_connections = max.parse().map_err(|_| {
                CoreError::config(format!(
                    "LIGHTBNB_DB_MAX_CONNECTIONS must be a positive integer, got '{}'",
                    max
                ))
            })?;
        }
        if let Some(dir) = lookup("LIGHTBNB_FIXTURES_DIR") {
            self.fixtures.dir = PathBuf::from(dir);
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(CoreError::config("database.max_connections must be at least 1"));
        }
        if self.database.url.is_none() && self.database.name.trim().is_empty() {
            return Err(CoreError::config("database.name cannot be empty"));
        }
        Ok(())
    }
}
