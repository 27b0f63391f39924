/// Structured error types for lightbnb-core.
///
/// The CLI wraps these in `anyhow`; library consumers match on variants.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lightbnb-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reading a config or fixture file failed
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fixture JSON could not be parsed
    #[error("JSON error in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Config file is not valid TOML for our schema
    #[error("Invalid config file {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config value present but unusable
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for lightbnb-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
