//! lightbnb-core: shared plumbing for the LightBnB data access layer
//!
//! - [`config`]: database connection settings from TOML and environment
//! - [`fixtures`]: seed users and properties from the LightBnB JSON fixtures

pub mod config;
pub mod error;
pub mod fixtures;

pub use config::{DatabaseConfig, FixturesConfig, LightbnbConfig};
pub use error::{CoreError, Result};
pub use fixtures::{FixtureProperty, FixtureUser, Fixtures};
