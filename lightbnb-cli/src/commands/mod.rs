//! Subcommand implementations
//!
//! Each command validates its input before connecting, so bad arguments
//! fail fast without a database.

pub mod properties;
pub mod reservations;
pub mod seed;
pub mod user;

use anyhow::{Context, Result};
use lightbnb_core::LightbnbConfig;
use lightbnb_db::Gateway;
use serde::Serialize;

pub use properties::{run_properties, run_property, PropertiesArgs, PropertyArgs};
pub use reservations::{run_reservations, ReservationsArgs};
pub use seed::{run_seed, SeedArgs};
pub use user::{run_user, UserArgs};

async fn connect(config: &LightbnbConfig) -> Result<Gateway> {
    Gateway::connect(&config.database)
        .await
        .context("Failed to connect to database (check DATABASE_URL or LIGHTBNB_DB_* settings)")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}
