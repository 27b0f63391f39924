//! lightbnb CLI - query gateway access from the terminal
//!
//! Runs the same operations the web controller uses:
//! - user lookup and sign-up (`user get`, `user add`)
//! - a guest's completed reservations (`reservations`)
//! - property search and listing creation (`properties`, `property add`)
//! - fixture loading (`seed`)
//!
//! Results are printed as JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_core::LightbnbConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query the LightBnB rental listings database",
    long_about = "Look up users, list a guest's past reservations, search properties and load \
                  fixtures. Connection settings come from ~/.lightbnb/config.toml, \
                  DATABASE_URL or LIGHTBNB_DB_* variables."
)]
struct Cli {
    /// Enable debug logging (includes generated SQL)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.lightbnb/config.toml when present)
    #[arg(long, global = true, env = "LIGHTBNB_CONFIG")]
    config: Option<PathBuf>,

    /// Database URL (overrides config/environment parts)
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up or add users
    User(commands::UserArgs),
    /// List a guest's completed reservations, earliest first
    Reservations(commands::ReservationsArgs),
    /// Search properties, cheapest first
    Properties(commands::PropertiesArgs),
    /// Add property listings
    Property(commands::PropertyArgs),
    /// Load users.json and properties.json into the database
    Seed(commands::SeedArgs),
}

fn load_config(cli: &Cli) -> Result<LightbnbConfig> {
    let mut config = LightbnbConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(url) = &cli.database_url {
        config.database.url = Some(url.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env next to the working directory
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let config = load_config(&cli)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::User(args) => commands::run_user(args, &config).await?,
        Commands::Reservations(args) => commands::run_reservations(args, &config).await?,
        Commands::Properties(args) => commands::run_properties(args, &config).await?,
        Commands::Property(args) => commands::run_property(args, &config).await?,
        Commands::Seed(args) => commands::run_seed(args, &config).await?,
    }

    Ok(())
}
