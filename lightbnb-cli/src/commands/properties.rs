//! `lightbnb properties` (search) and `lightbnb property add`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use lightbnb_core::LightbnbConfig;
use lightbnb_db::models::{
    Limit, NewProperty, NewPropertyParams, PropertySearch, PropertySearchParams, DEFAULT_LIMIT,
};

use super::{connect, print_json};

#[derive(Args, Debug)]
pub struct PropertiesArgs {
    /// Substring of the city name (case-sensitive)
    #[arg(long)]
    pub city: Option<String>,

    /// Only listings from this owner
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Exclusive lower price bound, in dollars
    #[arg(long)]
    pub minimum_price_per_night: Option<f64>,

    /// Exclusive upper price bound, in dollars
    #[arg(long)]
    pub maximum_price_per_night: Option<f64>,

    /// Keep listings with at least one review rated this or higher
    #[arg(long)]
    pub minimum_rating: Option<f64>,

    /// Maximum number of listings (0-100)
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

impl From<&PropertiesArgs> for PropertySearchParams {
    fn from(args: &PropertiesArgs) -> Self {
        Self {
            city: args.city.clone(),
            owner_id: args.owner_id,
            minimum_price_per_night: args.minimum_price_per_night,
            maximum_price_per_night: args.maximum_price_per_night,
            minimum_rating: args.minimum_rating,
        }
    }
}

pub async fn run_properties(args: PropertiesArgs, config: &LightbnbConfig) -> Result<()> {
    let search =
        PropertySearch::try_from(PropertySearchParams::from(&args)).context("Invalid search")?;
    let limit = Limit::new(args.limit).context("Invalid limit")?;
    if search.is_empty() {
        tracing::debug!("no filters given; listing cheapest properties");
    }

    let gateway = connect(config).await?;
    let listings = gateway.get_all_properties(&search, limit).await?;
    print_json(&listings)
}

#[derive(Args, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// Insert a listing from a JSON file (cost_per_night in cents)
    Add {
        /// Path to the listing JSON
        #[arg(long)]
        file: PathBuf,
    },
}

pub async fn run_property(args: PropertyArgs, config: &LightbnbConfig) -> Result<()> {
    match args.command {
        PropertyCommand::Add { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let params: NewPropertyParams = serde_json::from_str(&json)
                .with_context(|| format!("Invalid listing JSON in {}", file.display()))?;
            let property = NewProperty::try_from(params).context("Invalid listing")?;

            let gateway = connect(config).await?;
            let stored = gateway.add_property(&property).await?;
            print_json(&stored)
        }
    }
}
