//! `lightbnb seed` - load fixture users and properties

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lightbnb_core::{FixturesConfig, Fixtures, LightbnbConfig};
use serde_json::json;

use super::{connect, print_json};

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Directory with users.json and properties.json (default: config fixtures.dir)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub async fn run_seed(args: SeedArgs, config: &LightbnbConfig) -> Result<()> {
    let fixtures_config = match args.dir {
        Some(dir) => FixturesConfig { dir },
        None => config.fixtures.clone(),
    };
    let fixtures = Fixtures::load(&fixtures_config).context("Failed to load fixtures")?;

    let gateway = connect(config).await?;
    let report = lightbnb_db::seed(gateway.pool(), &fixtures)
        .await
        .context("Seeding failed; no fixtures were inserted")?;

    print_json(&json!({
        "users": report.user_ids.len(),
        "properties": report.property_ids.len(),
    }))
}
