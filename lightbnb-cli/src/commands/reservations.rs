//! `lightbnb reservations` - a guest's completed stays

use anyhow::{Context, Result};
use clap::Args;
use lightbnb_core::LightbnbConfig;
use lightbnb_db::models::{Limit, DEFAULT_LIMIT};

use super::{connect, print_json};

#[derive(Args, Debug)]
pub struct ReservationsArgs {
    /// Guest user id
    #[arg(long)]
    pub guest_id: i32,

    /// Maximum number of reservations (0-100)
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

pub async fn run_reservations(args: ReservationsArgs, config: &LightbnbConfig) -> Result<()> {
    let limit = Limit::new(args.limit).context("Invalid limit")?;

    let gateway = connect(config).await?;
    let stays = gateway.get_all_reservations(args.guest_id, limit).await?;
    print_json(&stays)
}
