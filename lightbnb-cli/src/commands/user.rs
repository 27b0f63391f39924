//! `lightbnb user` - look up and add users

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use lightbnb_core::LightbnbConfig;
use lightbnb_db::models::NewUser;

use super::{connect, print_json};

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Look up a user by exact email or by id (prints null when absent)
    Get(GetUserArgs),
    /// Insert a new user and print the stored record
    Add(AddUserArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct GetUserArgs {
    /// Email as stored (case-sensitive)
    #[arg(long)]
    pub email: Option<String>,

    /// Numeric user id
    #[arg(long)]
    pub id: Option<i32>,
}

#[derive(Args, Debug)]
pub struct AddUserArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Unique email address
    #[arg(long)]
    pub email: String,

    /// Password hash, stored as given
    #[arg(long)]
    pub password: String,
}

pub async fn run_user(args: UserArgs, config: &LightbnbConfig) -> Result<()> {
    match args.command {
        UserCommand::Get(get) => {
            let gateway = connect(config).await?;
            let user = match (get.email, get.id) {
                (Some(email), _) => gateway.get_user_with_email(&email).await?,
                (None, Some(id)) => gateway.get_user_with_id(id).await?,
                (None, None) => anyhow::bail!("pass --email or --id"),
            };
            print_json(&user)
        }
        UserCommand::Add(add) => {
            let new_user =
                NewUser::new(&add.name, &add.email, &add.password).context("Invalid user")?;
            let gateway = connect(config).await?;
            let user = match gateway.add_user(&new_user).await {
                Ok(user) => user,
                Err(err) if err.is_conflict() => {
                    anyhow::bail!("{} is already registered", new_user.email().as_str())
                }
                Err(err) => return Err(err.into()),
            };
            print_json(&user)
        }
    }
}
