use catalog_types::config::BackendConfig;
use clap::{Parser, Subcommand};

use crate::commands::{category::CategoryCmd, genre::GenreCmd, Context, Executor};

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "CLI for the catalog - manages categories and genres stored in the catalog database."
)]
pub struct CliConfig {
    #[command(flatten)]
    pub backend: BackendConfig,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Creates or upgrades the database schema
    Migrate,
    /// Manages categories
    Category(CategoryCmd),
    /// Manages genres and their categories
    Genre(GenreCmd),
}

impl Executor for Command {
    async fn run(self, context: &Context) -> anyhow::Result<serde_json::Value> {
        match self {
            Command::Migrate => {
                catalog_dal::migrate(&context.pool).await?;
                Ok(serde_json::json!({"migrated": true}))
            }
            Command::Category(cmd) => cmd.run(context).await,
            Command::Genre(cmd) => cmd.run(context).await,
        }
    }
}
