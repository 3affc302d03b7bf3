use anyhow::{Context as _, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    commands::{Context, Executor as _},
    config::CliConfig,
};

/// Runs the command and prints its result as JSON. Ctrl-C cancels the running command.
pub async fn run(config: CliConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            interrupt.cancel();
        }
    });

    let output = execute(config, cancel).await?;
    if !output.is_null() {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

pub async fn execute(config: CliConfig, cancel: CancellationToken) -> Result<serde_json::Value> {
    if config.backend.uses_data_dir() {
        let data_dir = config.backend.data_dir();
        if !data_dir.exists() {
            std::fs::create_dir_all(&data_dir).with_context(|| {
                format!("Cannot create data directory {}", data_dir.display())
            })?;
        }
    }
    let database_url = config.backend.database_url();
    debug!(%database_url, "Opening database");
    let pool = catalog_dal::new_pool(&database_url).await?;
    let context = Context { pool, cancel };
    let output = config.command.run(&context).await;
    context.pool.close().await;
    output
}
