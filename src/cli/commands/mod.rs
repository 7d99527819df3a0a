pub mod branches;
pub mod seed;
pub mod serve;

use std::sync::Arc;

use anyhow::Context;

use crate::config::AppConfig;
use crate::database::{open_store, Store};

/// Open the configured store, attaching context for the CLI error report
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<Arc<dyn Store>> {
    open_store(&config.database)
        .await
        .context("failed to open storage")
}
