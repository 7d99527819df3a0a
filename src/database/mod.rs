pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::DatabaseConfig;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Store, StoreError, StoreResult};

/// Open the configured backend: Postgres when a database URL is set, otherwise in-memory
pub async fn open_store(config: &DatabaseConfig) -> StoreResult<Arc<dyn Store>> {
    match config.url.as_deref() {
        Some(url) => {
            let shown = display_url(url);
            let store = PgStore::connect(url, config).await?;
            info!("Using Postgres store at {}", shown);
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set, client state will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn display_url(url: &str) -> String {
    postgres::redact_url(url).unwrap_or_else(|_| "<unparseable>".to_string())
}
