use std::sync::Arc;

use crate::database::{MemoryStore, Store};
use crate::services::{CatalogueService, StateService, StatusService};

/// Services wired to a fresh in-memory store, one per test
pub struct TestContext {
    pub store: Arc<dyn Store>,
    pub catalogue: CatalogueService,
    pub state: StateService,
    pub status: StatusService,
}

impl TestContext {
    /// Empty catalogue; call `catalogue.seed_if_empty()` yourself
    pub fn unseeded() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let catalogue = CatalogueService::new(store.clone());
        let state = StateService::new(store.clone(), catalogue.clone());
        let status = StatusService::new(store.clone(), 1000);

        Self {
            store,
            catalogue,
            state,
            status,
        }
    }

    /// Catalogue populated with the builtin branches
    pub async fn seeded() -> Self {
        let ctx = Self::unseeded();
        ctx.catalogue
            .seed_if_empty()
            .await
            .expect("builtin catalogue should seed");
        ctx
    }
}
