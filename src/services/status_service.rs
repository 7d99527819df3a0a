use std::sync::Arc;

use crate::database::models::StatusCheck;
use crate::database::Store;

use super::{ensure_storable, ServiceResult};

#[derive(Clone)]
pub struct StatusService {
    store: Arc<dyn Store>,
    list_limit: usize,
}

impl StatusService {
    pub fn new(store: Arc<dyn Store>, list_limit: usize) -> Self {
        Self { store, list_limit }
    }

    pub async fn record(&self, client_name: &str) -> ServiceResult<StatusCheck> {
        ensure_storable("client name", client_name)?;
        let check = StatusCheck::new(client_name);
        self.store.insert_status_check(&check).await?;
        Ok(check)
    }

    pub async fn list(&self) -> ServiceResult<Vec<StatusCheck>> {
        Ok(self.store.list_status_checks(self.list_limit).await?)
    }
}
