use std::sync::Arc;

use tracing::info;

use crate::database::models::Branch;
use crate::database::Store;
use crate::seed;

use super::{ServiceError, ServiceResult};

/// Read access to the branch catalogue, plus the one-time seed
#[derive(Clone)]
pub struct CatalogueService {
    store: Arc<dyn Store>,
}

impl CatalogueService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Insert the builtin branches when the catalogue is empty. Returns how many were inserted.
    ///
    /// Any existing branch, builtin or not, counts as "already seeded".
    pub async fn seed_if_empty(&self) -> ServiceResult<usize> {
        if self.store.count_branches().await? > 0 {
            return Ok(0);
        }

        let branches = seed::builtin_branches()?;
        self.store.insert_branches(&branches).await?;
        info!("Seeded branches collection with {} builtin branches", branches.len());
        Ok(branches.len())
    }

    pub async fn list_branches(&self) -> ServiceResult<Vec<Branch>> {
        Ok(self.store.list_branches().await?)
    }

    pub async fn get_branch(&self, slug: &str) -> ServiceResult<Branch> {
        if slug.contains('\0') {
            return Err(ServiceError::NotFound("Branch not found".to_string()));
        }
        self.store
            .find_branch(slug)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Branch not found".to_string()))
    }

    pub async fn branch_exists(&self, slug: &str) -> ServiceResult<bool> {
        // No seeded slug contains NUL, and Postgres cannot compare against one
        if slug.contains('\0') {
            return Ok(false);
        }
        Ok(self.store.branch_exists(slug).await?)
    }

    /// Fail with NotFound unless `slug` names a catalogue branch
    pub async fn require_branch(&self, slug: &str) -> ServiceResult<()> {
        if self.branch_exists(slug).await? {
            Ok(())
        } else {
            Err(ServiceError::unknown_slug())
        }
    }
}
