use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::database::models::{ClientState, QuizRecord, TaskItem};
use crate::database::Store;

use super::{ensure_storable, CatalogueService, ServiceError, ServiceResult};

/// Result of a get-or-create on a client record
#[derive(Debug, Clone)]
pub struct Ensured {
    pub state: ClientState,
    /// True when this call created the record
    pub created: bool,
}

/// Per-client study progress: bookmarks, task lists, quiz bests and notes.
///
/// Every operation first makes sure the client's record exists. Writes then update exactly
/// one field path; nothing spans fields, so two writes to different fields are independent
/// and two writes to the same field resolve last-write-wins.
#[derive(Clone)]
pub struct StateService {
    store: Arc<dyn Store>,
    catalogue: CatalogueService,
}

impl StateService {
    pub fn new(store: Arc<dyn Store>, catalogue: CatalogueService) -> Self {
        Self { store, catalogue }
    }

    /// Get-or-create the record for `client_id`
    pub async fn ensure_state(&self, client_id: &str) -> ServiceResult<Ensured> {
        ensure_storable("client id", client_id)?;
        if let Some(state) = self.store.find_state(client_id).await? {
            return Ok(Ensured { state, created: false });
        }

        let fresh = ClientState::new(client_id);
        if self.store.insert_state(&fresh).await? {
            debug!("Created client state for {}", client_id);
            return Ok(Ensured { state: fresh, created: true });
        }

        // Another request created it between our read and insert
        let state = self
            .store
            .find_state(client_id)
            .await?
            .ok_or_else(|| {
                ServiceError::Inconsistent(format!(
                    "Client state {} was taken but cannot be read back",
                    client_id
                ))
            })?;
        Ok(Ensured { state, created: false })
    }

    pub async fn get_state(&self, client_id: &str) -> ServiceResult<ClientState> {
        Ok(self.ensure_state(client_id).await?.state)
    }

    pub async fn set_bookmark(&self, client_id: &str, slug: &str, bookmarked: bool) -> ServiceResult<()> {
        self.catalogue.require_branch(slug).await?;
        self.ensure_state(client_id).await?;
        self.store
            .set_bookmark(client_id, slug, bookmarked, Utc::now())
            .await?;
        Ok(())
    }

    /// The client's own list for `slug` if one was ever saved (even empty), else the branch default
    pub async fn get_tasks(&self, client_id: &str, slug: &str) -> ServiceResult<Vec<TaskItem>> {
        let Ensured { mut state, .. } = self.ensure_state(client_id).await?;
        if let Some(tasks) = state.tasks.remove(slug) {
            return Ok(tasks);
        }

        match self.catalogue.get_branch(slug).await {
            Ok(branch) => Ok(branch.schedule),
            Err(ServiceError::NotFound(_)) => Err(ServiceError::unknown_slug()),
            Err(e) => Err(e),
        }
    }

    /// Replace the client's list for `slug` wholesale
    pub async fn set_tasks(&self, client_id: &str, slug: &str, tasks: &[TaskItem]) -> ServiceResult<()> {
        for task in tasks {
            ensure_storable("task text", &task.text)?;
        }
        self.catalogue.require_branch(slug).await?;
        self.ensure_state(client_id).await?;
        self.store.set_tasks(client_id, slug, tasks, Utc::now()).await?;
        Ok(())
    }

    pub async fn get_quiz_progress(&self, client_id: &str) -> ServiceResult<BTreeMap<String, QuizRecord>> {
        Ok(self.ensure_state(client_id).await?.state.quiz)
    }

    /// Overwrites the stored best, even with a lower score
    pub async fn set_quiz_best(&self, client_id: &str, slug: &str, best: i64) -> ServiceResult<()> {
        self.catalogue.require_branch(slug).await?;
        self.ensure_state(client_id).await?;
        self.store.set_quiz_best(client_id, slug, best, Utc::now()).await?;
        Ok(())
    }

    pub async fn get_notes(&self, client_id: &str) -> ServiceResult<String> {
        Ok(self.ensure_state(client_id).await?.state.notes)
    }

    pub async fn set_notes(&self, client_id: &str, notes: &str) -> ServiceResult<()> {
        ensure_storable("notes", notes)?;
        self.ensure_state(client_id).await?;
        self.store.set_notes(client_id, notes, Utc::now()).await?;
        Ok(())
    }
}
