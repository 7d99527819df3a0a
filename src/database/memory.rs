use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::database::models::{Branch, ClientState, QuizRecord, StatusCheck, TaskItem};
use crate::database::store::{Store, StoreResult};

#[derive(Default)]
struct Inner {
    branches: Vec<Branch>,
    states: HashMap<String, ClientState>,
    status_checks: Vec<StatusCheck>,
}

impl Inner {
    fn state_mut(&mut self, client_id: &str) -> &mut ClientState {
        self.states
            .entry(client_id.to_string())
            .or_insert_with(|| ClientState::new(client_id))
    }
}

/// Process-local store. Same semantics as the Postgres store, without durability.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn count_branches(&self) -> StoreResult<u64> {
        Ok(self.inner.read().await.branches.len() as u64)
    }

    async fn insert_branches(&self, branches: &[Branch]) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        for branch in branches {
            if !inner.branches.iter().any(|b| b.slug == branch.slug) {
                inner.branches.push(branch.clone());
            }
        }
        Ok(())
    }

    async fn list_branches(&self) -> StoreResult<Vec<Branch>> {
        Ok(self.inner.read().await.branches.clone())
    }

    async fn find_branch(&self, slug: &str) -> StoreResult<Option<Branch>> {
        let inner = self.inner.read().await;
        Ok(inner.branches.iter().find(|b| b.slug == slug).cloned())
    }

    async fn branch_exists(&self, slug: &str) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.branches.iter().any(|b| b.slug == slug))
    }

    async fn find_state(&self, client_id: &str) -> StoreResult<Option<ClientState>> {
        Ok(self.inner.read().await.states.get(client_id).cloned())
    }

    async fn insert_state(&self, state: &ClientState) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        if inner.states.contains_key(&state.client_id) {
            return Ok(false);
        }
        inner.states.insert(state.client_id.clone(), state.clone());
        Ok(true)
    }

    async fn set_bookmark(
        &self,
        client_id: &str,
        slug: &str,
        bookmarked: bool,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let state = inner.state_mut(client_id);
        state.bookmarks.insert(slug.to_string(), bookmarked);
        state.updated_at = at;
        Ok(())
    }

    async fn set_tasks(
        &self,
        client_id: &str,
        slug: &str,
        tasks: &[TaskItem],
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let state = inner.state_mut(client_id);
        state.tasks.insert(slug.to_string(), tasks.to_vec());
        state.updated_at = at;
        Ok(())
    }

    async fn set_quiz_best(
        &self,
        client_id: &str,
        slug: &str,
        best: i64,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let state = inner.state_mut(client_id);
        state.quiz.insert(slug.to_string(), QuizRecord { best });
        state.updated_at = at;
        Ok(())
    }

    async fn set_notes(&self, client_id: &str, notes: &str, at: DateTime<Utc>) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let state = inner.state_mut(client_id);
        state.notes = notes.to_string();
        state.updated_at = at;
        Ok(())
    }

    async fn insert_status_check(&self, check: &StatusCheck) -> StoreResult<()> {
        self.inner.write().await.status_checks.push(check.clone());
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> StoreResult<Vec<StatusCheck>> {
        let inner = self.inner.read().await;
        Ok(inner.status_checks.iter().take(limit).cloned().collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}
