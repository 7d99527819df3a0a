use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::database::models::{Branch, ClientState, StatusCheck, TaskItem};

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// True when the backend itself is unreachable rather than the request being bad
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Sqlx(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            )
        )
    }

    /// True when Postgres refused a value it cannot store as text (NUL bytes)
    pub fn is_unstorable_text(&self) -> bool {
        match self {
            StoreError::Sqlx(sqlx::Error::Database(db)) => {
                matches!(db.code().as_deref(), Some("22021") | Some("22P05"))
            }
            _ => false,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for the branch catalogue, client study state and status checks.
///
/// Every client-state setter targets exactly one field path plus `updated_at`, so
/// writers touching different fields of the same record never overwrite each other.
/// Setters upsert: a missing record is created with defaults before the field is applied.
#[async_trait]
pub trait Store: Send + Sync {
    // Branch catalogue

    async fn count_branches(&self) -> StoreResult<u64>;
    /// Insert branches in order, skipping slugs that already exist
    async fn insert_branches(&self, branches: &[Branch]) -> StoreResult<()>;
    /// All branches in insertion order
    async fn list_branches(&self) -> StoreResult<Vec<Branch>>;
    async fn find_branch(&self, slug: &str) -> StoreResult<Option<Branch>>;
    async fn branch_exists(&self, slug: &str) -> StoreResult<bool>;

    // Client state

    async fn find_state(&self, client_id: &str) -> StoreResult<Option<ClientState>>;
    /// Insert a new record. Returns `false` without writing if the id is already taken.
    async fn insert_state(&self, state: &ClientState) -> StoreResult<bool>;
    async fn set_bookmark(
        &self,
        client_id: &str,
        slug: &str,
        bookmarked: bool,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;
    async fn set_tasks(
        &self,
        client_id: &str,
        slug: &str,
        tasks: &[TaskItem],
        at: DateTime<Utc>,
    ) -> StoreResult<()>;
    async fn set_quiz_best(
        &self,
        client_id: &str,
        slug: &str,
        best: i64,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;
    async fn set_notes(&self, client_id: &str, notes: &str, at: DateTime<Utc>) -> StoreResult<()>;

    // Status checks

    async fn insert_status_check(&self, check: &StatusCheck) -> StoreResult<()>;
    /// Oldest first, at most `limit` entries
    async fn list_status_checks(&self, limit: usize) -> StoreResult<Vec<StatusCheck>>;

    // Lifecycle

    async fn health_check(&self) -> StoreResult<()>;
    /// Release the underlying connections. Called once at shutdown.
    async fn close(&self);
}
