use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Per-client study progress. Created lazily on first reference to an id and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    pub client_id: String,
    #[serde(default)]
    pub bookmarks: BTreeMap<String, bool>,
    /// Absent slug means "use the branch's default schedule"
    #[serde(default)]
    pub tasks: BTreeMap<String, Vec<TaskItem>>,
    #[serde(default)]
    pub quiz: BTreeMap<String, QuizRecord>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientState {
    /// Fresh record with every map empty and blank notes
    pub fn new(client_id: impl Into<String>) -> Self {
        // Postgres keeps microseconds
        let now = Utc::now().trunc_subsecs(6);
        Self {
            client_id: client_id.into(),
            bookmarks: BTreeMap::new(),
            tasks: BTreeMap::new(),
            quiz: BTreeMap::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl TaskItem {
    pub fn new(text: impl Into<String>, done: bool) -> Self {
        Self {
            text: text.into(),
            done,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub best: i64,
}
