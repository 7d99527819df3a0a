use serde::{Deserialize, Serialize};

use super::client_state::TaskItem;

/// A psychology topic's curriculum content. Immutable once seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub slug: String,
    pub name: String,
    pub level: String,
    pub hero_image: String,
    pub summary: String,
    pub key_ideas: Vec<String>,
    pub psychologists: Vec<String>,
    pub mnemonics: Vec<Mnemonic>,
    pub resources: Vec<Resource>,
    pub activities: Vec<String>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
    /// Default task checklist handed to clients that never customized this topic
    #[serde(default)]
    pub schedule: Vec<TaskItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mnemonic {
    pub title: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "q")]
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub answer: usize,
    #[serde(rename = "explain")]
    pub explanation: String,
}
