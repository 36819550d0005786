//! Interaction history
//!
//! The last few question/answer pairs are persisted as JSON next to the
//! config file and sent along with each question so the assistant can answer
//! follow-ups in context. Only the latest five entries are kept.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries persisted and sent to the API
const HISTORY_LIMIT: usize = 5;

/// One past interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,

    /// The assembled plain-text answer
    pub answer: String,

    /// The persona-flavored answer, when the assistant produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,

    pub asked_at: DateTime<Utc>,
}

/// Rolling interaction history backed by a JSON file
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Loads history from `history.json` in the given directory
    ///
    /// A missing or unreadable file starts an empty history rather than
    /// failing the whole invocation.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join("history.json");

        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        Self { path, entries }
    }

    /// Appends a new entry, dropping the oldest beyond the limit
    pub fn add(&mut self, question: String, answer: String, persona: Option<String>) {
        self.entries.push(HistoryEntry {
            question,
            answer,
            persona,
            asked_at: Utc::now(),
        });

        if self.entries.len() > HISTORY_LIMIT {
            let excess = self.entries.len() - HISTORY_LIMIT;
            self.entries.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Writes the history back to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string(&self.entries).context("Failed to serialize history")?;

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write history: {}", self.path.display()))
    }
}
