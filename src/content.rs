//! Content records and the publishable-content store.
//!
//! The feed never talks to the content backend directly; it consumes
//! [`ContentSource::publishable`], which returns the records viable for a
//! URL. Filtering of drafts, password-protected items and ordering
//! placeholders happens inside the store, not in the feed.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// One content item as exported by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentRecord {
    /// Stable permalink URL of the item.
    pub permalink: String,
    /// Last-modified timestamp (any format `utils::date` accepts).
    pub modified: Option<String>,
    /// Public taxonomy term links associated with the item.
    pub terms: Vec<String>,
    /// Author profile URL, when resolvable.
    pub author: Option<String>,
    /// Publish state; only `"publish"` records are viable.
    pub status: String,
    /// Non-empty when the item is password protected.
    pub password: String,
    /// Ordering sentinel; anything non-zero marks a menu placeholder.
    pub menu_order: i64,
}

impl Default for ContentRecord {
    fn default() -> Self {
        // Absent columns in an export assume a publishable record.
        Self {
            permalink: String::new(),
            modified: None,
            terms: Vec::new(),
            author: None,
            status: "publish".to_owned(),
            password: String::new(),
            menu_order: 0,
        }
    }
}

impl ContentRecord {
    fn is_publishable(&self) -> bool {
        self.status == "publish" && self.password.is_empty() && self.menu_order == 0
    }
}

/// A store that can list publishable content.
pub trait ContentSource {
    /// List publishable content records, most recently modified first.
    fn publishable(&self) -> Result<Vec<ContentRecord>>;
}

/// Content store backed by a JSON export file (an array of records).
#[derive(Debug, Clone)]
pub struct JsonContentSource {
    path: PathBuf,
}

impl JsonContentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentSource for JsonContentSource {
    fn publishable(&self) -> Result<Vec<ContentRecord>> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read content export {}", self.path.display()))?;

        let mut records: Vec<ContentRecord> =
            serde_json::from_str(&data).context("content export is not a JSON array of records")?;

        records.retain(ContentRecord::is_publishable);
        // ISO timestamps sort lexicographically; None sorts last.
        records.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(records)
    }
}

// ============================================================================
// Tests
// ============================================================================
