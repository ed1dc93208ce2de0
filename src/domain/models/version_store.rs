//! Version store entities: repositories, tags, and marks (spec.md §3, §4.2).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked module repository (`owner/repo`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub path: String,
    pub last_online_retrieval: Option<DateTime<Utc>>,
}

/// A single upstream tag of a tracked repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub repository_id: i64,
    pub name: String,
    pub zipball_url: String,
    pub tarball_url: String,
    pub commit_url: String,
}

/// The closed set of administrative marks a tag can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkKind {
    Defective,
}

impl MarkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Defective => "DEFECTIVE",
        }
    }
}

/// A fetched upstream tag, prior to being persisted — the shape returned by
/// the upstream tag source (spec.md §4.2 `sync`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamTag {
    pub name: String,
    pub zipball_url: String,
    pub tarball_url: String,
    pub commit_url: String,
}

/// Outcome of a `sync` call across all tracked repositories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub refreshed: Vec<String>,
    pub skipped_cached: Vec<String>,
    pub failed: Vec<(String, String)>,
}
