//! Blade declaration — a single worker's static identity within the topology.

use serde::{Deserialize, Serialize};

/// The kind of work a blade performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BladeRole {
    /// Fetches content via a loaded scraping module and forwards to an aggregator.
    Scraper,
    /// Receives forwarded items (the aggregator side).
    Spotting,
    /// Runs the intent-resolution loop and issues intents to the rest of the swarm.
    Orchestrator,
    /// Collects log records for observability (external collaborator, §6).
    Monitor,
}

impl BladeRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scraper => "scraper",
            Self::Spotting => "spotting",
            Self::Orchestrator => "orchestrator",
            Self::Monitor => "monitor",
        }
    }
}

/// A single blade's static declaration within the topology.
///
/// Immutable for the orchestrator's lifetime (spec.md §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeDecl {
    /// Unique within the topology file.
    pub name: String,
    pub blade: BladeRole,
    pub host: String,
    pub port: u16,
    /// Whether the launcher spawns and supervises this blade.
    #[serde(default)]
    pub managed: bool,
    /// Opaque path to the blade's virtual environment / working directory.
    #[serde(default)]
    pub venv: String,
}

impl BladeDecl {
    /// `host:port`, the form used as `Intent.host` and as the memoization key.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
