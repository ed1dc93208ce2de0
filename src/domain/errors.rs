//! Error taxonomy the core must distinguish (spec.md §7).

use thiserror::Error;

/// Domain-level errors flowing through resolvers, the version store, and commit.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Tag service or commit endpoint not reachable; retry next tick.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Version store query failed; log, preserve prior state.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Weighted chooser found zero total weight.
    #[error("no candidate with positive weight")]
    NoCandidate,

    /// Capability map lacks the selected module.
    #[error("unknown module version for {0}")]
    UnknownModuleVersion(String),

    /// Intent commit failed.
    #[error("blade unreachable at {0}: {1}")]
    UnreachableBlade(String, String),

    /// Blade-side install failure; the restart itself is the recovery mechanism.
    #[error("module install failed for {0}: {1}")]
    ModuleInstallFailed(String, String),

    /// Blade received an intent missing required fields.
    #[error("malformed intent: {0}")]
    MalformedIntent(String),

    /// Exception raised inside the scraping generator.
    #[error("scraping module error: {0}")]
    ScrapingModuleError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::PersistenceError(err.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        DomainError::UpstreamUnavailable(err.to_string())
    }
}
