//! External collaborator: the upstream tag service (e.g. GitHub releases API).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::UpstreamTag;

/// Fetches the full tag list for a tracked repository. Implementations decide
/// their own timeout (spec.md §5 default 10s).
#[async_trait]
pub trait UpstreamTagSource: Send + Sync {
    async fn fetch_tags(&self, repository_path: &str) -> DomainResult<Vec<UpstreamTag>>;
}
