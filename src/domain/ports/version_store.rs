//! Version store port (spec.md §4.2).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CapabilityMap, MarkKind, SyncReport};

/// Persists per-repository tag metadata and supports marking/unmarking, with
/// a cached upstream refresh.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Idempotently create the schema.
    async fn setup(&self) -> DomainResult<()>;

    /// Refresh tracked repositories from upstream, honoring the cache
    /// threshold when `use_cache` is set.
    async fn sync(&self, use_cache: bool) -> DomainResult<SyncReport>;

    /// Insert-or-ignore a `(tag, mark)` row.
    async fn mark_tag_as(
        &self,
        repository_path: &str,
        tag_name: &str,
        mark: MarkKind,
    ) -> DomainResult<()>;

    /// Remove a specific mark row.
    async fn delete_mark_from_tag(
        &self,
        repository_path: &str,
        tag_name: &str,
        mark: MarkKind,
    ) -> DomainResult<()>;

    /// For each tracked repository, the maximum non-defective tag under
    /// version ordering. Repositories with zero non-defective tags are
    /// omitted.
    async fn get_latest_valid_tags_for_all_repos(&self) -> DomainResult<CapabilityMap>;

    /// Release any held resources (e.g. the connection pool). Called once on
    /// orchestrator shutdown (spec.md §4.5). No-op by default.
    async fn close(&self) -> DomainResult<()> {
        Ok(())
    }
}
