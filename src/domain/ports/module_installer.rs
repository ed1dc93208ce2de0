//! Installs and probes scraping modules on the local blade (spec.md §4.7).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

#[async_trait]
pub trait ModuleInstaller: Send + Sync {
    /// Currently installed version of `module_name`, or `None` if it has
    /// never been installed.
    async fn installed_version(&self, module_name: &str) -> DomainResult<Option<String>>;

    /// Install `version` of `module` (an `owner/repo` path). Blocking,
    /// exclusive, process-restarting per spec.md §4.7 — the caller is
    /// responsible for the subsequent process replace.
    async fn install(&self, module: &str, version: &str) -> DomainResult<()>;
}
