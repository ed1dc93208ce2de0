//! External collaborator: the scrapers configuration snapshot source (spec.md §3).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ScrapersConfiguration;

/// Fetched fresh per tick; failure propagates (spec.md §4.4 step 1).
#[async_trait]
pub trait ScrapersConfigProvider: Send + Sync {
    async fn fetch(&self) -> DomainResult<ScrapersConfiguration>;
}
