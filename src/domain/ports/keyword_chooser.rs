//! External collaborator: keyword selection for a scraping module (spec.md §4.4 step 6).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ScrapersConfiguration;

/// A chosen keyword plus the name of the algorithm that produced it, as
/// surfaced by the upstream keyword source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenKeyword {
    pub keyword: String,
    pub algorithm_name: String,
}

#[async_trait]
pub trait KeywordChooser: Send + Sync {
    async fn choose(
        &self,
        module: &str,
        config: &ScrapersConfiguration,
    ) -> DomainResult<ChosenKeyword>;
}
