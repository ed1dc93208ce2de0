//! Intent commit port (spec.md §4.6).

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Intent;

/// `POST`s an intent to its target blade. Implementations never fail upward
/// in practice (the orchestrator loop swallows the error at the call site
/// per spec.md §4.6), but the port itself still reports failure so the loop
/// can log it.
#[async_trait]
pub trait IntentCommitter: Send + Sync {
    async fn commit(&self, intent: &Intent) -> DomainResult<()>;
}
