//! `IntentCommitter` over plain HTTP (spec.md §4.6).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Intent;
use crate::domain::ports::IntentCommitter;

/// 1 second, fixed (spec.md §4.6) — no retry within a tick, the next tick
/// re-emits.
const COMMIT_TIMEOUT: Duration = Duration::from_secs(1);

pub struct HttpIntentCommitter {
    http: Client,
}

impl HttpIntentCommitter {
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(COMMIT_TIMEOUT)
            .build()
            .expect("reqwest client builds with static config");
        Self { http }
    }
}

impl Default for HttpIntentCommitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentCommitter for HttpIntentCommitter {
    async fn commit(&self, intent: &Intent) -> DomainResult<()> {
        let url = format!("http://{}/", intent.host);
        let resp = self
            .http
            .post(&url)
            .json(intent)
            .send()
            .await
            .map_err(|e| DomainError::UnreachableBlade(intent.host.clone(), e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::UnreachableBlade(
                intent.host.clone(),
                format!("non-2xx status {}", resp.status()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{BladeRole, IntentParams};

    fn intent(host: String) -> Intent {
        Intent {
            id: "1:h".into(),
            host,
            blade: BladeRole::Orchestrator,
            version: "v1".into(),
            params: IntentParams::Orchestrator,
        }
    }

    #[tokio::test]
    async fn posts_json_body_and_succeeds_on_2xx() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .create_async()
            .await;

        let host = server.host_with_port();
        let committer = HttpIntentCommitter::new();
        committer.commit(&intent(host)).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_is_unreachable_blade() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let host = server.host_with_port();
        let committer = HttpIntentCommitter::new();
        let err = committer.commit(&intent(host)).await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, DomainError::UnreachableBlade(_, _)));
    }

    #[tokio::test]
    async fn connection_refused_is_unreachable_blade() {
        let committer = HttpIntentCommitter::new();
        // Port 1 is reserved and nothing listens there.
        let err = committer
            .commit(&intent("127.0.0.1:1".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UnreachableBlade(_, _)));
    }
}
