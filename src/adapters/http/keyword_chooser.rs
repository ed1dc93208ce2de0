//! HTTP-backed `KeywordChooser` (spec.md §4.4 step 6, external collaborator).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::ScrapersConfiguration;
use crate::domain::ports::{ChosenKeyword, KeywordChooser};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct ChooseRequest<'a> {
    module: &'a str,
    configuration: &'a ScrapersConfiguration,
}

#[derive(Debug, Deserialize)]
struct ChooseResponse {
    keyword: String,
    algorithm_name: String,
}

pub struct HttpKeywordChooser {
    http: Client,
    url: String,
}

impl HttpKeywordChooser {
    pub fn new(url: String) -> Self {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("reqwest client builds with static config");
        Self { http, url }
    }
}

#[async_trait]
impl KeywordChooser for HttpKeywordChooser {
    async fn choose(
        &self,
        module: &str,
        config: &ScrapersConfiguration,
    ) -> DomainResult<ChosenKeyword> {
        let resp = self
            .http
            .post(&self.url)
            .json(&ChooseRequest {
                module,
                configuration: config,
            })
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("keyword chooser: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::UpstreamUnavailable(format!(
                "keyword chooser returned {}",
                resp.status()
            )));
        }

        let parsed: ChooseResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("keyword chooser: {e}")))?;

        Ok(ChosenKeyword {
            keyword: parsed.keyword,
            algorithm_name: parsed.algorithm_name,
        })
    }
}
