//! HTTP-backed `ScrapersConfigProvider` (spec.md §3 "provided externally").
//!
//! The specification treats the scrapers configuration as an opaque
//! external snapshot without a prescribed wire format (§9 Open Question);
//! a single `GET` of a JSON document is the simplest interface that
//! satisfies "fetched fresh per tick".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::ScrapersConfiguration;
use crate::domain::ports::ScrapersConfigProvider;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpScrapersConfigProvider {
    http: Client,
    url: String,
}

impl HttpScrapersConfigProvider {
    pub fn new(url: String) -> Self {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("reqwest client builds with static config");
        Self { http, url }
    }
}

#[async_trait]
impl ScrapersConfigProvider for HttpScrapersConfigProvider {
    async fn fetch(&self) -> DomainResult<ScrapersConfiguration> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("scrapers config: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::UpstreamUnavailable(format!(
                "scrapers config request returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("scrapers config: {e}")))
    }
}
