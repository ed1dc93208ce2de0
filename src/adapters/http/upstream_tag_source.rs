//! GitHub-tags-backed `UpstreamTagSource` (spec.md §4.2).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::UpstreamTag;
use crate::domain::ports::UpstreamTagSource;

/// Default request timeout (spec.md §5).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct GitHubTag {
    name: String,
    zipball_url: String,
    tarball_url: String,
    commit: GitHubTagCommit,
}

#[derive(Debug, Deserialize)]
struct GitHubTagCommit {
    url: String,
}

/// Fetches `/repos/{owner}/{repo}/tags` from the GitHub REST API.
pub struct GitHubUpstreamTagSource {
    http: Client,
    base_url: String,
}

impl GitHubUpstreamTagSource {
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_BASE.to_string())
    }

    /// Point at something other than the real GitHub API (tests).
    pub fn with_base_url(base_url: String) -> Self {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("reqwest client builds with static config");
        Self { http, base_url }
    }
}

impl Default for GitHubUpstreamTagSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamTagSource for GitHubUpstreamTagSource {
    async fn fetch_tags(&self, repository_path: &str) -> DomainResult<Vec<UpstreamTag>> {
        let url = format!(
            "{}/repos/{repository_path}/tags?per_page=100",
            self.base_url
        );

        let resp = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "swarmctl")
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("{repository_path}: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(DomainError::UpstreamUnavailable(format!(
                "{repository_path} tags request returned {status}"
            )));
        }

        let tags: Vec<GitHubTag> = resp
            .json()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("{repository_path}: {e}")))?;

        Ok(tags
            .into_iter()
            .map(|t| UpstreamTag {
                name: t.name,
                zipball_url: t.zipball_url,
                tarball_url: t.tarball_url,
                commit_url: t.commit.url,
            })
            .collect())
    }
}
