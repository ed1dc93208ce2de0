//! `VersionStore` backed by SQLite (spec.md §4.2).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CapabilityMap, MarkKind, SyncReport};
use crate::domain::ports::{UpstreamTagSource, VersionStore};

fn parse_version(tag_name: &str) -> Option<semver::Version> {
    semver::Version::parse(tag_name.trim_start_matches(['v', 'V'])).ok()
}

fn is_prerelease(tag_name: &str) -> bool {
    parse_version(tag_name).is_some_and(|v| !v.pre.is_empty())
}

/// SQLite-backed implementation of [`VersionStore`]. Tracks exactly the
/// repositories it is constructed with (spec.md §4.2 "every tracked
/// repository").
pub struct SqliteVersionStore {
    pool: SqlitePool,
    upstream: Arc<dyn UpstreamTagSource>,
    tracked_repositories: Vec<String>,
    cache_threshold_minutes: i64,
}

impl SqliteVersionStore {
    pub fn new(
        pool: SqlitePool,
        upstream: Arc<dyn UpstreamTagSource>,
        tracked_repositories: Vec<String>,
        cache_threshold_minutes: u64,
    ) -> Self {
        Self {
            pool,
            upstream,
            tracked_repositories,
            cache_threshold_minutes: cache_threshold_minutes as i64,
        }
    }

    async fn repository_id(&self, path: &str) -> DomainResult<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM repositories WHERE path = ?")
            .bind(path)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id,)| id))
    }

    async fn ensure_repository(&self, path: &str) -> DomainResult<i64> {
        sqlx::query("INSERT OR IGNORE INTO repositories (path) VALUES (?)")
            .bind(path)
            .execute(&self.pool)
            .await?;
        self.repository_id(path)
            .await?
            .ok_or_else(|| DomainError::PersistenceError(format!("failed to seed repository {path}")))
    }

    async fn tag_id(&self, repository_path: &str, tag_name: &str) -> DomainResult<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT tags.id FROM tags \
             JOIN repositories ON repositories.id = tags.repository \
             WHERE repositories.path = ? AND tags.name = ?",
        )
        .bind(repository_path)
        .bind(tag_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    async fn sync_one(&self, path: &str, use_cache: bool, now: DateTime<Utc>) -> DomainResult<SyncOutcome> {
        let repo_id = self.ensure_repository(path).await?;

        if use_cache {
            let row: Option<(Option<String>,)> =
                sqlx::query_as("SELECT last_online_retrieval FROM repositories WHERE id = ?")
                    .bind(repo_id)
                    .fetch_optional(&self.pool)
                    .await?;
            if let Some((Some(last),)) = row {
                if let Ok(last) = DateTime::parse_from_rfc3339(&last) {
                    let age = now.signed_duration_since(last.with_timezone(&Utc));
                    if age < chrono::Duration::minutes(self.cache_threshold_minutes) {
                        return Ok(SyncOutcome::SkippedCached);
                    }
                }
            }
        }

        let tags = self.upstream.fetch_tags(path).await?;

        for tag in tags.iter().filter(|t| !is_prerelease(&t.name)) {
            sqlx::query(
                "INSERT OR IGNORE INTO tags (repository, name, zipball_url, tarball_url, commit_url) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(repo_id)
            .bind(&tag.name)
            .bind(&tag.zipball_url)
            .bind(&tag.tarball_url)
            .bind(&tag.commit_url)
            .execute(&self.pool)
            .await?;
        }

        sqlx::query("UPDATE repositories SET last_online_retrieval = ? WHERE id = ?")
            .bind(now.to_rfc3339())
            .bind(repo_id)
            .execute(&self.pool)
            .await?;

        Ok(SyncOutcome::Refreshed)
    }
}

enum SyncOutcome {
    Refreshed,
    SkippedCached,
}

#[async_trait]
impl VersionStore for SqliteVersionStore {
    async fn setup(&self) -> DomainResult<()> {
        for path in &self.tracked_repositories {
            self.ensure_repository(path).await?;
        }
        Ok(())
    }

    async fn sync(&self, use_cache: bool) -> DomainResult<SyncReport> {
        let now = Utc::now();
        let mut report = SyncReport::default();

        for path in &self.tracked_repositories {
            match self.sync_one(path, use_cache, now).await {
                Ok(SyncOutcome::Refreshed) => report.refreshed.push(path.clone()),
                Ok(SyncOutcome::SkippedCached) => report.skipped_cached.push(path.clone()),
                Err(e) => {
                    warn!(repository = %path, error = %e, "sync failed, retaining prior tag set");
                    report.failed.push((path.clone(), e.to_string()));
                }
            }
        }

        Ok(report)
    }

    async fn mark_tag_as(
        &self,
        repository_path: &str,
        tag_name: &str,
        mark: MarkKind,
    ) -> DomainResult<()> {
        let Some(tag_id) = self.tag_id(repository_path, tag_name).await? else {
            return Err(DomainError::PersistenceError(format!(
                "no such tag {tag_name} on {repository_path}"
            )));
        };
        sqlx::query("INSERT OR IGNORE INTO marks (tag_id, mark) VALUES (?, ?)")
            .bind(tag_id)
            .bind(mark.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_mark_from_tag(
        &self,
        repository_path: &str,
        tag_name: &str,
        mark: MarkKind,
    ) -> DomainResult<()> {
        let Some(tag_id) = self.tag_id(repository_path, tag_name).await? else {
            return Err(DomainError::PersistenceError(format!(
                "no such tag {tag_name} on {repository_path}"
            )));
        };
        sqlx::query("DELETE FROM marks WHERE tag_id = ? AND mark = ?")
            .bind(tag_id)
            .bind(mark.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_latest_valid_tags_for_all_repos(&self) -> DomainResult<CapabilityMap> {
        let repos: Vec<(String,)> = sqlx::query_as("SELECT path FROM repositories")
            .fetch_all(&self.pool)
            .await?;

        let mut capabilities = CapabilityMap::new();

        for (path,) in repos {
            let names: Vec<(String,)> = sqlx::query_as(
                "SELECT tags.name FROM tags \
                 JOIN repositories ON repositories.id = tags.repository \
                 WHERE repositories.path = ? \
                 AND tags.id NOT IN ( \
                     SELECT tag_id FROM marks WHERE mark = 'DEFECTIVE' \
                 )",
            )
            .bind(&path)
            .fetch_all(&self.pool)
            .await?;

            let best = names
                .into_iter()
                .filter_map(|(name,)| parse_version(&name).map(|v| (v, name)))
                .max_by(|(a, _), (b, _)| a.cmp(b));

            match best {
                Some((_, name)) => {
                    capabilities.insert(path, name);
                }
                None => debug!(repository = %path, "no non-defective tags, omitting from capability map"),
            }
        }

        Ok(capabilities)
    }

    async fn close(&self) -> DomainResult<()> {
        self.pool.close().await;
        Ok(())
    }
}
