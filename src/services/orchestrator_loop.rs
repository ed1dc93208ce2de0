//! Orchestrator loop — the intent-resolution state machine (spec.md §4.5).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::domain::models::{BladeDecl, BladeRole, Intent, Topology};
use crate::domain::ports::{IntentCommitter, KeywordChooser, ScrapersConfigProvider, VersionStore};
use crate::services::intent_cache::IntentCache;
use crate::services::resolvers::{orchestrator_resolver, scraper_resolver, spotting_resolver};

/// `INIT → RUNNING ↔ TICK → SHUTDOWN` (spec.md §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Init,
    Running,
    Tick,
    Shutdown,
}

/// Owns the single logical worker that drives intent resolution for the
/// whole swarm. One instance per orchestrator blade process.
pub struct OrchestratorLoop {
    topology: Topology,
    self_blade: BladeDecl,
    version_store: Arc<dyn VersionStore>,
    scrapers_config: Arc<dyn ScrapersConfigProvider>,
    keyword_chooser: Arc<dyn KeywordChooser>,
    committer: Arc<dyn IntentCommitter>,
    status: Arc<RwLock<Status>>,
    shutdown_tx: broadcast::Sender<()>,
    cache: Mutex<IntentCache>,
    rng: Mutex<StdRng>,
}

impl OrchestratorLoop {
    pub fn new(
        topology: Topology,
        self_blade: BladeDecl,
        version_store: Arc<dyn VersionStore>,
        scrapers_config: Arc<dyn ScrapersConfigProvider>,
        keyword_chooser: Arc<dyn KeywordChooser>,
        committer: Arc<dyn IntentCommitter>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            topology,
            self_blade,
            version_store,
            scrapers_config,
            keyword_chooser,
            committer,
            status: Arc::new(RwLock::new(Status::Init)),
            shutdown_tx,
            cache: Mutex::new(IntentCache::new()),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub async fn status(&self) -> Status {
        *self.status.read().await
    }

    /// Request graceful shutdown; `run` returns once the in-flight tick (if
    /// any) finishes.
    pub fn request_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Drive the loop until `request_shutdown` is called.
    pub async fn run(&self) {
        *self.status.write().await = Status::Running;

        match self.version_store.sync(false).await {
            Ok(report) => info!(
                refreshed = report.refreshed.len(),
                skipped_cached = report.skipped_cached.len(),
                failed = report.failed.len(),
                "startup version sync complete"
            ),
            Err(e) => warn!(error = %e, "startup sync failed, continuing with persisted tags"),
        }

        let interval_secs = self
            .topology
            .static_cluster_parameters
            .orchestrator_interval_in_seconds;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(1)) => {}
                _ = shutdown_rx.recv() => break,
            }

            *self.status.write().await = Status::Tick;
            self.tick().await;
            *self.status.write().await = Status::Running;

            let remaining = Duration::from_secs(interval_secs.saturating_sub(1));
            tokio::select! {
                _ = tokio::time::sleep(remaining) => {}
                _ = shutdown_rx.recv() => break,
            }
        }

        *self.status.write().await = Status::Shutdown;
        if let Err(e) = self.version_store.close().await {
            warn!(error = %e, "error closing version store on shutdown");
        }
        info!("orchestrator loop shut down");
    }

    async fn tick(&self) {
        let capabilities = match self
            .version_store
            .get_latest_valid_tags_for_all_repos()
            .await
        {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "capability map resolution failed, skipping tick");
                return;
            }
        };

        let now = Utc::now();
        let mut intents: Vec<Intent> = Vec::new();

        for blade in &self.topology.blades {
            let outcome = match blade.blade {
                BladeRole::Orchestrator => orchestrator_resolver::resolve(
                    blade,
                    &capabilities,
                    &self.topology,
                    &self.self_blade,
                    now,
                ),
                BladeRole::Spotting => spotting_resolver::resolve(
                    blade,
                    &capabilities,
                    &self.topology,
                    &self.self_blade,
                    now,
                ),
                BladeRole::Scraper => {
                    let mut rng = self.rng.lock().await;
                    let mut cache = self.cache.lock().await;
                    scraper_resolver::resolve_memoized(
                        blade,
                        &capabilities,
                        &self.topology,
                        &self.self_blade,
                        now,
                        self.scrapers_config.as_ref(),
                        self.keyword_chooser.as_ref(),
                        &mut *rng,
                        &mut cache,
                    )
                    .await
                }
                BladeRole::Monitor => {
                    debug!(blade = %blade.name, "monitor blades have no resolver");
                    continue;
                }
            };

            match outcome {
                Ok(Some(intent)) => intents.push(intent),
                Ok(None) => debug!(blade = %blade.name, "resolver produced no actionable intent"),
                Err(e) => warn!(blade = %blade.name, error = %e, "resolver failed"),
            }
        }

        self.commit_all(intents).await;
    }

    /// Commit all intents concurrently (spec.md §4.5 step 4, §4.6). Each
    /// commit is independent; one failing never blocks the others.
    async fn commit_all(&self, intents: Vec<Intent>) {
        let commits = intents.into_iter().map(|intent| {
            let committer = Arc::clone(&self.committer);
            async move {
                if let Err(e) = committer.commit(&intent).await {
                    warn!(intent_id = %intent.id, host = %intent.host, error = %e, "intent commit failed");
                }
            }
        });
        join_all(commits).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::domain::models::{
        CapabilityMap, MarkKind, ScrapersConfiguration, SyncReport,
    };
    use crate::domain::ports::ChosenKeyword;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubVersionStore {
        caps: CapabilityMap,
    }

    #[async_trait]
    impl VersionStore for StubVersionStore {
        async fn setup(&self) -> DomainResult<()> {
            Ok(())
        }
        async fn sync(&self, _use_cache: bool) -> DomainResult<SyncReport> {
            Ok(SyncReport::default())
        }
        async fn mark_tag_as(
            &self,
            _repository_path: &str,
            _tag_name: &str,
            _mark: MarkKind,
        ) -> DomainResult<()> {
            Ok(())
        }
        async fn delete_mark_from_tag(
            &self,
            _repository_path: &str,
            _tag_name: &str,
            _mark: MarkKind,
        ) -> DomainResult<()> {
            Ok(())
        }
        async fn get_latest_valid_tags_for_all_repos(&self) -> DomainResult<CapabilityMap> {
            Ok(self.caps.clone())
        }
    }

    struct StubScrapersConfig;

    #[async_trait]
    impl ScrapersConfigProvider for StubScrapersConfig {
        async fn fetch(&self) -> DomainResult<ScrapersConfiguration> {
            Ok(ScrapersConfiguration::default())
        }
    }

    struct StubKeywordChooser;

    #[async_trait]
    impl KeywordChooser for StubKeywordChooser {
        async fn choose(
            &self,
            _module: &str,
            _config: &ScrapersConfiguration,
        ) -> DomainResult<ChosenKeyword> {
            Err(DomainError::UpstreamUnavailable("unused in this test".into()))
        }
    }

    struct CountingCommitter {
        count: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl IntentCommitter for CountingCommitter {
        async fn commit(&self, _intent: &Intent) -> DomainResult<()> {
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn blade(name: &str, role: BladeRole, port: u16) -> BladeDecl {
        BladeDecl {
            name: name.into(),
            blade: role,
            host: "127.0.0.1".into(),
            port,
            managed: true,
            venv: String::new(),
        }
    }

    #[tokio::test]
    async fn tick_commits_one_intent_per_non_monitor_blade() {
        let a = blade("A", BladeRole::Orchestrator, 8000);
        let c = blade("C", BladeRole::Spotting, 8002);
        let d = blade("D", BladeRole::Monitor, 8003);
        let topology = Topology {
            blades: vec![a.clone(), c.clone(), d.clone()],
            static_cluster_parameters: Default::default(),
        };

        let mut caps = CapabilityMap::new();
        caps.insert("swarm/client".into(), "v1.0.0".into());

        let count = Arc::new(AtomicUsize::new(0));

        let loop_ = OrchestratorLoop::new(
            topology,
            a.clone(),
            Arc::new(StubVersionStore { caps }),
            Arc::new(StubScrapersConfig),
            Arc::new(StubKeywordChooser),
            Arc::new(CountingCommitter {
                count: Arc::clone(&count),
            }),
        );

        loop_.tick().await;

        assert_eq!(count.load(Ordering::SeqCst), 2, "orchestrator + spotting, monitor skipped");
    }

    #[tokio::test]
    async fn status_transitions_through_run_and_shutdown() {
        let a = blade("A", BladeRole::Orchestrator, 8000);
        let mut topology = Topology {
            blades: vec![a.clone()],
            static_cluster_parameters: Default::default(),
        };
        topology.static_cluster_parameters.orchestrator_interval_in_seconds = 2;

        let mut caps = CapabilityMap::new();
        caps.insert("swarm/client".into(), "v1.0.0".into());

        let loop_ = Arc::new(OrchestratorLoop::new(
            topology,
            a.clone(),
            Arc::new(StubVersionStore { caps }),
            Arc::new(StubScrapersConfig),
            Arc::new(StubKeywordChooser),
            Arc::new(CountingCommitter {
                count: Arc::new(AtomicUsize::new(0)),
            }),
        ));

        assert_eq!(loop_.status().await, Status::Init);

        let handle = {
            let loop_ = Arc::clone(&loop_);
            tokio::spawn(async move { loop_.run().await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(loop_.status().await, Status::Running);

        loop_.request_shutdown();
        handle.await.unwrap();
        assert_eq!(loop_.status().await, Status::Shutdown);
    }
}
