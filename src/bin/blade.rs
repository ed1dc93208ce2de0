//! Blade binary (spec.md §6): runs a single worker process, invoked by the
//! launcher with its own declaration and the full topology.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use swarmctl::adapters::http::{
    GitHubUpstreamTagSource, HttpIntentCommitter, HttpKeywordChooser, HttpScrapersConfigProvider,
};
use swarmctl::adapters::process::ProcessModuleInstaller;
use swarmctl::adapters::sqlite::{DatabaseConnection, SqliteVersionStore};
use swarmctl::blade::scraping_module::EmptyModuleRegistry;
use swarmctl::blade::{server, BladeContext};
use swarmctl::cli::BladeArgs;
use swarmctl::domain::models::BladeRole;
use swarmctl::domain::ports::VersionStore;
use swarmctl::infrastructure::config::ConfigLoader;
use swarmctl::infrastructure::logging::{LogConfig, LoggerImpl};
use swarmctl::services::orchestrator_loop::OrchestratorLoop;
use tracing::error;

// A blade is a single cooperative event loop with no parallel threads of
// execution sharing mutable state (spec.md §5) — current-thread runtime.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = BladeArgs::parse();

    let runtime_config = ConfigLoader::load().unwrap_or_default();
    let _logger = LoggerImpl::init(&LogConfig::from_runtime(&runtime_config, args.jlog)).ok();

    let state_dir = std::path::PathBuf::from(".swarmctl").join(&args.blade.name);
    let installer = Arc::new(ProcessModuleInstaller::new(
        "pip".to_string(),
        state_dir,
    ));

    let topology = args.topology.clone();
    let ctx = Arc::new(BladeContext::new(
        args.blade.clone(),
        args.topology,
        installer,
        Arc::new(EmptyModuleRegistry),
        std::env::args().collect(),
    ));

    let addr = args.blade.address();

    if args.blade.blade == BladeRole::Orchestrator {
        let orchestrator_loop = match build_orchestrator_loop(topology, args.blade.clone()).await {
            Ok(o) => Arc::new(o),
            Err(e) => {
                error!(error = %e, "failed to build orchestrator loop");
                return ExitCode::FAILURE;
            }
        };

        let orchestrator_task = {
            let orchestrator_loop = Arc::clone(&orchestrator_loop);
            tokio::spawn(async move { orchestrator_loop.run().await })
        };

        let result = server::serve(ctx, &addr).await;
        orchestrator_loop.request_shutdown();
        let _ = orchestrator_task.await;

        if let Err(e) = result {
            error!(error = %e, "blade HTTP surface failed");
            return ExitCode::FAILURE;
        }
    } else if let Err(e) = server::serve(ctx, &addr).await {
        error!(error = %e, "blade HTTP surface failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Wire the orchestrator's collaborators from the topology document
/// (spec.md §4.2: the database driver/connection string are taken from
/// `static_cluster_parameters.db`; the scrapers-config and keyword-chooser
/// endpoints likewise come from `static_cluster_parameters`).
async fn build_orchestrator_loop(
    topology: swarmctl::domain::models::Topology,
    self_blade: swarmctl::domain::models::BladeDecl,
) -> anyhow::Result<OrchestratorLoop> {
    let params = &topology.static_cluster_parameters;

    let database_url = match &params.db {
        Some(db) => format!("{}:{}", db.driver, db.database),
        None => "sqlite:swarmctl.db".to_string(),
    };

    let db = DatabaseConnection::new(&database_url).await?;
    db.migrate().await?;

    let mut tracked_repositories = vec![params.client_repository.clone()];
    tracked_repositories.extend(params.scrapers.iter().cloned());

    let version_store = SqliteVersionStore::new(
        db.pool().clone(),
        Arc::new(GitHubUpstreamTagSource::new()),
        tracked_repositories,
        params.github_cache_threshold_minutes,
    );
    version_store.setup().await?;

    let scrapers_config = HttpScrapersConfigProvider::new(params.scrapers_config_url.clone());
    let keyword_chooser = HttpKeywordChooser::new(params.keyword_chooser_url.clone());
    let committer = HttpIntentCommitter::new();

    Ok(OrchestratorLoop::new(
        topology.clone(),
        self_blade,
        Arc::new(version_store),
        Arc::new(scrapers_config),
        Arc::new(keyword_chooser),
        Arc::new(committer),
    ))
}
