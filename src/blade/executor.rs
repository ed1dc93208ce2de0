//! Blade-side intent executor (spec.md §4.7, scraper role).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::models::{Intent, IntentParams};

use super::context::BladeContext;
use super::receiver_state::RunningTask;

/// Items are dropped (logged) past this forwarding timeout (spec.md §5).
const ITEM_FORWARD_TIMEOUT: Duration = Duration::from_secs(5);

fn module_basename(module: &str) -> &str {
    module.rsplit('/').next().unwrap_or(module)
}

/// Two intents are "meaningfully different" for reconciliation purposes if
/// anything but `id` (which always differs — it embeds emission time)
/// changes.
fn differs_meaningfully(a: &Intent, b: &Intent) -> bool {
    a.host != b.host || a.blade != b.blade || a.version != b.version || a.params != b.params
}

/// Reconciles a freshly-received intent against local state (spec.md §4.7).
/// Returns once reconciliation decisions are made; any install triggers a
/// background task that performs the install and re-exec, so this always
/// returns promptly and the HTTP response can still be delivered.
pub async fn handle_intent(ctx: Arc<BladeContext>, intent: Intent) {
    let IntentParams::Scraper(params) = &intent.params else {
        // Non-scraper roles (spotting, orchestrator) have no further local
        // reconciliation beyond recording the intent (spec.md §4.7 scopes
        // module install/task execution to the scraper role).
        let mut state = ctx.state.lock().await;
        state.current_intent = Some(intent);
        return;
    };

    let module_name = module_basename(&params.module).to_string();

    let installed = match ctx.module_installer.installed_version(&module_name).await {
        Ok(v) => v,
        Err(e) => {
            warn!(module = %module_name, error = %e, "failed to query installed module version");
            None
        }
    };

    let install_required = installed.as_deref() != Some(params.version.as_str());

    if install_required {
        info!(module = %module_name, version = %params.version, "install required, spawning installer");
        let ctx = ctx.clone();
        let module = params.module.clone();
        let version = params.version.clone();
        tokio::spawn(async move {
            if let Err(e) = ctx.module_installer.install(&module, &version).await {
                error!(module = %module, version = %version, error = %e, "module install failed");
                return;
            }
            reexec(&ctx.exec_argv);
        });
        return;
    }

    let mut state = ctx.state.lock().await;
    let should_restart = match &state.current_intent {
        None => true,
        Some(current) => differs_meaningfully(current, &intent),
    };

    if state.current_task.is_none() {
        let task = spawn_scraping_task(ctx.clone(), intent.clone());
        state.current_task = Some(task);
        state.current_intent = Some(intent);
    } else if should_restart {
        state.cancel_current_task();
        let task = spawn_scraping_task(ctx.clone(), intent.clone());
        state.current_task = Some(task);
        state.current_intent = Some(intent);
    }
    // Equal intent, task already running: do nothing.
}

fn spawn_scraping_task(ctx: Arc<BladeContext>, intent: Intent) -> RunningTask {
    let (cancel_tx, mut cancel_rx) = watch::channel(false);
    let handle = tokio::spawn(async move {
        let IntentParams::Scraper(params) = &intent.params else {
            return;
        };
        let module_name = module_basename(&params.module).to_string();
        let Some(module) = ctx.module_registry.resolve(&module_name) else {
            warn!(module = %module_name, "scraping module not resolvable, skipping task");
            return;
        };

        let mut items = module.spawn(params.parameters.clone());
        loop {
            tokio::select! {
                _ = cancel_rx.changed() => {
                    if *cancel_rx.borrow() {
                        return;
                    }
                }
                item = items.recv() => {
                    let Some(item) = item else {
                        // Generator exhausted: it is the authoritative source
                        // of completion (spec.md §4.7 step 4).
                        return;
                    };
                    forward_item(&ctx, &params.target, item).await;
                }
            }
        }
    });

    RunningTask {
        handle,
        cancel: cancel_tx,
    }
}

async fn forward_item(ctx: &BladeContext, target: &str, item: serde_json::Value) {
    let result = tokio::time::timeout(
        ITEM_FORWARD_TIMEOUT,
        ctx.http.post(target).json(&item).send(),
    )
    .await;

    match result {
        Ok(Ok(resp)) if !resp.status().is_success() => {
            warn!(target = %target, status = %resp.status(), "item push returned non-success");
        }
        Ok(Err(e)) => {
            let err = DomainError::ScrapingModuleError(e.to_string());
            warn!(target = %target, error = %err, "item push failed");
        }
        Err(_) => {
            warn!(target = %target, "item push timed out, dropping item");
        }
        Ok(Ok(_)) => {}
    }
}

/// Replaces the current process image with an identical invocation
/// (spec.md §4.7 step 3) using `execvp`. Never returns on success.
#[cfg(unix)]
fn reexec(argv: &[String]) {
    use std::ffi::CString;

    let Some(program) = argv.first() else {
        error!("no argv[0] recorded, cannot re-exec");
        return;
    };
    let Ok(c_program) = CString::new(program.as_str()) else {
        error!("argv[0] contains an interior NUL, cannot re-exec");
        return;
    };
    let c_args: Vec<CString> = argv
        .iter()
        .filter_map(|a| CString::new(a.as_str()).ok())
        .collect();

    info!(argv = ?argv, "re-executing process image after module install");
    if let Err(e) = nix::unistd::execvp(&c_program, &c_args) {
        error!(error = %e, "execvp failed, process image not replaced");
    }
}

#[cfg(not(unix))]
fn reexec(_argv: &[String]) {
    error!("process re-exec is only implemented on unix targets");
}
