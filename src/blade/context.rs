//! Shared blade process state, constructed once at startup and handed into
//! axum's `with_state` (REDESIGN FLAG: "global app state -> explicit
//! context", mirroring the teacher's `MemoryAppState`/`TasksAppState`).

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::domain::models::{BladeDecl, Topology};
use crate::domain::ports::ModuleInstaller;

use super::receiver_state::ReceiverState;
use super::scraping_module::ModuleRegistry;

#[derive(Clone)]
pub struct BladeContext {
    pub self_blade: BladeDecl,
    pub topology: Topology,
    pub module_installer: Arc<dyn ModuleInstaller>,
    pub module_registry: Arc<dyn ModuleRegistry>,
    pub http: Client,
    pub state: Arc<Mutex<ReceiverState>>,
    /// `argv` used to re-exec this process image after install (spec.md
    /// §4.7 step 3: "replace the current process image with an identical
    /// invocation").
    pub exec_argv: Vec<String>,
}

impl BladeContext {
    pub fn new(
        self_blade: BladeDecl,
        topology: Topology,
        module_installer: Arc<dyn ModuleInstaller>,
        module_registry: Arc<dyn ModuleRegistry>,
        exec_argv: Vec<String>,
    ) -> Self {
        Self {
            self_blade,
            topology,
            module_installer,
            module_registry,
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(5))
                .build()
                .expect("reqwest client builds with static config"),
            state: Arc::new(Mutex::new(ReceiverState::new())),
            exec_argv,
        }
    }
}
