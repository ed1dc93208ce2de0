//! Scraping module abstraction (spec.md §4.7): "the task imports the module
//! by `module_name`, calls its `query(parameters)` to obtain a lazy sequence
//! of items". Modeled as a `tokio::sync::mpsc` channel per the REDESIGN FLAG
//! decision: a generator that can error mid-stream without being fatal to
//! the forwarding loop.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

pub type ScrapedItem = Value;

/// A loaded scraping module. Adapters wrap the actual fetched/installed
/// module (an external collaborator, spec.md §1); this core only needs the
/// shape of "give me a channel of items for these parameters".
pub trait ScrapingModule: Send + Sync {
    /// Spawns the module's query and returns the receiving end of a bounded
    /// channel the forwarder drains. Errors raised while constructing the
    /// query are logged by the caller, not here (spec.md §4.7 step 4).
    fn spawn(&self, parameters: HashMap<String, Value>) -> mpsc::Receiver<ScrapedItem>;
}

/// Resolves `ScrapingModule` implementations by module name. Installed
/// modules are opaque to the core (they're fetched/built out of process);
/// this registry exists so the executor has somewhere to look one up after
/// install succeeds.
pub trait ModuleRegistry: Send + Sync {
    fn resolve(&self, module_name: &str) -> Option<Arc<dyn ScrapingModule>>;
}

/// Registry of no-op modules keyed by name, used where no real module
/// loading mechanism is wired up (e.g. in blades that only need the intent
/// receiver surface without a real scraping backend).
#[derive(Default)]
pub struct EmptyModuleRegistry;

impl ModuleRegistry for EmptyModuleRegistry {
    fn resolve(&self, module_name: &str) -> Option<Arc<dyn ScrapingModule>> {
        warn!(module = module_name, "no scraping module registered for this name");
        None
    }
}
