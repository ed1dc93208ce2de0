//! Domain models — the shapes the control plane reasons about.

mod blade;
mod capability;
mod intent;
mod scrapers_config;
mod topology;
mod version_store;

pub use blade::{BladeDecl, BladeRole};
pub use capability::CapabilityMap;
pub use intent::{Intent, IntentError, IntentParams, ScraperIntentParameters};
pub use scrapers_config::{normalize_module_path, ScrapersConfiguration};
pub use topology::{DbParameters, StaticClusterParameters, Topology};
pub use version_store::{MarkKind, Repository, SyncReport, Tag, UpstreamTag};
