//! Ambient runtime configuration (log level/format, OVH transport, database
//! path, external collaborator URLs) — distinct from the topology file,
//! whose schema spec.md §6 specifies exactly and which is loaded directly
//! with `serde_yaml` rather than merged through figment.

mod loader;
mod runtime_config;

pub use loader::{ConfigError, ConfigLoader};
pub use runtime_config::{LoggingSection, RuntimeConfig};
