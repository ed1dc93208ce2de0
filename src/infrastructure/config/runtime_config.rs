use serde::{Deserialize, Serialize};

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Ambient logging settings, layered the same way as the rest of
/// [`RuntimeConfig`] (defaults → `swarmctl.yaml` → env).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Ambient process configuration, separate from the topology document
/// (spec.md §6). Resolved once at startup and handed to the logger.
///
/// The database connection string and the GitHub cache threshold are
/// topology concerns, not ambient ones (spec.md §4.2: "the database driver
/// identifier and connection string are taken from
/// `static_cluster_parameters.db`"), so they live on
/// [`StaticClusterParameters`](crate::domain::models::topology::StaticClusterParameters)
/// instead of here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub logging: LoggingSection,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            logging: LoggingSection::default(),
        }
    }
}
