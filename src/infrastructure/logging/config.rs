use crate::infrastructure::config::RuntimeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Logger settings resolved from [`RuntimeConfig`] plus the `--jlog` CLI flag
/// (spec.md §6: "`--jlog` structured log output").
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// `jlog` forces JSON output regardless of the configured format, since
    /// it is an explicit CLI override (spec.md §6).
    pub fn from_runtime(config: &RuntimeConfig, jlog: bool) -> Self {
        let format = if jlog {
            LogFormat::Json
        } else if config.logging.format == "json" {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };

        Self {
            level: config.logging.level.clone(),
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jlog_forces_json_even_if_config_says_pretty() {
        let mut runtime = RuntimeConfig::default();
        runtime.logging.format = "pretty".to_string();

        let log_config = LogConfig::from_runtime(&runtime, true);
        assert_eq!(log_config.format, LogFormat::Json);
    }

    #[test]
    fn without_jlog_follows_configured_format() {
        let mut runtime = RuntimeConfig::default();
        runtime.logging.format = "json".to_string();

        let log_config = LogConfig::from_runtime(&runtime, false);
        assert_eq!(log_config.format, LogFormat::Json);
    }
}
