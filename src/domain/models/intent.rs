//! Intent — declarative configuration addressed to exactly one blade (spec.md §3).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::blade::BladeRole;

/// Role-specific intent payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntentParams {
    Scraper(ScraperIntentParameters),
    Spotting,
    Orchestrator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperIntentParameters {
    /// Repository path of the scraping module, normalized to `owner/repo`.
    pub module: String,
    /// Tag of that module to run.
    pub version: String,
    /// Aggregator URL items are forwarded to.
    pub target: String,
    /// Opaque mapping: effective `keyword`, module-specific options, and
    /// (per spec.md §9 open question) both the top-level `keyword` and the
    /// nested `url_parameters.keyword` are preserved verbatim.
    pub parameters: HashMap<String, serde_json::Value>,
}

/// Addressed configuration for exactly one blade instance (spec.md §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// `<emission_time>:<host>:<port>`, unique per emission.
    pub id: String,
    /// Target `host:port`.
    pub host: String,
    /// Role kind the intent is for; must match the target's declared role.
    pub blade: BladeRole,
    /// Desired version of the blade's own control code.
    pub version: String,
    pub params: IntentParams,
}

/// Errors raised while constructing or validating an `Intent`.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IntentError {
    #[error("intent host must not be empty")]
    EmptyHost,
    #[error("scraper intent missing required field: {0}")]
    MissingScraperField(&'static str),
}

impl Intent {
    /// `id` formed as `<emission_time>:<host>:<port>` (spec.md §3).
    pub fn make_id(emission_time: chrono::DateTime<chrono::Utc>, host: &str) -> String {
        format!("{}:{}", emission_time.timestamp_millis(), host)
    }

    /// Validate the invariants spec.md §3 lists: non-empty host, and for
    /// scraper intents, non-empty module/version/target.
    pub fn validate(&self) -> Result<(), IntentError> {
        if self.host.is_empty() {
            return Err(IntentError::EmptyHost);
        }
        if let IntentParams::Scraper(p) = &self.params {
            if p.module.is_empty() {
                return Err(IntentError::MissingScraperField("module"));
            }
            if p.version.is_empty() {
                return Err(IntentError::MissingScraperField("version"));
            }
            if p.target.is_empty() {
                return Err(IntentError::MissingScraperField("target"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn validate_rejects_empty_host() {
        let intent = Intent {
            id: "x".into(),
            host: String::new(),
            blade: BladeRole::Orchestrator,
            version: "v1".into(),
            params: IntentParams::Orchestrator,
        };
        assert_eq!(intent.validate(), Err(IntentError::EmptyHost));
    }

    #[test]
    fn validate_rejects_scraper_intent_missing_module() {
        let intent = Intent {
            id: "x".into(),
            host: "h:1".into(),
            blade: BladeRole::Scraper,
            version: "v1".into(),
            params: IntentParams::Scraper(ScraperIntentParameters {
                module: String::new(),
                version: "v0.0.1".into(),
                target: "http://x/push".into(),
                parameters: HashMap::new(),
            }),
        };
        assert_eq!(
            intent.validate(),
            Err(IntentError::MissingScraperField("module"))
        );
    }

    #[test]
    fn validate_accepts_well_formed_scraper_intent() {
        let intent = Intent {
            id: "x".into(),
            host: "h:1".into(),
            blade: BladeRole::Scraper,
            version: "v1".into(),
            params: IntentParams::Scraper(ScraperIntentParameters {
                module: "owner/repo".into(),
                version: "v0.0.1".into(),
                target: "http://x/push".into(),
                parameters: HashMap::new(),
            }),
        };
        assert!(intent.validate().is_ok());
    }

    #[test]
    fn make_id_embeds_emission_time_and_host() {
        let id = Intent::make_id(ts(), "127.0.0.1:8001");
        assert!(id.ends_with(":127.0.0.1:8001"));
    }
}
