//! Topology document — the static declaration of the whole swarm (spec.md §3, §6).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::blade::BladeDecl;

fn default_orchestrator_interval() -> u64 {
    10
}

fn default_github_cache_threshold() -> u64 {
    10
}

fn default_client_repository() -> String {
    "swarm/client".to_string()
}

fn default_scrapers_config_url() -> String {
    "http://127.0.0.1:9000/scrapers-config".to_string()
}

fn default_keyword_chooser_url() -> String {
    "http://127.0.0.1:9000/keyword-chooser".to_string()
}

/// `static_cluster_parameters` from the topology file.
///
/// Unknown/extra keys (e.g. per-deployment scraper tuning) are preserved in
/// `extra` rather than rejected, since spec.md §3 describes this as "a
/// mapping of scalar/record configuration keys" rather than a closed schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticClusterParameters {
    #[serde(default = "default_orchestrator_interval")]
    pub orchestrator_interval_in_seconds: u64,

    #[serde(default = "default_github_cache_threshold")]
    pub github_cache_threshold_minutes: u64,

    #[serde(default)]
    pub database_provider: Option<String>,

    #[serde(default)]
    pub db: Option<DbParameters>,

    #[serde(default)]
    pub scrapers: Vec<String>,

    /// Permitted domain names for the focus layer (§4.4 step 2). Absent or
    /// malformed is handled by the caller, not here — we just preserve
    /// whatever was present under the key.
    #[serde(default)]
    pub focus: Vec<String>,

    /// Repository path tracked in the version store for the blades' own
    /// control code (as opposed to a scraping module). Not named in spec.md's
    /// topology schema table, but spec.md §4.3 requires resolving
    /// `capabilities["<client_repo>"]`, so it has to come from somewhere.
    #[serde(default = "default_client_repository")]
    pub client_repository: String,

    /// Endpoint of the scrapers-configuration collaborator (spec.md §4.4
    /// step 1). Not named in spec.md's topology schema table — it is an
    /// external collaborator whose interface is specified but whose
    /// address is a per-deployment concern — so it lives here alongside
    /// `client_repository`.
    #[serde(default = "default_scrapers_config_url")]
    pub scrapers_config_url: String,

    /// Endpoint of the keyword-chooser collaborator (spec.md §4.4 step 6).
    #[serde(default = "default_keyword_chooser_url")]
    pub keyword_chooser_url: String,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for StaticClusterParameters {
    fn default() -> Self {
        Self {
            orchestrator_interval_in_seconds: default_orchestrator_interval(),
            github_cache_threshold_minutes: default_github_cache_threshold(),
            database_provider: None,
            db: None,
            scrapers: Vec::new(),
            focus: Vec::new(),
            client_repository: default_client_repository(),
            scrapers_config_url: default_scrapers_config_url(),
            keyword_chooser_url: default_keyword_chooser_url(),
            extra: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbParameters {
    pub driver: String,
    pub database: String,
}

/// The full topology document, loaded once at startup (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub blades: Vec<BladeDecl>,
    #[serde(default)]
    pub static_cluster_parameters: StaticClusterParameters,
}

impl Topology {
    pub fn load_from_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("reading topology file {}: {e}", path.as_ref().display()))?;
        Self::load_from_str(&raw).map_err(|e| anyhow::anyhow!("parsing topology file: {e}"))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BladeDecl> {
        self.blades.iter().find(|b| b.name == name)
    }

    pub fn find_by_address(&self, address: &str) -> Option<&BladeDecl> {
        self.blades.iter().find(|b| b.address() == address)
    }

    pub fn blades_of_role(&self, role: super::blade::BladeRole) -> impl Iterator<Item = &BladeDecl> {
        self.blades.iter().filter(move |b| b.blade == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
blades:
  - name: A
    blade: orchestrator
    host: 127.0.0.1
    port: 8000
    managed: true
    venv: ''
  - name: B
    blade: scraper
    host: 127.0.0.1
    port: 8001
    managed: true
    venv: ''
  - name: C
    blade: spotting
    host: 127.0.0.1
    port: 8002
    managed: true
    venv: ''
static_cluster_parameters:
  orchestrator_interval_in_seconds: 10
  github_cache_threshold_minutes: 10
  database_provider: sqlite
  db:
    driver: sqlite
    database: versions.db
  scrapers:
    - exorde-labs/rss007d0675444aa13fc
  focus: []
";

    #[test]
    fn parses_sample_topology() {
        let topo = Topology::load_from_str(SAMPLE).expect("valid topology");
        assert_eq!(topo.blades.len(), 3);
        assert_eq!(topo.static_cluster_parameters.orchestrator_interval_in_seconds, 10);
        assert_eq!(topo.static_cluster_parameters.scrapers.len(), 1);
    }

    #[test]
    fn defaults_apply_when_static_cluster_parameters_omitted() {
        let yaml = "blades: []\n";
        let topo = Topology::load_from_str(yaml).expect("valid topology");
        assert_eq!(topo.static_cluster_parameters.orchestrator_interval_in_seconds, 10);
        assert_eq!(topo.static_cluster_parameters.github_cache_threshold_minutes, 10);
    }

    #[test]
    fn find_by_address_matches_host_and_port() {
        let topo = Topology::load_from_str(SAMPLE).unwrap();
        let found = topo.find_by_address("127.0.0.1:8001").unwrap();
        assert_eq!(found.name, "B");
    }
}
