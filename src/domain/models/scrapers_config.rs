//! Scrapers configuration snapshot — external collaborator surface (spec.md §3).

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fetched fresh per tick; source of truth lives outside this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapersConfiguration {
    /// domain name -> non-negative weight. Order-preserving so the weighted
    /// chooser's determinism guarantee (spec.md §4.1) actually holds across
    /// runs fed the same snapshot.
    pub weights: IndexMap<String, f64>,
    /// domain name -> ordered module repository URLs; first entry is canonical.
    pub enabled_modules: HashMap<String, Vec<String>>,
    /// Parameters applied to every module regardless of which one is chosen.
    pub generic_modules_parameters: HashMap<String, serde_json::Value>,
    /// module path -> parameters specific to that module; wins over generic on conflict.
    pub specific_modules_parameters: HashMap<String, HashMap<String, serde_json::Value>>,
}

/// Normalize a GitHub-form module URL (`https://github.com/owner/repo[.git]`,
/// `git@github.com:owner/repo.git`, or an already-bare `owner/repo`) down to
/// `owner/repo` (spec.md §4.4 step 5).
pub fn normalize_module_path(raw: &str) -> String {
    let trimmed = raw
        .trim()
        .trim_start_matches("https://github.com/")
        .trim_start_matches("http://github.com/")
        .trim_start_matches("git@github.com:")
        .trim_end_matches(".git")
        .trim_end_matches('/');
    trimmed.to_string()
}
