//! Capability map — repository path -> latest non-defective tag (spec.md §3, glossary).

use std::collections::HashMap;

/// Rebuilt on every orchestrator tick from `VersionStore::get_latest_valid_tags_for_all_repos`.
pub type CapabilityMap = HashMap<String, String>;
