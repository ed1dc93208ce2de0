//! Scraper orchestration — the hard part (spec.md §4.4).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    normalize_module_path, BladeDecl, BladeRole, CapabilityMap, Intent, IntentParams,
    ScraperIntentParameters, Topology,
};
use crate::domain::ports::{ChosenKeyword, KeywordChooser, ScrapersConfigProvider};
use crate::services::intent_cache::{IntentCache, DEFAULT_WINDOW_SECONDS};
use crate::services::weighted_chooser::{self, binary_mask};

/// Recompute a fresh scraper intent (spec.md §4.4 steps 1-8), ignoring the
/// memoization cache. Callers that want the 10-second window should go
/// through [`resolve_memoized`] instead.
#[allow(clippy::too_many_arguments)]
pub async fn resolve(
    target: &BladeDecl,
    capabilities: &CapabilityMap,
    topology: &Topology,
    _self_blade: &BladeDecl,
    now: DateTime<Utc>,
    scrapers_config: &dyn ScrapersConfigProvider,
    keyword_chooser: &dyn KeywordChooser,
    rng: &mut impl Rng,
) -> DomainResult<Option<Intent>> {
    // Step 1: fetch the scrapers configuration snapshot. Failure propagates.
    let config = scrapers_config.fetch().await?;

    // Step 2: focus layer.
    let focus = &topology.static_cluster_parameters.focus;
    let focus_layer = if focus.is_empty() {
        indexmap::IndexMap::new()
    } else {
        binary_mask(config.weights.keys(), focus)
    };

    // Step 3: quota layer — reserved, stubbed empty (spec.md §4.4 step 3).
    let quota_layer = indexmap::IndexMap::new();

    // Step 4: weighted choice across layers.
    let domain = match weighted_chooser::choose(
        &[config.weights.clone(), focus_layer, quota_layer],
        rng,
    ) {
        Ok(d) => d,
        Err(DomainError::NoCandidate) => return Ok(None),
        Err(e) => return Err(e),
    };

    // Step 5: canonical module for the domain.
    let Some(module_urls) = config.enabled_modules.get(&domain) else {
        return Ok(None);
    };
    let Some(raw_module_url) = module_urls.first() else {
        return Ok(None);
    };
    let module = normalize_module_path(raw_module_url);

    // Step 6: keyword selection.
    let ChosenKeyword { keyword, .. } = keyword_chooser.choose(&module, &config).await?;

    // Step 7: assemble parameters. generic then specific (specific wins).
    let mut parameters: HashMap<String, Value> = HashMap::new();
    parameters.insert(
        "url_parameters".to_string(),
        serde_json::json!({ "keyword": keyword }),
    );
    parameters.insert("keyword".to_string(), Value::String(keyword.clone()));
    for (k, v) in &config.generic_modules_parameters {
        parameters.insert(k.clone(), v.clone());
    }
    if let Some(specific) = config.specific_modules_parameters.get(&module) {
        for (k, v) in specific {
            parameters.insert(k.clone(), v.clone());
        }
    }

    // Step 8: capability lookup, target, assembly.
    let Some(module_version) = capabilities.get(&module) else {
        return Err(DomainError::UnknownModuleVersion(module));
    };

    let spotting_blades: Vec<&BladeDecl> = topology.blades_of_role(BladeRole::Spotting).collect();
    if spotting_blades.is_empty() {
        return Ok(None);
    }
    let chosen_spotting = spotting_blades[rng.gen_range(0..spotting_blades.len())];

    Ok(Some(Intent {
        id: Intent::make_id(now, &target.address()),
        host: target.address(),
        blade: target.blade,
        version: capabilities
            .get(&topology.static_cluster_parameters.client_repository)
            .cloned()
            .unwrap_or_default(),
        params: IntentParams::Scraper(ScraperIntentParameters {
            module,
            version: module_version.clone(),
            target: format!("{}/push", chosen_spotting.base_url()),
            parameters,
        }),
    }))
}

/// Rate-limited entry point (spec.md §4.4 Rate-limiting). First call for a
/// host always regenerates; subsequent calls within `window_seconds` re-emit
/// the cached intent unchanged.
#[allow(clippy::too_many_arguments)]
pub async fn resolve_memoized(
    target: &BladeDecl,
    capabilities: &CapabilityMap,
    topology: &Topology,
    self_blade: &BladeDecl,
    now: DateTime<Utc>,
    scrapers_config: &dyn ScrapersConfigProvider,
    keyword_chooser: &dyn KeywordChooser,
    rng: &mut impl Rng,
    cache: &mut IntentCache,
) -> DomainResult<Option<Intent>> {
    let host = target.address();
    if let Some(cached) = cache.fresh(&host, now, DEFAULT_WINDOW_SECONDS) {
        return Ok(Some(cached.clone()));
    }

    let fresh = resolve(
        target,
        capabilities,
        topology,
        self_blade,
        now,
        scrapers_config,
        keyword_chooser,
        rng,
    )
    .await?;

    if let Some(intent) = &fresh {
        cache.remember(host, intent.clone(), now);
    }

    Ok(fresh)
}
