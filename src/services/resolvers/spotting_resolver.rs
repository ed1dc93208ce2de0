//! Spotting resolver (spec.md §4.3).

use chrono::{DateTime, Utc};

use crate::domain::errors::DomainResult;
use crate::domain::models::{BladeDecl, CapabilityMap, Intent, IntentParams, Topology};

/// Returns an intent with empty params and the current client version.
pub fn resolve(
    target: &BladeDecl,
    capabilities: &CapabilityMap,
    topology: &Topology,
    _self_blade: &BladeDecl,
    now: DateTime<Utc>,
) -> DomainResult<Option<Intent>> {
    let client_repo = &topology.static_cluster_parameters.client_repository;
    let Some(version) = capabilities.get(client_repo) else {
        return Ok(None);
    };

    Ok(Some(Intent {
        id: Intent::make_id(now, &target.address()),
        host: target.address(),
        blade: target.blade,
        version: version.clone(),
        params: IntentParams::Spotting,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BladeRole;

    #[test]
    fn emits_intent_when_client_version_known() {
        let target = BladeDecl {
            name: "C".into(),
            blade: BladeRole::Spotting,
            host: "127.0.0.1".into(),
            port: 8002,
            managed: true,
            venv: String::new(),
        };
        let topo = Topology {
            blades: vec![target.clone()],
            static_cluster_parameters: Default::default(),
        };
        let mut caps = CapabilityMap::new();
        caps.insert("swarm/client".into(), "v1.0.0".into());

        let intent = resolve(&target, &caps, &topo, &target, Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(intent.host, "127.0.0.1:8002");
        assert!(matches!(intent.params, IntentParams::Spotting));
    }
}
