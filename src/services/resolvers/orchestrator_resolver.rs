//! Orchestrator resolver (spec.md §4.3).

use chrono::{DateTime, Utc};

use crate::domain::errors::DomainResult;
use crate::domain::models::{BladeDecl, CapabilityMap, Intent, IntentParams, Topology};

/// Returns an intent carrying the client's own control-code version, with
/// empty params. Pure apart from reading `capabilities`.
pub fn resolve(
    target: &BladeDecl,
    capabilities: &CapabilityMap,
    topology: &Topology,
    _self_blade: &BladeDecl,
    now: DateTime<Utc>,
) -> DomainResult<Option<Intent>> {
    let client_repo = &topology.static_cluster_parameters.client_repository;
    let Some(version) = capabilities.get(client_repo) else {
        // No known client version yet (e.g. version store hasn't synced) —
        // "no actionable intent this tick", logged by the caller.
        return Ok(None);
    };

    Ok(Some(Intent {
        id: Intent::make_id(now, &target.address()),
        host: target.address(),
        blade: target.blade,
        version: version.clone(),
        params: IntentParams::Orchestrator,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BladeRole;

    fn blade(name: &str, role: BladeRole, port: u16) -> BladeDecl {
        BladeDecl {
            name: name.into(),
            blade: role,
            host: "127.0.0.1".into(),
            port,
            managed: true,
            venv: String::new(),
        }
    }

    #[test]
    fn emits_intent_when_client_version_known() {
        let target = blade("A", BladeRole::Orchestrator, 8000);
        let topo = Topology {
            blades: vec![target.clone()],
            static_cluster_parameters: Default::default(),
        };
        let mut caps = CapabilityMap::new();
        caps.insert("swarm/client".into(), "v1.0.0".into());

        let intent = resolve(&target, &caps, &topo, &target, Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(intent.host, "127.0.0.1:8000");
        assert_eq!(intent.version, "v1.0.0");
        assert!(matches!(intent.params, IntentParams::Orchestrator));
    }

    #[test]
    fn returns_none_when_client_version_unknown() {
        let target = blade("A", BladeRole::Orchestrator, 8000);
        let topo = Topology {
            blades: vec![target.clone()],
            static_cluster_parameters: Default::default(),
        };
        let caps = CapabilityMap::new();

        let outcome = resolve(&target, &caps, &topo, &target, Utc::now()).unwrap();
        assert!(outcome.is_none());
    }
}
