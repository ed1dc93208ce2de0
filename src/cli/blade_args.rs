use clap::Parser;

use crate::domain::models::{BladeDecl, Topology};

/// Blade CLI (spec.md §6): invoked by the launcher with the blade's own
/// declaration and the full topology, both JSON-encoded.
#[derive(Parser, Debug)]
#[command(name = "swarmctl-blade")]
#[command(about = "Runs a single blade process")]
#[command(version)]
pub struct BladeArgs {
    /// This blade's own declaration, JSON-encoded.
    #[arg(long, value_parser = parse_blade_decl)]
    pub blade: BladeDecl,

    /// The full topology, JSON-encoded.
    #[arg(long, value_parser = parse_topology)]
    pub topology: Topology,

    /// Structured (JSON) log output.
    #[arg(long)]
    pub jlog: bool,
}

fn parse_blade_decl(raw: &str) -> Result<BladeDecl, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid --blade JSON: {e}"))
}

fn parse_topology(raw: &str) -> Result<Topology, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid --topology JSON: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    #[test]
    fn parses_blade_and_topology_json() {
        let blade_json = r#"{"name":"B","blade":"scraper","host":"127.0.0.1","port":8001,"managed":true,"venv":""}"#;
        let topology_json = format!(r#"{{"blades":[{blade_json}]}}"#);

        let args = BladeArgs::parse_from([
            "swarmctl-blade",
            "--blade",
            blade_json,
            "--topology",
            &topology_json,
        ]);

        assert_eq!(args.blade.name, "B");
        assert_eq!(args.topology.blades.len(), 1);
        assert!(!args.jlog);
    }
}
