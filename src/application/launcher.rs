//! Launcher process management: spawns and supervises managed blade child
//! processes (spec.md §6 "Launcher CLI"; supplemented per SPEC_FULL.md §C.4
//! with a `status` subcommand, grounded in the teacher's
//! `McpProcessManager`).

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::{Child, Command};
use tracing::info;

use crate::domain::models::{BladeDecl, Topology};

pub struct ManagedBlade {
    pub decl: BladeDecl,
    pub child: Child,
}

/// Spawns and tracks managed blade child processes.
pub struct Launcher {
    blade_binary: PathBuf,
    children: Vec<ManagedBlade>,
}

impl Launcher {
    pub fn new(blade_binary: PathBuf) -> Self {
        Self {
            blade_binary,
            children: Vec::new(),
        }
    }

    /// Finds the `swarmctl-blade` binary alongside the currently-running
    /// launcher binary, release build preferred over debug.
    pub fn find_blade_binary() -> Result<PathBuf> {
        for profile in ["release", "debug"] {
            let candidate = PathBuf::from("target").join(profile).join("swarmctl-blade");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        anyhow::bail!("could not locate swarmctl-blade binary under target/{{release,debug}}")
    }

    /// Builds the shell invocation for a single blade without spawning it
    /// (spec.md §6 `--print_cmd_only`).
    pub fn command_for(&self, blade: &BladeDecl, topology: &Topology) -> Result<Command> {
        let blade_json = serde_json::to_string(blade).context("serializing blade declaration")?;
        let topology_json = serde_json::to_string(topology).context("serializing topology")?;

        let mut cmd = Command::new(&self.blade_binary);
        cmd.arg("--blade")
            .arg(blade_json)
            .arg("--topology")
            .arg(topology_json);
        Ok(cmd)
    }

    pub fn print_cmd_only(&self, blade: &BladeDecl, topology: &Topology) -> Result<String> {
        let blade_json = serde_json::to_string(blade)?;
        let topology_json = serde_json::to_string(topology)?;
        Ok(format!(
            "{} --blade {blade_json:?} --topology {topology_json:?}",
            self.blade_binary.display()
        ))
    }

    /// Spawns every managed blade in the topology.
    pub async fn spawn_all(&mut self, topology: &Topology) -> Result<()> {
        for blade in topology.blades.iter().filter(|b| b.managed) {
            let mut cmd = self.command_for(blade, topology)?;
            info!(blade = %blade.name, "spawning managed blade");
            let child = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .with_context(|| format!("failed to spawn blade {}", blade.name))?;
            self.children.push(ManagedBlade {
                decl: blade.clone(),
                child,
            });
        }
        Ok(())
    }

    /// Status rows: (blade, whether its child process is still running).
    pub fn status_rows(&mut self) -> Vec<(BladeDecl, bool)> {
        self.children
            .iter_mut()
            .map(|m| {
                let alive = matches!(m.child.try_wait(), Ok(None));
                (m.decl.clone(), alive)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BladeRole;

    fn blade(name: &str, managed: bool) -> BladeDecl {
        BladeDecl {
            name: name.into(),
            blade: BladeRole::Scraper,
            host: "127.0.0.1".into(),
            port: 8001,
            managed,
            venv: String::new(),
        }
    }

    #[test]
    fn print_cmd_only_embeds_blade_and_topology_json() {
        let launcher = Launcher::new(PathBuf::from("swarmctl-blade"));
        let b = blade("B", true);
        let topo = Topology {
            blades: vec![b.clone()],
            static_cluster_parameters: Default::default(),
        };

        let cmd = launcher.print_cmd_only(&b, &topo).unwrap();
        assert!(cmd.contains("swarmctl-blade"));
        assert!(cmd.contains("--blade"));
        assert!(cmd.contains("--topology"));
    }

    #[tokio::test]
    async fn spawn_all_skips_unmanaged_blades() {
        let mut launcher = Launcher::new(PathBuf::from("true"));
        let topo = Topology {
            blades: vec![blade("Managed", true), blade("Unmanaged", false)],
            static_cluster_parameters: Default::default(),
        };

        launcher.spawn_all(&topo).await.unwrap();
        assert_eq!(launcher.children.len(), 1);
        assert_eq!(launcher.children[0].decl.name, "Managed");
    }
}
