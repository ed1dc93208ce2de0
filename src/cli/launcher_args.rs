use clap::{Parser, Subcommand};

/// Launcher CLI (spec.md §6): spawns and supervises managed blades per the
/// topology file.
#[derive(Parser, Debug)]
#[command(name = "swarmctl-launcher")]
#[command(about = "Launches and supervises a swarm of blades")]
#[command(version)]
pub struct LauncherArgs {
    /// Topology file path.
    #[arg(long, default_value = "topology/standalone.yaml")]
    pub config: String,

    /// Emit the shell invocation for a single blade and exit, instead of
    /// launching the whole swarm.
    #[arg(long, value_name = "BLADE_NAME")]
    pub print_cmd_only: Option<String>,

    /// Structured (JSON) log output.
    #[arg(long)]
    pub jlog: bool,

    #[command(subcommand)]
    pub command: Option<LauncherCommand>,
}

#[derive(Subcommand, Debug)]
pub enum LauncherCommand {
    /// Print the current status of every blade in the topology.
    Status,
}
