//! Launcher binary (spec.md §6): spawns and supervises managed blades.
//! Exit codes: 0 on clean shutdown, 1 on config load failure.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use comfy_table::Table;
use console::style;
use swarmctl::application::Launcher;
use swarmctl::cli::{LauncherArgs, LauncherCommand};
use swarmctl::domain::models::Topology;
use swarmctl::infrastructure::config::ConfigLoader;
use swarmctl::infrastructure::logging::{LogConfig, LoggerImpl};
use tracing::{error, info};

// Cooperative event loop only — spec.md §5 rules out parallel threads of
// execution sharing mutable state, so a current-thread runtime is the
// faithful fit rather than tokio's default work-stealing scheduler.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = LauncherArgs::parse();

    let runtime_config = match ConfigLoader::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to load runtime configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let _logger = LoggerImpl::init(&LogConfig::from_runtime(&runtime_config, args.jlog)).ok();

    let topology = match load_topology(&args.config) {
        Ok(t) => t,
        Err(e) => {
            error!(config = %args.config, error = %e, "failed to load topology");
            return ExitCode::FAILURE;
        }
    };

    let blade_binary = match Launcher::find_blade_binary() {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "could not locate blade binary");
            return ExitCode::FAILURE;
        }
    };
    let mut launcher = Launcher::new(blade_binary);

    if let Some(blade_name) = &args.print_cmd_only {
        let Some(blade) = topology.blades.iter().find(|b| &b.name == blade_name) else {
            error!(blade = %blade_name, "no such blade in topology");
            return ExitCode::FAILURE;
        };
        match launcher.print_cmd_only(blade, &topology) {
            Ok(cmd) => {
                println!("{cmd}");
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                error!(error = %e, "failed to build command");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Err(e) = launcher.spawn_all(&topology).await {
        error!(error = %e, "failed to spawn managed blades");
        return ExitCode::FAILURE;
    }
    info!(blades = topology.blades.len(), "launcher supervising swarm");

    let show_status = matches!(args.command, Some(LauncherCommand::Status));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
            _ = tokio::time::sleep(Duration::from_secs(10)) => {
                if show_status {
                    print_status_table(&mut launcher);
                }
            }
        }
    }

    ExitCode::SUCCESS
}

fn load_topology(path: &str) -> anyhow::Result<Topology> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

fn print_status_table(launcher: &mut Launcher) {
    let mut table = Table::new();
    table.set_header(vec!["name", "role", "address", "running"]);
    for (blade, alive) in launcher.status_rows() {
        let running = if alive {
            style("running").green().to_string()
        } else {
            style("stopped").red().to_string()
        };
        table.add_row(vec![blade.name, blade.blade.as_str().to_string(), blade.address(), running]);
    }
    println!("{table}");
}
