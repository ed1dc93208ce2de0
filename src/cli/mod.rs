//! Command-line argument surfaces for the launcher and blade binaries
//! (spec.md §6).

mod blade_args;
mod launcher_args;

pub use blade_args::BladeArgs;
pub use launcher_args::{LauncherArgs, LauncherCommand};
