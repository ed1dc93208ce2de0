//! Process-based adapters: module install/restart (spec.md §4.7).

pub mod module_installer;

pub use module_installer::ProcessModuleInstaller;
