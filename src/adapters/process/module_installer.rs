//! Shells out to a configured installer command for module fetch/build
//! (spec.md §4.7; the actual module fetch/build is an external collaborator
//! per spec.md §1, the executor only checks its exit status).

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::ModuleInstaller;

/// Installs modules via `git+https://github.com/<owner>/<repo>@<version>`
/// style references, tracking installed versions in a flat state directory.
pub struct ProcessModuleInstaller {
    installer_command: String,
    state_dir: PathBuf,
}

impl ProcessModuleInstaller {
    pub fn new(installer_command: String, state_dir: PathBuf) -> Self {
        Self {
            installer_command,
            state_dir,
        }
    }

    fn version_marker_path(&self, module_name: &str) -> PathBuf {
        self.state_dir.join(format!("{module_name}.version"))
    }
}

#[async_trait]
impl ModuleInstaller for ProcessModuleInstaller {
    async fn installed_version(&self, module_name: &str) -> DomainResult<Option<String>> {
        match fs::read_to_string(self.version_marker_path(module_name)).await {
            Ok(contents) => Ok(Some(contents.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::ModuleInstallFailed(
                module_name.to_string(),
                format!("reading version marker: {e}"),
            )),
        }
    }

    async fn install(&self, module: &str, version: &str) -> DomainResult<()> {
        let module_name = module.rsplit('/').next().unwrap_or(module);
        let reference = format!("git+https://github.com/{module}@{version}#egg={module_name}");

        info!(module = module, version = version, "installing module");

        let status = Command::new(&self.installer_command)
            .arg(&reference)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .status()
            .await
            .map_err(|e| {
                DomainError::ModuleInstallFailed(module_name.to_string(), e.to_string())
            })?;

        if !status.success() {
            warn!(module = module, version = version, code = ?status.code(), "install command failed");
            return Err(DomainError::ModuleInstallFailed(
                module_name.to_string(),
                format!("installer exited with {status}"),
            ));
        }

        fs::create_dir_all(&self.state_dir)
            .await
            .map_err(|e| DomainError::ModuleInstallFailed(module_name.to_string(), e.to_string()))?;
        fs::write(self.version_marker_path(module_name), version)
            .await
            .map_err(|e| DomainError::ModuleInstallFailed(module_name.to_string(), e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn installed_version_is_none_when_no_marker() {
        let dir = tempfile::tempdir().unwrap();
        let installer = ProcessModuleInstaller::new("true".to_string(), dir.path().to_path_buf());

        assert_eq!(installer.installed_version("owner/rss-module").await.unwrap(), None);
    }

    #[tokio::test]
    async fn install_writes_version_marker_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let installer = ProcessModuleInstaller::new("true".to_string(), dir.path().to_path_buf());

        installer.install("owner/rss-module", "v0.0.3").await.unwrap();

        assert_eq!(
            installer.installed_version("rss-module").await.unwrap(),
            Some("v0.0.3".to_string())
        );
    }

    #[tokio::test]
    async fn install_failure_propagates_as_module_install_failed() {
        let dir = tempfile::tempdir().unwrap();
        let installer = ProcessModuleInstaller::new("false".to_string(), dir.path().to_path_buf());

        let err = installer.install("owner/rss-module", "v0.0.3").await.unwrap_err();
        assert!(matches!(err, DomainError::ModuleInstallFailed(_, _)));
    }
}
