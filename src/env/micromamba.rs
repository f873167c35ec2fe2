//! micromamba-backed environment: install the binary if absent, then create
//! the environment straight from the manifest.

use std::path::{Path, PathBuf};

use crate::env::{ensure_manifest, load_manifest, EnvBackend, EnvironmentHandle};
use crate::error::EnvError;
use crate::models::MANIFEST_FILE;
use crate::system::{CommandRunner, CommandSpec};

/// Official download-and-shell-init installer, run through the shell as the
/// opaque flow it is.
const INSTALLER: &str = "curl -Ls https://micro.mamba.pm/install.sh | bash";

/// Find micromamba on PATH or in its default install location under the
/// operator's home directory.
fn locate(runner: &dyn CommandRunner) -> Option<PathBuf> {
    if let Some(path) = runner.lookup("micromamba") {
        return Some(path);
    }
    let candidate = dirs::home_dir()?.join(".local/bin/micromamba");
    candidate.is_file().then_some(candidate)
}

pub struct MicromambaBackend;

impl EnvBackend for MicromambaBackend {
    fn name(&self) -> &'static str {
        "micromamba"
    }

    fn materialize(
        &self,
        runner: &dyn CommandRunner,
        checkout: &Path,
    ) -> Result<EnvironmentHandle, EnvError> {
        let tool = match locate(runner) {
            Some(path) => path,
            None => {
                log::info!("micromamba not found, running its installer");
                runner.run(&CommandSpec::new("bash").args(["-c", INSTALLER]))?;
                locate(runner).ok_or(EnvError::MicromambaUnavailable)?
            }
        };
        let tool = tool.to_string_lossy().to_string();

        let manifest_path = checkout.join(MANIFEST_FILE);
        ensure_manifest(&manifest_path)?;
        let manifest = load_manifest(&manifest_path)?;

        runner.run(
            &CommandSpec::new(tool.as_str())
                .args(["create", "-y", "-f", MANIFEST_FILE])
                .cwd(checkout),
        )?;

        Ok(EnvironmentHandle::Named {
            tool,
            name: manifest.name,
        })
    }
}
