//! conda/mamba-backed environment: reuse whichever tool is already
//! installed, conda preferred.

use std::path::Path;

use crate::env::{EnvBackend, EnvironmentHandle, ENV_NAME};
use crate::error::EnvError;
use crate::system::{CommandRunner, CommandSpec};

/// Packages installed through the detected tool's own install subcommand.
const CONDA_PACKAGES: &[&str] = &[
    "pytorch",
    "torchvision",
    "torchaudio",
    "pytorch-cuda=11.8",
    "tqdm",
];

pub struct CondaBackend;

impl EnvBackend for CondaBackend {
    fn name(&self) -> &'static str {
        "conda"
    }

    fn materialize(
        &self,
        runner: &dyn CommandRunner,
        _checkout: &Path,
    ) -> Result<EnvironmentHandle, EnvError> {
        // conda preferred over mamba when both exist
        let tool = ["conda", "mamba"]
            .iter()
            .find(|tool| runner.lookup(tool).is_some())
            .map(|tool| tool.to_string())
            .ok_or(EnvError::NoCondaTool)?;
        log::info!("Using existing {} installation", tool);

        runner.run(
            &CommandSpec::new(tool.as_str()).args(["create", "-y", "-n", ENV_NAME, "python=3.10"]),
        )?;

        runner.run(
            &CommandSpec::new(tool.as_str())
                .args(["install", "-y", "-n", ENV_NAME, "-c", "pytorch", "-c", "nvidia"])
                .args(CONDA_PACKAGES.iter().copied()),
        )?;

        let handle = EnvironmentHandle::Named {
            tool,
            name: ENV_NAME.to_string(),
        };

        // plyfile is not reliably available through the tool's channels
        runner.run(&handle.pip().args(["install", "plyfile"]))?;

        Ok(handle)
    }
}
