//! venv-backed environment: `python3.10 -m venv` plus GPU wheels from the
//! PyTorch index.

use std::path::Path;

use crate::env::{EnvBackend, EnvironmentHandle};
use crate::error::EnvError;
use crate::system::{CommandRunner, CommandSpec};

/// Fixed relative path of the virtual environment inside the checkout.
pub const VENV_DIR: &str = "venv";

/// GPU-enabled wheel index for the framework install.
pub const TORCH_INDEX_URL: &str = "https://download.pytorch.org/whl/cu118";

/// Auxiliary libraries installed by name after the framework.
pub const AUX_PACKAGES: &[&str] = &["plyfile", "tqdm"];

pub struct VenvBackend;

impl EnvBackend for VenvBackend {
    fn name(&self) -> &'static str {
        "venv"
    }

    fn materialize(
        &self,
        runner: &dyn CommandRunner,
        checkout: &Path,
    ) -> Result<EnvironmentHandle, EnvError> {
        runner.run(
            &CommandSpec::new("python3.10")
                .args(["-m", "venv", VENV_DIR])
                .cwd(checkout),
        )?;

        let handle = EnvironmentHandle::Venv {
            root: checkout.join(VENV_DIR),
        };

        runner.run(&handle.pip().args(["install", "--upgrade", "pip"]))?;

        runner.run(&handle.pip().args([
            "install",
            "torch",
            "torchvision",
            "torchaudio",
            "--index-url",
            TORCH_INDEX_URL,
        ]))?;

        runner.run(
            &handle
                .pip()
                .arg("install")
                .args(AUX_PACKAGES.iter().copied()),
        )?;

        Ok(handle)
    }
}
