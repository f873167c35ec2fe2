//! Isolated Python environments: backend selection, materialization, and the
//! handle the rest of the run addresses the environment through.
//!
//! The three backends are alternative implementations of one contract —
//! produce an isolated environment containing the required packages — behind
//! the [`EnvBackend`] trait. Activation is modeled explicitly: a handle
//! yields `python`/`pip` command specs instead of mutating shell state.

pub mod conda;
pub mod manifest;
pub mod micromamba;
pub mod venv;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::EnvError;
use crate::system::{CommandRunner, CommandSpec};

pub use manifest::{ensure_manifest, load_manifest, Dependency, Manifest, ENV_NAME};

/// The two native-extension submodules every backend installs, relative to
/// the checkout.
pub const SUBMODULES: &[&str] = &[
    "submodules/diff-gaussian-rasterization",
    "submodules/simple-knn",
];

/// The three mutually exclusive environment backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Venv,
    Micromamba,
    Conda,
}

impl BackendKind {
    /// Parse the operator's prompt answer. Anything outside {1, 2, 3} is an
    /// invalid-input error.
    pub fn from_choice(input: &str) -> Result<Self, EnvError> {
        match input.trim() {
            "1" => Ok(BackendKind::Venv),
            "2" => Ok(BackendKind::Micromamba),
            "3" => Ok(BackendKind::Conda),
            other => Err(EnvError::InvalidChoice(other.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Venv => write!(f, "venv + pip"),
            BackendKind::Micromamba => write!(f, "micromamba"),
            BackendKind::Conda => write!(f, "conda/mamba"),
        }
    }
}

/// Identifier of a materialized environment. Persists on disk past the run
/// for later interactive use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentHandle {
    /// Path-addressed virtual environment.
    Venv { root: PathBuf },
    /// Name-addressed conda-family environment, driven through `<tool> run`.
    Named { tool: String, name: String },
}

impl EnvironmentHandle {
    /// A `python` invocation inside the environment.
    pub fn python(&self) -> CommandSpec {
        match self {
            EnvironmentHandle::Venv { root } => {
                CommandSpec::new(root.join("bin/python").to_string_lossy())
            }
            EnvironmentHandle::Named { tool, name } => {
                CommandSpec::new(tool.as_str()).args(["run", "-n", name, "python"])
            }
        }
    }

    /// A `pip` invocation inside the environment.
    pub fn pip(&self) -> CommandSpec {
        match self {
            EnvironmentHandle::Venv { root } => {
                CommandSpec::new(root.join("bin/pip").to_string_lossy())
            }
            EnvironmentHandle::Named { tool, name } => {
                CommandSpec::new(tool.as_str()).args(["run", "-n", name, "pip"])
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            EnvironmentHandle::Venv { root } => format!("venv at {}", root.display()),
            EnvironmentHandle::Named { tool, name } => format!("{} environment '{}'", tool, name),
        }
    }
}

/// One strategy for producing an activated, isolated Python environment with
/// the required packages installed.
pub trait EnvBackend {
    fn name(&self) -> &'static str;

    /// Create the environment and install the dependency set, returning the
    /// handle later steps address it through.
    fn materialize(
        &self,
        runner: &dyn CommandRunner,
        checkout: &Path,
    ) -> Result<EnvironmentHandle, EnvError>;
}

/// Concrete backend for a selected kind.
pub fn backend_for(kind: BackendKind) -> Box<dyn EnvBackend> {
    match kind {
        BackendKind::Venv => Box::new(venv::VenvBackend),
        BackendKind::Micromamba => Box::new(micromamba::MicromambaBackend),
        BackendKind::Conda => Box::new(conda::CondaBackend),
    }
}

/// Install the two native-extension submodules into the environment via its
/// own pip. All three backends converge here.
pub fn install_submodules(
    runner: &dyn CommandRunner,
    handle: &EnvironmentHandle,
    checkout: &Path,
) -> Result<(), EnvError> {
    for submodule in SUBMODULES {
        let path = checkout.join(submodule);
        log::info!("Installing submodule {}", path.display());
        runner.run(
            &handle
                .pip()
                .args(["install", path.to_string_lossy().as_ref()]),
        )?;
    }
    Ok(())
}
