//! splatenv: environment provisioner for Gaussian Splatting training machines.
//!
//! One run takes a bare machine to a working training setup: CUDA toolchain
//! probe, OS build packages, a recursive checkout of the upstream project,
//! an isolated Python environment (venv, micromamba, or an existing
//! conda/mamba install), the two native-extension submodules, and a final
//! framework import check.
//!
//! The system is organized into functional modules:
//! - **error**: per-concern error type re-exports
//! - **models**: run configuration and compiled-in defaults
//! - **logging**: `log` facade wiring (leveled stderr output)
//! - **system**: process-execution boundary, toolchain probe, OS packages
//! - **repo**: source checkout management via libgit2
//! - **env**: manifest handling and the three environment backends
//! - **orchestrator**: ordered step execution and verification

pub mod error;
pub mod logging;
pub mod models;

// Process boundary, toolchain probe, OS package installation
pub mod system;

// Source checkout management (clone, fast-forward, submodules)
pub mod repo;

// Manifest plus the three environment backends
pub mod env;

// Ordered step execution and final verification
pub mod orchestrator;

pub use models::RunConfig;
pub use orchestrator::Provisioner;
