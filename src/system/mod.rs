//! System module: process-execution boundary, toolchain probe, OS packages.

pub mod exec;
pub mod packages;
pub mod toolchain;

pub use exec::{CommandRunner, CommandSpec, SystemRunner};
pub use packages::install_build_packages;
pub use toolchain::probe_cuda;
