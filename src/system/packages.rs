//! OS build-dependency installation via apt.
//!
//! apt is driven as an opaque executable: index refresh, then one install of
//! the fixed package set the rest of the run depends on. Either command
//! failing is fatal to the whole run.

use nix::unistd::Uid;

use crate::error::ExecError;
use crate::system::{CommandRunner, CommandSpec};

/// Packages every run needs before any backend work starts: version control,
/// the compiler toolchain, the pinned Python runtime with headers, and the
/// two download utilities the micromamba installer relies on.
pub const BUILD_PACKAGES: &[&str] = &[
    "git",
    "build-essential",
    "python3.10",
    "python3.10-dev",
    "wget",
    "curl",
];

/// Build an apt-get command, elevated through sudo when the current process
/// is not already root.
fn apt_command(elevate: bool, args: &[&str]) -> CommandSpec {
    if elevate {
        CommandSpec::new("sudo").arg("apt-get").args(args.iter().copied())
    } else {
        CommandSpec::new("apt-get").args(args.iter().copied())
    }
}

fn install_with(runner: &dyn CommandRunner, elevate: bool) -> Result<(), ExecError> {
    runner.run(&apt_command(elevate, &["update"]))?;

    let mut install_args = vec!["install", "-y"];
    install_args.extend_from_slice(BUILD_PACKAGES);
    runner.run(&apt_command(elevate, &install_args))
}

/// Refresh the package index and install [`BUILD_PACKAGES`].
pub fn install_build_packages(runner: &dyn CommandRunner) -> Result<(), ExecError> {
    install_with(runner, !Uid::effective().is_root())
}
