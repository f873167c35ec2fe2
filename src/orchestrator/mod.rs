//! Ordered step execution.
//!
//! Steps run strictly top to bottom; each one returns an explicit `Result`
//! and the first failure halts the run, tagged with the step that produced
//! it. There is no rollback: partially completed state is left on disk for
//! the operator.

pub mod verify;

use anyhow::Context;

use crate::env;
use crate::models::RunConfig;
use crate::repo::SourceFetcher;
use crate::system::{self, CommandRunner};

pub use verify::FrameworkReport;

/// Drives one provisioning run over a process-execution boundary.
pub struct Provisioner<'a> {
    config: RunConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> Provisioner<'a> {
    pub fn new(config: RunConfig, runner: &'a dyn CommandRunner) -> Self {
        Provisioner { config, runner }
    }

    /// Run every step in order, halting on the first failure.
    pub fn run(&self) -> anyhow::Result<FrameworkReport> {
        let config = &self.config;

        log::info!("==> [1/6] Probing CUDA toolchain");
        let toolchain = system::probe_cuda(self.runner);
        if toolchain.found {
            match &toolchain.release {
                Some(release) => log::info!("CUDA toolkit detected: release {}", release),
                None => log::info!("CUDA toolkit detected (release not recognized in output)"),
            }
        }

        log::info!("==> [2/6] Installing OS build packages");
        system::install_build_packages(self.runner)
            .context("OS package installation failed")?;

        log::info!("==> [3/6] Fetching project sources");
        let fetcher = SourceFetcher::ensure(&config.repo_url, config.checkout())
            .context("repository fetch failed")?;
        log::info!(
            "Checkout at {} ({})",
            fetcher.path().display(),
            fetcher.head_commit().context("checkout has no HEAD")?
        );

        log::info!("==> [4/6] Ensuring environment manifest");
        env::ensure_manifest(&config.manifest_path()).context("manifest synthesis failed")?;

        let backend = env::backend_for(config.backend);
        log::info!("==> [5/6] Creating environment via {} backend", backend.name());
        let handle = backend
            .materialize(self.runner, &config.checkout())
            .with_context(|| format!("{} backend failed", backend.name()))?;
        env::install_submodules(self.runner, &handle, &config.checkout())
            .context("submodule installation failed")?;
        log::info!("Environment ready: {}", handle.describe());

        log::info!("==> [6/6] Verifying framework import");
        let report = verify::verify_framework(self.runner, &handle)
            .context("framework verification failed")?;

        Ok(report)
    }
}
