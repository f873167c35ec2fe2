//! CUDA toolchain probe.
//!
//! The GPU compiler is only queried for its version string; a missing `nvcc`
//! is advisory and never aborts the run. The native-extension submodules need
//! it later, so the warning carries the install link.

use regex::Regex;

use crate::system::{CommandRunner, CommandSpec};

const CUDA_INSTALL_URL: &str = "https://developer.nvidia.com/cuda-downloads";

/// Outcome of the toolchain probe. Informational only.
#[derive(Debug, Clone)]
pub struct ToolchainReport {
    /// `nvcc` was found on PATH.
    pub found: bool,
    /// CUDA release, e.g. "11.8", when the version output could be parsed.
    pub release: Option<String>,
}

/// Extract the release number from `nvcc --version` output.
///
/// Typical line: `Cuda compilation tools, release 11.8, V11.8.89`.
fn parse_release(output: &str) -> Option<String> {
    if let Ok(re) = Regex::new(r"release (\d+\.\d+)") {
        if let Some(caps) = re.captures(output) {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// Probe for the CUDA compiler and surface its version.
///
/// Never fails: absence or unparseable output is reported in the returned
/// [`ToolchainReport`] and logged as a warning.
pub fn probe_cuda(runner: &dyn CommandRunner) -> ToolchainReport {
    if runner.lookup("nvcc").is_none() {
        log::warn!(
            "nvcc not found on PATH; the native submodules will fail to build without \
             the CUDA toolkit ({})",
            CUDA_INSTALL_URL
        );
        return ToolchainReport {
            found: false,
            release: None,
        };
    }

    match runner.capture(&CommandSpec::new("nvcc").arg("--version")) {
        Ok(output) => ToolchainReport {
            found: true,
            release: parse_release(&output),
        },
        Err(e) => {
            log::warn!("nvcc --version failed ({}); continuing without toolchain info", e);
            ToolchainReport {
                found: true,
                release: None,
            }
        }
    }
}
