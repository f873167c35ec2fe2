//! Post-provisioning verification.
//!
//! Imports the framework inside the freshly created environment and reports
//! its version and CUDA availability. A failed import means the run did not
//! achieve its goal, so it propagates as the run's final error.

use crate::env::EnvironmentHandle;
use crate::error::VerifyError;
use crate::system::CommandRunner;

const IMPORT_CHECK: &str =
    "import torch; print(torch.__version__); print(torch.cuda.is_available())";

/// What the environment's interpreter reported about the framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkReport {
    pub version: String,
    pub cuda_available: bool,
}

/// Parse the two-line output of the import check.
fn parse_report(output: &str) -> Result<FrameworkReport, VerifyError> {
    let mut lines = output.lines().map(str::trim).filter(|l| !l.is_empty());
    let version = lines.next();
    let flag = lines.next();

    match (version, flag) {
        (Some(version), Some(flag)) if flag == "True" || flag == "False" => Ok(FrameworkReport {
            version: version.to_string(),
            cuda_available: flag == "True",
        }),
        _ => Err(VerifyError::MalformedReport(output.to_string())),
    }
}

/// Import the framework inside the environment and report on it.
pub fn verify_framework(
    runner: &dyn CommandRunner,
    handle: &EnvironmentHandle,
) -> Result<FrameworkReport, VerifyError> {
    let output = runner.capture(&handle.python().args(["-c", IMPORT_CHECK]))?;
    let report = parse_report(&output)?;
    log::info!(
        "torch {} imported, CUDA available: {}",
        report.version,
        report.cuda_available
    );
    Ok(report)
}
