//! Run configuration and compiled-in defaults.
//!
//! A run is one-shot: the configuration is assembled once at startup from
//! these defaults plus the single interactive backend choice, and is
//! immutable afterwards. Paths are threaded explicitly through the steps
//! instead of shifting the process working directory.

use std::path::PathBuf;

use crate::env::BackendKind;

/// Upstream project to provision for.
pub const REPO_URL: &str = "https://github.com/graphdeco-inria/gaussian-splatting.git";

/// Checkout directory name under the working directory.
pub const REPO_DIR: &str = "gaussian-splatting";

/// Manifest file name inside the checkout.
pub const MANIFEST_FILE: &str = "environment.yml";

/// Configuration for a single provisioning run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory the checkout is created under.
    pub working_dir: PathBuf,
    /// The backend selected at the prompt.
    pub backend: BackendKind,
    /// Remote URL of the project to clone.
    pub repo_url: String,
    /// Checkout directory name, relative to `working_dir`.
    pub repo_dir: String,
    /// Manifest file name, relative to the checkout.
    pub manifest_file: String,
}

impl RunConfig {
    /// Build a run configuration from the compiled-in defaults and the
    /// operator's backend choice.
    pub fn new(backend: BackendKind, working_dir: PathBuf) -> Self {
        RunConfig {
            working_dir,
            backend,
            repo_url: REPO_URL.to_string(),
            repo_dir: REPO_DIR.to_string(),
            manifest_file: MANIFEST_FILE.to_string(),
        }
    }

    /// Absolute path of the checkout directory.
    pub fn checkout(&self) -> PathBuf {
        self.working_dir.join(&self.repo_dir)
    }

    /// Absolute path of the manifest file inside the checkout.
    pub fn manifest_path(&self) -> PathBuf {
        self.checkout().join(&self.manifest_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_working_dir() {
        let config = RunConfig::new(BackendKind::Venv, PathBuf::from("/srv/ml"));
        assert_eq!(config.checkout(), PathBuf::from("/srv/ml/gaussian-splatting"));
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("/srv/ml/gaussian-splatting/environment.yml")
        );
    }

    #[test]
    fn test_defaults_point_at_upstream() {
        let config = RunConfig::new(BackendKind::Conda, PathBuf::from("."));
        assert!(config.repo_url.ends_with("gaussian-splatting.git"));
        assert_eq!(config.manifest_file, "environment.yml");
    }
}
