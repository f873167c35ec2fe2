//! Environment manifest (`environment.yml`) handling.
//!
//! The manifest declares the named environment, its channels, and its
//! dependency list, including the pip sub-list that references the two local
//! native-extension submodules. It is synthesized only when absent: an
//! existing manifest is never touched.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

/// Name of the environment the default manifest declares.
pub const ENV_NAME: &str = "gaussian_splatting";

/// One entry in the manifest's dependency list: either a bare package spec
/// or the pip sub-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Package(String),
    Pip { pip: Vec<String> },
}

/// Declarative environment manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub channels: Vec<String>,
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    /// The compiled-in default manifest, used when the checkout ships none.
    pub fn default_manifest() -> Self {
        Manifest {
            name: ENV_NAME.to_string(),
            channels: vec![
                "pytorch".to_string(),
                "nvidia".to_string(),
                "conda-forge".to_string(),
            ],
            dependencies: vec![
                Dependency::Package("python=3.10".to_string()),
                Dependency::Package("pip".to_string()),
                Dependency::Package("pytorch".to_string()),
                Dependency::Package("torchvision".to_string()),
                Dependency::Package("torchaudio".to_string()),
                Dependency::Package("pytorch-cuda=11.8".to_string()),
                Dependency::Package("plyfile".to_string()),
                Dependency::Package("tqdm".to_string()),
                Dependency::Pip {
                    pip: vec![
                        "submodules/diff-gaussian-rasterization".to_string(),
                        "submodules/simple-knn".to_string(),
                    ],
                },
            ],
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ManifestError {
    ManifestError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Write the default manifest if none exists yet.
///
/// Returns `true` when a manifest was written, `false` when an existing file
/// was left untouched.
pub fn ensure_manifest(path: &Path) -> Result<bool, ManifestError> {
    if path.exists() {
        log::info!("Manifest already present at {}, leaving it unchanged", path.display());
        return Ok(false);
    }

    let yaml = serde_yaml::to_string(&Manifest::default_manifest())?;
    fs::write(path, yaml).map_err(|e| io_error(path, e))?;
    log::info!("Wrote default manifest to {}", path.display());
    Ok(true)
}

/// Load and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(serde_yaml::from_str(&content)?)
}
