//! Error type hierarchy for splatenv.
//!
//! Provides structured error handling with ExecError, ManifestError,
//! EnvError, and VerifyError. Git operations carry their own error type in
//! `repo::git`.

use std::io;
use thiserror::Error;

/// External process execution errors.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with status {code}")]
    Failed { program: String, code: i32 },

    #[error("'{program}' was terminated by a signal")]
    Terminated { program: String },

    #[error("'{program}' produced non-UTF-8 output")]
    BadOutput { program: String },
}

/// Environment manifest read/write errors.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid manifest YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

/// Environment backend selection and materialization errors.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("invalid choice '{0}': expected 1, 2 or 3")]
    InvalidChoice(String),

    #[error("neither conda nor mamba was found on PATH")]
    NoCondaTool,

    #[error("micromamba is still missing after running its installer")]
    MicromambaUnavailable,

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Post-provisioning verification errors.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("framework import failed: {0}")]
    ImportFailed(#[from] ExecError),

    #[error("unexpected interpreter output: {0:?}")]
    MalformedReport(String),
}
