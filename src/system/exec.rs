//! External process execution boundary.
//!
//! Every package manager, environment tool, and interpreter invocation goes
//! through the [`CommandRunner`] trait so the steps that drive them can be
//! unit-tested against a scripted runner. [`SystemRunner`] is the production
//! implementation over `std::process::Command`: execution is fully
//! sequential, each command runs to completion before the next step starts.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::ExecError;

/// A fully described external command: program, arguments, and an optional
/// working directory. Built once, then handed to a [`CommandRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The command as a single display line, for logs and test assertions.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn build(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }
}

/// The process-execution boundary.
///
/// `run` streams the command's own output straight through to the operator's
/// terminal; `capture` collects stdout for parsing; `lookup` answers "is this
/// tool on PATH" for detection steps.
pub trait CommandRunner {
    /// Run to completion with inherited stdio. Non-zero exit is an error.
    fn run(&self, spec: &CommandSpec) -> Result<(), ExecError>;

    /// Run to completion, returning captured stdout. Non-zero exit is an
    /// error.
    fn capture(&self, spec: &CommandSpec) -> Result<String, ExecError>;

    /// Locate an executable on the search PATH.
    fn lookup(&self, program: &str) -> Option<PathBuf>;
}

/// Production runner over `std::process::Command`.
pub struct SystemRunner;

impl SystemRunner {
    fn status_to_result(program: &str, status: std::process::ExitStatus) -> Result<(), ExecError> {
        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(ExecError::Failed {
                program: program.to_string(),
                code,
            }),
            None => Err(ExecError::Terminated {
                program: program.to_string(),
            }),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), ExecError> {
        log::debug!("$ {}", spec.display_line());
        let status = spec.build().status().map_err(|source| ExecError::Launch {
            program: spec.program.clone(),
            source,
        })?;
        Self::status_to_result(&spec.program, status)
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String, ExecError> {
        log::debug!("$ {}", spec.display_line());
        let output = spec
            .build()
            .stdout(Stdio::piped())
            // Diagnostics from the tool itself stay visible on the terminal
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ExecError::Launch {
                program: spec.program.clone(),
                source,
            })?;
        Self::status_to_result(&spec.program, output.status)?;
        String::from_utf8(output.stdout).map_err(|_| ExecError::BadOutput {
            program: spec.program.clone(),
        })
    }

    fn lookup(&self, program: &str) -> Option<PathBuf> {
        let path_var = env::var_os("PATH")?;
        env::split_paths(&path_var)
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
