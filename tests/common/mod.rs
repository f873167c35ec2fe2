//! Scripted stand-in for the process-execution boundary.
//!
//! Records every command it is handed, answers PATH lookups and stdout
//! captures from scripted tables, and can be told to fail a matching
//! command, so backend steps can be exercised without touching the system.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use splatenv::error::ExecError;
use splatenv::system::{CommandRunner, CommandSpec};

pub struct ScriptedRunner {
    calls: Mutex<Vec<String>>,
    lookups: HashMap<String, PathBuf>,
    captures: Vec<(String, String)>,
    fail_on: Option<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        ScriptedRunner {
            calls: Mutex::new(Vec::new()),
            lookups: HashMap::new(),
            captures: Vec::new(),
            fail_on: None,
        }
    }

    /// Make `lookup(name)` succeed with the given path.
    pub fn with_tool(mut self, name: &str, path: &str) -> Self {
        self.lookups.insert(name.to_string(), PathBuf::from(path));
        self
    }

    /// Make `capture` return `output` for any command whose display line
    /// contains `needle`.
    pub fn with_capture(mut self, needle: &str, output: &str) -> Self {
        self.captures.push((needle.to_string(), output.to_string()));
        self
    }

    /// Fail any command whose display line contains `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    /// Display lines of every command run or captured so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, spec: &CommandSpec) -> Result<(), ExecError> {
        let line = spec.display_line();
        self.calls.lock().expect("calls lock").push(line.clone());
        match &self.fail_on {
            Some(needle) if line.contains(needle) => Err(ExecError::Failed {
                program: spec.program().to_string(),
                code: 1,
            }),
            _ => Ok(()),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), ExecError> {
        self.record(spec)
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String, ExecError> {
        self.record(spec)?;
        let line = spec.display_line();
        Ok(self
            .captures
            .iter()
            .find(|(needle, _)| line.contains(needle))
            .map(|(_, output)| output.clone())
            .unwrap_or_default())
    }

    fn lookup(&self, program: &str) -> Option<PathBuf> {
        self.lookups.get(program).cloned()
    }
}
