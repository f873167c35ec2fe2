//! Backend command-sequence tests against the scripted process boundary.

mod common;

use common::ScriptedRunner;
use splatenv::env::{
    backend_for, install_submodules, BackendKind, EnvironmentHandle, ENV_NAME,
};
use splatenv::error::EnvError;

#[test]
fn venv_backend_creates_activates_and_installs() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let runner = ScriptedRunner::new();

    let handle = backend_for(BackendKind::Venv)
        .materialize(&runner, checkout.path())
        .expect("venv backend should succeed");

    assert_eq!(
        handle,
        EnvironmentHandle::Venv {
            root: checkout.path().join("venv")
        }
    );

    let calls = runner.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], "python3.10 -m venv venv");
    assert!(calls[1].ends_with("venv/bin/pip install --upgrade pip"));
    assert!(calls[2].contains("install torch torchvision torchaudio"));
    assert!(calls[2].contains("--index-url https://download.pytorch.org/whl/cu118"));
    assert!(calls[3].contains("install plyfile tqdm"));
}

#[test]
fn venv_backend_propagates_create_failure() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let runner = ScriptedRunner::new().failing_on("-m venv");

    let result = backend_for(BackendKind::Venv).materialize(&runner, checkout.path());
    assert!(matches!(result, Err(EnvError::Exec(_))));
    // Nothing ran past the failing create
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn conda_backend_fails_fast_without_conda_or_mamba() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let runner = ScriptedRunner::new();

    let result = backend_for(BackendKind::Conda).materialize(&runner, checkout.path());
    assert!(matches!(result, Err(EnvError::NoCondaTool)));
    // No environment creation was attempted
    assert!(runner.calls().is_empty());
}

#[test]
fn conda_backend_prefers_conda_and_falls_back_to_pip_for_plyfile() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let runner = ScriptedRunner::new()
        .with_tool("conda", "/opt/conda/bin/conda")
        .with_tool("mamba", "/usr/bin/mamba");

    let handle = backend_for(BackendKind::Conda)
        .materialize(&runner, checkout.path())
        .expect("conda backend should succeed");

    assert_eq!(
        handle,
        EnvironmentHandle::Named {
            tool: "conda".to_string(),
            name: ENV_NAME.to_string(),
        }
    );

    let calls = runner.calls();
    assert_eq!(calls[0], "conda create -y -n gaussian_splatting python=3.10");
    assert!(calls[1].starts_with("conda install -y -n gaussian_splatting -c pytorch -c nvidia"));
    assert!(calls[1].contains("pytorch-cuda=11.8"));
    assert_eq!(calls[2], "conda run -n gaussian_splatting pip install plyfile");
}

#[test]
fn conda_backend_uses_mamba_when_conda_absent() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let runner = ScriptedRunner::new().with_tool("mamba", "/usr/bin/mamba");

    let handle = backend_for(BackendKind::Conda)
        .materialize(&runner, checkout.path())
        .expect("mamba fallback should succeed");

    match handle {
        EnvironmentHandle::Named { tool, .. } => assert_eq!(tool, "mamba"),
        other => panic!("unexpected handle: {other:?}"),
    }
}

#[test]
fn micromamba_backend_writes_manifest_then_creates() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let runner = ScriptedRunner::new().with_tool("micromamba", "/usr/local/bin/micromamba");

    let handle = backend_for(BackendKind::Micromamba)
        .materialize(&runner, checkout.path())
        .expect("micromamba backend should succeed");

    // Manifest synthesized before the create ran
    assert!(checkout.path().join("environment.yml").is_file());

    assert_eq!(
        handle,
        EnvironmentHandle::Named {
            tool: "/usr/local/bin/micromamba".to_string(),
            name: ENV_NAME.to_string(),
        }
    );

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        "/usr/local/bin/micromamba create -y -f environment.yml"
    );
}

#[test]
fn micromamba_backend_runs_installer_when_missing() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let runner = ScriptedRunner::new();

    let result = backend_for(BackendKind::Micromamba).materialize(&runner, checkout.path());

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("micro.mamba.pm/install.sh"));
    // The scripted runner cannot actually install the binary, so the backend
    // must report it as still unavailable rather than pressing on.
    assert!(matches!(result, Err(EnvError::MicromambaUnavailable)));
}

#[test]
fn submodules_install_through_environment_pip() {
    let checkout = tempfile::tempdir().expect("tempdir");
    let runner = ScriptedRunner::new();
    let handle = EnvironmentHandle::Venv {
        root: checkout.path().join("venv"),
    };

    install_submodules(&runner, &handle, checkout.path()).expect("submodule install");

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("pip install"));
    assert!(calls[0].contains("submodules/diff-gaussian-rasterization"));
    assert!(calls[1].contains("submodules/simple-knn"));
}
