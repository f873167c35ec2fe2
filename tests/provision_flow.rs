//! Full-pipeline test: every step in order against a scripted process
//! boundary and a local origin repository.

mod common;

use std::fs;
use std::path::Path;

use common::ScriptedRunner;
use splatenv::env::BackendKind;
use splatenv::{Provisioner, RunConfig};
use tempfile::tempdir;

fn make_origin(path: &Path) {
    let repo = git2::Repository::init(path).expect("init origin");
    fs::write(path.join("train.py"), "print('train')").expect("write file");

    let mut index = repo.index().expect("index");
    index.add_path(Path::new("train.py")).expect("add");
    index.write().expect("write index");
    let tree_id = index.write_tree().expect("tree");
    let tree = repo.find_tree(tree_id).expect("find tree");
    let sig = git2::Signature::now("Test User", "test@example.com").expect("sig");
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .expect("commit");
}

#[test]
fn venv_run_completes_and_reports_framework() {
    let temp_dir = tempdir().expect("temp dir");
    let origin_path = temp_dir.path().join("origin");
    let working_dir = temp_dir.path().join("work");
    fs::create_dir_all(&working_dir).expect("working dir");
    make_origin(&origin_path);

    let config = RunConfig {
        working_dir: working_dir.clone(),
        backend: BackendKind::Venv,
        repo_url: origin_path.to_string_lossy().to_string(),
        repo_dir: "gaussian-splatting".to_string(),
        manifest_file: "environment.yml".to_string(),
    };

    let runner = ScriptedRunner::new().with_capture("import torch", "2.0.1+cu118\nTrue\n");

    let report = Provisioner::new(config, &runner)
        .run()
        .expect("full run should succeed");

    assert_eq!(report.version, "2.0.1+cu118");
    assert!(report.cuda_available);

    // Checkout and manifest were materialized on disk
    let checkout = working_dir.join("gaussian-splatting");
    assert!(checkout.join("train.py").is_file());
    assert!(checkout.join("environment.yml").is_file());

    let calls = runner.calls();
    // Package installation ran before anything touched the environment
    assert!(calls[0].contains("apt-get update"));
    assert!(calls[1].contains("apt-get install -y git build-essential"));
    // Backend steps ran against the venv inside the checkout
    assert!(calls.iter().any(|c| c == "python3.10 -m venv venv"));
    assert!(calls
        .iter()
        .any(|c| c.contains("submodules/simple-knn")));
    // Verification was the final command
    assert!(calls.last().unwrap().contains("import torch"));
}

#[test]
fn run_halts_at_failed_package_install() {
    let temp_dir = tempdir().expect("temp dir");
    let origin_path = temp_dir.path().join("origin");
    let working_dir = temp_dir.path().join("work");
    fs::create_dir_all(&working_dir).expect("working dir");
    make_origin(&origin_path);

    let config = RunConfig {
        working_dir: working_dir.clone(),
        backend: BackendKind::Venv,
        repo_url: origin_path.to_string_lossy().to_string(),
        repo_dir: "gaussian-splatting".to_string(),
        manifest_file: "environment.yml".to_string(),
    };

    let runner = ScriptedRunner::new().failing_on("apt-get install");

    let err = Provisioner::new(config, &runner)
        .run()
        .expect_err("run must halt on package failure");
    assert!(err.to_string().contains("OS package installation failed"));

    // The run stopped before cloning anything
    assert!(!working_dir.join("gaussian-splatting").exists());
}
