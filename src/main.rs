use std::io::{self, BufRead, Write};

use splatenv::env::BackendKind;
use splatenv::system::SystemRunner;
use splatenv::{logging, Provisioner, RunConfig};

/// Present the three backends and block on a single choice.
fn prompt_backend() -> anyhow::Result<BackendKind> {
    println!("Select an environment backend:");
    println!("  1) venv + pip (GPU wheels)");
    println!("  2) micromamba (installed if missing)");
    println!("  3) existing conda / mamba");
    print!("Choice [1-3]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    Ok(BackendKind::from_choice(&input)?)
}

fn run() -> anyhow::Result<()> {
    let backend = prompt_backend()?;
    log::info!("Selected backend: {}", backend);

    let working_dir = std::env::current_dir()?;
    let config = RunConfig::new(backend, working_dir);
    let runner = SystemRunner;

    let report = Provisioner::new(config, &runner).run()?;

    println!(
        "Provisioning complete: torch {} (CUDA available: {})",
        report.version, report.cuda_available
    );
    Ok(())
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("provisioning failed: {:#}", e);
        std::process::exit(1);
    }
}
