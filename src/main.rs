use clap::Parser;
use tracing_subscriber::EnvFilter;

use poise_build::{ensure_build_dir, preflight, run, Cli, ProcessExecutor};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(err) = launch(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn launch(cli: Cli) -> Result<(), poise_build::LaunchError> {
    let request = cli.into_request()?;
    ensure_build_dir(&request.build_dir)?;
    preflight()?;
    run(&request, &mut ProcessExecutor)
}
