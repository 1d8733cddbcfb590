use clap::Parser;
use k8s_version_sync::{SyncError, cli::Cli, config, run_command};
use std::env;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> k8s_version_sync::Result<()> {
    let workdir = env::current_dir().map_err(|e| SyncError::io(".", e))?;

    // Load configuration
    let config = config::load_config(cli.config.as_deref(), &workdir)?;
    log::debug!("configuration: {:?}", config);

    run_command(cli.command, &config, &workdir)
}
