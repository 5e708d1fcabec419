// fluxcheck/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug fluxcheck run ... pour voir les détails
    // Logs go to stderr, stdout is kept for the command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { project_dir } => commands::run::execute(project_dir),
        Commands::Audit { project_dir } => commands::audit::execute(project_dir),
        Commands::Classify {
            project_dir,
            filenames,
        } => commands::classify::execute(project_dir, filenames),
        Commands::Rules { project_dir, flux } => commands::rules::execute(project_dir, flux),
    }
}
