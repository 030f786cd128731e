//! Quay CLI - a pip front-end for Python environments

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            // A declined confirmation is not a failure; give it its own
            // exit code so scripts can tell the two apart.
            if matches!(e.downcast_ref::<quay::Error>(), Some(quay::Error::Canceled)) {
                eprintln!("canceled");
                std::process::exit(2);
            }
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn run() -> Result<bool> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("quay=debug")
    } else {
        EnvFilter::new("quay=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::List(args) => commands::list::execute(args).await,
        Commands::Install(args) => commands::install::execute(args, cli.no_color).await,
        Commands::Uninstall(args) => commands::uninstall::execute(args, cli.no_color).await,
        Commands::Check(args) => commands::check::execute(args).await,
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, cli.no_color).await,
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
