//! `quay bootstrap` command

use anyhow::Result;
use quay::ops;

use crate::cli::BootstrapArgs;
use crate::commands;

pub async fn execute(args: BootstrapArgs, no_color: bool) -> Result<bool> {
    let config = commands::interpreter_config(&args.env)?;
    let prefs = commands::load_prefs();
    let sink = commands::console_sink(no_color);

    if args.yes {
        ops::install_pip(&config, &prefs, Some(&sink)).await?;
    } else {
        ops::query_install_pip(&config, &commands::TerminalGate, &prefs, Some(&sink)).await?;
    }

    Ok(true)
}
