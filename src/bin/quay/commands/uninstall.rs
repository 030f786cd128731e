//! `quay uninstall` command

use anyhow::Result;
use quay::ops;

use crate::cli::UninstallArgs;
use crate::commands;

pub async fn execute(args: UninstallArgs, no_color: bool) -> Result<bool> {
    let config = commands::interpreter_config(&args.env)?;
    let prefs = commands::load_prefs();
    let sink = commands::console_sink(no_color);

    let ok = ops::uninstall(&config, &args.package, args.elevate, &prefs, Some(&sink)).await?;

    Ok(ok)
}
