//! `quay install` command

use anyhow::Result;
use quay::ops::{self, QueryInstallOptions};

use crate::cli::InstallArgs;
use crate::commands;

pub async fn execute(args: InstallArgs, no_color: bool) -> Result<bool> {
    let config = commands::interpreter_config(&args.env)?;
    let prefs = commands::load_prefs();
    let sink = commands::console_sink(no_color);

    let ok = if args.yes {
        ops::install(&config, &args.package, args.elevate, &prefs, Some(&sink)).await?
    } else {
        let opts = QueryInstallOptions {
            elevate: args.elevate,
            ..QueryInstallOptions::new(args.package.clone())
        };
        ops::query_install(&config, &opts, &commands::TerminalGate, &prefs, Some(&sink)).await?
    };

    Ok(ok)
}
