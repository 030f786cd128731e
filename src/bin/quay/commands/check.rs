//! `quay check` command

use anyhow::Result;
use quay::ops;

use crate::cli::CheckArgs;
use crate::commands;

pub async fn execute(args: CheckArgs) -> Result<bool> {
    let config = commands::interpreter_config(&args.env)?;

    let satisfied = ops::is_installed(&config, &args.requirement).await;

    if satisfied {
        println!("'{}' is satisfied", args.requirement);
    } else {
        println!("'{}' is not satisfied", args.requirement);
    }

    // The answer is the exit code
    Ok(satisfied)
}
