//! `quay list` command

use anyhow::Result;
use quay::ops;

use crate::cli::ListArgs;
use crate::commands;

pub async fn execute(args: ListArgs) -> Result<bool> {
    let config = commands::interpreter_config(&args.env)?;

    let packages = ops::freeze(&config).await;

    if args.json {
        let entries: Vec<String> = packages.iter().map(ToString::to_string).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for package in &packages {
            println!("{}", package);
        }
    }

    Ok(true)
}
