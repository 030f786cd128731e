//! Command implementations

pub mod bootstrap;
pub mod check;
pub mod completions;
pub mod install;
pub mod list;
pub mod uninstall;

use anyhow::{bail, Result};
use quay::util::config::{default_interpreter_path, default_library_path, Config, EnvFile};
use quay::{Confirmation, ConfirmationGate, ConsoleSink, InterpreterConfig, LanguageVersion};

use crate::cli::EnvArgs;

/// Resolve the target environment from CLI flags or an environment file.
pub fn interpreter_config(args: &EnvArgs) -> Result<InterpreterConfig> {
    if let Some(ref path) = args.env_file {
        return EnvFile::load(path)?.into_config();
    }

    let Some(ref prefix) = args.prefix else {
        bail!("either --prefix or --env-file is required");
    };

    let version: LanguageVersion = match args.python_version.parse() {
        Ok(version) => version,
        Err(e) => bail!("{}", e),
    };

    let interpreter = match args.interpreter.clone() {
        // A bare name like `python3` is resolved on PATH
        Some(path) if path.components().count() == 1 && !path.is_file() => {
            which::which(&path).unwrap_or(path)
        }
        Some(path) => path,
        None => default_interpreter_path(prefix),
    };

    let library = args
        .library
        .clone()
        .unwrap_or_else(|| default_library_path(prefix, version));

    Ok(InterpreterConfig::new(prefix, library, interpreter, version))
}

/// Load the user's install preferences, fresh for this operation.
pub fn load_prefs() -> Config {
    Config::load_user()
}

/// Console sink honoring `--no-color`.
pub fn console_sink(no_color: bool) -> ConsoleSink {
    if no_color {
        ConsoleSink::with_color(false)
    } else {
        ConsoleSink::new()
    }
}

/// Confirmation gate that prompts on the terminal.
///
/// In a non-interactive session the prompt cannot be answered, which
/// counts as declining.
pub struct TerminalGate;

impl ConfirmationGate for TerminalGate {
    async fn confirm(&self, message: &str) -> Confirmation {
        let message = message.to_string();
        let confirmed = tokio::task::spawn_blocking(move || {
            dialoguer::Confirm::new()
                .with_prompt(message)
                .default(true)
                .interact()
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false);

        if confirmed {
            Confirmation::Proceed
        } else {
            Confirmation::Cancel
        }
    }
}
