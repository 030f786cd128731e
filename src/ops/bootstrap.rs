//! Bootstrapping pip into an environment.
//!
//! pip cannot install itself when it is absent, so the bundled bootstrap
//! script runs through the interpreter directly - the locator is bypassed
//! on purpose. Once it succeeds, the next resolution picks up the newly
//! installed entry points.

use std::io::Write;

use anyhow::Context;
use tempfile::NamedTempFile;

use crate::core::error::Result;
use crate::core::InterpreterConfig;
use crate::util::process::ProcessBuilder;
use crate::util::sink::OutputSink;

use super::install::run_reported;
use super::InstallPreferences;

/// Bundled bootstrap script, written to a temporary file per run.
const PIP_BOOTSTRAP: &str = include_str!("../../scripts/pip_bootstrap.py");

/// Whether pip itself is importable in the environment.
pub async fn is_pip_installed(config: &InterpreterConfig) -> bool {
    super::query::is_installed(config, "pip").await
}

/// Install pip itself into the environment.
///
/// Elevation follows the caller's preference for pip installs. A bootstrap
/// process failure is reported through the sink; only an unrunnable
/// environment or a spawn failure is an error.
pub async fn install_pip(
    config: &InterpreterConfig,
    prefs: &impl InstallPreferences,
    sink: Option<&dyn OutputSink>,
) -> Result<()> {
    config.check_runnable()?;

    let mut script = NamedTempFile::new().context("failed to create bootstrap script file")?;
    script
        .write_all(PIP_BOOTSTRAP.as_bytes())
        .context("failed to write bootstrap script")?;
    script
        .flush()
        .context("failed to flush bootstrap script")?;

    let process = ProcessBuilder::new(config.interpreter_path())
        .arg(script.path())
        .cwd(config.prefix_path())
        .hidden(true)
        .elevated(prefs.elevate_pip_install());

    run_reported(
        process,
        prefs,
        sink,
        "Installing pip",
        "pip was installed successfully",
        "Failed to install pip",
    )
    .await?;

    // The temp file must outlive the child; dropping it here deletes it.
    drop(script);
    Ok(())
}
