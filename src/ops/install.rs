//! Installing and removing packages.
//!
//! Both operations resolve pip fresh, write a starting status line, stream
//! pip's output to the sink, and finish with a succeeded/failed line. After
//! each status line the sink is either brought to the foreground or merely
//! made visible, per the caller's preferences.

use crate::core::error::Result;
use crate::core::{InterpreterConfig, LanguageVersion};
use crate::locator;
use crate::util::process::ProcessBuilder;
use crate::util::sink::OutputSink;

use super::InstallPreferences;

/// Interpreters at or below this version carry a pip lineage without
/// secure-transport support and need an explicit opt-out flag.
const LAST_INSECURE_VERSION: LanguageVersion = LanguageVersion::new(2, 5);

/// Install a package into the environment.
///
/// Returns `Ok(true)` iff pip exited with code 0. A non-zero exit is not
/// an error; it is reported to the sink and surfaced as `Ok(false)`.
pub async fn install(
    config: &InterpreterConfig,
    package: &str,
    elevate: bool,
    prefs: &impl InstallPreferences,
    sink: Option<&dyn OutputSink>,
) -> Result<bool> {
    config.check_runnable()?;

    let mut args = vec!["install".to_string()];
    if config.version() <= LAST_INSECURE_VERSION {
        if let Some(sink) = sink {
            sink.write_line(&format!(
                "pip on Python {} predates secure transport; passing --insecure",
                config.version()
            ));
        }
        args.push("--insecure".to_string());
    }
    args.push(package.to_string());

    let process = locator::resolve_pip(config)
        .to_process()
        .args(&args)
        .cwd(config.prefix_path())
        .hidden(true)
        .elevated(elevate);

    run_reported(
        process,
        prefs,
        sink,
        &format!("Installing '{}'", package),
        &format!("'{}' was installed successfully", package),
        &format!("Failed to install '{}'", package),
    )
    .await
}

/// Uninstall a package from the environment.
///
/// pip's own confirmation prompt is suppressed (`-y`); consent, if any,
/// belongs to the caller's confirmation gate.
pub async fn uninstall(
    config: &InterpreterConfig,
    package: &str,
    elevate: bool,
    prefs: &impl InstallPreferences,
    sink: Option<&dyn OutputSink>,
) -> Result<bool> {
    config.check_runnable()?;

    let process = locator::resolve_pip(config)
        .to_process()
        .args(["uninstall", "-y", package])
        .cwd(config.prefix_path())
        .hidden(true)
        .elevated(elevate);

    run_reported(
        process,
        prefs,
        sink,
        &format!("Uninstalling '{}'", package),
        &format!("'{}' was uninstalled successfully", package),
        &format!("Failed to uninstall '{}'", package),
    )
    .await
}

/// Run a mutating process with start/terminal status reporting.
pub(super) async fn run_reported(
    process: ProcessBuilder,
    prefs: &impl InstallPreferences,
    sink: Option<&dyn OutputSink>,
    start: &str,
    success: &str,
    failure: &str,
) -> Result<bool> {
    if let Some(sink) = sink {
        sink.write_line(start);
        surface(sink, prefs);
    }

    let result = process.run(sink).await?;

    if let Some(sink) = sink {
        if result.success() {
            sink.write_line(success);
        } else {
            sink.write_error_line(&format!("{} (exit code {})", failure, result.exit_code));
        }
        surface(sink, prefs);
    }

    Ok(result.success())
}

/// Apply the foreground-or-visible policy after a status line.
fn surface(sink: &dyn OutputSink, prefs: &impl InstallPreferences) {
    if prefs.show_output_window() {
        sink.show_and_activate();
    } else {
        sink.show();
    }
}
