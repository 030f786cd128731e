//! Enumerating installed packages.
//!
//! pip may be entirely absent or broken, so enumeration is an ordered
//! fallback chain: ask pip for its own version, ask pip for the full
//! freeze listing, and as a last resort scan `site-packages` directory
//! names. The last strategy never fails hard; at worst the result is
//! empty.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::{InterpreterConfig, PackageSet, PackageSpec};
use crate::locator;

/// Version token in `pip --version` output: `pip 21.3.1 from ...`.
static PIP_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^pip (\d+(?:\.\d+)*)").expect("valid regex"));

/// Enumerate the packages installed in an environment.
///
/// Never fails: every degraded combination (pip missing, pip broken,
/// library directory absent) yields a set, possibly empty. The result is
/// rebuilt from scratch on every call; installed packages may have changed
/// since the last one.
pub async fn freeze(config: &InterpreterConfig) -> PackageSet {
    let pip = locator::resolve_pip(config);
    let mut packages = PackageSet::new();

    // pip's own version never shows up in `freeze` output, so probe it
    // separately and seed a synthetic entry. Failure here is non-fatal.
    match pip.to_process().arg("--version").hidden(true).run(None).await {
        Ok(result) if result.success() => {
            if let Some(spec) = parse_pip_version(&result.stdout_lines) {
                packages.insert(spec);
            }
        }
        Ok(result) => {
            tracing::debug!(code = result.exit_code, "pip --version failed");
        }
        Err(err) => {
            tracing::debug!(error = %err, "pip --version did not run");
        }
    }

    match pip.to_process().arg("freeze").hidden(true).run(None).await {
        Ok(result) if result.success() => {
            packages.extend(
                result
                    .stdout_lines
                    .iter()
                    .filter_map(|line| line.parse::<PackageSpec>().ok()),
            );
            return packages;
        }
        Ok(result) => {
            tracing::debug!(code = result.exit_code, "pip freeze failed, scanning site-packages");
        }
        Err(err) => {
            tracing::debug!(error = %err, "pip freeze did not run, scanning site-packages");
        }
    }

    // Degraded path: directory names are an approximate inventory with no
    // version information. Partial results from the probes above are
    // discarded rather than mixed in.
    scan_site_packages(&config.site_packages())
}

/// Parse the seeded `pip==<version>` entry out of `pip --version` stdout.
fn parse_pip_version(lines: &[String]) -> Option<PackageSpec> {
    lines.iter().find_map(|line| {
        PIP_VERSION_RE
            .captures(line.trim())
            .map(|caps| PackageSpec::versioned("pip", &caps[1]))
    })
}

/// Best-effort inventory from `site-packages` directory names.
///
/// Enumeration errors (missing directory, permissions) yield an empty set.
fn scan_site_packages(dir: &Path) -> PackageSet {
    let mut packages = PackageSet::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), error = %err, "site-packages scan failed");
            return packages;
        }
    };

    for entry in entries.flatten() {
        if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(package) = crate::core::package::package_name_from_dir(name) {
            packages.insert(PackageSpec::bare(package));
        }
    }

    packages
}
