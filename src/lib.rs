//! Quay - a pip front-end for Python environments
//!
//! This crate locates and drives an environment's pip installer, exposing
//! package enumeration, install/uninstall, pip bootstrapping, and
//! requirement checks as asynchronous, cancellable operations that report
//! through a caller-supplied output sink.

pub mod core;
pub mod locator;
pub mod ops;
pub mod util;

/// Test utilities and fixtures for Quay unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It stamps out fake interpreter environments backed by
/// shell scripts in temporary directories.
#[cfg(test)]
pub mod test_support;

pub use core::error::{Error, Result};
pub use core::interpreter::{InterpreterConfig, LanguageVersion};
pub use core::package::{PackageSet, PackageSpec};

pub use locator::{resolve_pip, ToolInvocation};
pub use ops::{Confirmation, ConfirmationGate, InstallPreferences, PresetGate};
pub use util::process::{ProcessBuilder, ProcessResult};
pub use util::sink::{BufferSink, ConsoleSink, OutputSink};
