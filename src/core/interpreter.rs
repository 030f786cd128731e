//! Interpreter environment descriptions.
//!
//! An [`InterpreterConfig`] describes one Python installation: where it
//! lives, where its library directory is, which executable to run, and
//! which language version it implements. Quay only ever reads these
//! descriptions; discovering them is the caller's job.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::error::Error;

/// A `major.minor` interpreter version.
///
/// Ordering is derived, so version thresholds read as plain comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageVersion {
    pub major: u32,
    pub minor: u32,
}

impl LanguageVersion {
    /// Create a version from its parts.
    pub const fn new(major: u32, minor: u32) -> Self {
        LanguageVersion { major, minor }
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for LanguageVersion {
    type Err = String;

    /// Parse `"X.Y"`; a trailing micro component (`"X.Y.Z"`) is accepted
    /// and ignored.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| format!("invalid interpreter version '{}'", s))?;
        let minor = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| format!("invalid interpreter version '{}'", s))?;
        Ok(LanguageVersion { major, minor })
    }
}

/// Immutable description of a Python environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Installation prefix (the directory pip's entry points live under)
    prefix_path: PathBuf,

    /// Standard library directory (`site-packages` lives under it)
    library_path: PathBuf,

    /// The interpreter executable
    interpreter_path: PathBuf,

    /// Language version the interpreter implements
    version: LanguageVersion,
}

impl InterpreterConfig {
    /// Create a new environment description.
    pub fn new(
        prefix_path: impl Into<PathBuf>,
        library_path: impl Into<PathBuf>,
        interpreter_path: impl Into<PathBuf>,
        version: LanguageVersion,
    ) -> Self {
        InterpreterConfig {
            prefix_path: prefix_path.into(),
            library_path: library_path.into(),
            interpreter_path: interpreter_path.into(),
            version,
        }
    }

    /// Installation prefix directory.
    pub fn prefix_path(&self) -> &Path {
        &self.prefix_path
    }

    /// Standard library directory.
    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    /// The interpreter executable.
    pub fn interpreter_path(&self) -> &Path {
        &self.interpreter_path
    }

    /// Language version.
    pub fn version(&self) -> LanguageVersion {
        self.version
    }

    /// The `site-packages` directory under the library path.
    pub fn site_packages(&self) -> PathBuf {
        self.library_path.join("site-packages")
    }

    /// Whether this environment can launch processes at all.
    pub fn is_runnable(&self) -> bool {
        self.interpreter_path.is_file()
    }

    /// Fail with [`Error::NotRunnable`] if the interpreter is missing.
    pub fn check_runnable(&self) -> std::result::Result<(), Error> {
        if self.is_runnable() {
            Ok(())
        } else {
            Err(Error::NotRunnable(self.interpreter_path.clone()))
        }
    }
}
