//! Error taxonomy for package operations.
//!
//! Only conditions a caller must distinguish get their own variant. A
//! process finishing with a non-zero exit code is *not* an error here:
//! operations surface it as a boolean result and a reported output line.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias using the crate error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by package operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The environment cannot launch any process (missing or corrupt
    /// interpreter). Signaled before anything is spawned.
    #[error("interpreter `{}` is not runnable", .0.display())]
    NotRunnable(PathBuf),

    /// The user declined a confirmation prompt. Distinct from a failed
    /// install: nothing was attempted.
    #[error("operation canceled")]
    Canceled,

    /// A process could not be spawned at all.
    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Whether this error is a canceled confirmation rather than a failure.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Error::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canceled_is_distinct() {
        assert!(Error::Canceled.is_canceled());
        assert!(!Error::NotRunnable(PathBuf::from("/missing/python")).is_canceled());
    }

    #[test]
    fn test_not_runnable_names_the_interpreter() {
        let err = Error::NotRunnable(PathBuf::from("/env/bin/python3"));
        assert!(err.to_string().contains("/env/bin/python3"));
    }
}
