//! Locating the pip entry point for an environment.
//!
//! pip is not guaranteed to exist at a fixed location. It may be installed
//! as a wrapper script that must run through the interpreter, as a native
//! executable, or not at all - in which case it may still be importable as
//! a module. Resolution probes a fixed candidate list under the
//! environment prefix and falls back to `interpreter -m pip`.
//!
//! Resolution is recomputed on every call: the filesystem can change
//! between invocations (bootstrapping pip is one of our own operations).

use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use crate::core::InterpreterConfig;
use crate::util::process::ProcessBuilder;

/// How to invoke pip for one particular environment.
///
/// Only valid for the configuration it was resolved from; resolve a fresh
/// invocation rather than sharing one across environments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: PathBuf,
    leading_args: Vec<String>,
}

impl ToolInvocation {
    /// The executable to spawn.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments that must precede the caller's own (a script path, or
    /// `-m pip`).
    pub fn leading_args(&self) -> &[String] {
        &self.leading_args
    }

    /// A process builder with the leading arguments already applied.
    pub fn to_process(&self) -> ProcessBuilder {
        ProcessBuilder::new(&self.program).args(&self.leading_args)
    }
}

/// Candidate entry points under the prefix, probed in order. Scripts run
/// through the interpreter; native executables run directly.
fn candidates() -> [(PathBuf, bool); 4] {
    [
        (Path::new("Scripts").join("pip-script.py"), true),
        (PathBuf::from("pip-script.py"), true),
        (Path::new("Scripts").join(format!("pip{EXE_SUFFIX}")), false),
        (PathBuf::from(format!("pip{EXE_SUFFIX}")), false),
    ]
}

/// Resolve how to run pip for the given environment.
///
/// Never fails: if no installed entry point exists on disk, the result is
/// the module-invocation form `interpreter -m pip`, which is the correct
/// command line whenever pip is importable at all.
pub fn resolve_pip(config: &InterpreterConfig) -> ToolInvocation {
    for (relative, is_script) in candidates() {
        let path = config.prefix_path().join(&relative);
        if !path.exists() {
            continue;
        }
        tracing::debug!(path = %path.display(), script = is_script, "resolved pip entry point");
        if is_script {
            return ToolInvocation {
                program: config.interpreter_path().to_path_buf(),
                leading_args: vec![path.display().to_string()],
            };
        }
        return ToolInvocation {
            program: path,
            leading_args: Vec::new(),
        };
    }

    tracing::debug!("no pip entry point on disk, falling back to `-m pip`");
    ToolInvocation {
        program: config.interpreter_path().to_path_buf(),
        leading_args: vec!["-m".to_string(), "pip".to_string()],
    }
}
