//! Subprocess execution utilities.
//!
//! [`ProcessBuilder`] spawns external tools asynchronously, forwarding
//! output line-by-line to an [`OutputSink`] while accumulating stdout for
//! later inspection. Cancellation is drop-based: the child is configured
//! `kill_on_drop`, so abandoning the future reaps the process and releases
//! its handles.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::core::error::{Error, Result};
use crate::util::sink::OutputSink;

/// Result of a completed subprocess run.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Exit code; -1 when the process was terminated by a signal.
    pub exit_code: i32,

    /// Stdout, split into lines, in arrival order.
    pub stdout_lines: Vec<String>,
}

impl ProcessResult {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for async subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    env_remove: Vec<String>,
    cwd: Option<PathBuf>,
    elevated: bool,
    /// Only consulted on Windows, the one platform with console windows
    /// to suppress
    #[cfg_attr(not(windows), allow(dead_code))]
    hidden: bool,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
            env_remove: Vec::new(),
            cwd: None,
            elevated: false,
            hidden: false,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Remove an environment variable.
    pub fn env_remove(mut self, key: impl AsRef<str>) -> Self {
        self.env_remove.push(key.as_ref().to_string());
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Request privilege escalation for this run.
    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Run without a console window of its own (Windows); elsewhere this
    /// is a no-op since nothing is created to hide.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Whether the program can be spawned at all: either an existing path
    /// or a bare name resolvable on `PATH`.
    fn is_runnable(&self) -> bool {
        self.program.exists() || which::which(&self.program).is_ok()
    }

    /// Build the Command, wrapping it in an escalation tool if requested.
    fn build_command(&self) -> Command {
        let mut cmd = if self.elevated {
            match find_executable("sudo") {
                Some(sudo) => {
                    let mut cmd = Command::new(sudo);
                    cmd.arg(&self.program);
                    cmd
                }
                None => {
                    tracing::warn!(
                        program = %self.program.display(),
                        "elevation requested but no escalation tool found, running unelevated"
                    );
                    Command::new(&self.program)
                }
            }
        } else {
            Command::new(&self.program)
        };

        cmd.args(&self.args);

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        for key in &self.env_remove {
            cmd.env_remove(key);
        }

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        #[cfg(windows)]
        if self.hidden {
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        cmd
    }

    /// Spawn the process and wait for it to exit.
    ///
    /// Stdout lines are forwarded to `sink.write_line` and accumulated in
    /// the result; stderr lines go to `sink.write_error_line`. Fails fast
    /// with [`Error::NotRunnable`] when the program does not exist, before
    /// anything is spawned.
    pub async fn run(&self, sink: Option<&dyn OutputSink>) -> Result<ProcessResult> {
        if !self.is_runnable() {
            return Err(Error::NotRunnable(self.program.clone()));
        }

        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!(command = %self.display_command(), "spawning");

        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            command: self.display_command(),
            source,
        })?;

        let stdout = child.stdout.take().context("child stdout was not piped")?;
        let stderr = child.stderr.take().context("child stderr was not piped")?;
        let mut out_lines = BufReader::new(stdout).lines();
        let mut err_lines = BufReader::new(stderr).lines();

        let mut captured = Vec::new();
        let mut out_done = false;
        let mut err_done = false;

        while !(out_done && err_done) {
            tokio::select! {
                line = out_lines.next_line(), if !out_done => match line {
                    Ok(Some(line)) => {
                        if let Some(sink) = sink {
                            sink.write_line(&line);
                        }
                        captured.push(line);
                    }
                    Ok(None) => out_done = true,
                    Err(err) => {
                        tracing::debug!(error = %err, "stdout read failed");
                        out_done = true;
                    }
                },
                line = err_lines.next_line(), if !err_done => match line {
                    Ok(Some(line)) => {
                        if let Some(sink) = sink {
                            sink.write_error_line(&line);
                        }
                    }
                    Ok(None) => err_done = true,
                    Err(err) => {
                        tracing::debug!(error = %err, "stderr read failed");
                        err_done = true;
                    }
                },
            }
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("failed to wait for `{}`", self.program.display()))?;

        Ok(ProcessResult {
            exit_code: status.code().unwrap_or(-1),
            stdout_lines: captured,
        })
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
