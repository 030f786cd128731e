//! Requirement checks and confirm-then-install workflows.

use crate::core::error::{Error, Result};
use crate::core::InterpreterConfig;
use crate::util::process::ProcessBuilder;
use crate::util::sink::OutputSink;

use super::{Confirmation, ConfirmationGate, InstallPreferences};

/// Whether a requirement (`name` or `name==version` style constraint) is
/// satisfied in the environment.
///
/// Runs an inline check through the interpreter; pkg_resources must be
/// available in the target environment for the check to pass. Every
/// failure mode - unrunnable environment, missing metadata library,
/// unsatisfied constraint - answers `false`.
pub async fn is_installed(config: &InterpreterConfig, requirement: &str) -> bool {
    if !config.is_runnable() {
        return false;
    }

    let check = format!(
        "import pkg_resources; pkg_resources.require({})",
        py_string_literal(requirement)
    );

    match ProcessBuilder::new(config.interpreter_path())
        .arg("-c")
        .arg(&check)
        .cwd(config.prefix_path())
        .hidden(true)
        .run(None)
        .await
    {
        Ok(result) => result.success(),
        Err(err) => {
            tracing::debug!(requirement, error = %err, "requirement check did not run");
            false
        }
    }
}

/// Options for a confirmed install.
#[derive(Debug, Clone)]
pub struct QueryInstallOptions {
    /// Package to install
    pub package: String,

    /// Question put to the confirmation gate
    pub prompt: String,

    /// Run the installer elevated
    pub elevate: bool,

    /// Skip the already-installed check and always ask
    pub skip_check: bool,
}

impl QueryInstallOptions {
    /// Options with a default prompt for the package.
    pub fn new(package: impl Into<String>) -> Self {
        let package = package.into();
        let prompt = format!("'{}' is not installed. Install it now?", package);
        QueryInstallOptions {
            package,
            prompt,
            elevate: false,
            skip_check: false,
        }
    }
}

/// Install a package after asking the user.
///
/// Already-satisfied requirements short-circuit to `Ok(true)` without
/// prompting. A `Cancel` answer aborts with [`Error::Canceled`] before any
/// process is spawned; callers should treat that as "did not install",
/// not as a failure.
pub async fn query_install(
    config: &InterpreterConfig,
    opts: &QueryInstallOptions,
    gate: &impl ConfirmationGate,
    prefs: &impl InstallPreferences,
    sink: Option<&dyn OutputSink>,
) -> Result<bool> {
    if !opts.skip_check && is_installed(config, &opts.package).await {
        return Ok(true);
    }

    match gate.confirm(&opts.prompt).await {
        Confirmation::Proceed => {
            super::install(config, &opts.package, opts.elevate, prefs, sink).await
        }
        Confirmation::Cancel => Err(Error::Canceled),
    }
}

/// Bootstrap pip after asking the user.
///
/// No-op when pip is already importable. `Cancel` aborts with
/// [`Error::Canceled`].
pub async fn query_install_pip(
    config: &InterpreterConfig,
    gate: &impl ConfirmationGate,
    prefs: &impl InstallPreferences,
    sink: Option<&dyn OutputSink>,
) -> Result<()> {
    if super::is_pip_installed(config).await {
        return Ok(());
    }

    match gate
        .confirm("pip is not installed in this environment. Install it now?")
        .await
    {
        Confirmation::Proceed => super::install_pip(config, prefs, sink).await,
        Confirmation::Cancel => Err(Error::Canceled),
    }
}

/// Quote a string as a Python single-quoted literal.
fn py_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_py_string_literal() {
        assert_eq!(py_string_literal("requests"), "'requests'");
        assert_eq!(py_string_literal("it's"), r"'it\'s'");
        assert_eq!(py_string_literal(r"a\b"), r"'a\\b'");
    }

    #[cfg(unix)]
    mod with_fake_env {
        use std::sync::atomic::{AtomicU32, Ordering};

        use crate::core::Error;
        use crate::ops::{
            is_installed, query_install, query_install_pip, Confirmation, ConfirmationGate,
            PresetGate, QueryInstallOptions,
        };
        use crate::test_support::{FakeEnv, TestPrefs};

        /// Gate that counts how often it is consulted.
        struct CountingGate {
            answer: Confirmation,
            asked: AtomicU32,
        }

        impl CountingGate {
            fn new(answer: Confirmation) -> Self {
                CountingGate {
                    answer,
                    asked: AtomicU32::new(0),
                }
            }

            fn asked(&self) -> u32 {
                self.asked.load(Ordering::SeqCst)
            }
        }

        impl ConfirmationGate for CountingGate {
            async fn confirm(&self, _message: &str) -> Confirmation {
                self.asked.fetch_add(1, Ordering::SeqCst);
                self.answer
            }
        }

        #[tokio::test]
        async fn test_is_installed_maps_exit_codes() {
            let satisfied = FakeEnv::new().with_interpreter("exit 0");
            assert!(is_installed(&satisfied.config(), "requests").await);

            let unsatisfied = FakeEnv::new().with_interpreter("exit 1");
            assert!(!is_installed(&unsatisfied.config(), "requests").await);
        }

        #[tokio::test]
        async fn test_is_installed_unrunnable_is_false() {
            let env = FakeEnv::new();
            assert!(!is_installed(&env.config(), "requests").await);
        }

        #[tokio::test]
        async fn test_cancel_aborts_before_spawning() {
            // Interpreter says "not installed"; pip would record a file if run
            let env = FakeEnv::new()
                .with_interpreter_checks_failing()
                .with_pip_script(r#"echo "$@" > "args.txt"; exit 0"#);
            let gate = CountingGate::new(Confirmation::Cancel);

            let err = query_install(
                &env.config(),
                &QueryInstallOptions::new("requests"),
                &gate,
                &TestPrefs::default(),
                None,
            )
            .await
            .unwrap_err();

            assert!(matches!(err, Error::Canceled));
            assert_eq!(gate.asked(), 1);
            assert_eq!(env.recorded_args(), None);
        }

        #[tokio::test]
        async fn test_proceed_spawns_exactly_one_install() {
            let env = FakeEnv::new()
                .with_interpreter_checks_failing()
                .with_pip_script(r#"echo "$@" >> "args.txt"; exit 0"#);
            let gate = CountingGate::new(Confirmation::Proceed);

            let ok = query_install(
                &env.config(),
                &QueryInstallOptions::new("requests"),
                &gate,
                &TestPrefs::default(),
                None,
            )
            .await
            .unwrap();

            assert!(ok);
            assert_eq!(gate.asked(), 1);
            assert_eq!(env.recorded_args(), Some("install requests".to_string()));
        }

        #[tokio::test]
        async fn test_already_installed_skips_the_prompt() {
            let env = FakeEnv::new().with_interpreter("exit 0");
            let gate = CountingGate::new(Confirmation::Cancel);

            let ok = query_install(
                &env.config(),
                &QueryInstallOptions::new("requests"),
                &gate,
                &TestPrefs::default(),
                None,
            )
            .await
            .unwrap();

            assert!(ok);
            assert_eq!(gate.asked(), 0);
        }

        #[tokio::test]
        async fn test_query_install_pip_noop_when_present() {
            let env = FakeEnv::new().with_interpreter("exit 0");

            query_install_pip(
                &env.config(),
                &PresetGate(Confirmation::Cancel),
                &TestPrefs::default(),
                None,
            )
            .await
            .unwrap();
        }

        #[tokio::test]
        async fn test_query_install_pip_cancel() {
            let env = FakeEnv::new().with_interpreter_checks_failing();

            let err = query_install_pip(
                &env.config(),
                &PresetGate(Confirmation::Cancel),
                &TestPrefs::default(),
                None,
            )
            .await
            .unwrap_err();

            assert!(matches!(err, Error::Canceled));
        }
    }
}
