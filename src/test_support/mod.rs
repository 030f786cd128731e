//! Test utilities and fixtures for Quay unit tests.
//!
//! The interesting fixture is [`FakeEnv`]: a temporary directory shaped
//! like a Python environment, with the interpreter and pip entry points
//! played by small shell scripts. Tests configure the scripts' behavior
//! and assert on what the operations did.

use crate::ops::InstallPreferences;

/// Install preferences with directly settable fields.
#[derive(Debug, Clone)]
pub struct TestPrefs {
    pub show_output_window: bool,
    pub elevate_pip_install: bool,
}

impl Default for TestPrefs {
    fn default() -> Self {
        TestPrefs {
            show_output_window: false,
            elevate_pip_install: false,
        }
    }
}

impl InstallPreferences for TestPrefs {
    fn show_output_window(&self) -> bool {
        self.show_output_window
    }

    fn elevate_pip_install(&self) -> bool {
        self.elevate_pip_install
    }
}

#[cfg(unix)]
pub use fake_env::FakeEnv;

#[cfg(unix)]
mod fake_env {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::core::{InterpreterConfig, LanguageVersion};

    /// A fake Python environment in a temporary directory.
    ///
    /// Freshly created it has the right directory shape but no interpreter
    /// on disk, so it is not runnable. Builder methods add shell scripts
    /// standing in for the interpreter and pip.
    pub struct FakeEnv {
        dir: TempDir,
        version: LanguageVersion,
        /// Exit code the interpreter answers `-c` checks with
        check_exit: i32,
        /// A custom interpreter body was installed; stop rewriting it
        custom_interpreter: bool,
    }

    impl FakeEnv {
        /// A Python 3.11 shaped environment with no interpreter on disk.
        pub fn new() -> Self {
            Self::with_version(3, 11)
        }

        /// An environment claiming a specific interpreter version.
        pub fn with_version(major: u32, minor: u32) -> Self {
            let dir = TempDir::new().expect("create temp env");
            for sub in ["bin", "lib", "Scripts"] {
                fs::create_dir_all(dir.path().join(sub)).expect("create env dirs");
            }
            FakeEnv {
                dir,
                version: LanguageVersion::new(major, minor),
                check_exit: 1,
                custom_interpreter: false,
            }
        }

        /// Install a pip entry-point script with the given `sh` body.
        ///
        /// Also installs a dispatching interpreter (unless a custom one is
        /// already in place) so script invocations run through it the way
        /// real ones do.
        pub fn with_pip_script(self, body: &str) -> Self {
            write_executable(&self.pip_script_path(), body);
            if !self.custom_interpreter {
                write_executable(&self.interpreter_path(), &self.dispatcher_body());
            }
            self
        }

        /// Install an interpreter with the given `sh` body verbatim.
        pub fn with_interpreter(mut self, body: &str) -> Self {
            write_executable(&self.interpreter_path(), body);
            self.custom_interpreter = true;
            self
        }

        /// Install a dispatching interpreter whose `-c` checks fail, i.e.
        /// "nothing is installed".
        pub fn with_interpreter_checks_failing(mut self) -> Self {
            self.check_exit = 1;
            if !self.custom_interpreter {
                write_executable(&self.interpreter_path(), &self.dispatcher_body());
            }
            self
        }

        /// Create directories under `lib/site-packages`.
        pub fn with_site_packages(self, names: &[&str]) -> Self {
            let site = self.prefix().join("lib").join("site-packages");
            for name in names {
                fs::create_dir_all(site.join(name)).expect("create site-packages entry");
            }
            self
        }

        /// The environment description for this fake.
        pub fn config(&self) -> InterpreterConfig {
            InterpreterConfig::new(
                self.prefix(),
                self.prefix().join("lib"),
                self.interpreter_path(),
                self.version,
            )
        }

        /// Arguments a recording stub wrote to `args.txt`, if any.
        pub fn recorded_args(&self) -> Option<String> {
            fs::read_to_string(self.prefix().join("args.txt"))
                .ok()
                .map(|s| s.trim().to_string())
        }

        fn prefix(&self) -> &Path {
            self.dir.path()
        }

        fn interpreter_path(&self) -> PathBuf {
            self.prefix().join("bin").join("python3")
        }

        fn pip_script_path(&self) -> PathBuf {
            self.prefix().join("Scripts").join("pip-script.py")
        }

        /// Interpreter body that mimics the real dispatch surface: `-c`
        /// inline checks, `-m pip` module invocation, or a script path.
        fn dispatcher_body(&self) -> String {
            format!(
                r#"if [ "$1" = "-c" ]; then
  exit {check}
fi
if [ "$1" = "-m" ]; then
  shift 2
  if [ -f "{pip}" ]; then
    exec sh "{pip}" "$@"
  fi
  exit 9
fi
script="$1"
shift
exec sh "$script" "$@""#,
                check = self.check_exit,
                pip = self.pip_script_path().display()
            )
        }
    }

    /// Write an executable `#!/bin/sh` script.
    fn write_executable(path: &Path, body: &str) {
        fs::write(path, format!("#!/bin/sh\n{}\n", body)).expect("write script");
        let mut perms = fs::metadata(path).expect("script metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).expect("make script executable");
    }
}
