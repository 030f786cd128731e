//! Configuration file support for Quay.
//!
//! Two kinds of files are understood:
//! - User config: `~/.config/quay/config.toml` (platform equivalent) -
//!   install preferences
//! - Environment file: a `quay.toml` describing one target environment,
//!   so callers need not spell out every path on the command line
//!
//! Preferences are loaded fresh for each operation rather than held in a
//! process-wide singleton.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::{InterpreterConfig, LanguageVersion};
use crate::ops::InstallPreferences;

/// Quay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Install behavior
    pub install: InstallConfig,
}

/// Install preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Bring the output surface to the foreground when an install finishes
    /// (as opposed to merely making it visible)
    pub show_output_window: bool,

    /// Request elevation when bootstrapping pip itself
    pub elevate_pip_install: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        InstallConfig {
            show_output_window: true,
            elevate_pip_install: false,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't
    /// exist or fails to parse.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Load the user-level configuration, falling back to defaults.
    pub fn load_user() -> Self {
        match user_config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))
    }
}

impl InstallPreferences for Config {
    fn show_output_window(&self) -> bool {
        self.install.show_output_window
    }

    fn elevate_pip_install(&self) -> bool {
        self.install.elevate_pip_install
    }
}

/// Path of the user-level config file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "quay").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// On-disk description of a target environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvFile {
    /// Installation prefix
    pub prefix: PathBuf,

    /// Interpreter executable (defaults to the conventional location
    /// under the prefix)
    #[serde(default)]
    pub interpreter: Option<PathBuf>,

    /// Library directory (defaults to the conventional location under the
    /// prefix)
    #[serde(default)]
    pub library: Option<PathBuf>,

    /// Interpreter version, `major.minor`
    pub version: String,
}

impl EnvFile {
    /// Load an environment file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read environment file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse environment file: {}", path.display()))
    }

    /// Resolve into an [`InterpreterConfig`], filling in conventional
    /// defaults for missing paths.
    pub fn into_config(self) -> Result<InterpreterConfig> {
        let version: LanguageVersion = match self.version.parse() {
            Ok(version) => version,
            Err(e) => bail!("{}", e),
        };

        let interpreter = self
            .interpreter
            .unwrap_or_else(|| default_interpreter_path(&self.prefix));
        let library = self
            .library
            .unwrap_or_else(|| default_library_path(&self.prefix, version));

        Ok(InterpreterConfig::new(
            self.prefix,
            library,
            interpreter,
            version,
        ))
    }
}

/// Conventional interpreter location under a prefix.
pub fn default_interpreter_path(prefix: &Path) -> PathBuf {
    if cfg!(windows) {
        prefix.join("python.exe")
    } else {
        prefix.join("bin").join("python3")
    }
}

/// Conventional library location under a prefix.
pub fn default_library_path(prefix: &Path, version: LanguageVersion) -> PathBuf {
    if cfg!(windows) {
        prefix.join("Lib")
    } else {
        prefix.join("lib").join(format!("python{}", version))
    }
}
