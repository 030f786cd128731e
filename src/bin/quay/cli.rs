//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Quay - a pip front-end for Python environments
#[derive(Parser)]
#[command(name = "quay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the packages installed in an environment
    List(ListArgs),

    /// Install a package into an environment
    Install(InstallArgs),

    /// Uninstall a package from an environment
    Uninstall(UninstallArgs),

    /// Check whether a requirement is satisfied in an environment
    Check(CheckArgs),

    /// Bootstrap pip itself into an environment
    Bootstrap(BootstrapArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Flags describing the target environment.
#[derive(Args)]
pub struct EnvArgs {
    /// Environment prefix directory
    #[arg(long)]
    pub prefix: Option<PathBuf>,

    /// Interpreter executable; a bare name is resolved on PATH (defaults
    /// to the conventional location under the prefix)
    #[arg(long)]
    pub interpreter: Option<PathBuf>,

    /// Library directory (defaults to the conventional location under the
    /// prefix)
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Interpreter version, `major.minor`
    #[arg(long, default_value = "3.11")]
    pub python_version: String,

    /// Read the environment description from a TOML file instead
    #[arg(long, conflicts_with_all = ["prefix", "interpreter", "library"])]
    pub env_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Emit a machine-readable JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Package to install (`name` or `name==version`)
    pub package: String,

    #[command(flatten)]
    pub env: EnvArgs,

    /// Install without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Run the installer elevated
    #[arg(long)]
    pub elevate: bool,
}

#[derive(Args)]
pub struct UninstallArgs {
    /// Package to uninstall
    pub package: String,

    #[command(flatten)]
    pub env: EnvArgs,

    /// Run the uninstaller elevated
    #[arg(long)]
    pub elevate: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Requirement to check (`name` or `name==version`)
    pub requirement: String,

    #[command(flatten)]
    pub env: EnvArgs,
}

#[derive(Args)]
pub struct BootstrapArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Bootstrap without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
