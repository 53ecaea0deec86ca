//! CLI argument definitions
//!
//! All Clap derive structs for `nativecomp` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Generate native bash and zsh completion scripts from a command tree.
#[derive(Parser, Debug)]
#[command(name = "nativecomp", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "NATIVECOMP_COLOR")]
    pub color: ColorChoice,

    /// Log line format on stderr.
    #[arg(long, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a completion script from a tree definition.
    Generate(GenerateArgs),

    /// Check tree definition files without generating anything.
    Validate(ValidateArgs),

    /// Show what the generated bash completion would offer for a command line.
    Simulate(SimulateArgs),

    /// Generate the completion script for nativecomp itself.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the tree definition (YAML or JSON).
    pub tree: PathBuf,

    /// Target shell; unknown names fall back to bash. Defaults to the
    /// shell named by `$SHELL`.
    #[arg(short, long, env = "NATIVECOMP_SHELL")]
    pub shell: Option<String>,

    /// Command name to complete, overriding the tree's own name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Option that ends completion at its level once given (zsh only).
    #[arg(
        long = "eager-exit",
        value_name = "FLAG",
        value_delimiter = ',',
        allow_hyphen_values = true,
        env = "NATIVECOMP_EAGER_EXIT"
    )]
    pub eager_exit: Vec<String>,

    /// Write the script to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Tree definition files to check.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Path to the tree definition (YAML or JSON).
    pub tree: PathBuf,

    /// Command name to complete, overriding the tree's own name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Command line up to the cursor; a trailing space completes a new word.
    #[arg(short, long, allow_hyphen_values = true)]
    pub line: String,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell (bash or zsh). Defaults to the shell named by `$SHELL`.
    pub shell: Option<String>,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}
