//! Logging setup for `nativecomp`.
//!
//! Logs go to stderr so a script written to stdout can be redirected
//! straight into a completion file. `-v` only raises the level of this
//! crate's own targets; dependencies stay at `warn` unless
//! `NATIVECOMP_LOG_LEVEL` says otherwise.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, ColorChoice};

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_LEVEL_ENV_VAR: &str = "NATIVECOMP_LOG_LEVEL";

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact lines without timestamps, colored on a terminal.
    #[default]
    Human,
    /// Newline-delimited JSON with timestamps.
    Json,
}

/// Resolved logging settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Count of `-v` flags.
    pub verbosity: u8,
    /// Color preference for human output.
    pub color: ColorChoice,
}

impl LoggingConfig {
    /// Settings from the global CLI flags; `None` under `--quiet`.
    #[must_use]
    pub const fn from_cli(cli: &Cli) -> Option<Self> {
        if cli.quiet {
            return None;
        }
        Some(Self {
            format: cli.log_format,
            verbosity: cli.verbose,
            color: cli.color,
        })
    }

    /// Level for this crate's targets.
    ///
    /// 0 → warn, 1 → info, 2 → debug, 3+ → trace.
    #[must_use]
    pub const fn crate_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Default filter directive when the environment sets none.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("warn,{}={}", env!("CARGO_CRATE_NAME"), self.crate_level())
    }

    /// Whether human output gets ANSI escapes.
    #[must_use]
    pub fn use_ansi(&self) -> bool {
        match self.color {
            ColorChoice::Auto => {
                std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }

    /// Targets are shown from `-vv` up.
    const fn show_target(&self) -> bool {
        self.verbosity >= 2
    }
}

/// Installs the global tracing subscriber.
///
/// `NATIVECOMP_LOG_LEVEL` replaces [`LoggingConfig::directive`] entirely.
/// Uses `try_init()`, so a second call is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.directive()));

    match config.format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .compact()
                .without_time()
                .with_ansi(config.use_ansi())
                .with_target(config.show_target())
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(config.show_target())
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
