//! `nativecomp` — native bash and zsh completion scripts from command trees

use clap::Parser;

use nativecomp::cli::args::Cli;
use nativecomp::cli::commands;
use nativecomp::error::{ConfigError, ExitCode, NativeCompError};
use nativecomp::observability::{LoggingConfig, init_logging};

fn main() {
    let cli = Cli::parse();

    if let Some(logging) = LoggingConfig::from_cli(&cli) {
        init_logging(&logging);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            if let NativeCompError::Config(ConfigError::ValidationError { errors, .. }) = &e {
                for issue in errors {
                    eprintln!("  {issue}");
                }
            }
            std::process::exit(e.exit_code());
        }
    }
}
