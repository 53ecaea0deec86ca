//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod generate;
pub mod simulate;
pub mod validate;
pub mod version;

use std::path::Path;

use crate::cli::args::{Cli, Commands};
use crate::error::NativeCompError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), NativeCompError> {
    match cli.command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Validate(args) => validate::run(&args),
        Commands::Simulate(args) => simulate::run(&args),
        Commands::Completions(args) => completions::run(&args),
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}

/// Fails with a not-found I/O error when `path` does not exist.
fn ensure_exists(path: &Path) -> Result<(), NativeCompError> {
    if path.exists() {
        return Ok(());
    }
    Err(NativeCompError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("file not found: {}", path.display()),
    )))
}
