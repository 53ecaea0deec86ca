//! Shell completion generation for `nativecomp` itself
//!
//! Converts the binary's own clap definition into a command tree and
//! renders it with the same engine `generate` uses.

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::NativeCompError;
use crate::model::from_clap::from_clap;
use crate::shell::{render, select_dialect};

/// Generate and print the completion script to stdout.
///
/// # Errors
///
/// Returns a generation error if the command tree has no name.
pub fn run(args: &CompletionsArgs) -> Result<(), NativeCompError> {
    let shell = select_dialect(args.shell.as_deref());
    let root = from_clap(&Cli::command());

    tracing::info!(%shell, "generating nativecomp completions");
    let script = render(&root, Some("nativecomp"), shell)?;
    println!("{script}");
    Ok(())
}
