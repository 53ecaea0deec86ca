//! `generate` command
//!
//! Loads a tree definition, renders it for the selected shell and writes
//! the script to stdout or a file.

use std::path::Path;

use crate::cli::args::GenerateArgs;
use crate::cli::commands::ensure_exists;
use crate::config::TreeLoader;
use crate::error::NativeCompError;
use crate::shell::{GenerateOptions, render_with, select_dialect};

/// Generate a completion script.
///
/// # Errors
///
/// Returns an error if the tree cannot be loaded, has no usable name, or
/// the output cannot be written.
pub fn run(args: &GenerateArgs) -> Result<(), NativeCompError> {
    ensure_exists(&args.tree)?;
    tracing::info!(tree = %args.tree.display(), "loading tree definition");

    let loaded = TreeLoader::with_defaults().load(&args.tree)?;
    let shell = select_dialect(args.shell.as_deref());
    let options = generate_options(&args.eager_exit);

    tracing::info!(%shell, name = ?args.name, "generating completion script");
    let script = render_with(&loaded.root, args.name.as_deref(), shell, &options)?;
    write_script(args.output.as_deref(), &script)
}

/// Builds generation options from the `--eager-exit` values.
///
/// No values means the default eager-exit set.
#[must_use]
pub fn generate_options(eager_exit: &[String]) -> GenerateOptions {
    if eager_exit.is_empty() {
        GenerateOptions::default()
    } else {
        GenerateOptions {
            eager_exit_flags: eager_exit.to_vec(),
        }
    }
}

fn write_script(output: Option<&Path>, script: &str) -> Result<(), NativeCompError> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{script}\n"))?;
            tracing::info!(path = %path.display(), bytes = script.len(), "wrote completion script");
        }
        None => println!("{script}"),
    }
    Ok(())
}
