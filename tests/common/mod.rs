//! Shared integration-test harness for running the `nativecomp` binary and
//! writing throwaway tree definitions.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Helpers for invoking the `nativecomp` binary.
pub struct NativeCompProcess;

impl NativeCompProcess {
    /// Path to the compiled binary under test.
    pub fn bin() -> &'static str {
        env!("CARGO_BIN_EXE_nativecomp")
    }

    /// Runs a one-shot CLI command and returns its output.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::spawn_command_with_env(args, &[])
    }

    /// Runs a one-shot CLI command with extra environment variables.
    ///
    /// `NATIVECOMP_*` variables from the outer environment are cleared so
    /// tests see the defaults.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut command = Command::new(Self::bin());
        command.args(args);
        for (key, _) in std::env::vars() {
            if key.starts_with("NATIVECOMP_") {
                command.env_remove(key);
            }
        }
        command.env_remove("SHELL");
        for (key, value) in env {
            command.env(key, value);
        }
        command.output().expect("failed to run nativecomp binary")
    }
}

/// Returns the path to a fixture file in `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes `content` to a temp file with the given extension.
#[allow(clippy::missing_panics_doc)]
pub fn write_tree(content: &str, extension: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("failed to create temp tree file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp tree file");
    file
}

/// Lossy stdout of a finished command.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Lossy stderr of a finished command.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
