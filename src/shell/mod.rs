//! Completion script generation.
//!
//! Supports two dialects:
//! - `bash`: static associative-array tables plus an embedded line parser
//! - `zsh`: one `_arguments` function per command, dispatched by subcommand
//!
//! Both walk the command tree once through [`ContextTree`] and emit a
//! prologue, one fragment per visible command, and an epilogue.

pub mod bash;
pub mod common;
pub mod escape;
pub mod zsh;

use std::fmt;
use std::path::Path;

use crate::error::GenerateError;
use crate::model::{CommandContext, ContextTree, Node};

/// Flags that short-circuit completion of everything else on their level.
pub const DEFAULT_EAGER_EXIT_FLAGS: &[&str] = &["-h", "--help"];

/// Environment variable naming the user's login shell binary.
pub const SHELL_ENV_VAR: &str = "SHELL";

/// Target shell dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shell {
    /// Base dialect.
    #[default]
    Bash,
    /// Extended dialect.
    Zsh,
}

impl Shell {
    /// Every supported dialect.
    pub const ALL: [Self; 2] = [Self::Bash, Self::Zsh];

    /// The name used to select this dialect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
        }
    }

    /// Resolve a shell name. Unknown names fall back to bash.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "bash" => Self::Bash,
            "zsh" => Self::Zsh,
            other => {
                tracing::debug!(
                    shell = other,
                    suggestion = ?suggest_shell(other),
                    "unrecognized shell, falling back to bash"
                );
                Self::Bash
            }
        }
    }

    /// Resolve a dialect from a login-shell path such as `/bin/zsh`.
    ///
    /// Anything that is not recognizably zsh resolves to bash.
    #[must_use]
    pub fn from_env_hint(hint: Option<&str>) -> Self {
        let basename = hint
            .map(Path::new)
            .and_then(Path::file_name)
            .and_then(|n| n.to_str());
        match basename {
            Some("zsh") => Self::Zsh,
            _ => Self::Bash,
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggest a supported shell name for a likely typo.
#[must_use]
pub fn suggest_shell(input: &str) -> Option<&'static str> {
    Shell::ALL
        .iter()
        .map(|s| (s.as_str(), strsim::damerau_levenshtein(input, s.as_str())))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name)
}

/// Pick a dialect: the explicit name if given, else the `SHELL` hint.
#[must_use]
pub fn select_dialect(explicit: Option<&str>) -> Shell {
    let hint = std::env::var(SHELL_ENV_VAR).ok();
    select_dialect_with_hint(explicit, hint.as_deref())
}

/// Like [`select_dialect`] with the environment hint supplied by the caller.
#[must_use]
pub fn select_dialect_with_hint(explicit: Option<&str>, hint: Option<&str>) -> Shell {
    explicit.map_or_else(|| Shell::from_env_hint(hint), Shell::from_name)
}

/// Generation settings shared by all dialects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Option spellings that end completion at their level (zsh only).
    pub eager_exit_flags: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            eager_exit_flags: DEFAULT_EAGER_EXIT_FLAGS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Emits a completion script for one dialect.
pub trait Completer {
    /// The dialect this completer produces.
    fn shell(&self) -> Shell;

    /// Root of the command tree.
    fn root(&self) -> &Node;

    /// Name the root command is invoked as.
    fn name(&self) -> &str;

    /// Text placed before any per-command fragment.
    fn prologue(&self) -> String {
        String::new()
    }

    /// Text placed after every per-command fragment.
    fn epilogue(&self) -> String {
        String::new()
    }

    /// Lines for a group node.
    fn group_completer(&self, ctx: &CommandContext<'_>) -> Vec<String>;

    /// Lines for a leaf node.
    fn cmd_completer(&self, ctx: &CommandContext<'_>) -> Vec<String>;

    /// Render the full script.
    fn gen_completion(&self) -> String {
        let mut parts = vec![self.prologue()];
        for ctx in &ContextTree::new(self.root(), self.name()) {
            tracing::debug!(shell = %self.shell(), path = %ctx.path, "emitting completion");
            if ctx.node.is_group() {
                parts.extend(self.group_completer(&ctx));
            } else {
                parts.extend(self.cmd_completer(&ctx));
            }
        }
        parts.push(self.epilogue());
        parts.join("\n")
    }
}

/// Create a completer for the given dialect.
///
/// # Errors
///
/// Returns [`GenerateError::MissingRootName`] if no display name can be
/// resolved for the root.
pub fn create_completer<'a>(
    shell: Shell,
    root: &'a Node,
    name: Option<&str>,
    options: &GenerateOptions,
) -> Result<Box<dyn Completer + 'a>, GenerateError> {
    Ok(match shell {
        Shell::Bash => Box::new(bash::BashCompleter::new(root, name)?),
        Shell::Zsh => Box::new(zsh::ZshCompleter::new(
            root,
            name,
            options.eager_exit_flags.clone(),
        )?),
    })
}

/// Render a completion script with default options.
///
/// # Errors
///
/// Returns [`GenerateError::MissingRootName`] if no display name can be
/// resolved for the root.
pub fn render(root: &Node, name: Option<&str>, shell: Shell) -> Result<String, GenerateError> {
    render_with(root, name, shell, &GenerateOptions::default())
}

/// Render a completion script.
///
/// # Errors
///
/// Returns [`GenerateError::MissingRootName`] if no display name can be
/// resolved for the root.
pub fn render_with(
    root: &Node,
    name: Option<&str>,
    shell: Shell,
    options: &GenerateOptions,
) -> Result<String, GenerateError> {
    let completer = create_completer(shell, root, name, options)?;
    Ok(completer.gen_completion())
}
