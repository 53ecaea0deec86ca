//! `simulate` command
//!
//! Runs the bash completion algorithm in-process for one command line and
//! prints the parser state and the candidates it would offer.

use crate::cli::args::{OutputFormat, SimulateArgs};
use crate::cli::commands::ensure_exists;
use crate::config::TreeLoader;
use crate::error::NativeCompError;
use crate::shell::bash::{BashCompleter, Resolution, simulate};

/// Simulate completion for `args.line`.
///
/// # Errors
///
/// Returns an error if the tree cannot be loaded, has no usable name, or
/// the line cannot be split into words.
pub fn run(args: &SimulateArgs) -> Result<(), NativeCompError> {
    ensure_exists(&args.tree)?;
    let loaded = TreeLoader::with_defaults().load(&args.tree)?;
    let completer = BashCompleter::new(&loaded.root, args.name.as_deref())?;

    let words = split_line(&args.line)?;
    let cword = words.len() - 1;
    tracing::debug!(?words, cword, "simulating completion");

    let resolution = simulate(&completer.tables(), &words, cword);
    match args.format {
        OutputFormat::Human => print!("{}", render_human(&resolution)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolution)?),
    }
    Ok(())
}

/// Splits a command line into completion words.
///
/// Trailing unescaped whitespace means the cursor sits on a new, empty
/// word, so an empty word is appended.
///
/// # Errors
///
/// Returns a usage error for unbalanced quotes or an empty line.
pub fn split_line(line: &str) -> Result<Vec<String>, NativeCompError> {
    let mut words = shlex::split(line)
        .ok_or_else(|| NativeCompError::Usage(format!("cannot split command line: {line}")))?;
    if words.is_empty() {
        return Err(NativeCompError::Usage("command line is empty".to_string()));
    }
    if ends_with_word_break(line) {
        words.push(String::new());
    }
    Ok(words)
}

/// Trailing whitespace not escaped by an odd run of backslashes.
fn ends_with_word_break(line: &str) -> bool {
    let Some(last) = line.chars().next_back().filter(|c| c.is_whitespace()) else {
        return false;
    };
    let body = &line[..line.len() - last.len_utf8()];
    body.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0
}

fn render_human(resolution: &Resolution) -> String {
    let parsed = &resolution.parsed;
    let mut out = format!(
        "command: {}\noption: {}\npending values: {}\nword: {:?}\n",
        parsed.curcmd,
        if parsed.curopt.is_empty() { "-" } else { parsed.curopt.as_str() },
        parsed.toskip,
        resolution.word,
    );
    if resolution.candidates.is_empty() {
        out.push_str("candidates: (none)\n");
    } else {
        out.push_str("candidates:\n");
        for candidate in &resolution.candidates {
            out.push_str("  ");
            out.push_str(candidate);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_plain() {
        assert_eq!(split_line("tool su").unwrap(), vec!["tool", "su"]);
    }

    #[test]
    fn test_split_line_trailing_space_adds_empty_word() {
        assert_eq!(
            split_line("tool sub -F ").unwrap(),
            vec!["tool", "sub", "-F", ""]
        );
    }

    #[test]
    fn test_split_line_quotes() {
        assert_eq!(
            split_line("tool 'a b' \"c d\"").unwrap(),
            vec!["tool", "a b", "c d"]
        );
    }

    #[test]
    fn test_split_line_escaped_trailing_space() {
        assert_eq!(split_line("tool a\\ ").unwrap(), vec!["tool", "a "]);
    }

    #[test]
    fn test_split_line_escaped_backslash_then_space() {
        assert_eq!(
            split_line(r"tool a\\ ").unwrap(),
            vec!["tool", r"a\", ""]
        );
    }

    #[test]
    fn test_split_line_quoted_trailing_backslash() {
        assert_eq!(split_line(r"tool 'a\' ").unwrap(), vec!["tool", r"a\", ""]);
    }

    #[test]
    fn test_split_line_unbalanced_quotes() {
        let err = split_line("tool 'oops").unwrap_err();
        assert!(matches!(err, NativeCompError::Usage(_)));
    }

    #[test]
    fn test_split_line_empty() {
        assert!(matches!(
            split_line("   ").unwrap_err(),
            NativeCompError::Usage(_)
        ));
    }
}
