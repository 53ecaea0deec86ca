//! Quoting and help-text helpers for generated shell code.
//!
//! Everything user supplied (paths, flags, choices, help text) ends up
//! inside shell string literals, so each target context gets its own
//! escaping rule.

use regex::Regex;
use std::sync::LazyLock;

/// Characters `_arguments` treats specially inside an option description,
/// plus the ones a double-quoted zsh string would expand.
static ZSH_HELP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([`"$\\:\[\]])"#).expect("valid regex"));

/// Maximum length of the one-line help shown in subcommand menus.
pub const SHORT_HELP_LIMIT: usize = 45;

/// Escape text for use inside a double-quoted bash or zsh string.
///
/// Backslash, double quote, dollar and backtick are backslash-escaped.
#[must_use]
pub fn escape_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape text for use inside a single-quoted shell string.
#[must_use]
pub fn escape_single_quoted(text: &str) -> String {
    text.replace('\'', r"'\''")
}

/// Escape an option help annotation for a zsh `_arguments` spec.
///
/// The spec itself is double quoted, so the result is safe there too.
#[must_use]
pub fn escape_zsh_help(text: &str) -> String {
    ZSH_HELP_RE.replace_all(text, r"\$1").into_owned()
}

/// Escape a `name:description` entry for `_describe`.
///
/// Colons in the name would split the entry, so they are escaped; the
/// description only needs double-quote safety. An empty description
/// yields the bare name.
#[must_use]
pub fn escape_zsh_describe(name: &str, description: &str) -> String {
    let name = escape_double_quoted(name).replace(':', r"\:");
    if description.is_empty() {
        return name;
    }
    format!("{name}:{}", escape_double_quoted(description))
}

/// Escape one choice for an `_arguments` `(item ...)` action.
///
/// Whitespace and parentheses would end the item or the list, so they and
/// backslash are backslash-escaped before the double-quote escaping.
#[must_use]
pub fn escape_zsh_choice(choice: &str) -> String {
    let mut out = String::with_capacity(choice.len());
    for c in choice.chars() {
        if c == '\\' || c == '(' || c == ')' || c.is_whitespace() {
            out.push('\\');
        }
        out.push(c);
    }
    escape_double_quoted(&out)
}

/// Reduce help text to a single short line for interactive menus.
///
/// Takes the first paragraph, collapses whitespace, stops after the first
/// sentence (dropping its period) and truncates to `limit` characters.
#[must_use]
pub fn short_help(help: &str, limit: usize) -> String {
    let paragraph = help.split("\n\n").next().unwrap_or_default();
    let collapsed = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");

    let sentence = collapsed
        .find(". ")
        .map_or(collapsed.as_str(), |end| &collapsed[..=end]);
    let sentence = sentence.strip_suffix('.').unwrap_or(sentence);

    truncate(sentence, limit)
}

/// Truncate a string to `max_len` characters, appending `...` if truncated.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated.trim_end())
    }
}
