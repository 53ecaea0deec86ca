//! In-process model of the generated bash completion function.
//!
//! Mirrors `parse_line` and the candidate selection of the emitted script
//! against [`BashTables`], so completion behaviour can be checked without a
//! bash interpreter. Table values are split on whitespace the way the
//! script's `read -ra` splits them, with no pathname expansion.

use serde::Serialize;

use super::tables::BashTables;

/// State reached by scanning the words before the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLine {
    /// Space-joined path of the deepest recognized command.
    pub curcmd: String,
    /// Last option seen whose values are still pending, or empty.
    pub curopt: String,
    /// Option values still expected.
    pub toskip: usize,
}

/// Result of completing one command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Parser state at the cursor.
    #[serde(flatten)]
    pub parsed: ParsedLine,
    /// The word being completed.
    pub word: String,
    /// Matching candidates, in table order.
    pub candidates: Vec<String>,
}

fn split_words(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().flat_map(|v| v.split_whitespace())
}

/// Scan `words[1..cword]` the way the generated `parse_line` does.
///
/// `words[0]` is the invoked command name and seeds the path. A `cword`
/// past the end of `words` completes an empty word.
#[must_use]
pub fn parse_line<S: AsRef<str>>(tables: &BashTables, words: &[S], cword: usize) -> ParsedLine {
    let word_at = |i: usize| words.get(i).map_or("", AsRef::as_ref);
    let compword = word_at(cword);
    let boundary = cword.saturating_sub(1);

    let mut curcmd = word_at(0).to_string();
    let mut curopt = String::new();
    let mut toskip = 0usize;
    let mut nomoreopts = false;

    for i in 1..=boundary {
        let curword = word_at(i);

        if curword == "--" {
            curopt.clear();
            toskip = 0;
            nomoreopts = true;
            continue;
        }

        if toskip > 0 {
            toskip -= 1;
            continue;
        }

        if !nomoreopts && curword.starts_with('-') {
            let slammed = split_words(tables.slam_options(&curcmd))
                .any(|opt| curword != opt && curword.starts_with(opt));
            if slammed {
                continue;
            }
            curopt = curword.to_string();
            toskip = tables.option_arity(&curcmd, curword).unwrap_or(0);
            continue;
        }

        if split_words(tables.subcommands(&curcmd)).any(|sub| sub == curword) {
            curcmd = format!("{curcmd} {curword}");
            continue;
        }

        tracing::trace!(word = curword, path = %curcmd, "unrecognized word stops the scan");
        break;
    }

    if toskip == 0 {
        curopt.clear();
        if split_words(tables.subcommands(&curcmd)).any(|sub| sub == compword) {
            curcmd = format!("{curcmd} {compword}");
        }
    }

    ParsedLine {
        curcmd,
        curopt,
        toskip,
    }
}

/// Compute the candidates the generated function would offer.
#[must_use]
pub fn simulate<S: AsRef<str>>(tables: &BashTables, words: &[S], cword: usize) -> Resolution {
    let word = words.get(cword).map_or("", AsRef::as_ref).to_string();
    let parsed = parse_line(tables, words, cword);

    let pool: Vec<&str> = if word.starts_with('-') {
        split_words(tables.options(&parsed.curcmd)).collect()
    } else if (word.is_empty() && parsed.toskip > 0) || (!word.is_empty() && !parsed.curopt.is_empty()) {
        split_words(tables.option_choices(&parsed.curcmd, &parsed.curopt)).collect()
    } else {
        split_words(tables.subcommands(&parsed.curcmd)).collect()
    };

    let candidates = pool
        .into_iter()
        .filter(|c| c.starts_with(word.as_str()))
        .map(ToString::to_string)
        .collect();

    Resolution {
        parsed,
        word,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommandOption, Node};

    fn tables() -> BashTables {
        let root = Node::group("tool")
            .with_option(CommandOption::count(["-v", "--verbose"]))
            .with_option(CommandOption::value(["-C"]))
            .with_child(
                Node::leaf("sub")
                    .with_option(
                        CommandOption::value(["-F", "--format"]).with_choices(["json", "text"]),
                    )
                    .with_option(CommandOption::value(["--point"]).with_arity(2))
                    .with_option(CommandOption::flag(["-q", "--quiet"])),
            )
            .with_child(Node::leaf("status"))
            .with_child(Node::group("remote").with_child(Node::leaf("add")));
        BashTables::from_tree(&root, "tool")
    }

    fn run(words: &[&str]) -> Resolution {
        simulate(&tables(), words, words.len() - 1)
    }

    #[test]
    fn test_choices_after_short_flag() {
        let res = run(&["tool", "sub", "-F", ""]);
        assert_eq!(res.parsed.curcmd, "tool sub");
        assert_eq!(res.parsed.curopt, "-F");
        assert_eq!(res.parsed.toskip, 1);
        assert_eq!(res.candidates, vec!["json", "text"]);
    }

    #[test]
    fn test_choices_after_long_flag_filtered() {
        let res = run(&["tool", "sub", "--format", "j"]);
        assert_eq!(res.candidates, vec!["json"]);
    }

    #[test]
    fn test_subcommand_prefix() {
        let res = run(&["tool", "su"]);
        assert_eq!(res.parsed.curcmd, "tool");
        assert_eq!(res.candidates, vec!["sub"]);
    }

    #[test]
    fn test_empty_word_lists_subcommands() {
        let res = run(&["tool", ""]);
        assert_eq!(res.candidates, vec!["sub", "status", "remote"]);
    }

    #[test]
    fn test_nested_group() {
        let res = run(&["tool", "remote", ""]);
        assert_eq!(res.parsed.curcmd, "tool remote");
        assert_eq!(res.candidates, vec!["add"]);
    }

    #[test]
    fn test_completed_subcommand_under_cursor_descends() {
        let parsed = parse_line(&tables(), &["tool", "remote"], 1);
        assert_eq!(parsed.curcmd, "tool remote");
    }

    #[test]
    fn test_option_candidates() {
        let res = run(&["tool", "sub", "--"]);
        assert_eq!(res.candidates, vec!["--format", "--point", "--quiet"]);
        let res = run(&["tool", "-"]);
        assert_eq!(res.candidates, vec!["-v", "--verbose", "-C"]);
    }

    #[test]
    fn test_flag_consumes_nothing() {
        let res = run(&["tool", "sub", "-q", ""]);
        assert_eq!(res.parsed.curopt, "");
        assert_eq!(res.parsed.toskip, 0);
        assert!(res.candidates.is_empty());
    }

    #[test]
    fn test_value_is_skipped() {
        let res = run(&["tool", "-C", "dir", ""]);
        assert_eq!(res.parsed.curcmd, "tool");
        assert_eq!(res.parsed.toskip, 0);
        assert_eq!(res.candidates, vec!["sub", "status", "remote"]);
    }

    #[test]
    fn test_option_value_named_like_subcommand_is_skipped() {
        let res = run(&["tool", "-C", "sub", ""]);
        assert_eq!(res.parsed.curcmd, "tool");
    }

    #[test]
    fn test_multi_value_option() {
        let res = run(&["tool", "sub", "--point", "1", ""]);
        assert_eq!(res.parsed.curopt, "--point");
        assert_eq!(res.parsed.toskip, 1);
        let res = run(&["tool", "sub", "--point", "1", "2", ""]);
        assert_eq!(res.parsed.toskip, 0);
        assert_eq!(res.parsed.curopt, "");
    }

    #[test]
    fn test_slammed_value_needs_no_skip() {
        let res = run(&["tool", "sub", "-Fjson", ""]);
        assert_eq!(res.parsed.curopt, "");
        assert_eq!(res.parsed.toskip, 0);
    }

    #[test]
    fn test_double_dash_ends_options() {
        let parsed = parse_line(&tables(), &["tool", "--", "sub", ""], 3);
        assert_eq!(parsed.curcmd, "tool sub");
        assert_eq!(parsed.toskip, 0);

        // after `--` a dash word is neither an option nor a subcommand
        let parsed = parse_line(&tables(), &["tool", "--", "-C", "sub", ""], 4);
        assert_eq!(parsed.curcmd, "tool");
        assert_eq!(parsed.curopt, "");
    }

    #[test]
    fn test_double_dash_clears_pending_option() {
        let parsed = parse_line(&tables(), &["tool", "-C", "--", "sub", ""], 4);
        assert_eq!(parsed.curopt, "");
        assert_eq!(parsed.curcmd, "tool sub");
    }

    #[test]
    fn test_unknown_word_stops_at_deepest_command() {
        let res = run(&["tool", "bogus", "sub", ""]);
        assert_eq!(res.parsed.curcmd, "tool");
    }

    #[test]
    fn test_unknown_option_consumes_nothing() {
        let res = run(&["tool", "--nope", ""]);
        assert_eq!(res.parsed.toskip, 0);
        assert_eq!(res.candidates, vec!["sub", "status", "remote"]);
    }

    #[test]
    fn test_cursor_past_end_is_empty_word() {
        let res = simulate(&tables(), &["tool"], 1);
        assert_eq!(res.word, "");
        assert_eq!(res.candidates, vec!["sub", "status", "remote"]);
    }

    #[test]
    fn test_resolution_serializes_flat() {
        let res = run(&["tool", "sub", "-F", ""]);
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["curcmd"], "tool sub");
        assert_eq!(json["toskip"], 1);
        assert_eq!(json["candidates"][1], "text");
    }
}
