//! Lookup tables backing the generated bash completion function.
//!
//! The generated script stores five global associative arrays. Here they
//! are ordinary ordered maps, built from the flattened command tree and
//! then rendered as `name["key"]="value"` assignments.

use indexmap::IndexMap;

use crate::model::{CommandContext, ContextTree, Node};
use crate::shell::common::{effective_arity, opt_strings, slammable};
use crate::shell::escape::escape_double_quoted;

/// Table entries contributed by a single command path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTables {
    /// The command path every entry is keyed by.
    pub path: String,
    /// Visible child command names.
    pub subcmds: Vec<String>,
    /// Every spelling of every visible option.
    pub opts: Vec<String>,
    /// Short spellings that accept an attached value.
    pub slamopts: Vec<String>,
    /// Effective arity per spelling.
    pub opt_nargs: Vec<(String, usize)>,
    /// Declared choices per spelling, for options that have them.
    pub opt_choices: Vec<(String, Vec<String>)>,
}

impl NodeTables {
    /// Collect the entries for one visible command.
    #[must_use]
    pub fn from_context(ctx: &CommandContext<'_>) -> Self {
        let node = ctx.node;
        let options: Vec<_> = node.visible_options().collect();

        let mut opt_nargs = Vec::new();
        let mut opt_choices = Vec::new();
        for option in &options {
            let nargs = effective_arity(option);
            for flag in opt_strings(option) {
                opt_nargs.push((flag.to_string(), nargs));
            }
        }
        for option in &options {
            if let Some(choices) = &option.choices {
                for flag in opt_strings(option) {
                    opt_choices.push((flag.to_string(), choices.clone()));
                }
            }
        }

        Self {
            path: ctx.path.clone(),
            subcmds: node
                .visible_children()
                .map(|(name, _)| name.to_string())
                .collect(),
            opts: options
                .iter()
                .flat_map(|o| opt_strings(o))
                .map(ToString::to_string)
                .collect(),
            slamopts: options
                .iter()
                .flat_map(|o| slammable(o))
                .map(ToString::to_string)
                .collect(),
            opt_nargs,
            opt_choices,
        }
    }

    /// Render the entries as bash assignments into the `slug`-prefixed arrays.
    #[must_use]
    pub fn assignments(&self, slug: &str) -> Vec<String> {
        let path = escape_double_quoted(&self.path);
        let joined = |values: &[String]| escape_double_quoted(&values.join(" "));

        let mut lines = vec![
            format!(r#"{slug}_subcmds["{path}"]="{}""#, joined(&self.subcmds)),
            format!(r#"{slug}_opts["{path}"]="{}""#, joined(&self.opts)),
            format!(r#"{slug}_slamopts["{path}"]="{}""#, joined(&self.slamopts)),
        ];
        for (flag, nargs) in &self.opt_nargs {
            let flag = escape_double_quoted(flag);
            lines.push(format!(r#"{slug}_opt_nargs["{path} {flag}"]="{nargs}""#));
        }
        for (flag, choices) in &self.opt_choices {
            let flag = escape_double_quoted(flag);
            lines.push(format!(
                r#"{slug}_opt_choices["{path} {flag}"]="{}""#,
                joined(choices)
            ));
        }
        lines
    }
}

/// The five completion tables for a whole command tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BashTables {
    subcmds: IndexMap<String, Vec<String>>,
    opts: IndexMap<String, Vec<String>>,
    slamopts: IndexMap<String, Vec<String>>,
    opt_nargs: IndexMap<String, usize>,
    opt_choices: IndexMap<String, Vec<String>>,
}

impl BashTables {
    /// Build the tables for every visible command under `root`.
    #[must_use]
    pub fn from_tree(root: &Node, name: &str) -> Self {
        let mut tables = Self::default();
        for ctx in &ContextTree::new(root, name) {
            tables.insert(NodeTables::from_context(&ctx));
        }
        tables
    }

    /// Merge one command's entries. Later entries replace earlier ones.
    pub fn insert(&mut self, node: NodeTables) {
        for (flag, nargs) in node.opt_nargs {
            self.opt_nargs.insert(format!("{} {flag}", node.path), nargs);
        }
        for (flag, choices) in node.opt_choices {
            self.opt_choices
                .insert(format!("{} {flag}", node.path), choices);
        }
        self.subcmds.insert(node.path.clone(), node.subcmds);
        self.opts.insert(node.path.clone(), node.opts);
        self.slamopts.insert(node.path, node.slamopts);
    }

    /// Visible subcommands of `path`; empty for unknown paths.
    #[must_use]
    pub fn subcommands(&self, path: &str) -> &[String] {
        self.subcmds.get(path).map_or(&[], Vec::as_slice)
    }

    /// Option spellings of `path`; empty for unknown paths.
    #[must_use]
    pub fn options(&self, path: &str) -> &[String] {
        self.opts.get(path).map_or(&[], Vec::as_slice)
    }

    /// Slammable short flags of `path`; empty for unknown paths.
    #[must_use]
    pub fn slam_options(&self, path: &str) -> &[String] {
        self.slamopts.get(path).map_or(&[], Vec::as_slice)
    }

    /// Effective arity of `flag` under `path`, if registered.
    #[must_use]
    pub fn option_arity(&self, path: &str, flag: &str) -> Option<usize> {
        self.opt_nargs.get(&format!("{path} {flag}")).copied()
    }

    /// Declared choices of `flag` under `path`; empty when none.
    #[must_use]
    pub fn option_choices(&self, path: &str, flag: &str) -> &[String] {
        self.opt_choices
            .get(&format!("{path} {flag}"))
            .map_or(&[], Vec::as_slice)
    }

    /// Registered command paths, in flattener order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.subcmds.keys().map(String::as_str)
    }
}
