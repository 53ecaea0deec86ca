//! Zsh completion generator.
//!
//! Every visible command gets a function built around `_arguments`. Groups
//! also get a describer function listing their subcommands, and their
//! dispatch function hands the rest of the line to the matching child
//! function through `$state` and `$line[1]`.

use crate::error::GenerateError;
use crate::model::{ArgArity, Argument, CommandContext, CommandOption, Node};
use crate::shell::common::{CompleterBase, effective_arity, is_repeatable, opt_strings, slugify};
use crate::shell::escape::{
    SHORT_HELP_LIMIT, escape_double_quoted, escape_single_quoted, escape_zsh_choice,
    escape_zsh_describe, escape_zsh_help, short_help,
};
use crate::shell::{Completer, Shell};

/// Generates zsh completion scripts.
#[derive(Debug, Clone)]
pub struct ZshCompleter<'a> {
    base: CompleterBase<'a>,
    eager_exit_flags: Vec<String>,
}

impl<'a> ZshCompleter<'a> {
    /// Creates a zsh completer for `root`, displayed as `name` if given.
    ///
    /// Options spelled as any of `eager_exit_flags` exclude every other
    /// completion at their level once given.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingRootName`] when no display name can
    /// be resolved.
    pub fn new(
        root: &'a Node,
        name: Option<&str>,
        eager_exit_flags: Vec<String>,
    ) -> Result<Self, GenerateError> {
        Ok(Self {
            base: CompleterBase::new(root, name)?,
            eager_exit_flags,
        })
    }

    /// Name of the `_arguments` function for `path`.
    #[must_use]
    pub fn function_name(&self, path: &str) -> String {
        format!("{}_cmd_{}", self.base.slug, slugify(path))
    }

    /// Name of the subcommand describer for the group at `path`.
    #[must_use]
    pub fn describer_name(&self, path: &str) -> String {
        format!("{}_describe_subcmds_{}", self.base.slug, slugify(path))
    }

    fn is_eager_exit(&self, option: &CommandOption) -> bool {
        opt_strings(option)
            .iter()
            .any(|flag| self.eager_exit_flags.iter().any(|e| e == flag))
    }

    /// `_arguments` specs for one option, one per spelling.
    ///
    /// `group_level` adds `-` to the exclusion list so a group's options
    /// never swallow options that belong to a subcommand.
    #[must_use]
    pub fn option_specs(&self, option: &CommandOption, group_level: bool) -> Vec<String> {
        let raw = opt_strings(option);
        let nargs = effective_arity(option);
        let repeatable = is_repeatable(option);

        let valuespec = match &option.choices {
            Some(choices) => {
                let choices: Vec<String> = choices.iter().map(|c| escape_zsh_choice(c)).collect();
                format!(": :({})", choices.join(" "))
            }
            None if nargs > 0 => ": :( )".to_string(),
            None => String::new(),
        };
        let helptext = option
            .help
            .as_deref()
            .map(|h| format!("[{}]", escape_zsh_help(h)))
            .unwrap_or_default();

        let mut excludes: Vec<&str> = if repeatable { Vec::new() } else { raw.clone() };
        if self.is_eager_exit(option) {
            excludes.push("- :");
        } else if group_level {
            excludes.push("-");
        }
        let excludes = if excludes.is_empty() {
            String::new()
        } else {
            format!("({})", excludes.join(" "))
        };
        let star = if repeatable { "*" } else { "" };

        raw.iter()
            .map(|flag| {
                let suffix = match nargs {
                    1 if flag.chars().count() == 2 => "+",
                    1 if flag.starts_with("--") => "=",
                    _ => "",
                };
                format!(
                    "\"{excludes}{star}{}{suffix}{helptext}{valuespec}\"",
                    escape_double_quoted(flag)
                )
            })
            .collect()
    }

    /// `_arguments` spec for a positional argument at 0-based `position`.
    #[must_use]
    pub fn positional_spec(position: usize, argument: &Argument) -> String {
        let n = match argument.arity {
            ArgArity::Unbounded => "*".to_string(),
            ArgArity::Exactly(_) => (position + 1).to_string(),
        };
        let optional = if argument.required { "" } else { ":" };
        format!(
            "\"{n}{optional}:{}: \"",
            escape_zsh_help(&argument.display_name)
        )
    }

    fn node_option_specs(&self, node: &Node, group_level: bool) -> Vec<String> {
        node.visible_options()
            .flat_map(|o| self.option_specs(o, group_level))
            .collect()
    }
}

impl Completer for ZshCompleter<'_> {
    fn shell(&self) -> Shell {
        Shell::Zsh
    }

    fn root(&self) -> &Node {
        self.base.root
    }

    fn name(&self) -> &str {
        &self.base.name
    }

    fn prologue(&self) -> String {
        format!("#compdef {}", self.base.name)
    }

    fn epilogue(&self) -> String {
        format!(
            "compdef {} {}",
            self.function_name(&self.base.name),
            self.base.name
        )
    }

    fn cmd_completer(&self, ctx: &CommandContext<'_>) -> Vec<String> {
        let specs: Vec<String> = self
            .node_option_specs(ctx.node, false)
            .into_iter()
            .chain(
                ctx.node
                    .visible_arguments()
                    .map(|(position, arg)| Self::positional_spec(position, arg)),
            )
            .collect();

        let mut lines = vec![format!("{}() {{", self.function_name(&ctx.path))];
        match specs.split_last() {
            None => lines.push("  _message 'no more arguments'".to_string()),
            Some((last, rest)) => {
                lines.push("  _arguments \\".to_string());
                lines.extend(rest.iter().map(|spec| format!("    {spec} \\")));
                lines.push(format!("    {last}"));
            }
        }
        lines.push("}".to_string());
        lines
    }

    fn group_completer(&self, ctx: &CommandContext<'_>) -> Vec<String> {
        let describer = self.describer_name(&ctx.path);
        let function = self.function_name(&ctx.path);
        let children: Vec<(&str, &Node)> = ctx.node.visible_children().collect();

        let mut lines = vec![
            format!("{describer}() {{"),
            "  local -a subcmds; subcmds=(".to_string(),
        ];
        for (name, child) in &children {
            let help = child
                .help
                .as_deref()
                .map(|h| short_help(h, SHORT_HELP_LIMIT))
                .unwrap_or_default();
            lines.push(format!("    \"{}\"", escape_zsh_describe(name, &help)));
        }
        lines.push("  )".to_string());
        lines.push(format!(
            "  _describe -t subcmds '{} command' subcmds \"$@\"",
            escape_single_quoted(&ctx.path)
        ));
        lines.push("}".to_string());

        lines.push(format!("{function}() {{"));
        if ctx.is_root() {
            lines.push(
                "  local curcontext=\"$curcontext\" context state state_descr line".to_string(),
            );
            lines.push("  typeset -A opt_args".to_string());
        }
        lines.push("  _arguments -C \\".to_string());
        lines.extend(
            self.node_option_specs(ctx.node, true)
                .into_iter()
                .map(|spec| format!("    {spec} \\")),
        );
        lines.push(format!("    \"(-): :{describer}\" \\"));
        lines.push("    \"(-)*::arg:->args\"".to_string());

        lines.push("  case $state in (args) case $line[1] in".to_string());
        for (name, _) in &children {
            let child_path = format!("{} {name}", ctx.path);
            lines.push(format!(
                "    \"{}\") {} ;;",
                escape_double_quoted(name),
                self.function_name(&child_path)
            ));
        }
        lines.push("  esac ;; esac".to_string());
        lines.push("}".to_string());
        lines
    }
}
