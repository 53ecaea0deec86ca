//! Conversion from a [`clap::Command`] definition to the command model.
//!
//! The command is built first so that derived defaults (value counts,
//! generated `--help`/`--version` flags, the `help` subcommand, propagated
//! global options) are visible to the conversion.

use clap::{Arg, ArgAction, Command};

use crate::model::{ArgArity, Argument, CommandOption, Node, NodeKind, OptionKind};

/// Converts a clap command tree into a [`Node`] tree.
#[must_use]
pub fn from_clap(command: &Command) -> Node {
    let mut command = command.clone();
    command.build();
    convert_command(&command)
}

fn convert_command(command: &Command) -> Node {
    let mut node = if command.has_subcommands() {
        Node::group(command.get_name())
    } else {
        Node::leaf(command.get_name())
    };
    node.help = command.get_about().map(ToString::to_string);
    node.hidden = command.is_hide_set();

    for arg in command.get_arguments() {
        if arg.is_positional() {
            node.arguments.push(convert_positional(arg));
        } else if let Some(option) = convert_option(arg) {
            node.options.push(option);
        }
    }

    if let NodeKind::Group { children } = &mut node.kind {
        for sub in command.get_subcommands() {
            children.insert(sub.get_name().to_string(), convert_command(sub));
        }
    }

    node
}

fn convert_option(arg: &Arg) -> Option<CommandOption> {
    let mut flags: Vec<String> = arg
        .get_short_and_visible_aliases()
        .unwrap_or_default()
        .into_iter()
        .map(|c| format!("-{c}"))
        .collect();
    flags.extend(
        arg.get_long_and_visible_aliases()
            .unwrap_or_default()
            .into_iter()
            .map(|l| format!("--{l}")),
    );
    if flags.is_empty() {
        return None;
    }

    let action = arg.get_action();
    let kind = match action {
        ArgAction::Count => OptionKind::Count,
        a if a.takes_values() => OptionKind::Value,
        _ => OptionKind::Flag,
    };

    let mut option = match kind {
        OptionKind::Value => CommandOption::value(flags),
        OptionKind::Flag => CommandOption::flag(flags),
        OptionKind::Count => CommandOption::count(flags),
    };
    option.hidden = arg.is_hide_set();
    option.help = arg.get_help().map(ToString::to_string);
    option.multiple = matches!(action, ArgAction::Append);

    if kind == OptionKind::Value {
        option.arity = value_count(arg);
        let choices: Vec<String> = arg
            .get_possible_values()
            .iter()
            .filter(|v| !v.is_hide_set())
            .map(|v| v.get_name().to_string())
            .collect();
        if !choices.is_empty() {
            option.choices = Some(choices);
        }
    }

    Some(option)
}

/// Values consumed per occurrence; open ranges fall back to their minimum.
fn value_count(arg: &Arg) -> usize {
    arg.get_num_args().map_or(1, |range| {
        if range.max_values() == usize::MAX {
            range.min_values().max(1)
        } else {
            range.max_values()
        }
    })
}

fn convert_positional(arg: &Arg) -> Argument {
    let display_name = arg
        .get_value_names()
        .and_then(|names| names.first())
        .map_or_else(
            || arg.get_id().as_str().to_uppercase(),
            ToString::to_string,
        );

    // Appending positionals swallow every remaining word.
    let unbounded = matches!(arg.get_action(), ArgAction::Append)
        || arg
            .get_num_args()
            .is_some_and(|range| range.max_values() == usize::MAX);

    Argument {
        display_name,
        arity: if unbounded {
            ArgArity::Unbounded
        } else {
            ArgArity::Exactly(value_count(arg))
        },
        required: arg.is_required_set(),
        hidden: arg.is_hide_set(),
    }
}
