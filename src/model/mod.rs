//! Command model
//!
//! A closed set of plain records describing a command-line interface:
//! groups, leaf commands, options and positional arguments. Generators only
//! read this model; nothing mutates it after construction.

pub mod from_clap;
pub mod tree;

pub use tree::{CommandContext, ContextTree, flatten};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Nodes
// ============================================================================

/// A command-tree element: either a group with named children or a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Name used to invoke this command.
    pub name: String,

    /// Help text shown in interactive menus.
    pub help: Option<String>,

    /// Hidden nodes and their subtrees are never emitted.
    pub hidden: bool,

    /// Options accepted at this level.
    pub options: Vec<CommandOption>,

    /// Positional arguments, in position order.
    pub arguments: Vec<Argument>,

    /// Group or leaf.
    pub kind: NodeKind,
}

/// Distinguishes groups from leaf commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A node with named subcommands, in declaration order.
    Group {
        /// Child name to child node.
        children: IndexMap<String, Node>,
    },
    /// A node accepting only options and arguments.
    Leaf,
}

impl Node {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            help: None,
            hidden: false,
            options: Vec::new(),
            arguments: Vec::new(),
            kind,
        }
    }

    /// Creates an empty group.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(
            name,
            NodeKind::Group {
                children: IndexMap::new(),
            },
        )
    }

    /// Creates a leaf command.
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Leaf)
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Marks the node hidden.
    #[must_use]
    pub const fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Appends an option.
    #[must_use]
    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Adds a child command, turning a leaf into a group if needed.
    ///
    /// A child with the same name as an existing one replaces it in place.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        if let NodeKind::Leaf = self.kind {
            self.kind = NodeKind::Group {
                children: IndexMap::new(),
            };
        }
        if let NodeKind::Group { children } = &mut self.kind {
            children.insert(child.name.clone(), child);
        }
        self
    }

    /// Returns `true` for group nodes.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Iterates over all children (hidden included), in declaration order.
    ///
    /// Leaves yield nothing.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Self)> {
        let children = match &self.kind {
            NodeKind::Group { children } => Some(children),
            NodeKind::Leaf => None,
        };
        children
            .into_iter()
            .flat_map(|c| c.iter().map(|(name, node)| (name.as_str(), node)))
    }

    /// Iterates over children that are not hidden.
    pub fn visible_children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children().filter(|(_, child)| !child.hidden)
    }

    /// Iterates over options that are not hidden.
    pub fn visible_options(&self) -> impl Iterator<Item = &CommandOption> {
        self.options.iter().filter(|o| !o.hidden)
    }

    /// Iterates over non-hidden arguments with their declared 0-based position.
    pub fn visible_arguments(&self) -> impl Iterator<Item = (usize, &Argument)> {
        self.arguments
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.hidden)
    }
}

// ============================================================================
// Options
// ============================================================================

/// How an option consumes values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Takes `arity` values.
    #[default]
    Value,
    /// Boolean switch, takes no value.
    Flag,
    /// Counted switch such as `-vvv`, takes no value.
    Count,
}

/// An option belonging to exactly one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    /// Primary spellings, e.g. `-F`, `--format`.
    pub flags: Vec<String>,

    /// Secondary spellings such as negations (`--no-color`).
    pub secondary_flags: Vec<String>,

    /// Value consumption model.
    pub kind: OptionKind,

    /// Declared number of values for [`OptionKind::Value`] options.
    pub arity: usize,

    /// Whether the option may be given more than once.
    pub multiple: bool,

    /// Finite set of accepted values, in order.
    pub choices: Option<Vec<String>>,

    /// Help text.
    pub help: Option<String>,

    /// Hidden options are never emitted.
    pub hidden: bool,
}

impl CommandOption {
    fn new<I, S>(flags: I, kind: OptionKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
            secondary_flags: Vec::new(),
            kind,
            arity: 1,
            multiple: false,
            choices: None,
            help: None,
            hidden: false,
        }
    }

    /// An option taking one value.
    #[must_use]
    pub fn value<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(flags, OptionKind::Value)
    }

    /// A boolean switch.
    #[must_use]
    pub fn flag<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(flags, OptionKind::Flag)
    }

    /// A counted switch.
    #[must_use]
    pub fn count<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(flags, OptionKind::Count)
    }

    /// Adds secondary spellings.
    #[must_use]
    pub fn with_secondary<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_flags
            .extend(flags.into_iter().map(Into::into));
        self
    }

    /// Sets the declared value count.
    #[must_use]
    pub const fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    /// Restricts values to a finite set.
    #[must_use]
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Allows the option to be repeated.
    #[must_use]
    pub const fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Marks the option hidden.
    #[must_use]
    pub const fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// Number of words a positional argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgArity {
    /// Exactly this many words.
    Exactly(usize),
    /// Everything that remains.
    Unbounded,
}

impl Default for ArgArity {
    fn default() -> Self {
        Self::Exactly(1)
    }
}

/// A positional argument belonging to exactly one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Name shown in completion messages, e.g. `FILE`.
    pub display_name: String,

    /// Words consumed.
    pub arity: ArgArity,

    /// Whether the argument must be supplied.
    pub required: bool,

    /// Hidden arguments are never emitted.
    pub hidden: bool,
}

impl Argument {
    /// A required single-word argument.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            arity: ArgArity::default(),
            required: true,
            hidden: false,
        }
    }

    /// Makes the argument consume all remaining words.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.arity = ArgArity::Unbounded;
        self
    }

    /// Makes the argument optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Marks the argument hidden.
    #[must_use]
    pub const fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }
}
