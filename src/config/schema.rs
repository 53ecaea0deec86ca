//! Tree definition schema
//!
//! Serde types mirroring the on-disk tree definition format, plus the
//! conversion into the command model. A command with a `commands` key
//! (even an empty one) is a group; anything else is a leaf.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{ArgArity, Argument, CommandOption, Node, NodeKind, OptionKind};

// ============================================================================
// Commands
// ============================================================================

/// A command as written in a tree definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDefinition {
    /// Command name. Only meaningful on the root; children are named by
    /// their key under `commands`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Exclude this command and its subtree from completion
    #[serde(default)]
    pub hidden: bool,

    /// Options accepted at this level
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDefinition>,

    /// Positional arguments, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDefinition>,

    /// Subcommands by name, in declaration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<IndexMap<String, CommandDefinition>>,
}

impl CommandDefinition {
    /// Converts this definition into a model node named `name`.
    #[must_use]
    pub fn to_node(&self, name: &str) -> Node {
        let kind = match &self.commands {
            Some(commands) => NodeKind::Group {
                children: commands
                    .iter()
                    .map(|(child_name, child)| (child_name.clone(), child.to_node(child_name)))
                    .collect(),
            },
            None => NodeKind::Leaf,
        };

        Node {
            name: name.to_string(),
            help: self.help.clone(),
            hidden: self.hidden,
            options: self.options.iter().map(OptionDefinition::to_option).collect(),
            arguments: self
                .arguments
                .iter()
                .map(ArgumentDefinition::to_argument)
                .collect(),
            kind,
        }
    }

    /// Converts a root definition, using its own `name` (or empty).
    #[must_use]
    pub fn to_root(&self) -> Node {
        self.to_node(self.name.as_deref().unwrap_or_default())
    }

    /// Subcommands in declaration order; empty for leaves.
    pub fn subcommands(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.commands
            .iter()
            .flat_map(|c| c.iter().map(|(name, def)| (name.as_str(), def)))
    }
}

// ============================================================================
// Options
// ============================================================================

/// An option as written in a tree definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDefinition {
    /// Primary spellings, e.g. `["-F", "--format"]`
    #[serde(default)]
    pub flags: Vec<String>,

    /// Secondary spellings, e.g. `["--no-color"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_flags: Vec<String>,

    /// `value`, `flag` or `count`
    #[serde(default)]
    pub kind: OptionKind,

    /// Number of values taken by a `value` option
    #[serde(default = "default_nargs")]
    pub nargs: usize,

    /// May be given more than once
    #[serde(default)]
    pub multiple: bool,

    /// Accepted values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    /// Help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Exclude from completion
    #[serde(default)]
    pub hidden: bool,
}

const fn default_nargs() -> usize {
    1
}

impl OptionDefinition {
    /// Converts this definition into a model option.
    #[must_use]
    pub fn to_option(&self) -> CommandOption {
        CommandOption {
            flags: self.flags.clone(),
            secondary_flags: self.secondary_flags.clone(),
            kind: self.kind,
            arity: self.nargs,
            multiple: self.multiple,
            choices: self.choices.clone(),
            help: self.help.clone(),
            hidden: self.hidden,
        }
    }

    /// Every spelling, primary first.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .chain(&self.secondary_flags)
            .map(String::as_str)
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// A positional argument as written in a tree definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentDefinition {
    /// Display name, e.g. `FILE`
    pub name: String,

    /// Words consumed
    #[serde(default)]
    pub nargs: Nargs,

    /// Must be supplied
    #[serde(default = "default_required")]
    pub required: bool,

    /// Exclude from completion
    #[serde(default)]
    pub hidden: bool,
}

const fn default_required() -> bool {
    true
}

impl ArgumentDefinition {
    /// Converts this definition into a model argument.
    #[must_use]
    pub fn to_argument(&self) -> Argument {
        Argument {
            display_name: self.name.clone(),
            arity: match self.nargs {
                Nargs::Exactly(n) => ArgArity::Exactly(n),
                Nargs::Unbounded => ArgArity::Unbounded,
            },
            required: self.required,
            hidden: self.hidden,
        }
    }
}

/// Argument word count.
///
/// Written as a non-negative integer, or as `-1`, `"unbounded"` or `"*"`
/// for "all remaining words".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNargs", into = "RawNargs")]
pub enum Nargs {
    /// Exactly this many words
    Exactly(usize),
    /// All remaining words
    Unbounded,
}

impl Default for Nargs {
    fn default() -> Self {
        Self::Exactly(1)
    }
}

/// On-disk spelling of [`Nargs`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawNargs {
    Count(i64),
    Word(String),
}

impl TryFrom<RawNargs> for Nargs {
    type Error = String;

    fn try_from(raw: RawNargs) -> Result<Self, Self::Error> {
        match raw {
            RawNargs::Count(-1) => Ok(Self::Unbounded),
            RawNargs::Count(n) => usize::try_from(n)
                .map(Self::Exactly)
                .map_err(|_| format!("invalid nargs {n}: expected a count, -1, \"unbounded\" or \"*\"")),
            RawNargs::Word(word) => match word.as_str() {
                "unbounded" | "*" => Ok(Self::Unbounded),
                other => Err(format!(
                    "invalid nargs '{other}': expected a count, -1, \"unbounded\" or \"*\""
                )),
            },
        }
    }
}

impl From<Nargs> for RawNargs {
    fn from(nargs: Nargs) -> Self {
        match nargs {
            Nargs::Exactly(n) => Self::Count(i64::try_from(n).unwrap_or(i64::MAX)),
            Nargs::Unbounded => Self::Count(-1),
        }
    }
}
