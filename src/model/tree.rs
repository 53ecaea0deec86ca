//! Command tree flattening.
//!
//! Walks a [`Node`] tree into an ordered sequence of [`CommandContext`]s,
//! one per visible group and visible leaf. For every group the order is:
//! the group itself, then its direct leaf children, then the full subtree
//! of each direct group child. Both shell generators rely on this order.

use crate::model::Node;

/// A visible node together with its resolved command path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext<'a> {
    /// Ancestor names and the node's own name, joined by single spaces.
    pub path: String,

    /// Number of ancestors (0 for the root).
    pub depth: usize,

    /// The node itself.
    pub node: &'a Node,
}

impl CommandContext<'_> {
    /// Returns `true` for the root of the walk.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// A command tree rooted at `root` and invoked as `name`.
#[derive(Debug, Clone)]
pub struct ContextTree<'a> {
    root: &'a Node,
    name: String,
}

impl<'a> ContextTree<'a> {
    /// Creates a tree whose root is displayed as `name`.
    #[must_use]
    pub fn new(root: &'a Node, name: impl Into<String>) -> Self {
        Self {
            root,
            name: name.into(),
        }
    }

    /// Starts a fresh walk over the tree.
    ///
    /// Each call produces an identical, independent sequence.
    #[must_use]
    pub fn iter(&self) -> Walk<'a> {
        Walk {
            stack: vec![CommandContext {
                path: self.name.clone(),
                depth: 0,
                node: self.root,
            }],
        }
    }
}

impl<'a> IntoIterator for &ContextTree<'a> {
    type Item = CommandContext<'a>;
    type IntoIter = Walk<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy walk over a [`ContextTree`].
///
/// Groups are expanded when popped: their group children are pushed first
/// (in reverse) and their leaf children last (in reverse), so the leaves
/// come out before any nested group.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<CommandContext<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = CommandContext<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;

        if entry.node.is_group() {
            let child = |name: &str, node: &'a Node| CommandContext {
                path: format!("{} {name}", entry.path),
                depth: entry.depth + 1,
                node,
            };
            let (groups, leaves): (Vec<_>, Vec<_>) = entry
                .node
                .visible_children()
                .partition(|(_, node)| node.is_group());

            self.stack
                .extend(groups.into_iter().rev().map(|(n, node)| child(n, node)));
            self.stack
                .extend(leaves.into_iter().rev().map(|(n, node)| child(n, node)));
        }

        tracing::trace!(path = %entry.path, group = entry.node.is_group(), "visiting command");
        Some(entry)
    }
}

/// Collects the full walk of `root` into a vector.
#[must_use]
pub fn flatten<'a>(root: &'a Node, name: &str) -> Vec<CommandContext<'a>> {
    ContextTree::new(root, name).iter().collect()
}
