//! Encoding primitives shared by the bash and zsh generators.

use crate::error::GenerateError;
use crate::model::{CommandOption, Node, OptionKind};

/// All spellings of an option: primary flags, then secondary flags.
#[must_use]
pub fn opt_strings(option: &CommandOption) -> Vec<&str> {
    option
        .flags
        .iter()
        .chain(&option.secondary_flags)
        .map(String::as_str)
        .collect()
}

/// Number of words the option consumes after its flag.
///
/// Boolean and counted switches consume none.
#[must_use]
pub const fn effective_arity(option: &CommandOption) -> usize {
    match option.kind {
        OptionKind::Flag | OptionKind::Count => 0,
        OptionKind::Value => option.arity,
    }
}

/// Whether the option may appear more than once.
#[must_use]
pub const fn is_repeatable(option: &CommandOption) -> bool {
    matches!(option.kind, OptionKind::Count) || option.multiple
}

/// Short spellings whose single value may be attached directly, as in `-Fjson`.
///
/// Empty unless the option takes exactly one value.
#[must_use]
pub fn slammable(option: &CommandOption) -> Vec<&str> {
    if effective_arity(option) != 1 {
        return Vec::new();
    }
    opt_strings(option)
        .into_iter()
        .filter(|flag| flag.chars().count() < 3)
        .collect()
}

/// Turn a command path or name into a shell identifier fragment.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.replace([' ', '-'], "_")
}

/// State shared by every dialect's completer.
#[derive(Debug, Clone)]
pub struct CompleterBase<'a> {
    /// Root of the command tree.
    pub root: &'a Node,

    /// Name the root command is invoked as.
    pub name: String,

    /// `slugify(name)`.
    pub root_slug: String,

    /// Prefix for every generated function and variable.
    pub slug: String,
}

impl<'a> CompleterBase<'a> {
    /// Resolves the display name and derives the identifier prefix.
    ///
    /// `name` overrides the root node's own name.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingRootName`] when neither `name` nor the
    /// root node provides a non-empty name.
    pub fn new(root: &'a Node, name: Option<&str>) -> Result<Self, GenerateError> {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(root.name.as_str());
        if name.is_empty() {
            return Err(GenerateError::MissingRootName);
        }

        let root_slug = slugify(name);
        let slug = format!("__{root_slug}__comp");
        Ok(Self {
            root,
            name: name.to_string(),
            root_slug,
            slug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_strings_primary_then_secondary() {
        let opt = CommandOption::flag(["-c", "--color"]).with_secondary(["--no-color"]);
        assert_eq!(opt_strings(&opt), vec!["-c", "--color", "--no-color"]);
    }

    #[test]
    fn test_effective_arity() {
        assert_eq!(effective_arity(&CommandOption::flag(["-q"])), 0);
        assert_eq!(effective_arity(&CommandOption::count(["-v"])), 0);
        assert_eq!(effective_arity(&CommandOption::value(["-o"])), 1);
        assert_eq!(
            effective_arity(&CommandOption::value(["--point"]).with_arity(2)),
            2
        );
    }

    #[test]
    fn test_counted_flag_ignores_declared_arity() {
        let opt = CommandOption::count(["-v"]).with_arity(3);
        assert_eq!(effective_arity(&opt), 0);
    }

    #[test]
    fn test_is_repeatable() {
        assert!(is_repeatable(&CommandOption::count(["-v"])));
        assert!(is_repeatable(&CommandOption::value(["--tag"]).multiple()));
        assert!(!is_repeatable(&CommandOption::value(["--tag"])));
        assert!(!is_repeatable(&CommandOption::flag(["-q"])));
    }

    #[test]
    fn test_slammable_short_single_value() {
        let opt = CommandOption::value(["-F", "--format"]);
        assert_eq!(slammable(&opt), vec!["-F"]);
    }

    #[test]
    fn test_slammable_requires_arity_one() {
        assert!(slammable(&CommandOption::flag(["-q"])).is_empty());
        assert!(slammable(&CommandOption::value(["-p"]).with_arity(2)).is_empty());
    }

    #[test]
    fn test_slammable_long_only_is_empty() {
        assert!(slammable(&CommandOption::value(["--format"])).is_empty());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("my-tool sub-cmd"), "my_tool_sub_cmd");
        assert_eq!(slugify("plain"), "plain");
    }

    #[test]
    fn test_base_uses_explicit_name() {
        let root = Node::group("cli");
        let base = CompleterBase::new(&root, Some("my-tool")).unwrap();
        assert_eq!(base.name, "my-tool");
        assert_eq!(base.root_slug, "my_tool");
        assert_eq!(base.slug, "__my_tool__comp");
    }

    #[test]
    fn test_base_falls_back_to_node_name() {
        let root = Node::group("tool");
        let base = CompleterBase::new(&root, None).unwrap();
        assert_eq!(base.name, "tool");
        assert_eq!(base.slug, "__tool__comp");
    }

    #[test]
    fn test_base_without_name_fails() {
        let root = Node::group("");
        assert_eq!(
            CompleterBase::new(&root, None).unwrap_err(),
            GenerateError::MissingRootName
        );
        assert_eq!(
            CompleterBase::new(&root, Some("")).unwrap_err(),
            GenerateError::MissingRootName
        );
    }
}
