//! Tree definition validation
//!
//! Semantic checks on a parsed [`CommandDefinition`], run before it is
//! converted into the model. Validation collects ALL issues rather than
//! stopping at the first one.

use std::collections::HashSet;

use crate::config::loader::TreeLimits;
use crate::config::schema::{ArgumentDefinition, CommandDefinition, Nargs, OptionDefinition};
use crate::error::{Severity, ValidationIssue};
use crate::model::OptionKind;

// ============================================================================
// Public API
// ============================================================================

/// Result of tree validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent generation).
    pub errors: Vec<ValidationIssue>,

    /// Validation warnings (generation works, completion may misbehave).
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tree definition validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
    nodes: usize,
    depth_reported: bool,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a tree definition and returns the result.
    pub fn validate(&mut self, root: &CommandDefinition, limits: &TreeLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();
        self.nodes = 0;
        self.depth_reported = false;

        if let Some(name) = &root.name
            && name.chars().any(char::is_whitespace)
        {
            self.add_error("name", "command name cannot contain whitespace");
        }
        self.validate_command(root, "", 0, limits);

        if self.nodes > limits.max_nodes {
            self.add_error(
                "",
                &format!(
                    "tree has {} commands, more than the limit of {}",
                    self.nodes, limits.max_nodes
                ),
            );
        }

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    fn validate_command(
        &mut self,
        command: &CommandDefinition,
        path: &str,
        depth: usize,
        limits: &TreeLimits,
    ) {
        self.nodes += 1;
        if depth > limits.max_depth && !self.depth_reported {
            self.depth_reported = true;
            self.add_error(
                path,
                &format!("command nesting exceeds the depth limit of {}", limits.max_depth),
            );
        }

        self.validate_options(&command.options, path);
        self.validate_arguments(&command.arguments, path);

        for (name, child) in command.subcommands() {
            let child_path = join(path, &format!("commands.{name}"));
            if name.trim().is_empty() {
                self.add_error(&child_path, "command name cannot be empty");
            } else if name.chars().any(char::is_whitespace) {
                self.add_error(&child_path, "command name cannot contain whitespace");
            }
            if let Some(declared) = &child.name
                && declared != name
            {
                self.add_warning(
                    &join(&child_path, "name"),
                    &format!("name '{declared}' is ignored; the command is named '{name}'"),
                );
            }
            self.validate_command(child, &child_path, depth + 1, limits);
        }
    }

    // ========================================================================
    // Options
    // ========================================================================

    fn validate_options(&mut self, options: &[OptionDefinition], path: &str) {
        let mut seen: HashSet<&str> = HashSet::new();

        for (i, option) in options.iter().enumerate() {
            let option_path = join(path, &format!("options[{i}]"));

            if option.spellings().next().is_none() {
                self.add_error(&option_path, "option has no flags");
            }

            let spellings = option
                .flags
                .iter()
                .enumerate()
                .map(|(j, f)| (format!("flags[{j}]"), f))
                .chain(
                    option
                        .secondary_flags
                        .iter()
                        .enumerate()
                        .map(|(j, f)| (format!("secondary_flags[{j}]"), f)),
                );
            for (field, flag) in spellings {
                let flag_path = join(&option_path, &field);
                if !flag.starts_with('-') {
                    self.add_error(
                        &flag_path,
                        &format!("flag '{flag}' must start with '-'"),
                    );
                }
                if flag.chars().any(char::is_whitespace) {
                    self.add_error(
                        &flag_path,
                        &format!("flag '{flag}' cannot contain whitespace"),
                    );
                }
                if !seen.insert(flag.as_str()) {
                    self.add_error(
                        &flag_path,
                        &format!("flag '{flag}' is declared more than once on this command"),
                    );
                }
            }

            if let Some(choices) = &option.choices {
                self.validate_choices(option, choices, &option_path);
            }
        }
    }

    fn validate_choices(&mut self, option: &OptionDefinition, choices: &[String], path: &str) {
        let takes_value = option.kind == OptionKind::Value && option.nargs > 0;
        if !takes_value {
            self.add_error(
                &join(path, "choices"),
                "choices require an option that takes a value",
            );
        }
        if choices.is_empty() {
            self.add_warning(
                &join(path, "choices"),
                "empty choices list offers no completions",
            );
        }
        for (k, choice) in choices.iter().enumerate() {
            if choice.chars().any(char::is_whitespace) {
                self.add_warning(
                    &join(path, &format!("choices[{k}]")),
                    &format!("choice '{choice}' contains whitespace and will be split by bash"),
                );
            }
        }
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    fn validate_arguments(&mut self, arguments: &[ArgumentDefinition], path: &str) {
        let last = arguments.len().saturating_sub(1);
        for (i, argument) in arguments.iter().enumerate() {
            let argument_path = join(path, &format!("arguments[{i}]"));
            if argument.name.trim().is_empty() {
                self.add_error(&argument_path, "argument name cannot be empty");
            }
            if argument.nargs == Nargs::Unbounded && i != last {
                self.add_warning(
                    &argument_path,
                    "unbounded argument is not the last argument; later arguments are unreachable",
                );
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn add_error(&mut self, path: &str, message: &str) {
        self.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
        });
    }

    fn add_warning(&mut self, path: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
        });
    }
}

/// Joins a dotted field path.
fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

// ============================================================================
// Tests
// ============================================================================
