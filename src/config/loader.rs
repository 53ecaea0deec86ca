//! Tree definition loader
//!
//! Loading pipeline:
//! 1. File size check against [`TreeLimits::max_tree_size`]
//! 2. UTF-8 BOM stripping
//! 3. YAML or JSON parsing, chosen by file extension
//! 4. Validation (all issues collected)
//! 5. Conversion into the command model

use std::path::{Path, PathBuf};

use crate::config::schema::CommandDefinition;
use crate::config::validation::Validator;
use crate::error::{ConfigError, ValidationIssue};
use crate::model::Node;

// ============================================================================
// Public API
// ============================================================================

/// Options for the tree loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits on file size and tree shape.
    pub limits: TreeLimits,

    /// Forces a format instead of guessing from the extension.
    pub format: Option<TreeFormat>,
}

/// Limits on tree definitions to prevent resource exhaustion.
#[derive(Debug, Clone)]
pub struct TreeLimits {
    /// Maximum definition file size in bytes.
    pub max_tree_size: usize,

    /// Maximum nesting depth below the root.
    pub max_depth: usize,

    /// Maximum number of commands, root included.
    pub max_nodes: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_tree_size: env_or("NATIVECOMP_MAX_TREE_SIZE", 10 * 1024 * 1024),
            max_depth: env_or("NATIVECOMP_MAX_DEPTH", 32),
            max_nodes: env_or("NATIVECOMP_MAX_NODES", 10_000),
        }
    }
}

/// Serialization format of a tree definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeFormat {
    /// YAML (also used for unknown extensions)
    #[default]
    Yaml,
    /// JSON
    Json,
}

impl TreeFormat {
    /// Guesses the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Result of loading a tree definition.
#[derive(Debug)]
pub struct LoadResult {
    /// The command tree built from it.
    pub root: Node,

    /// Validation warnings.
    pub warnings: Vec<ValidationIssue>,
}

/// Tree definition loader.
#[derive(Debug, Default)]
pub struct TreeLoader {
    options: LoaderOptions,
}

impl TreeLoader {
    /// Creates a new loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads, validates and converts a tree definition file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file exceeds the size limit
    /// - Parsing fails
    /// - Validation finds errors
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let max = self.options.limits.max_tree_size;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > max {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {max} bytes"),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let format = self
            .options
            .format
            .unwrap_or_else(|| TreeFormat::from_path(path));
        tracing::debug!(path = %path.display(), ?format, bytes = raw.len(), "loading tree definition");

        self.load_from_str(&raw, format, path)
    }

    /// Parses, validates and converts tree definition text.
    ///
    /// `source` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or validation finds errors.
    pub fn load_from_str(
        &self,
        content: &str,
        format: TreeFormat,
        source: &Path,
    ) -> Result<LoadResult, ConfigError> {
        let definition = parse(content, format, source)?;

        let result = Validator::new().validate(&definition, &self.options.limits);
        if result.has_errors() {
            return Err(ConfigError::ValidationError {
                path: source.display().to_string(),
                errors: result.errors,
            });
        }
        for issue in &result.warnings {
            tracing::warn!(source = %source.display(), %issue, "tree definition warning");
        }

        Ok(LoadResult {
            root: definition.to_root(),
            warnings: result.warnings,
        })
    }
}

/// Parses tree definition text without validating it.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] for malformed or empty input.
pub fn parse(
    content: &str,
    format: TreeFormat,
    source: &Path,
) -> Result<CommandDefinition, ConfigError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let parse_error = |line: Option<usize>, message: String| ConfigError::ParseError {
        path: PathBuf::from(source),
        line,
        message,
    };

    let blank = content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || (format == TreeFormat::Yaml && line.starts_with('#')));
    if blank {
        return Err(parse_error(None, "tree definition is empty".to_string()));
    }

    match format {
        TreeFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(content)
                .map_err(|e| parse_error(e.location().map(|l| l.line()), e.to_string()))?;
            if value.is_null() {
                return Err(parse_error(None, "tree definition is empty".to_string()));
            }
            serde_yaml::from_str(content)
                .map_err(|e| parse_error(e.location().map(|l| l.line()), e.to_string()))
        }
        TreeFormat::Json => serde_json::from_str(content)
            .map_err(|e| parse_error(Some(e.line()), e.to_string())),
    }
}

/// Parses an environment variable with a default value.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Tests
// ============================================================================
