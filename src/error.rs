//! Error types for `nativecomp`
//!
//! This module provides the error hierarchy for tree loading, validation
//! and script generation, together with the process exit codes the CLI maps
//! them to.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `nativecomp` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Tree definition error (invalid YAML/JSON, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Script generation error
    pub const GENERATE_ERROR: i32 = 10;

    /// Usage error (invalid arguments, malformed command line)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `nativecomp` operations.
///
/// Aggregates all domain-specific errors and provides a unified interface
/// for exit code mapping.
#[derive(Debug, Error)]
pub enum NativeCompError {
    /// Tree definition loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Script generation error
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Invalid command-line usage
    #[error("usage error: {0}")]
    Usage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl NativeCompError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::Generate(_) => ExitCode::GENERATE_ERROR,
            Self::Usage(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Generation Errors
// ============================================================================

/// Errors raised before any script text is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// Neither an explicit display name nor a root node name was provided.
    #[error("cannot generate completions unless the command name is set")]
    MissingRootName,
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Tree definition loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML or JSON parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the tree definition file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Tree definition validation failed
    #[error("validation failed for {path}")]
    ValidationError {
        /// Path to the tree definition file
        path: String,
        /// List of validation issues found
        errors: Vec<ValidationIssue>,
    },

    /// Referenced file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Validation Types
// ============================================================================

/// A single validation issue found while checking a command tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Path to the problematic field (e.g., "commands.sub.options[0].flags[1]")
    pub path: String,
    /// Description of the validation issue
    pub message: String,
    /// Severity level of the issue
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.message, self.path)
    }
}

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - the tree cannot be used to generate completions
    Error,
    /// Warning - generation works but completion may misbehave
    Warning,
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `nativecomp` operations.
pub type Result<T> = std::result::Result<T, NativeCompError>;

// ============================================================================
// Tests
// ============================================================================
