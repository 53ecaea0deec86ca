//! `validate` command
//!
//! Checks tree definition files and reports every issue found, in human
//! or JSON form.

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::cli::commands::ensure_exists;
use crate::config::TreeLoader;
use crate::error::{ConfigError, NativeCompError, Severity, ValidationIssue};

/// Validation outcome for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The file checked.
    pub file: String,
    /// `true` when the file can be used for generation.
    pub valid: bool,
    /// Issues preventing generation.
    pub errors: Vec<ValidationIssue>,
    /// Issues that may degrade completion.
    pub warnings: Vec<ValidationIssue>,
}

/// Totals across all checked files.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    /// Files checked.
    pub total: usize,
    /// Files without errors.
    pub valid: usize,
    /// Files with errors.
    pub invalid: usize,
    /// Warnings across all files.
    pub warnings: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    files: &'a [FileReport],
    summary: Summary,
}

/// Validate tree definition files.
///
/// # Errors
///
/// Returns an I/O error for a missing file, and a validation error when
/// any file has errors (or warnings, with `--strict`).
pub fn run(args: &ValidateArgs) -> Result<(), NativeCompError> {
    let loader = TreeLoader::with_defaults();
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        ensure_exists(path)?;
        tracing::info!(file = %path.display(), "validating tree definition");
        reports.push(check_file(&loader, path));
    }

    let summary = summarize(&reports);
    match args.format {
        OutputFormat::Human => print!("{}", render_human(&reports, &summary)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&Report {
                files: &reports,
                summary,
            })?
        ),
    }

    let failing = reports
        .iter()
        .find(|r| !r.valid || (args.strict && !r.warnings.is_empty()));
    if let Some(report) = failing {
        let mut errors = report.errors.clone();
        if args.strict {
            errors.extend(report.warnings.iter().cloned());
        }
        return Err(ConfigError::ValidationError {
            path: report.file.clone(),
            errors,
        }
        .into());
    }
    Ok(())
}

/// Loads one file and turns any failure into a report entry.
pub fn check_file(loader: &TreeLoader, path: &std::path::Path) -> FileReport {
    let file = path.display().to_string();
    match loader.load(path) {
        Ok(loaded) => FileReport {
            file,
            valid: true,
            errors: Vec::new(),
            warnings: loaded.warnings,
        },
        Err(ConfigError::ValidationError { errors, .. }) => FileReport {
            file,
            valid: false,
            errors,
            warnings: Vec::new(),
        },
        Err(other) => FileReport {
            file,
            valid: false,
            errors: vec![ValidationIssue {
                path: String::new(),
                message: other.to_string(),
                severity: Severity::Error,
            }],
            warnings: Vec::new(),
        },
    }
}

fn summarize(reports: &[FileReport]) -> Summary {
    let valid = reports.iter().filter(|r| r.valid).count();
    Summary {
        total: reports.len(),
        valid,
        invalid: reports.len() - valid,
        warnings: reports.iter().map(|r| r.warnings.len()).sum(),
    }
}

fn render_human(reports: &[FileReport], summary: &Summary) -> String {
    let mut out = String::new();
    for report in reports {
        let status = if report.valid { "ok" } else { "invalid" };
        out.push_str(&format!("{}: {status}\n", report.file));
        for issue in report.errors.iter().chain(&report.warnings) {
            out.push_str(&format!("  {issue}\n"));
        }
    }
    out.push_str(&format!(
        "{} file(s) checked: {} valid, {} invalid, {} warning(s)\n",
        summary.total, summary.valid, summary.invalid, summary.warnings
    ));
    out
}
