//! `regform validate` command - Validate submission files

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::helpers::Session;
use crate::cli::view::render_report;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Field, FormValues, ValidationReport};
use crate::schema::{SchemaKind, ValidationError, Validator};

const SUBMISSION_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Submission files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Continue validation after first invalid file
    #[arg(long)]
    pub keep_going: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

/// Machine-readable result for one file
#[derive(Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    #[serde(rename = "fieldErrors", skip_serializing_if = "Option::is_none")]
    field_errors: Option<BTreeMap<Field, String>>,
    #[serde(rename = "schemaErrors", skip_serializing_if = "Vec::is_empty")]
    schema_errors: Vec<String>,
}

/// What happened to one file
enum FileOutcome {
    Valid,
    Invalid(ValidationReport),
    Malformed(ValidationError),
    Unreadable(String),
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::load(global)?;
    let validator = Validator::default();
    let format = global
        .format
        .resolve(session.config.default_format.as_deref());
    let machine = matches!(format, OutputFormat::Json | OutputFormat::Yaml);

    let files = expand_paths(&args.paths);
    if files.is_empty() {
        return Err(miette::miette!("No submission files found"));
    }

    let mut stats = ValidationStats::default();
    let mut reports = Vec::new();

    if !machine && !global.quiet {
        println!(
            "{} Validating {} submission(s)...\n",
            style("→").blue(),
            files.len()
        );
    }

    for path in &files {
        stats.files_checked += 1;
        let outcome = check_file(path, &validator, &session);

        let failed = !matches!(outcome, FileOutcome::Valid);
        if failed {
            stats.files_failed += 1;
        } else {
            stats.files_passed += 1;
        }

        if machine {
            reports.push(file_report(path, &outcome));
        } else {
            print_outcome(path, outcome, &args, &mut stats);
        }

        if failed && !args.keep_going {
            break;
        }
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&reports).into_diagnostic()?);
        }
        _ => print_summary(&stats, global.quiet),
    }

    match stats.files_failed {
        0 => Ok(()),
        1 => Err(miette::miette!("Validation failed: 1 submission has errors")),
        n => Err(miette::miette!(
            "Validation failed: {} submissions have errors",
            n
        )),
    }
}

fn check_file(path: &Path, validator: &Validator, session: &Session) -> FileOutcome {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return FileOutcome::Unreadable(e.to_string()),
    };
    let filename = path.file_name().unwrap_or_default().to_string_lossy();

    let document = match validator.check(&content, &filename, SchemaKind::Submission) {
        Ok(doc) => doc,
        Err(e) => return FileOutcome::Malformed(e),
    };

    let values: FormValues = match serde_json::from_value(document) {
        Ok(v) => v,
        Err(e) => return FileOutcome::Unreadable(e.to_string()),
    };

    let report = session.rules.validate(&values, &session.table);
    log::debug!("{}: {} field error(s)", path.display(), report.error_count());
    if report.valid {
        FileOutcome::Valid
    } else {
        FileOutcome::Invalid(report)
    }
}

fn file_report(path: &Path, outcome: &FileOutcome) -> FileReport {
    let file = path.display().to_string();
    match outcome {
        FileOutcome::Valid => FileReport {
            file,
            valid: true,
            field_errors: None,
            schema_errors: Vec::new(),
        },
        FileOutcome::Invalid(report) => FileReport {
            file,
            valid: false,
            field_errors: Some(report.field_errors.clone()),
            schema_errors: Vec::new(),
        },
        FileOutcome::Malformed(e) => FileReport {
            file,
            valid: false,
            field_errors: None,
            schema_errors: e.violations().iter().map(|v| v.message().to_string()).collect(),
        },
        FileOutcome::Unreadable(message) => FileReport {
            file,
            valid: false,
            field_errors: None,
            schema_errors: vec![message.clone()],
        },
    }
}

fn print_outcome(path: &Path, outcome: FileOutcome, args: &ValidateArgs, stats: &mut ValidationStats) {
    match outcome {
        FileOutcome::Valid => {
            if !args.summary {
                println!("{} {}", style("✓").green(), path.display());
            }
        }
        FileOutcome::Invalid(report) => {
            stats.total_errors += report.error_count();
            if !args.summary {
                println!(
                    "{} {} - {} error(s)",
                    style("✗").red(),
                    path.display(),
                    report.error_count()
                );
                print!("{}", render_report(&report));
            }
        }
        FileOutcome::Malformed(e) => {
            stats.total_errors += e.violation_count();
            if !args.summary {
                println!(
                    "{} {} - {} schema error(s)",
                    style("✗").red(),
                    path.display(),
                    e.violation_count()
                );
                let report = miette::Report::new(e);
                println!("{:?}", report);
            }
        }
        FileOutcome::Unreadable(message) => {
            stats.total_errors += 1;
            if !args.summary {
                println!("{} {} - {}", style("✗").red(), path.display(), message);
            }
        }
    }
}

fn print_summary(stats: &ValidationStats, quiet: bool) {
    if quiet {
        return;
    }
    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    println!();

    if stats.files_failed == 0 {
        println!("{} All submissions passed validation!", style("✓").green().bold());
    }
}

fn is_submission_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUBMISSION_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expand directories to the submission files they contain
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_entry(|e| {
                    // Skip hidden directories (and the local config file)
                    let name = e.file_name().to_string_lossy();
                    !name.starts_with('.') || e.depth() == 0
                })
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                if is_submission_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            // explicit files are checked even when missing, so the error is reported
            files.push(path.clone());
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_expand_paths_filters_extensions() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.yaml"), "").unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(tmp.path().join(".hidden")).unwrap();
        fs::write(tmp.path().join(".hidden/c.yaml"), "").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/d.YML"), "").unwrap();

        let files = expand_paths(&[tmp.path().to_path_buf()]);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.json", "d.YML"]);
    }

    #[test]
    fn test_expand_paths_keeps_explicit_missing_file() {
        let files = expand_paths(&[PathBuf::from("/nonexistent/form.yaml")]);
        assert_eq!(files.len(), 1);
    }
}
