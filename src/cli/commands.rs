//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::steps::{StepConfig, rewrite_diff, rewrite_source};

use super::{CliError, CliResult, ExitCode, StepError};

/// Directory scanned when none is given.
pub const DEFAULT_TEST_DIR: &str = "src/test/java/api";

/// File name suffix of test classes.
pub const DEFAULT_SUFFIX: &str = "Test.java";

// ============================================================================
// Discovery
// ============================================================================

/// Where to look for test classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Directory whose direct children are scanned (not recursive)
    pub root: PathBuf,
    /// Required file name suffix
    pub suffix: String,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_TEST_DIR),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// List the test classes directly inside `options.root`, sorted by path.
///
/// A missing directory yields no files. Hidden files are skipped.
pub fn discover_test_files(options: &DiscoveryOptions) -> Result<Vec<PathBuf>, StepError> {
    let root = &options.root;
    if !root.is_dir() {
        tracing::debug!(root = %root.display(), "test directory not found");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(root).map_err(|source| StepError::Discovery {
        path: root.clone(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_suffix(path, &options.suffix))
        .collect();
    files.sort();
    Ok(files)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| !name.starts_with('.') && name.ends_with(suffix))
}

// ============================================================================
// Per-file processing
// ============================================================================

/// What a run does with rewritten files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Overwrite files in place
    Write,
    /// Only report which files would change
    Check,
    /// Print a diff of the changes
    Diff,
}

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Methods wrapped in a step
    pub methods_wrapped: usize,
    /// Whether the rewritten text differs from the file
    pub changed: bool,
    /// Line diff, only computed in `RunMode::Diff`
    pub diff: Option<String>,
}

/// Rewrite a single test file.
///
/// In `RunMode::Write` a changed file is overwritten in full. The write is not atomic.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn process_file(path: &Path, config: &StepConfig, mode: RunMode) -> Result<FileStatus, StepError> {
    let io_error = |source| StepError::Io {
        path: path.to_path_buf(),
        source,
    };

    let source = fs::read_to_string(path).map_err(io_error)?;
    let outcome = rewrite_source(&source, config);
    let changed = outcome.changed(&source);

    let diff = match mode {
        RunMode::Write if changed => {
            fs::write(path, &outcome.text).map_err(io_error)?;
            None
        }
        RunMode::Diff if changed => rewrite_diff(&source, config),
        _ => None,
    };

    tracing::debug!(methods = outcome.methods_wrapped, changed, "processed file");

    Ok(FileStatus {
        methods_wrapped: outcome.methods_wrapped,
        changed,
        diff,
    })
}

// ============================================================================
// Batch driver
// ============================================================================

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files handed to the processor, successful or not
    pub attempted: usize,
    /// Files whose content changed (or would change)
    pub changed: usize,
    /// Methods wrapped across all files
    pub methods_wrapped: usize,
    /// Files that failed
    pub errors: usize,
}

/// Process every file, reporting failures and moving on.
pub fn run_batch(files: &[PathBuf], config: &StepConfig, mode: RunMode) -> RunSummary {
    let mut summary = RunSummary::default();

    for file_path in files {
        summary.attempted += 1;

        match process_file(file_path, config, mode) {
            Ok(status) => {
                summary.methods_wrapped += status.methods_wrapped;
                if status.changed {
                    summary.changed += 1;
                }

                match mode {
                    RunMode::Write => {
                        println!(
                            "Processed: {} ({} method(s) wrapped)",
                            file_path.display(),
                            status.methods_wrapped
                        );
                    }
                    RunMode::Check => {
                        if status.changed {
                            println!("Would rewrite: {}", file_path.display());
                        }
                    }
                    RunMode::Diff => {
                        if let Some(diff) = status.diff {
                            println!("--- {}", file_path.display());
                            print!("{}", diff);
                            println!();
                        }
                    }
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "skipping file");
                eprintln!("{}", error_line(&e));
                summary.errors += 1;
            }
        }
    }

    summary
}

/// Line printed after discovery.
pub fn found_line(count: usize) -> String {
    format!("Found {count} API test file(s)")
}

/// Line printed to stderr for a file that failed.
pub fn error_line(err: &StepError) -> String {
    format!("Error processing {}: {err}", err.path().display())
}

/// Wrap the test methods of every discovered test class in Allure steps.
///
/// Per-file errors are reported and do not fail the run. In check mode the run
/// fails when any file would change.
pub fn add_steps(options: &DiscoveryOptions, config: &StepConfig, mode: RunMode) -> CliResult<ExitCode> {
    let files = discover_test_files(options)?;
    println!("{}", found_line(files.len()));

    let summary = run_batch(&files, config, mode);

    match mode {
        RunMode::Write => {
            println!(
                "\n✓ Done: {} file(s) processed, {} updated, {} error(s)",
                summary.attempted, summary.changed, summary.errors
            );
        }
        RunMode::Check | RunMode::Diff => {
            if mode == RunMode::Check && summary.changed > 0 {
                return Err(CliError::failure(format!(
                    "\n{} file(s) would be rewritten",
                    summary.changed
                )));
            }
            println!(
                "\n✓ {} file(s) checked, {} to rewrite, {} error(s)",
                summary.attempted, summary.changed, summary.errors
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
