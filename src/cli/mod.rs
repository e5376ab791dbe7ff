//! CLI module for stepwrap
//!
//! Running `stepwrap` without arguments wraps every test method in
//! `src/test/java/api/*Test.java` in an Allure step and rewrites the files in place.
//!
//! ## Modules
//!
//! - `commands` - Discovery, per-file processing and the batch driver
//! - `errors` - `StepError` for discovery and file I/O
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod errors;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::steps::StepConfig;
use commands::{DEFAULT_SUFFIX, DEFAULT_TEST_DIR, DiscoveryOptions, RunMode};

pub use errors::StepError;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = crate::version::STEPWRAP_VERSION;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Wrap Java API test methods in named Allure steps
#[derive(Parser, Debug)]
#[command(name = "stepwrap")]
#[command(version = VERSION)]
#[command(about = "Wrap Java API test methods in named Allure steps", long_about = None)]
pub struct Cli {
    /// Directory holding the API test classes
    #[arg(value_name = "DIR", default_value = DEFAULT_TEST_DIR)]
    pub dir: PathBuf,

    /// File name suffix of test classes
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Report files that would change without modifying them
    #[arg(long, conflicts_with = "diff")]
    pub check: bool,

    /// Show the changes without modifying files
    #[arg(long)]
    pub diff: bool,

    /// Spaces per indentation level
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub indent: usize,

    /// Name of the step function to call
    #[arg(long = "step-fn", value_name = "NAME", default_value = "Step")]
    pub step_fn: String,
}

impl Cli {
    fn mode(&self) -> RunMode {
        if self.check {
            RunMode::Check
        } else if self.diff {
            RunMode::Diff
        } else {
            RunMode::Write
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let mode = cli.mode();
    let config = StepConfig::new()
        .with_indent_width(cli.indent)
        .with_step_function(cli.step_fn);
    let options = DiscoveryOptions {
        root: cli.dir,
        suffix: cli.suffix,
    };
    commands::add_steps(&options, &config, mode)
}

// ============================================================================
// Tests
// ============================================================================
