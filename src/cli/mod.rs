//! CLI module for the espalier test model explorer
//!
//! ## Commands
//!
//! - `explore <archive>` - Build the test model from an archive and print it
//! - `vocab` - List the vocabulary registries
//!
//! Passing an archive with no subcommand is shorthand for `explore`.
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

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::version::ESPALIER_VERSION;

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

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The espalier test model explorer
#[derive(Parser, Debug)]
#[command(name = "espalier")]
#[command(version = ESPALIER_VERSION)]
#[command(about = "Builds test trees from code archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Archive to explore (default action when no subcommand given)
    #[arg(value_name = "ARCHIVE")]
    pub archive: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the test model from an archive and print it
    Explore {
        /// Code archive (JSON)
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,
        /// Emit the model as JSON instead of an indented tree
        #[arg(long)]
        json: bool,
        /// Suppress the annotation listing
        #[arg(long)]
        quiet: bool,
        /// Dump the lowered code graph instead of exploring (debug)
        #[arg(long = "debug-archive")]
        debug_archive: bool,
    },

    /// List the vocabulary: test kinds, metadata keys, annotation names
    Vocab,
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
    match cli.command {
        Some(Command::Explore {
            archive,
            json,
            quiet,
            debug_archive,
        }) => {
            if debug_archive {
                commands::dump_archive(&archive)
            } else {
                commands::explore_archive(&archive, json, quiet)
            }
        }
        Some(Command::Vocab) => commands::show_vocab(),
        None => {
            // Default: explore the archive if provided
            if let Some(archive) = cli.archive {
                commands::explore_archive(&archive, false, false)
            } else {
                // No command and no archive - nothing to do
                Err(CliError::new("", ExitCode::FAILURE))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
