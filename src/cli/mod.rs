//! CLI module for the facade generator
//!
//! ## Commands
//!
//! - `generate <path>...` - Generate facade sources into an output directory
//! - `emit <file>...` - Print generated sources to stdout
//! - `marker` - Print the marker interface source
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

use crate::generator::GeneratorConfig;

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

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Facade source generator for C#
#[derive(Parser, Debug)]
#[command(name = "facadegen")]
#[command(version = VERSION)]
#[command(about = "Generate forwarding facades for partial C# types", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE")]
    pub parse_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate facade sources for every marked partial type
    Generate {
        /// Source files or directories to scan for .cs files
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        /// Output directory
        #[arg(short = 'o', long = "output", value_name = "DIR", default_value = "Generated")]
        output: PathBuf,
        /// Check that generated files are up to date without writing
        #[arg(long)]
        check: bool,
        /// Explain why marked types produced no source
        #[arg(long)]
        explain: bool,
        #[command(flatten)]
        options: EmitOptions,
    },

    /// Print generated sources to stdout
    Emit {
        /// Source files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        #[command(flatten)]
        options: EmitOptions,
    },

    /// Print the marker interface source
    Marker,
}

/// Flags shared by the generating commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EmitOptions {
    /// Process candidates in parallel
    #[arg(long)]
    pub parallel: bool,
    /// Omit `#nullable enable` from generated files
    #[arg(long = "no-nullable")]
    pub no_nullable: bool,
    /// Name of the partial accessor method
    #[arg(long = "accessor", value_name = "NAME")]
    pub accessor: Option<String>,
}

impl EmitOptions {
    pub fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new()
            .with_parallel(self.parallel)
            .with_nullable_directive(!self.no_nullable);
        if let Some(name) = &self.accessor {
            config = config.with_accessor_name(name.clone());
        }
        config
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
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file.to_string_lossy());
    }

    match cli.command {
        Some(Command::Generate {
            paths,
            output,
            check,
            explain,
            options,
        }) => {
            let config = options.config().with_report_skips(explain);
            let request = commands::GenerateRequest { paths, output, check, explain, config };
            commands::generate(&request)
        }
        Some(Command::Emit { paths, options }) => commands::emit(&paths, options.config()),
        Some(Command::Marker) => commands::print_marker(),
        // No command - show help
        None => Err(CliError::failure("No command given; run `facadegen --help` for usage")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from(["facadegen", "generate", "src", "lib/Api.cs", "-o", "out", "--check"]).unwrap();
        if let Some(Command::Generate { paths, output, check, explain, .. }) = cli.command {
            assert_eq!(paths.len(), 2);
            assert_eq!(output, PathBuf::from("out"));
            assert!(check);
            assert!(!explain);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_generate_default_output() {
        let cli = Cli::try_parse_from(["facadegen", "generate", "."]).unwrap();
        if let Some(Command::Generate { output, .. }) = cli.command {
            assert_eq!(output, PathBuf::from("Generated"));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_generate_requires_path() {
        assert!(Cli::try_parse_from(["facadegen", "generate"]).is_err());
    }

    #[test]
    fn test_cli_parse_emit_options() {
        let cli = Cli::try_parse_from([
            "facadegen",
            "emit",
            "Api.cs",
            "--parallel",
            "--no-nullable",
            "--accessor",
            "Inner",
        ])
        .unwrap();
        if let Some(Command::Emit { options, .. }) = cli.command {
            let config = options.config();
            assert!(config.parallel);
            assert!(!config.nullable_directive);
            assert_eq!(config.accessor_name, "Inner");
        } else {
            panic!("Expected Emit command");
        }
    }

    #[test]
    fn test_cli_parse_marker() {
        let cli = Cli::try_parse_from(["facadegen", "marker"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Marker)));
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["facadegen", "--lex", "Api.cs"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["facadegen", "--parse", "Api.cs"]).unwrap();
        assert!(cli.parse_file.is_some());
    }

    #[test]
    fn test_default_emit_options_match_generator_defaults() {
        assert_eq!(EmitOptions::default().config(), GeneratorConfig::default());
    }
}
