//! Command-line interface for Reforge.
//!
//! This module handles argument parsing and JSON payloads only.
//! Refactoring logic lives in the engine.

use crate::config::EngineConfig;
use crate::error::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Reforge: text-level refactoring for Python source.
#[derive(Parser, Debug)]
#[command(name = "reforge")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_required = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON engine configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Indentation width (spaces) for extracted function bodies.
    #[arg(long, global = true, value_name = "N")]
    pub indent_width: Option<usize>,

    /// Column slack for `available`.
    #[arg(long, global = true, value_name = "N")]
    pub slack: Option<usize>,
}

impl Cli {
    /// Build the engine configuration: file first, then flag overrides.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(width) = self.indent_width {
            config = config.with_indent_width(width);
        }
        if let Some(slack) = self.slack {
            config = config.with_availability_slack(slack);
        }
        Ok(config)
    }
}

/// Available Reforge commands.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Extract a line range into a new function.
    Extract {
        /// Path to the source file.
        #[arg(short, long)]
        file: PathBuf,

        /// Name of the new function.
        #[arg(short, long)]
        name: String,

        /// First line to extract (1-based).
        #[arg(long, allow_negative_numbers = true)]
        start: i64,

        /// Last line to extract (1-based, inclusive).
        #[arg(long, allow_negative_numbers = true)]
        end: i64,

        /// Parameter of the new function (repeatable).
        #[arg(short, long = "param", value_name = "NAME")]
        params: Vec<String>,

        /// Write the result back to the file.
        #[arg(long)]
        write: bool,
    },

    /// Rename every standalone occurrence of a name.
    Rename {
        /// Path to the source file.
        #[arg(short, long)]
        file: PathBuf,

        /// Current name.
        #[arg(long)]
        from: String,

        /// Replacement name.
        #[arg(long)]
        to: String,

        /// Write the result back to the file.
        #[arg(long)]
        write: bool,
    },

    /// Move a function or class to another file.
    Move {
        /// Path to the source file.
        #[arg(short, long)]
        file: PathBuf,

        /// Function or class to move.
        #[arg(short, long)]
        symbol: String,

        /// Target file, relative to the source file's directory.
        #[arg(short, long)]
        target: String,

        /// Write both files (the moved code is appended to the target).
        #[arg(long)]
        write: bool,
    },

    /// List refactorings available at a position.
    Available {
        /// Path to the source file.
        #[arg(short, long)]
        file: PathBuf,

        /// Line (1-based).
        #[arg(short, long)]
        line: usize,

        /// Column (0-based).
        #[arg(short, long)]
        col: usize,
    },

    /// Dump the definition/reference index.
    Symbols {
        /// Path to the source file.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Execute a multi-step refactoring plan.
    Plan {
        /// Path to the plan.json file.
        #[arg(short, long)]
        file: PathBuf,

        /// Source file the plan operates on.
        #[arg(short, long)]
        source: PathBuf,

        /// Write the final source and moved code to disk.
        #[arg(long)]
        write: bool,
    },
}

/// Parse command-line arguments.
///
/// Exits the process on invalid arguments.
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// JSON success payload for CLI responses.
#[derive(Serialize)]
pub struct CliSuccessPayload {
    /// Status indicator ("ok").
    pub status: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CliSuccessPayload {
    /// Construct a payload with structured data.
    pub fn with_data(message: String, data: Value) -> Self {
        Self {
            status: "ok",
            message,
            data: Some(data),
        }
    }
}

/// JSON error payload for CLI responses.
#[derive(Serialize)]
pub struct CliErrorPayload {
    /// Status indicator ("error").
    pub status: &'static str,
    /// Structured error details.
    pub error: ErrorDetails,
}

/// Details for a CLI error payload.
#[derive(Serialize)]
pub struct ErrorDetails {
    /// Error kind identifier (SymbolNotFound, etc.).
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional file context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Optional hint for remediation steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CliErrorPayload {
    /// Build payload from a RefactorError instance.
    pub fn from_error(error: &crate::RefactorError) -> Self {
        CliErrorPayload {
            status: "error",
            error: ErrorDetails {
                kind: error.kind(),
                message: error.to_string(),
                file: error
                    .file_path()
                    .map(|path| path.to_string_lossy().to_string()),
                hint: error.hint().map(|h| h.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename_command() {
        let cli = Cli::try_parse_from([
            "reforge", "rename", "--file", "a.py", "--from", "x", "--to", "y",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Rename { ref from, .. } if from == "x"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_extract_accepts_negative_lines_and_params() {
        let cli = Cli::try_parse_from([
            "reforge", "extract", "-f", "a.py", "-n", "helper", "--start", "-1", "--end", "2",
            "--param", "a", "--param", "b",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract { start, params, .. } => {
                assert_eq!(start, -1);
                assert_eq!(params, vec!["a", "b"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_flag_overrides_config() {
        let cli = Cli::try_parse_from([
            "reforge", "--indent-width", "2", "symbols", "--file", "a.py",
        ])
        .unwrap();
        let config = cli.engine_config().unwrap();
        assert_eq!(config.indent_unit, "  ");
    }

    #[test]
    fn test_error_payload_shape() {
        let payload = CliErrorPayload::from_error(&crate::RefactorError::SymbolNotFound("f".into()));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"]["kind"], "SymbolNotFound");
        assert!(json["error"]["hint"].is_string());
    }
}
