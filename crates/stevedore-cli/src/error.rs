//! CLI error types and the failure normalization point.

use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use crate::output::OutputFormat;

/// CLI-specific errors.
///
/// `InvalidArgument` is reported before any connection is made; `Connection`
/// covers resolution and establishment failures; `Remote` and `Protocol`
/// cover failures of an established invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Connection establishment failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// The service rejected or failed an operation.
    #[error("service error: {message} (code {code})")]
    Remote {
        /// Service error code.
        code: u32,
        /// Human-readable cause.
        message: String,
    },

    /// Unexpected or undecodable response.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failure document emitted on the primary stream in structured mode.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Always true.
    pub error: bool,
    /// Description of the attempted operation.
    pub action: String,
    /// Underlying cause.
    pub message: String,
}

/// The single point where failure becomes user-visible.
///
/// Structured sessions get one JSON document on stdout; human sessions get a
/// two-line diagnostic on stderr. Callers exit 1 afterwards.
pub fn report_failure(format: &OutputFormat, action: &str, err: &CliError) {
    if format.is_json() {
        let report = ErrorReport {
            error: true,
            action: action.to_string(),
            message: err.to_string(),
        };
        let mut stdout = io::stdout().lock();
        if serde_json::to_writer_pretty(&mut stdout, &report).is_ok() {
            let _ = writeln!(stdout);
        }
    } else {
        eprintln!("Error: {action} failed");
        eprintln!("  {err}");
    }
}
