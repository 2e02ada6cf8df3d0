//! Error types for bar.
//!
//! Only the outer layers fail: grammar loading, configuration and CLI I/O.
//! The grammar accessors, parser, resolver and renderer are total functions
//! and never produce a `BarError`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for bar operations.
#[derive(Error, Debug)]
pub enum BarError {
    /// User provided invalid arguments or input that could not be read.
    #[error("{0}")]
    UserError(String),

    /// Configuration file could not be read, parsed or validated.
    #[error("config error: {0}")]
    Config(String),

    /// Grammar document could not be loaded.
    ///
    /// `status` is HTTP-like: 404 missing, 403 forbidden, 422 malformed,
    /// 500 any other I/O failure.
    #[error("failed to load grammar ({status}): {message}")]
    GrammarLoad { status: u16, message: String },

    /// Grammar loaded but failed a structural check.
    #[error("grammar validation failed: {0}")]
    Validation(String),

    /// Selection contains conflicts and strict mode is on.
    #[error("conflicting tokens selected: {0}")]
    Conflicts(String),
}

impl BarError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BarError::UserError(_) => exit_codes::USER_ERROR,
            BarError::Config(_) => exit_codes::USER_ERROR,
            BarError::GrammarLoad { .. } => exit_codes::GRAMMAR_FAILURE,
            BarError::Validation(_) => exit_codes::GRAMMAR_FAILURE,
            BarError::Conflicts(_) => exit_codes::CONFLICTS_FOUND,
        }
    }

    /// Build a grammar load error from an I/O failure on `path`.
    pub fn grammar_io(path: &std::path::Path, err: &std::io::Error) -> Self {
        let status = match err.kind() {
            std::io::ErrorKind::NotFound => 404,
            std::io::ErrorKind::PermissionDenied => 403,
            _ => 500,
        };
        BarError::GrammarLoad {
            status,
            message: format!("'{}': {}", path.display(), err),
        }
    }
}

/// Result type alias for bar operations.
pub type Result<T> = std::result::Result<T, BarError>;
