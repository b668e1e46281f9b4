//! Error types for the hasp CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for hasp operations.
///
/// Each variant maps to a specific exit code. Individual lock/unlock failures
/// inside a bulk operation are not errors; they are collected into the bulk
/// outcome and only the aggregate surfaces as `ProtectFailure`.
#[derive(Error, Debug)]
pub enum HaspError {
    /// User provided invalid arguments, bad credentials, or the state
    /// directory is not initialized.
    #[error("{0}")]
    UserError(String),

    /// An OS-level read or write failed (workspace root, record file).
    #[error("I/O failure: {0}")]
    Io(String),

    /// The persisted account record does not have the required three fields.
    #[error("malformed account record: {0}")]
    MalformedRecord(String),

    /// A bulk lock/unlock operation completed with per-file failures.
    #[error("protection failure: {0}")]
    ProtectFailure(String),
}

impl HaspError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            HaspError::UserError(_) => exit_codes::USER_ERROR,
            HaspError::Io(_) => exit_codes::IO_FAILURE,
            HaspError::MalformedRecord(_) => exit_codes::MALFORMED_RECORD,
            HaspError::ProtectFailure(_) => exit_codes::PROTECT_FAILURE,
        }
    }
}

/// Result type alias for hasp operations.
pub type Result<T> = std::result::Result<T, HaspError>;
