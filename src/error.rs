//! Error types for fairgate.
//!
//! Uses thiserror for derive macros. The core coordination protocol has no
//! recoverable error class; everything here belongs to setup and to the
//! simulation driver around it.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for fairgate operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum FairgateError {
    /// User provided invalid arguments or an unusable file.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The coordination primitives could not be set up. Fatal.
    #[error("Initialization failed: {0}")]
    InitError(String),

    /// A trace file could not be written or read back.
    #[error("Trace error: {0}")]
    TraceError(String),

    /// A recorded trace violates a mutual exclusion or liveness property.
    #[error("Verification failed: {0}")]
    VerificationError(String),

    /// An actor thread terminated abnormally.
    #[error("Participant failed: {0}")]
    ParticipantError(String),
}

impl FairgateError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FairgateError::UserError(_) => exit_codes::USER_ERROR,
            FairgateError::ConfigError(_) => exit_codes::USER_ERROR,
            FairgateError::TraceError(_) => exit_codes::USER_ERROR,
            FairgateError::VerificationError(_) => exit_codes::VERIFICATION_FAILURE,
            FairgateError::InitError(_) => exit_codes::INIT_FAILURE,
            FairgateError::ParticipantError(_) => exit_codes::PARTICIPANT_FAILURE,
        }
    }
}

/// Result type alias for fairgate operations.
pub type Result<T> = std::result::Result<T, FairgateError>;
