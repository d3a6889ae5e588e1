//! Error types for parameter registration.
//!
//! Only registration can fail; the per-tick update and pulse dispatch never
//! report errors (an unmatched pulse name is a documented no-op, not a
//! fault).

use thiserror::Error;

/// Errors surfaced while registering parameters.
#[derive(Debug, Error)]
pub enum ParamError {
    /// `append_*` was called before `init` bound a parameter manager.
    #[error("parameter manager is not initialized")]
    NotInitialized,

    /// The host refused to register the parameter. The message is the
    /// host's own wording, passed through untranslated.
    #[error("host rejected parameter {name:?}: {message}")]
    Rejected {
        /// Name of the parameter the host refused.
        name: String,
        /// The host's reason.
        message: String,
    },
}

/// Result type for registration calls.
pub type ParamResult<T> = Result<T, ParamError>;
