//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum DriveError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// A pixel buffer that does not describe an RGB image.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// An action space that cannot be sampled.
    #[error("Unsupported action space: {0}")]
    UnsupportedSpace(String),

    /// The environment was used after [`Env::close`](crate::Env::close).
    #[error("Environment is already closed")]
    EnvClosed,
}
