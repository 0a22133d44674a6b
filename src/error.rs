use thiserror::Error as ThisError;

/// Errors produced by the fallible helpers of the logger.
///
/// The emit path never surfaces these to callers; they are returned by resource
/// management internals, strict descriptor validation and tracing initialization.
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Descriptor failed strict validation.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
