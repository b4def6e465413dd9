//! Error type shared by the scroller and its drivers.

use thiserror::Error;

/// Errors produced by this crate.
///
/// Window arithmetic itself never fails; errors come only from construction
/// and from writing frames to an output sink.
#[derive(Error, Debug)]
pub enum Error {
    /// The scroller was configured with values it cannot work with,
    /// such as a window width of zero.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Writing a frame to the output sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
