//! Unified error type for the lights-lib crate.
//!
//! [`LightsError`] covers the channel-support decision surfaced to callers,
//! I/O from the output adapters, and the domain-specific parse failures
//! (`Config`, `Color`, `Calibration`, `Request`). `From` impls allow `?` to
//! propagate across module boundaries.

use std::fmt;

/// Unified error type for lights-lib operations.
#[derive(Debug)]
pub enum LightsError {
    /// The requested light type is not driven by this controller.
    NotSupported(String),
    /// Standard I/O error (device file access, config persistence).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
    /// Display calibration input error.
    Calibration(String),
    /// Malformed light request.
    Request(String),
}

impl fmt::Display for LightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightsError::NotSupported(light) => write!(f, "Light not supported: {light}"),
            LightsError::Io(e) => write!(f, "I/O error: {e}"),
            LightsError::Config(e) => write!(f, "Config error: {e}"),
            LightsError::Color(e) => write!(f, "Color error: {e}"),
            LightsError::Calibration(e) => write!(f, "Calibration error: {e}"),
            LightsError::Request(e) => write!(f, "Request error: {e}"),
        }
    }
}

impl std::error::Error for LightsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LightsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LightsError {
    fn from(e: std::io::Error) -> Self {
        LightsError::Io(e)
    }
}

/// Crate-level Result alias using [`LightsError`].
pub type Result<T> = std::result::Result<T, LightsError>;
