//! # Error Types
//!
//! The shader math itself is total and never fails; errors come from the
//! layers around it: resolution checks, background selection, parameter
//! parsing, configuration files and image output.

use thiserror::Error;

/// Main error type for backdrop operations
#[derive(Debug, Error)]
pub enum BackdropError {
    /// Render target size is zero, negative, not finite or too large
    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: f32, height: f32 },

    /// Background key did not name a known background
    #[error("Unknown background '{0}'")]
    UnknownBackground(String),

    /// Parameter name or value rejected by an effect
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// Preference file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BackdropError>;
