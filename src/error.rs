//! Error types for placeholder generation

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a placeholder
///
/// Invalid formats, render modes, size classes and colors are never reported
/// here: they are normalized to their defaults when the builder is configured.
#[derive(Error, Debug)]
pub enum Error {
    /// Output directory is missing, not writable, or the final write failed
    #[error("I/O error: {0}")]
    IoError(String),

    /// Font file could not be read or parsed
    #[error("Failed to load font: {0}")]
    FontError(String),

    /// Failed to draw the scene
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Image encoder rejected the canvas
    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    /// Invalid configuration file
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_message_names_the_cause() {
        let e = Error::IoError("/nope does not exist".to_string());
        assert_eq!(e.to_string(), "I/O error: /nope does not exist");
    }
}
