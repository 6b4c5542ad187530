//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Nubilum error type
///
/// The anonymization core itself never fails; these errors come from the
/// layers around it (configuration, input handling, usage accounting).
#[derive(Debug, Error)]
pub enum NubilumError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input rejected before anonymization (empty, oversized, unreadable)
    #[error("Input error: {0}")]
    Input(String),

    /// Usage log errors
    #[error("Usage tracking error: {0}")]
    Usage(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl NubilumError {
    /// Whether this error was caused by the input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for NubilumError {
    fn from(err: std::io::Error) -> Self {
        NubilumError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for NubilumError {
    fn from(err: serde_json::Error) -> Self {
        NubilumError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for NubilumError {
    fn from(err: toml::de::Error) -> Self {
        NubilumError::Configuration(format!("TOML parse error: {err}"))
    }
}
