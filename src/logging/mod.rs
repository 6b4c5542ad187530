//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels
//! - Console output on stderr
//! - JSON file logging with rotation
//!
//! Log records carry lengths, counts and message types. Field values of the
//! messages being anonymized are never logged.
//!
//! # Example
//!
//! ```no_run
//! use nubilum::logging::init_logging;
//! use nubilum::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the completion of an anonymization run
///
/// # Example
///
/// ```no_run
/// use nubilum::log_anonymization_complete;
/// use std::time::Duration;
///
/// log_anonymization_complete!(42, 3, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_anonymization_complete {
    ($messages:expr, $rejected:expr, $duration:expr) => {
        tracing::info!(
            messages = $messages,
            rejected = $rejected,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use nubilum::log_error_with_context;
/// use nubilum::domain::NubilumError;
///
/// let error = NubilumError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
