//! Configuration management for Nubilum
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `NUBILUM_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [input]
//! max_message_bytes = 1048576
//!
//! [usage]
//! enabled = true
//! log_path = "${NUBILUM_HOME}/usage_log.jsonl"
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, InputConfig, LoggingConfig, NubilumConfig, UsageConfig};
