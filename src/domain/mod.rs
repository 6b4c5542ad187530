//! Domain types shared across Nubilum
//!
//! The domain layer provides:
//! - **Error types** ([`NubilumError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations outside the anonymization core return
//! [`Result<T, NubilumError>`]:
//!
//! ```rust
//! use nubilum::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = nubilum::config::NubilumConfig::from_toml_str("")?;
//!     assert!(config.usage.enabled);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod result;

pub use errors::NubilumError;
pub use result::Result;
