//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "nubilum.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Nubilum configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: nubilum validate-config");
                println!("  3. Anonymize messages: nubilum anonymize messages.hl7");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Nubilum Configuration File
# HL7 v2 message anonymizer
#
# Every setting can be overridden with NUBILUM_<SECTION>_<KEY>,
# e.g. NUBILUM_USAGE_LOG_PATH. Values may reference environment
# variables with ${VAR_NAME}.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Input Limits
# ============================================================================
[input]
# Inputs larger than this are rejected (bytes)
max_message_bytes = 1048576

# ============================================================================
# Usage Tracking
# ============================================================================
[usage]
# Record one JSON line per anonymized message (metadata only)
enabled = true

# Usage log path
log_path = "usage_log.jsonl"
# log_path = "${NUBILUM_HOME}/usage_log.jsonl"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging
local_enabled = false

# Log directory
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NubilumConfig;

    #[test]
    fn test_generated_config_parses() {
        let config = NubilumConfig::from_toml_str(&InitArgs::generate_config()).unwrap();
        assert_eq!(config.input.max_message_bytes, 1_048_576);
        assert_eq!(config.usage.log_path, "usage_log.jsonl");
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nubilum.toml");
        std::fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.display().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# existing");

        let args = InitArgs {
            output: output.display().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("[usage]"));
    }
}
