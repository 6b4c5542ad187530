//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::NubilumConfig;
use crate::domain::errors::NubilumError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment variable pattern is valid")
    })
}

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`NubilumConfig`]
/// 4. Applies environment variable overrides (`NUBILUM_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, a referenced
/// environment variable is unset, parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use nubilum::config::loader::load_config;
///
/// let config = load_config("nubilum.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<NubilumConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NubilumError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        NubilumError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    NubilumConfig::from_toml_str(&contents)
}

/// Loads configuration from `path`, or defaults when the file does not exist
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<NubilumConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = NubilumConfig::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

impl NubilumConfig {
    /// Parse configuration text, applying substitution, overrides and validation
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let contents = substitute_env_vars(contents)?;

        let mut config: NubilumConfig = toml::from_str(&contents)
            .map_err(|e| NubilumError::Configuration(format!("Failed to parse TOML: {}", e)))?;

        apply_env_overrides(&mut config);
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &NubilumConfig) -> Result<()> {
    config.validate().map_err(|e| {
        NubilumError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|missing| missing == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(NubilumError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the `NUBILUM_*` prefix
///
/// Variables follow the pattern `NUBILUM_<SECTION>_<KEY>`, for example
/// `NUBILUM_USAGE_LOG_PATH`. Values that fail to parse are ignored.
fn apply_env_overrides(config: &mut NubilumConfig) {
    if let Ok(val) = std::env::var("NUBILUM_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("NUBILUM_INPUT_MAX_MESSAGE_BYTES") {
        if let Ok(bytes) = val.parse() {
            config.input.max_message_bytes = bytes;
        }
    }

    if let Ok(val) = std::env::var("NUBILUM_USAGE_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.usage.enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("NUBILUM_USAGE_LOG_PATH") {
        config.usage.log_path = val;
    }

    if let Ok(val) = std::env::var("NUBILUM_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("NUBILUM_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("NUBILUM_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
