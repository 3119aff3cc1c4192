//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CleanerConfig;
use crate::domain::{CleanerError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override loaded settings
pub const ENV_PREFIX: &str = "DATA_CLEANER_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CleanerConfig
/// 4. Applies environment variable overrides (DATA_CLEANER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`CleanerError::Configuration`] if the file cannot be read, a
/// referenced variable is unset, or parsing or validation fails.
///
/// # Examples
///
/// ```no_run
/// use data_cleaner::config::load_config;
///
/// let config = load_config("data-cleaner.toml")?;
/// println!("Seed: {:?}", config.generators.seed);
/// # Ok::<(), data_cleaner::domain::CleanerError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CleanerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CleanerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CleanerError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text, with the same steps as [`load_config`]
pub fn load_config_str(contents: &str) -> Result<CleanerConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CleanerConfig = toml::from_str(&contents)
        .map_err(|e| CleanerError::Configuration(format!("Failed to parse TOML: {e}")))?;

    config.apply_env_overrides()?;

    config.validate().map_err(|e| {
        CleanerError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left as they are.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CleanerError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CleanerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

impl CleanerConfig {
    /// Applies `DATA_CLEANER_<SECTION>_<KEY>` environment overrides
    ///
    /// Recognised variables: `GENERATORS_DEFAULTS`, `GENERATORS_SEED`,
    /// `FORMAT_LIBRARIES` (comma separated), `LOGGING_LEVEL`, `LOGGING_JSON`,
    /// `LOGGING_LOCAL_ENABLED`, `LOGGING_LOCAL_PATH`, `AUDIT_ENABLED`,
    /// `AUDIT_LOG_PATH`.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Applies overrides read through `lookup`, keyed without the prefix
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GENERATORS_DEFAULTS") {
            self.generators.defaults = parse_override("GENERATORS_DEFAULTS", &val)?;
        }
        if let Some(val) = lookup("GENERATORS_SEED") {
            self.generators.seed = Some(parse_override("GENERATORS_SEED", &val)?);
        }

        if let Some(val) = lookup("FORMAT_LIBRARIES") {
            self.format_libraries = val
                .split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        if let Some(val) = lookup("LOGGING_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("LOGGING_JSON") {
            self.logging.json = parse_override("LOGGING_JSON", &val)?;
        }
        if let Some(val) = lookup("LOGGING_LOCAL_ENABLED") {
            self.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
        }
        if let Some(val) = lookup("LOGGING_LOCAL_PATH") {
            self.logging.local_path = val;
        }

        if let Some(val) = lookup("AUDIT_ENABLED") {
            self.audit.enabled = parse_override("AUDIT_ENABLED", &val)?;
        }
        if let Some(val) = lookup("AUDIT_LOG_PATH") {
            self.audit.log_path = PathBuf::from(val);
        }

        Ok(())
    }
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        CleanerError::Configuration(format!("Invalid {ENV_PREFIX}{key} value '{value}': {e}"))
    })
}
