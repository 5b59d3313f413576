//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CaspianConfig;
use super::secret::{secret_string, SecretString};
use crate::domain::errors::CaspianError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`CaspianConfig`]
/// 4. Applies environment variable overrides (`CASPIAN_*` prefix, plus the
///    legacy `CLOUD_PROVIDER`/`AWS_*`/`DATABASE_URL` names)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<CaspianConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CaspianError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|err| {
        CaspianError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            err
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CaspianConfig = toml::from_str(&contents)
        .map_err(|err| CaspianError::Configuration(format!("Failed to parse TOML: {err}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|err| {
        CaspianError::Configuration(format!("Configuration validation failed: {err}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Referencing an unset variable is an
/// error listing every missing name.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CaspianError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// `CASPIAN_<SECTION>_<KEY>` wins over the legacy names the original
/// deployment used (`CLOUD_PROVIDER`, `AWS_REGION`, `AWS_PROFILE_NAME`,
/// `DATABASE_URL`, `READONLY_DATABASE_URL`).
fn apply_env_overrides(config: &mut CaspianConfig) {
    if let Some(val) = env_override(&["CASPIAN_APPLICATION_LOG_LEVEL"]) {
        config.application.log_level = val;
    }

    // Storage overrides
    if let Some(val) = env_override(&["CASPIAN_STORAGE_PROVIDER", "CLOUD_PROVIDER"]) {
        config.storage.provider = val;
    }
    if let Some(val) = env_override(&["CASPIAN_STORAGE_REGION", "AWS_REGION"]) {
        config.storage.region = val;
    }
    if let Some(val) = env_override(&["CASPIAN_STORAGE_BUCKET"]) {
        config.storage.bucket = val;
    }
    if let Some(val) = env_override(&["CASPIAN_STORAGE_ACCESS_KEY_ID", "AWS_ACCESS_KEY_ID"]) {
        config.storage.access_key_id = Some(val);
    }
    if let Some(val) = env_secret_override(&[
        "CASPIAN_STORAGE_SECRET_ACCESS_KEY",
        "AWS_SECRET_ACCESS_KEY",
    ]) {
        config.storage.secret_access_key = Some(val);
    }
    if let Some(val) = env_secret_override(&["CASPIAN_STORAGE_SESSION_TOKEN", "AWS_SESSION_TOKEN"])
    {
        config.storage.session_token = Some(val);
    }
    if let Some(val) = env_override(&["CASPIAN_STORAGE_PROFILE_NAME", "AWS_PROFILE_NAME"]) {
        config.storage.profile_name = Some(val);
    }

    // Database overrides
    if let Some(val) = env_secret_override(&["CASPIAN_DATABASE_WRITE_URL", "DATABASE_URL"]) {
        config.database.write_url = val;
    }
    if let Some(val) =
        env_secret_override(&["CASPIAN_DATABASE_READONLY_URL", "READONLY_DATABASE_URL"])
    {
        config.database.readonly_url = Some(val);
    }
    if let Some(val) = env_override(&["CASPIAN_DATABASE_MAX_CONNECTIONS"]) {
        if let Ok(max_connections) = val.parse() {
            config.database.max_connections = max_connections;
        }
    }

    // Logging overrides
    if let Some(val) = env_override(&["CASPIAN_LOGGING_LOCAL_ENABLED"]) {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_override(&["CASPIAN_LOGGING_LOCAL_PATH"]) {
        config.logging.local_path = val;
    }
}

fn env_override(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| std::env::var(name).ok())
}

fn env_secret_override(names: &[&str]) -> Option<SecretString> {
    env_override(names).map(secret_string)
}
