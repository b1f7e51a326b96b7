//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::FeedConfig;
use super::secret::{secret_string, secret_string_opt};
use crate::domain::errors::FeedError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Substitutes `${VAR}` placeholders from the environment
/// 3. Parses the TOML into [`FeedConfig`]
/// 4. Applies `FEED_*` environment variable overrides
/// 5. Validates the result
///
/// # Errors
///
/// Returns [`FeedError::Configuration`] if the file is missing or unreadable,
/// a placeholder names an unset variable, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use facility_feed::config::loader::load_config;
///
/// let config = load_config("facility-feed.toml").expect("Failed to load config");
/// println!("{}", config.database.describe());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FeedConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FeedError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        FeedError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: FeedConfig = toml::from_str(&contents)
        .map_err(|e| FeedError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        FeedError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| FeedError::Other(format!("Invalid placeholder pattern: {e}")))?;
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
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(FeedError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the FEED_* prefix
///
/// Variables follow the pattern `FEED_<SECTION>_<KEY>`, for example
/// `FEED_DATABASE_HOST` or `FEED_STORAGE_BUCKET`. Unparseable numeric or
/// boolean values are ignored.
fn apply_env_overrides(config: &mut FeedConfig) {
    // Application
    if let Ok(val) = std::env::var("FEED_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("FEED_APPLICATION_DRY_RUN") {
        if let Ok(dry_run) = val.parse() {
            config.application.dry_run = dry_run;
        }
    }

    // Database
    if let Ok(val) = std::env::var("FEED_DATABASE_HOST") {
        config.database.host = val;
    }
    if let Ok(val) = std::env::var("FEED_DATABASE_PORT") {
        if let Ok(port) = val.parse() {
            config.database.port = port;
        }
    }
    if let Ok(val) = std::env::var("FEED_DATABASE_USER") {
        config.database.user = val;
    }
    if let Ok(val) = std::env::var("FEED_DATABASE_PASSWORD") {
        config.database.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("FEED_DATABASE_DATABASE") {
        config.database.database = val;
    }
    if let Ok(val) = std::env::var("FEED_DATABASE_SSL_MODE") {
        config.database.ssl_mode = val;
    }
    if let Ok(val) = std::env::var("FEED_DATABASE_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.database.page_size = size;
        }
    }

    // Storage
    if let Ok(val) = std::env::var("FEED_STORAGE_BUCKET") {
        config.storage.bucket = val;
    }
    if let Ok(val) = std::env::var("FEED_STORAGE_REGION") {
        config.storage.region = Some(val);
    }
    if let Ok(val) = std::env::var("FEED_STORAGE_ENDPOINT") {
        config.storage.endpoint = Some(val);
    }
    if let Ok(val) = std::env::var("FEED_STORAGE_ACCESS_KEY_ID") {
        config.storage.access_key_id = Some(val);
    }
    if let Ok(val) = std::env::var("FEED_STORAGE_SECRET_ACCESS_KEY") {
        config.storage.secret_access_key = secret_string_opt(Some(val));
    }

    // Export
    if let Ok(val) = std::env::var("FEED_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // Publish
    if let Ok(val) = std::env::var("FEED_PUBLISH_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.publish.max_retries = retries;
        }
    }
    if let Ok(val) = std::env::var("FEED_PUBLISH_VERIFY_UPLOADS") {
        if let Ok(verify) = val.parse() {
            config.publish.verify_uploads = verify;
        }
    }

    // Logging
    if let Ok(val) = std::env::var("FEED_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("FEED_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("LOADER_TEST_VAR", "test_value");
        let input = "password = \"${LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"");
        std::env::remove_var("LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("LOADER_MISSING_A");
        std::env::remove_var("LOADER_MISSING_B");
        let input = "a = \"${LOADER_MISSING_A}\"\nb = \"${LOADER_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("LOADER_MISSING_A"));
        assert!(err.contains("LOADER_MISSING_B"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("LOADER_COMMENTED");
        let input = "# password = \"${LOADER_COMMENTED}\"\nkey = 1";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${LOADER_COMMENTED}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(FeedError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[database]
host = "db.internal"
user = "feed"
password = "pass"
database = "facilities"

[storage]
bucket = "feeds"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.password.expose_secret(), "pass");
        assert_eq!(config.database.page_size, 100);
        assert_eq!(config.storage.bucket, "feeds");
        assert_eq!(config.export.output_dir, ".");
    }
}
