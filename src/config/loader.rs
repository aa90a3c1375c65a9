//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SupersyncConfig;
use crate::domain::errors::SupersyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into SupersyncConfig
/// 4. Applies environment variable overrides (`SUPERSYNC_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use supersync::config::load_config;
///
/// let config = load_config("supersync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SupersyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SupersyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SupersyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SupersyncConfig = toml::from_str(&contents)
        .map_err(|e| SupersyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        SupersyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched so example values in the generated
/// config don't trigger "missing variable" errors.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

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
        return Err(SupersyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `SUPERSYNC_*` prefix
///
/// Environment variables follow the pattern: `SUPERSYNC_<SECTION>_<KEY>`.
/// For example: `SUPERSYNC_SUPERSET_BASE_URL`, `SUPERSYNC_IMPORT_OVERWRITE`.
fn apply_env_overrides(config: &mut SupersyncConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("SUPERSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("SUPERSYNC_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Superset overrides
    if let Ok(val) = std::env::var("SUPERSYNC_SUPERSET_BASE_URL") {
        config.superset.base_url = val;
    }
    if let Ok(val) = std::env::var("SUPERSYNC_SUPERSET_USERNAME") {
        config.superset.username = val;
    }
    if let Ok(val) = std::env::var("SUPERSYNC_SUPERSET_PASSWORD") {
        config.superset.password = crate::config::secret_string(val);
    }
    if let Ok(val) = std::env::var("SUPERSYNC_SUPERSET_AUTH_PROVIDER") {
        config.superset.auth_provider = val;
    }
    if let Ok(val) = std::env::var("SUPERSYNC_SUPERSET_TLS_VERIFY") {
        config.superset.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SUPERSYNC_SUPERSET_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.superset.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("SUPERSYNC_SUPERSET_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.superset.timeout_seconds = timeout;
        }
    }

    // Workspace overrides
    if let Ok(val) = std::env::var("SUPERSYNC_WORKSPACE_REPO_ROOT") {
        config.workspace.repo_root = val;
    }
    if let Ok(val) = std::env::var("SUPERSYNC_WORKSPACE_EXPORTS_DIR") {
        config.workspace.exports_dir = val;
    }
    if let Ok(val) = std::env::var("SUPERSYNC_WORKSPACE_ZIPS_DIR") {
        config.workspace.zips_dir = val;
    }
    if let Ok(val) = std::env::var("SUPERSYNC_WORKSPACE_RESOURCES") {
        config.workspace.resources = val.split(',').map(|s| s.trim().to_string()).collect();
    }

    // Import overrides
    if let Ok(val) = std::env::var("SUPERSYNC_IMPORT_OVERWRITE") {
        config.import.overwrite = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("SUPERSYNC_IMPORT_DELETE_ZIPS") {
        config.import.delete_zips = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SUPERSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SUPERSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_env_vars_replaces_set_variable() {
        std::env::set_var("SUPERSYNC_TEST_SUBST_VAR", "replaced");
        let input = "value = \"${SUPERSYNC_TEST_SUBST_VAR}\"";
        let output = substitute_env_vars(input).unwrap();
        assert!(output.contains("replaced"));
        std::env::remove_var("SUPERSYNC_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_reports_missing_variable() {
        let input = "value = \"${SUPERSYNC_TEST_DEFINITELY_MISSING}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err
            .to_string()
            .contains("SUPERSYNC_TEST_DEFINITELY_MISSING"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# password = \"${SUPERSYNC_TEST_COMMENTED_VAR}\"";
        let output = substitute_env_vars(input).unwrap();
        assert!(output.contains("${SUPERSYNC_TEST_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/supersync.toml");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Configuration file not found"));
    }
}
