use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let raw = or_default(var, &default.to_string());
        let value = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let data_dir = PathBuf::from(or_default(
        "AUGIPS_DATA_DIR",
        &defaults.data_dir.to_string_lossy(),
    ));
    let debug_dir = PathBuf::from(or_default(
        "AUGIPS_DEBUG_DIR",
        &defaults.debug_dir.to_string_lossy(),
    ));
    let log_level = or_default("AUGIPS_LOG_LEVEL", &defaults.log_level);

    let request_timeout_secs =
        parse_u64("AUGIPS_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let browser_timeout_secs =
        parse_u64("AUGIPS_BROWSER_TIMEOUT_SECS", defaults.browser_timeout_secs)?;

    let webdriver_url = or_default("AUGIPS_WEBDRIVER_URL", &defaults.webdriver_url);
    if !(webdriver_url.starts_with("http://") || webdriver_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "AUGIPS_WEBDRIVER_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{webdriver_url}\""),
        });
    }

    Ok(AppConfig {
        data_dir,
        debug_dir,
        log_level,
        request_timeout_secs,
        browser_timeout_secs,
        webdriver_url,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
