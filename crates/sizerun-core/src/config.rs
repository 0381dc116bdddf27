use crate::app_config::{AppConfig, DEFAULT_PRICES_URL, DEFAULT_PRODUCT_URL, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_key = require("SIZERUN_API_KEY")?;

    let product_url = or_default("SIZERUN_PRODUCT_URL", DEFAULT_PRODUCT_URL);
    let prices_url = or_default("SIZERUN_PRICES_URL", DEFAULT_PRICES_URL);
    let log_level = or_default("SIZERUN_LOG_LEVEL", "info");
    let user_agent = or_default("SIZERUN_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = parse_u64("SIZERUN_REQUEST_TIMEOUT_SECS", "40")?;
    let max_attempts = parse_u32("SIZERUN_MAX_ATTEMPTS", "3")?;
    let retry_delay_ms = parse_u64("SIZERUN_RETRY_DELAY_MS", "2000")?;
    let max_concurrent_jobs = parse_usize("SIZERUN_MAX_CONCURRENT_JOBS", "2")?;

    if max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SIZERUN_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    if max_concurrent_jobs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SIZERUN_MAX_CONCURRENT_JOBS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        api_key,
        product_url,
        prices_url,
        log_level,
        request_timeout_secs,
        max_attempts,
        retry_delay_ms,
        max_concurrent_jobs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
