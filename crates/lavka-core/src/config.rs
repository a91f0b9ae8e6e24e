use std::path::PathBuf;

use crate::app_config::{AppConfig, ConfigError};

/// Default production endpoint of the storefront API, path prefix included.
pub const DEFAULT_BASE_URL: &str = "https://edu.std-900.ist.mospolytech.ru/exam-2024-1/api";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable has an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable has an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = or_default("LAVKA_BASE_URL", DEFAULT_BASE_URL);
    let state_dir = PathBuf::from(or_default("LAVKA_STATE_DIR", ".lavka"));
    let request_timeout_secs = parse_u64("LAVKA_REQUEST_TIMEOUT_SECS", "30")?;
    let page_size = parse_u32("LAVKA_PAGE_SIZE", "12")?;
    let log_level = or_default("LAVKA_LOG_LEVEL", "info");

    Ok(AppConfig {
        base_url,
        state_dir,
        request_timeout_secs,
        page_size,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_env_uses_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.state_dir, PathBuf::from(".lavka"));
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.page_size, 12);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn overrides_are_honored() {
        let mut map = HashMap::new();
        map.insert("LAVKA_BASE_URL", "http://localhost:8080/api");
        map.insert("LAVKA_STATE_DIR", "/tmp/lavka-state");
        map.insert("LAVKA_PAGE_SIZE", "24");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:8080/api");
        assert_eq!(cfg.state_dir, PathBuf::from("/tmp/lavka-state"));
        assert_eq!(cfg.page_size, 24);
    }

    #[test]
    fn invalid_timeout_fails() {
        let mut map = HashMap::new();
        map.insert("LAVKA_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LAVKA_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LAVKA_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn invalid_page_size_fails() {
        let mut map = HashMap::new();
        map.insert("LAVKA_PAGE_SIZE", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LAVKA_PAGE_SIZE"),
            "expected InvalidEnvVar(LAVKA_PAGE_SIZE), got: {result:?}"
        );
    }
}
