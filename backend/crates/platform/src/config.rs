//! Environment configuration helpers

use std::env;
use std::str::FromStr;

/// Error raised when an environment variable is set but cannot be parsed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
}

/// Read `key`, falling back to `default` when unset or empty.
pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Read `key`, treating an empty value as unset.
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse `key`. Unset yields `Ok(None)`.
pub fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env_opt(key) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| ConfigError {
            key: key.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variables_fall_back() {
        let key = "PLATFORM_CONFIG_TEST_SURELY_UNSET";
        assert_eq!(env_opt(key), None);
        assert_eq!(env_or(key, "0.0.0.0:31113"), "0.0.0.0:31113");
        assert!(matches!(env_parse::<u64>(key), Ok(None)));
    }

    #[test]
    fn test_config_error_names_the_key() {
        let err = ConfigError {
            key: "SESSION_IDLE_TTL_SECS".into(),
            value: "ten".into(),
        };
        assert_eq!(
            err.to_string(),
            r#"Invalid value for SESSION_IDLE_TTL_SECS: "ten""#
        );
    }
}
