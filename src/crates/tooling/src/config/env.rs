//! Environment variable loading utilities
//!
//! Helper functions for loading and parsing environment variables with proper error handling.

use crate::{Result, ToolingError};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a string
///
/// # Returns
///
/// * `Ok(Some(value))` if variable exists
/// * `Ok(None)` if variable doesn't exist
/// * `Err` if variable exists but has invalid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ToolingError::InvalidEnv {
            key: key.to_string(),
            reason: "contains invalid UTF-8".to_string(),
        }),
    }
}

/// Load an environment variable, treating blank values as absent
///
/// The returned value is trimmed.
pub fn get_env_non_blank(key: &str) -> Result<Option<String>> {
    Ok(get_env(key)?
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty()))
}

/// Load a required environment variable
///
/// Absent and blank values are both reported as `MissingEnv`.
pub fn require_env(key: &str) -> Result<String> {
    get_env_non_blank(key)?.ok_or_else(|| ToolingError::MissingEnv(key.to_string()))
}

/// Names of the given variables that are absent or blank
///
/// Lets a caller report every missing credential at once instead of failing
/// on the first.
pub fn missing_env<'a>(keys: &[&'a str]) -> Vec<&'a str> {
    keys.iter()
        .copied()
        .filter(|key| !matches!(get_env_non_blank(key), Ok(Some(_))))
        .collect()
}

/// Load and parse an environment variable
///
/// # Returns
///
/// * `Ok(Some(value))` if variable exists and parses successfully
/// * `Ok(None)` if variable doesn't exist or is blank
/// * `Err` if variable exists but fails to parse
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_non_blank(key)? {
        Some(val) => {
            let parsed = val.parse::<T>().map_err(|e| ToolingError::InvalidEnv {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Load an environment variable with a default value
///
/// Blank values fall back to the default.
pub fn get_env_or(key: &str, default: impl Into<String>) -> Result<String> {
    Ok(get_env_non_blank(key)?.unwrap_or_else(|| default.into()))
}

/// Load and parse an environment variable with a default value
///
/// The default applies only when the variable is absent or blank; a present
/// but unparsable value is still an error.
pub fn get_env_parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(get_env_parse(key)?.unwrap_or(default))
}
