//! Environment configuration loader.
//!
//! Configuration is environment-provided, not argument-parsed. The database
//! URL is mandatory: without durable session storage the relay would silently
//! force re-pairing on every restart, so a missing value is fatal at startup.
//! Webhook and client bridge URLs are optional and degrade per-call.

use std::collections::HashMap;

use waypost_types::config::RelayConfig;
use waypost_types::error::ConfigError;

pub const ENV_DATABASE_URL: &str = "WAYPOST_DATABASE_URL";
pub const ENV_WEBHOOK_URL: &str = "WAYPOST_WEBHOOK_URL";
pub const ENV_CLIENT_URL: &str = "WAYPOST_CLIENT_URL";
pub const ENV_PORT: &str = "WAYPOST_PORT";
pub const ENV_SESSION_ID: &str = "WAYPOST_SESSION_ID";
pub const ENV_BACKUP_INTERVAL_SECS: &str = "WAYPOST_BACKUP_INTERVAL_SECS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "WAYPOST_HTTP_TIMEOUT_SECS";
pub const ENV_OTEL: &str = "WAYPOST_OTEL";

/// Minimum checkpoint interval (safety floor).
const MIN_BACKUP_INTERVAL_SECS: u64 = 10;

/// Load configuration from the process environment.
pub fn load_config() -> Result<RelayConfig, ConfigError> {
    from_vars(&std::env::vars().collect())
}

/// Build a `RelayConfig` from an explicit variable map.
///
/// Split out from [`load_config`] so tests never mutate process-global
/// environment state.
pub fn from_vars(vars: &HashMap<String, String>) -> Result<RelayConfig, ConfigError> {
    let database_url = vars
        .get(ENV_DATABASE_URL)
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| ConfigError::MissingVar(ENV_DATABASE_URL.to_string()))?;

    let webhook_url = vars.get(ENV_WEBHOOK_URL).filter(|v| !v.is_empty()).cloned();
    let client_url = vars.get(ENV_CLIENT_URL).filter(|v| !v.is_empty()).cloned();

    let port = parse_or(vars, ENV_PORT, RelayConfig::DEFAULT_PORT)?;
    let session_id = vars
        .get(ENV_SESSION_ID)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| RelayConfig::DEFAULT_SESSION_ID.to_string());

    let backup_interval_secs: u64 = parse_or(
        vars,
        ENV_BACKUP_INTERVAL_SECS,
        RelayConfig::DEFAULT_BACKUP_INTERVAL_SECS,
    )?;
    let http_timeout_secs = parse_or(
        vars,
        ENV_HTTP_TIMEOUT_SECS,
        RelayConfig::DEFAULT_HTTP_TIMEOUT_SECS,
    )?;

    let otel = vars
        .get(ENV_OTEL)
        .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes"));

    Ok(RelayConfig {
        database_url,
        webhook_url,
        client_url,
        port,
        session_id,
        backup_interval_secs: backup_interval_secs.max(MIN_BACKUP_INTERVAL_SECS),
        http_timeout_secs,
        otel,
    })
}

fn parse_or<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match vars.get(name).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
