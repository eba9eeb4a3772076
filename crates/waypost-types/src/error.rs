use thiserror::Error;

/// Errors raised while loading configuration from the environment.
///
/// Configuration errors are fatal at startup: the process must refuse to run
/// half-configured rather than risk losing session state.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable '{0}'")]
    MissingVar(String),

    #[error("invalid value for '{name}': '{value}' ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// Errors from session store operations.
///
/// A store failure is always distinct from "no record": absence is reported
/// as `Ok(None)` by `extract`, never as an error variant.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("database connection error")]
    Connection,

    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors from forwarding a relay payload to the automation webhook.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("webhook endpoint not configured")]
    NotConfigured,

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("webhook returned status {0}")]
    Status(u16),
}

/// Errors from the external chat client boundary.
#[derive(Debug, Error)]
pub enum ChatClientError {
    #[error("chat client endpoint not configured")]
    NotConfigured,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("chat client returned status {0}")]
    Status(u16),
}
