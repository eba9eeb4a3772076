use serde::{Deserialize, Serialize};

/// Runtime configuration for the relay process.
///
/// Populated from environment variables by the loader in `waypost-infra`;
/// this crate only defines the shape and the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Session store backend URL. Mandatory: the process must not start
    /// without durable session storage.
    pub database_url: String,
    /// Automation webhook endpoint. Optional: when unset, each inbound
    /// message logs a delivery failure but the relay keeps running.
    pub webhook_url: Option<String>,
    /// Base URL of the external chat client bridge. Optional: when unset,
    /// triggered sends and session checkpoints fail per-call.
    pub client_url: Option<String>,
    /// HTTP listen port.
    pub port: u16,
    /// Key under which the session blob is stored.
    pub session_id: String,
    /// Seconds between periodic session checkpoints.
    pub backup_interval_secs: u64,
    /// Per-call timeout for outbound HTTP (webhook and client bridge).
    pub http_timeout_secs: u64,
    /// Enable OpenTelemetry stdout span export.
    pub otel: bool,
}

impl RelayConfig {
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_SESSION_ID: &'static str = "default";
    pub const DEFAULT_BACKUP_INTERVAL_SECS: u64 = 120;
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
}
