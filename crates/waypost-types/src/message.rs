use serde::{Deserialize, Serialize};

/// An inbound chat message as reported by the external client.
///
/// Ephemeral: exists only for the duration of one forward operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Raw sender identifier, possibly carrying a transport suffix
    /// (e.g. `56912345678@c.us`).
    pub from: String,
    /// Message body, passed through unmodified.
    pub text: String,
}

/// The two-field payload posted to the automation webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPayload {
    /// Sender identifier with any transport suffix stripped.
    pub from: String,
    pub text: String,
}
