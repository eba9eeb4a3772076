//! Message relay: forward one inbound message to the automation webhook.
//!
//! Fire-and-log: one outbound POST per message, no retry, no queue. Delivery
//! failures are logged and never reach the original chat correspondent.

use waypost_types::error::RelayError;
use waypost_types::message::{InboundMessage, RelayPayload};

/// Transport suffix carried by chat identifiers (e.g. `56912345678@c.us`).
pub const TRANSPORT_SUFFIX: &str = "@c.us";

/// Trait for delivering one relay payload to the configured webhook.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// The reqwest-backed implementation lives in waypost-infra.
pub trait WebhookDelivery: Send + Sync {
    fn deliver(
        &self,
        payload: &RelayPayload,
    ) -> impl std::future::Future<Output = Result<(), RelayError>> + Send;
}

/// Strip the trailing transport suffix from a sender identifier.
///
/// Pure string transform, no external calls. Identifiers without a suffix
/// pass through unchanged.
pub fn normalize_sender(raw: &str) -> &str {
    match raw.split_once('@') {
        Some((id, _)) => id,
        None => raw,
    }
}

/// Qualify a bare recipient identifier by appending the transport suffix.
///
/// Identifiers that already carry a suffix are left as-is.
pub fn qualify_recipient(to: &str) -> String {
    if to.contains('@') {
        to.to_string()
    } else {
        format!("{to}{TRANSPORT_SUFFIX}")
    }
}

/// Forwards inbound messages as `{from, text}` payloads.
pub struct MessageRelay<D> {
    delivery: D,
}

impl<D: WebhookDelivery> MessageRelay<D> {
    pub fn new(delivery: D) -> Self {
        Self { delivery }
    }

    #[cfg(test)]
    pub(crate) fn delivery(&self) -> &D {
        &self.delivery
    }

    /// Build the payload for one inbound message and deliver it.
    ///
    /// The sender identifier is normalized; the text passes through
    /// unmodified. The outcome is logged either way; callers on the event
    /// path ignore the returned error (fire-and-log).
    pub async fn forward(&self, message: InboundMessage) -> Result<(), RelayError> {
        let payload = RelayPayload {
            from: normalize_sender(&message.from).to_string(),
            text: message.text,
        };

        match self.delivery.deliver(&payload).await {
            Ok(()) => {
                tracing::info!(from = %payload.from, "message forwarded to webhook");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(from = %payload.from, error = %err, "webhook delivery failed");
                Err(err)
            }
        }
    }
}
