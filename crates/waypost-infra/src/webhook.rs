//! HTTP webhook delivery.
//!
//! One POST per payload to the configured automation endpoint. The shared
//! reqwest client carries a bounded per-call timeout, so a hanging webhook
//! cannot stall unrelated message handling or the health endpoint.

use waypost_core::relay::WebhookDelivery;
use waypost_types::error::RelayError;
use waypost_types::message::RelayPayload;

/// reqwest-backed implementation of `WebhookDelivery`.
pub struct HttpWebhookDelivery {
    http: reqwest::Client,
    url: Option<String>,
}

impl HttpWebhookDelivery {
    /// Create a delivery pointing at `url`. An unset URL is allowed: every
    /// delivery then fails with `RelayError::NotConfigured`, which the relay
    /// logs per message (missing webhook configuration is not fatal).
    pub fn new(http: reqwest::Client, url: Option<String>) -> Self {
        Self { http, url }
    }
}

impl WebhookDelivery for HttpWebhookDelivery {
    async fn deliver(&self, payload: &RelayPayload) -> Result<(), RelayError> {
        let url = self.url.as_deref().ok_or(RelayError::NotConfigured)?;

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| RelayError::Delivery(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RelayError::Status(status.as_u16()))
        }
    }
}
