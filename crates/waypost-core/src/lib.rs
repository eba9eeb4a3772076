//! Business logic for Waypost.
//!
//! Defines the trait seams toward infrastructure (`SessionStore`,
//! `ChatClient`, `WebhookDelivery`) and the components built on them: the
//! session lifecycle controller, the message relay, and the client event
//! pipeline. Implementations live in `waypost-infra`.

pub mod client;
pub mod event;
pub mod relay;
pub mod session;
