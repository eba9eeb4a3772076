//! External chat client boundary.
//!
//! The wire protocol (pairing, auth handshake, message framing) lives in an
//! external browser-automation client. This trait is the narrow seam Waypost
//! needs from it: send a message, and move the opaque session blob in and out
//! for checkpointing.

use waypost_types::error::ChatClientError;

/// Trait for the external chat client.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// The concrete HTTP bridge implementation lives in waypost-infra.
pub trait ChatClient: Send + Sync {
    /// Send a message to a fully qualified recipient identifier.
    fn send_message(
        &self,
        to: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), ChatClientError>> + Send;

    /// Export the client's current session blob.
    ///
    /// Returns `None` when the client holds no session yet (pairing has not
    /// completed). The blob content is opaque.
    fn export_session(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, ChatClientError>> + Send;

    /// Push a previously stored session blob into the client so it can
    /// resume without a fresh pairing.
    fn import_session(
        &self,
        blob: &[u8],
    ) -> impl std::future::Future<Output = Result<(), ChatClientError>> + Send;
}
