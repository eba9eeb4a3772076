//! Session store trait.
//!
//! The minimal contract a pluggable remote-backed credential cache needs:
//! save, extract, delete, exists. The blob is opaque; the store never parses
//! or validates its content.

use waypost_types::error::SessionStoreError;

/// Trait for durable storage of one opaque session blob per session id.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in waypost-infra.
///
/// `save` is an idempotent upsert: calling it repeatedly with the same id is
/// harmless, and concurrent saves for one id are commutative (last write
/// wins). `extract` distinguishes "absent" (`Ok(None)`) from backend failure
/// (`Err`) -- a storage error must never silently force re-pairing.
pub trait SessionStore: Send + Sync {
    /// Upsert `blob` under `id`.
    fn save(
        &self,
        id: &str,
        blob: &[u8],
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;

    /// Return the stored blob, or `None` if no record exists.
    fn extract(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, SessionStoreError>> + Send;

    /// Remove the record. Deleting a nonexistent id is not an error.
    fn delete(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>> + Send;

    /// Existence check without transferring the blob payload.
    fn exists(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool, SessionStoreError>> + Send;
}
