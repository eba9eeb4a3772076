//! Session persistence contract and lifecycle controller.

pub mod lifecycle;
pub mod store;

pub use lifecycle::{RestoreOutcome, SessionLifecycle};
pub use store::SessionStore;
