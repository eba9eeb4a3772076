//! Concrete chat client implementations.

pub mod bridge;

pub use bridge::BridgeChatClient;
