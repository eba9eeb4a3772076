//! Shared domain types for Waypost.
//!
//! This crate contains the core domain types used across the relay:
//! relay messages, client events, configuration, and their associated error
//! types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod message;
