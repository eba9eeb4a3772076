//! Infrastructure layer for Waypost.
//!
//! Contains implementations of the traits defined in `waypost-core`:
//! the SQLite session store, the reqwest-backed webhook delivery, the HTTP
//! bridge to the external chat client, and the environment configuration
//! loader.

pub mod client;
pub mod config;
pub mod sqlite;
pub mod webhook;
