//! HTTP request handlers.

pub mod event;
pub mod send;
