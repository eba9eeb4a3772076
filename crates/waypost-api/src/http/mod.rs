//! HTTP surface: router and handlers.

pub mod handlers;
pub mod router;
