//! Client event pipeline: broadcast bus plus sequential dispatcher.

pub mod bus;
pub mod dispatcher;

pub use bus::EventBus;
pub use dispatcher::EventDispatcher;
