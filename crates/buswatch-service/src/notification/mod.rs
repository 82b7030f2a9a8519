//! Alert dispatching and driver messaging.

pub mod delivery;
pub mod dispatcher;
pub mod publisher;
pub mod service;
pub mod templates;

pub use dispatcher::NotificationDispatcher;
pub use publisher::AlertPublisher;
pub use service::{MessageService, SendMessage};
