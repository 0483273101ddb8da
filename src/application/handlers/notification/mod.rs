//! Notification handlers.

mod dispatcher;

pub use dispatcher::NotificationDispatcher;
