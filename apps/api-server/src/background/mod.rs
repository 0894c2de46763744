//! Work that runs outside the request/response path.

mod dispatch;

#[cfg(feature = "scheduler")]
pub mod scheduler;

pub use dispatch::NotificationDispatcher;
