//! Event system for session actions.
//!
//! Events are fired from the session actions. If no listeners are
//! registered, they are silently ignored (no-op). Register listeners
//! via [`register_event_listeners`] at application startup.
//!
//! ```rust,ignore
//! use vestibule::register_event_listeners;
//! use vestibule::events::listeners::LoggingListener;
//!
//! fn main() {
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::SessionEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners};
