//! Built-in event listeners.

mod logging;
#[cfg(feature = "tracing")]
mod tracing;

pub use logging::LoggingListener;
#[cfg(feature = "tracing")]
pub use tracing::TracingListener;
