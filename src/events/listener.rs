use async_trait::async_trait;

use super::SessionEvent;

/// Trait for handling session events asynchronously.
///
/// Implement this trait to create custom event listeners. Listeners
/// can perform any async operation: logging, metrics, UI refreshes.
///
/// # Example
///
/// ```rust,ignore
/// use vestibule::events::{Listener, SessionEvent};
/// use async_trait::async_trait;
///
/// struct MetricsListener;
///
/// #[async_trait]
/// impl Listener for MetricsListener {
///     async fn handle(&self, event: &SessionEvent) {
///         if let SessionEvent::RefreshFailed { .. } = event {
///             // increment failure counter
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle a session event.
    ///
    /// Called for every dispatched event; filter by matching on the
    /// variant.
    async fn handle(&self, event: &SessionEvent);
}
