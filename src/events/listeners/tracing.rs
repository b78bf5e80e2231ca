use async_trait::async_trait;

use crate::events::{Listener, SessionEvent};

/// Emits all session events as `tracing` events.
///
/// Available with the `tracing` feature.
#[derive(Default)]
pub struct TracingListener;

impl TracingListener {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &SessionEvent) {
        tracing::info!(
            target: "vestibule::events",
            name = event.name(),
            at = %event.timestamp(),
            ?event,
        );
    }
}
