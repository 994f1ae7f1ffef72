//! Activity sink that forwards notifications to `tracing`.

use crate::domain::ResourceActivated;

use super::ActivitySink;

/// Logs every activation as a structured `info` event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ActivitySink for TracingSink {
    fn resource_activated(&self, event: &ResourceActivated) {
        tracing::info!(
            unit = %event.unit_title,
            topic = %event.topic,
            kind = %event.kind,
            request_id = event.request_id,
            at = %event.timestamp.to_rfc3339(),
            "resource activated"
        );
    }
}
