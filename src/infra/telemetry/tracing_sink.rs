// TelemetrySink that writes each event as a structured tracing record.
// Default sink when no telemetry file is configured.

use crate::core::telemetry::{EngagementEvent, TelemetryError, TelemetrySink};
use async_trait::async_trait;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TracingTelemetrySink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TelemetrySink for TracingTelemetrySink {
    async fn record(&self, event: EngagementEvent) -> Result<(), TelemetryError> {
        let parameters = serde_json::to_string(&event.parameters)?;
        tracing::info!(
            target: "telemetry",
            action = %event.action,
            category = event.category().unwrap_or("-"),
            label = ?event.label,
            value = ?event.value,
            parameters = %parameters,
            timestamp = %event.timestamp.to_rfc3339(),
            "Engagement event"
        );
        Ok(())
    }
}
