// Telemetry service - analytics as an injected capability.
//
// Core code never reaches for a global tracker. Whoever needs to report
// engagement gets a TelemetryService wrapping whichever sink the composition
// root picked.

use super::telemetry_models::EngagementEvent;
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// SINK TRAIT (PORT)
// ============================================================================

/// Destination for engagement events.
///
/// Following the same pattern as the stores in the infra layer: the core
/// defines what it needs, infra decides how.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record one event.
    async fn record(&self, event: EngagementEvent) -> Result<(), TelemetryError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Best-effort event reporting on top of a sink.
pub struct TelemetryService<S: TelemetrySink> {
    sink: S,
}

impl<S: TelemetrySink> TelemetryService<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Record an event, surfacing sink failures.
    pub async fn try_track(&self, event: EngagementEvent) -> Result<(), TelemetryError> {
        self.sink.record(event).await
    }

    /// Record an event. Failures are logged and dropped; analytics must never
    /// break the action being tracked.
    pub async fn track(&self, event: EngagementEvent) {
        let action = event.action.clone();
        if let Err(e) = self.sink.record(event).await {
            tracing::warn!(action = %action, "Failed to record telemetry event: {}", e);
        }
    }
}
