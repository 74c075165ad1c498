// This is the infra layer - it implements the traits defined in core.
// This file provides an IN-MEMORY implementation of TelemetrySink.
//
// **Why keep events in memory?**
// - Tests can assert on exactly what a service reported, without parsing logs
// - Local runs can inspect analytics without an external collector
// - It honours the same TelemetrySink contract as the file and tracing sinks
//
// Events are grouped by category because that is how callers look them up
// ("did this submission produce a content_safety event?").

use crate::core::telemetry::{EngagementEvent, TelemetryError, TelemetrySink};
use async_trait::async_trait;
use dashmap::DashMap;

/// Collects events in memory.
///
/// **DashMap:**
/// Several submissions can be checked at once, each reporting from its own
/// task. DashMap shards its locks, so recording under one category doesn't
/// block writers of another and no outer Mutex is needed.
pub struct InMemoryTelemetrySink {
    /// Maps event category -> events in arrival order.
    /// Uncategorized (tag-manager style) events live under `None`.
    events: DashMap<Option<String>, Vec<EngagementEvent>>,
}

impl InMemoryTelemetrySink {
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
        }
    }

    /// Events recorded under `category`, oldest first.
    pub fn events_in(&self, category: &str) -> Vec<EngagementEvent> {
        self.events
            .get(&Some(category.to_string()))
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Events recorded without a category, oldest first.
    pub fn uncategorized(&self) -> Vec<EngagementEvent> {
        self.events
            .get(&None)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Events with the given action across all categories.
    pub fn events_with_action(&self, action: &str) -> Vec<EngagementEvent> {
        self.events
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|e| e.action == action)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events.clear();
    }
}

impl Default for InMemoryTelemetrySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelemetrySink for InMemoryTelemetrySink {
    async fn record(&self, event: EngagementEvent) -> Result<(), TelemetryError> {
        self.events
            .entry(event.category.clone())
            .or_default()
            .push(event);
        Ok(())
    }
}
