// Telemetry sink implementations.

pub mod in_memory;
pub mod json_lines_store;
pub mod tracing_sink;

pub use in_memory::InMemoryTelemetrySink;
pub use json_lines_store::JsonLinesTelemetrySink;
pub use tracing_sink::TracingTelemetrySink;
