// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "telemetry/mod.rs"]
pub mod telemetry;

#[path = "submission/submission_service.rs"]
pub mod submission;
