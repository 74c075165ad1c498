// Core moderation module - contains the compliance scoring business logic.
// Following the same pattern as the telemetry module.

pub mod moderation_models;
pub mod moderation_service;
pub mod pattern_library;

pub use moderation_models::*;
pub use moderation_service::*;
pub use pattern_library::*;
