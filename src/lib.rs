// Content compliance scoring for user-generated posts and comments.
//
// **Architecture Overview:**
// - `core/` = Business logic (scoring, telemetry events, submission gate)
// - `infra/` = Implementations of core traits (telemetry sinks, pattern files)
//
// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a handful of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "infra/infra_layer.rs"]
pub mod infra;

pub use crate::core::moderation::{
    ContentAnalysis, ContentKind, ContentModerator, ModerationResult, PatternConfig, PatternError,
    PatternLibrary, ValidationResult,
};
pub use crate::core::submission::{Submission, SubmissionService};
pub use crate::core::telemetry::{EngagementEvent, TelemetryError, TelemetrySink};
