// Submission gate - what the post/comment submission path calls before
// anything goes live.
//
// Runs the compliance check once, reports the outcome to telemetry, and hands
// the verdict back. Deciding what to do with a rejected submission is the
// caller's job.

use crate::core::moderation::{ContentAnalysis, ContentKind, ContentModerator, ValidationResult};
use crate::core::telemetry::{EngagementEvent, TelemetryService, TelemetrySink};
use serde::{Deserialize, Serialize};

/// Reason reported when a submission fails only on its score.
const LOW_SCORE_REASON: &str = "low_safety_score";

/// A piece of user content on its way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub content_id: String,
    pub author_id: String,
    pub kind: ContentKind,
    pub text: String,
}

impl Submission {
    pub fn new(
        content_id: impl Into<String>,
        author_id: impl Into<String>,
        kind: ContentKind,
        text: impl Into<String>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            author_id: author_id.into(),
            kind,
            text: text.into(),
        }
    }
}

pub struct SubmissionService<S: TelemetrySink> {
    moderator: ContentModerator,
    telemetry: TelemetryService<S>,
}

impl<S: TelemetrySink> SubmissionService<S> {
    pub fn new(moderator: ContentModerator, sink: S) -> Self {
        Self {
            moderator,
            telemetry: TelemetryService::new(sink),
        }
    }

    pub fn moderator(&self) -> &ContentModerator {
        &self.moderator
    }

    pub fn telemetry(&self) -> &TelemetryService<S> {
        &self.telemetry
    }

    /// Check a submission and report the outcome.
    ///
    /// Always records a compliance event. Rejected submissions also get a
    /// `moderation_block` event naming the flags that sank them.
    pub async fn submit(&self, submission: Submission) -> ValidationResult {
        let analysis = ContentAnalysis::new(
            submission.text,
            submission.kind,
            submission.author_id.as_str(),
        );
        let result = self.moderator.validate_analysis(&analysis);

        let topics: Vec<String> = result.topical_categories.iter().cloned().collect();
        self.telemetry
            .track(EngagementEvent::content_compliance(
                &submission.content_id,
                result.is_ad_friendly,
                &topics,
            ))
            .await;

        if !result.can_post {
            let reason = block_reason(&result);
            self.telemetry
                .track(EngagementEvent::moderation(
                    "block",
                    &reason,
                    &submission.content_id,
                ))
                .await;
        }

        tracing::debug!(
            content_id = %submission.content_id,
            author_id = %submission.author_id,
            can_post = result.can_post,
            safety_score = result.safety_score,
            "Submission checked"
        );

        result
    }
}

fn block_reason(result: &ValidationResult) -> String {
    if result.flags().is_empty() {
        LOW_SCORE_REASON.to_string()
    } else {
        result
            .flags()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
