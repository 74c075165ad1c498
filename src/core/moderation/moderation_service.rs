// Compliance scoring service - core business logic for content moderation.
//
// This service handles:
// - Scoring text against the prohibited/positive pattern tables
// - Comment/reply heuristics (too short, shouting)
// - Link-stuffing detection
// - Approval, safety score and ad-friendliness decisions
// - Topical categorization
//
// Everything here is synchronous and total: any string in, a result out.

use super::moderation_models::{
    is_ad_friendly_score, safety_score_from_confidence, ContentAnalysis, ContentKind,
    ModerationResult, ValidationResult, APPROVAL_CONFIDENCE, BASE_CONFIDENCE, COMMENT_PENALTY,
    FLAG_EXCESSIVE_CAPS, FLAG_EXCESSIVE_LINKS, FLAG_TOO_SHORT, LINK_PENALTY, MAX_LINKS,
    MIN_COMMENT_LEN, POSITIVE_BONUS, PROHIBITED_PENALTY,
};
use super::pattern_library::PatternLibrary;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Flags that block approval outright, whatever the confidence.
const BLOCKING_FLAGS: [&str; 4] = ["violence", "hate", "adult", "illegal"];

const HARMFUL_ADVICE: &str =
    "Content contains potentially harmful language. Consider revising to maintain a professional tone.";
const PROMOTIONAL_ADVICE: &str =
    "Content appears promotional. Focus on providing value to the community.";
const AUDIENCE_ADVICE: &str =
    "Content may not be suitable for all audiences. Consider keeping discussions professional.";
const POSITIVE_ADVICE: &str =
    "Great technical content! This aligns well with our community standards.";

lazy_static! {
    static ref SHOUTING: Regex = Regex::new(r"[A-Z]{5,}").expect("static regex");
    static ref URL: Regex = Regex::new(r"https?://\S+").expect("static regex");
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Scores and classifies user-generated text.
///
/// Cloning is cheap; the compiled pattern library is shared.
#[derive(Debug, Clone)]
pub struct ContentModerator {
    library: Arc<PatternLibrary>,
}

impl Default for ContentModerator {
    fn default() -> Self {
        Self::new(PatternLibrary::builtin())
    }
}

impl ContentModerator {
    /// Create a moderator over the given pattern tables.
    pub fn new(library: Arc<PatternLibrary>) -> Self {
        Self { library }
    }

    /// Score a piece of content.
    ///
    /// Each matching prohibited pattern costs 0.3 and flags its category; each
    /// matching positive pattern adds 0.1. Comments and replies also pay for
    /// being very short or shouting, and any content pays for carrying more
    /// than two links.
    pub fn moderate(&self, analysis: &ContentAnalysis) -> ModerationResult {
        let text = analysis.text.as_str();
        let mut confidence = BASE_CONFIDENCE;
        let mut flags = BTreeSet::new();
        let mut categories = BTreeSet::new();

        // One step per hit, not hits * penalty: the rounding of a running sum
        // decides cases that land on the 0.5 cutoff.
        for group in self.library.prohibited() {
            let hits = group.matching_patterns(text);
            if hits > 0 {
                flags.insert(group.category().to_string());
            }
            for _ in 0..hits {
                confidence -= PROHIBITED_PENALTY;
            }
        }

        for group in self.library.positive() {
            let hits = group.matching_patterns(text);
            if hits > 0 {
                categories.insert(group.category().to_string());
            }
            for _ in 0..hits {
                confidence += POSITIVE_BONUS;
            }
        }

        if analysis.kind.is_conversational() {
            if text.encode_utf16().count() < MIN_COMMENT_LEN {
                flags.insert(FLAG_TOO_SHORT.to_string());
                confidence -= COMMENT_PENALTY;
            }

            if SHOUTING.is_match(text) {
                flags.insert(FLAG_EXCESSIVE_CAPS.to_string());
                confidence -= COMMENT_PENALTY;
            }
        }

        if URL.find_iter(text).count() > MAX_LINKS {
            flags.insert(FLAG_EXCESSIVE_LINKS.to_string());
            confidence -= LINK_PENALTY;
        }

        let recommendations = recommendations_for(&flags, &categories);

        let is_approved = confidence > APPROVAL_CONFIDENCE
            && !BLOCKING_FLAGS.iter().any(|f| flags.contains(*f));

        tracing::debug!(
            kind = %analysis.kind,
            author_id = %analysis.author_id,
            confidence,
            is_approved,
            flags = ?flags,
            categories = ?categories,
            "Moderated content"
        );

        ModerationResult {
            is_approved,
            confidence: confidence.clamp(0.0, 1.0),
            flags,
            categories,
            recommendations,
        }
    }

    /// Topical tags for targeting. Never empty.
    pub fn categorize(&self, text: &str) -> BTreeSet<String> {
        self.library.topics_for(text)
    }

    /// 0..=100 safety score of `text` scored as a post.
    pub fn safety_score(&self, text: &str) -> u8 {
        let result = self.moderate(&ContentAnalysis::post(text, "anonymous"));
        safety_score_from_confidence(result.confidence)
    }

    /// Whether `text` meets the ad placement threshold.
    pub fn is_ad_friendly(&self, text: &str) -> bool {
        is_ad_friendly_score(self.safety_score(text))
    }

    /// Full pre-posting check of a top-level post.
    pub fn validate(&self, text: &str, author_id: &str) -> ValidationResult {
        self.validate_analysis(&ContentAnalysis::new(text, ContentKind::Post, author_id))
    }

    /// Full check for any kind of content. One scoring pass; the safety score
    /// and ad-friendliness are derived from that same confidence.
    pub fn validate_analysis(&self, analysis: &ContentAnalysis) -> ValidationResult {
        let moderation = self.moderate(analysis);
        let topics = self.categorize(&analysis.text);
        let result = ValidationResult::from_parts(moderation, topics);

        if !result.can_post {
            tracing::info!(
                author_id = %analysis.author_id,
                kind = %analysis.kind,
                safety_score = result.safety_score,
                flags = ?result.flags(),
                "Content rejected by compliance check"
            );
        }

        result
    }
}

/// Advice for the author. Checks are independent and run in a fixed order.
fn recommendations_for(flags: &BTreeSet<String>, categories: &BTreeSet<String>) -> Vec<String> {
    let mut recommendations = Vec::new();

    if flags.contains("violence") || flags.contains("hate") {
        recommendations.push(HARMFUL_ADVICE.to_string());
    }
    if flags.contains("spam") {
        recommendations.push(PROMOTIONAL_ADVICE.to_string());
    }
    if flags.contains("adult") {
        recommendations.push(AUDIENCE_ADVICE.to_string());
    }
    if categories.contains("technical") || categories.contains("professional") {
        recommendations.push(POSITIVE_ADVICE.to_string());
    }

    recommendations
}

// ============================================================================
// TESTS
// ============================================================================
