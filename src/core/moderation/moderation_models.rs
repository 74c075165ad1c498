// Moderation domain models - data structures for the compliance scorer.
//
// These are pure value types with no I/O. Every moderation call builds a fresh
// ContentAnalysis and gets fresh results back; nothing here is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Confidence every analysis starts from before penalties and bonuses.
pub const BASE_CONFIDENCE: f64 = 1.0;
/// Subtracted once per matching prohibited pattern.
pub const PROHIBITED_PENALTY: f64 = 0.3;
/// Added once per matching positive pattern.
pub const POSITIVE_BONUS: f64 = 0.1;
/// Comments and replies shorter than this are flagged. Measured in UTF-16
/// code units, the same unit browsers report for text length.
pub const MIN_COMMENT_LEN: usize = 10;
/// Penalty for `too_short` and for `excessive_caps`.
pub const COMMENT_PENALTY: f64 = 0.1;
/// More URLs than this earns the `excessive_links` flag.
pub const MAX_LINKS: usize = 2;
pub const LINK_PENALTY: f64 = 0.2;
/// Confidence must be strictly above this to be approved.
pub const APPROVAL_CONFIDENCE: f64 = 0.5;
/// Minimum safety score for ad placement.
pub const AD_FRIENDLY_MIN_SCORE: u8 = 70;
/// Minimum safety score for a submission to go live.
pub const CAN_POST_MIN_SCORE: u8 = 50;

pub const FLAG_TOO_SHORT: &str = "too_short";
pub const FLAG_EXCESSIVE_CAPS: &str = "excessive_caps";
pub const FLAG_EXCESSIVE_LINKS: &str = "excessive_links";

/// Topic returned by categorization when nothing more specific matches.
pub const FALLBACK_TOPIC: &str = "general-tech";

/// Where a piece of text is being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Post,
    Comment,
    Reply,
}

impl ContentKind {
    /// Comments and replies get the short-text and shouting heuristics.
    pub fn is_conversational(&self) -> bool {
        matches!(self, ContentKind::Comment | ContentKind::Reply)
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Post => write!(f, "post"),
            ContentKind::Comment => write!(f, "comment"),
            ContentKind::Reply => write!(f, "reply"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "post" => Ok(ContentKind::Post),
            "comment" => Ok(ContentKind::Comment),
            "reply" => Ok(ContentKind::Reply),
            other => Err(format!("unknown content kind: {}", other)),
        }
    }
}

/// Input to a single moderation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub text: String,
    pub kind: ContentKind,
    /// Opaque, never validated.
    pub author_id: String,
    pub submitted_at: DateTime<Utc>,
}

impl ContentAnalysis {
    pub fn new(text: impl Into<String>, kind: ContentKind, author_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            author_id: author_id.into(),
            submitted_at: Utc::now(),
        }
    }

    /// A top-level post.
    pub fn post(text: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self::new(text, ContentKind::Post, author_id)
    }
}

/// Output of the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub is_approved: bool,
    /// Always within [0, 1].
    pub confidence: f64,
    /// Negative categories and heuristic flags that fired.
    pub flags: BTreeSet<String>,
    /// Positive categories that fired.
    pub categories: BTreeSet<String>,
    /// Advice for the author, in check order.
    pub recommendations: Vec<String>,
}

impl ModerationResult {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// `round(confidence * 100)`.
    pub fn safety_score(&self) -> u8 {
        safety_score_from_confidence(self.confidence)
    }
}

/// Full verdict for a submission: the scorer's output plus the derived
/// placement decisions and topical tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(flatten)]
    pub moderation: ModerationResult,
    /// Never empty; falls back to `general-tech`.
    pub topical_categories: BTreeSet<String>,
    pub safety_score: u8,
    pub is_ad_friendly: bool,
    pub can_post: bool,
}

impl ValidationResult {
    /// Derive the placement decisions from a finished moderation pass.
    pub fn from_parts(moderation: ModerationResult, topical_categories: BTreeSet<String>) -> Self {
        let safety_score = moderation.safety_score();
        let is_ad_friendly = is_ad_friendly_score(safety_score);
        let can_post = moderation.is_approved && safety_score >= CAN_POST_MIN_SCORE;

        Self {
            moderation,
            topical_categories,
            safety_score,
            is_ad_friendly,
            can_post,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.moderation.is_approved
    }

    pub fn flags(&self) -> &BTreeSet<String> {
        &self.moderation.flags
    }
}

/// Clamp to [0, 1] and scale to a 0..=100 score.
pub fn safety_score_from_confidence(confidence: f64) -> u8 {
    // NaN can't come out of the scorer, but keep the cast well-defined anyway.
    if confidence.is_nan() {
        return 0;
    }
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

pub fn is_ad_friendly_score(safety_score: u8) -> bool {
    safety_score >= AD_FRIENDLY_MIN_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moderation(is_approved: bool, confidence: f64) -> ModerationResult {
        ModerationResult {
            is_approved,
            confidence,
            flags: BTreeSet::new(),
            categories: BTreeSet::new(),
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn test_safety_score_rounds_and_clamps() {
        assert_eq!(safety_score_from_confidence(1.0), 100);
        assert_eq!(safety_score_from_confidence(0.0), 0);
        assert_eq!(safety_score_from_confidence(0.7), 70);
        assert_eq!(safety_score_from_confidence(0.456), 46);
        assert_eq!(safety_score_from_confidence(1.7), 100);
        assert_eq!(safety_score_from_confidence(-0.5), 0);
    }

    #[test]
    fn test_can_post_needs_approval_and_score() {
        let topics = BTreeSet::from([FALLBACK_TOPIC.to_string()]);

        let ok = ValidationResult::from_parts(moderation(true, 0.8), topics.clone());
        assert!(ok.can_post);
        assert!(ok.is_ad_friendly);

        let not_approved = ValidationResult::from_parts(moderation(false, 0.8), topics.clone());
        assert!(!not_approved.can_post);
        assert!(not_approved.is_ad_friendly);

        let low = ValidationResult::from_parts(moderation(true, 0.4), topics);
        assert!(!low.can_post);
        assert!(!low.is_ad_friendly);
    }

    #[test]
    fn test_ad_friendly_boundary() {
        assert!(is_ad_friendly_score(70));
        assert!(!is_ad_friendly_score(69));
    }

    #[test]
    fn test_content_kind_parsing() {
        assert_eq!("Comment".parse::<ContentKind>(), Ok(ContentKind::Comment));
        assert_eq!("reply".parse::<ContentKind>(), Ok(ContentKind::Reply));
        assert!("story".parse::<ContentKind>().is_err());
        assert!(!ContentKind::Post.is_conversational());
        assert!(ContentKind::Reply.is_conversational());
    }

    #[test]
    fn test_validation_result_serializes_flat() {
        let result = ValidationResult::from_parts(
            moderation(true, 1.0),
            BTreeSet::from([FALLBACK_TOPIC.to_string()]),
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["is_approved"], true);
        assert_eq!(json["safety_score"], 100);
        assert_eq!(json["topical_categories"][0], "general-tech");
        assert!(json.get("moderation").is_none());
    }
}
