// Telemetry domain models - engagement events the app reports.
//
// Events are plain data. Where they end up (logs, a file, an analytics
// backend) is decided by whichever TelemetrySink the caller injects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const CATEGORY_SOCIAL: &str = "social_engagement";
pub const CATEGORY_USER: &str = "user_engagement";
pub const CATEGORY_SAFETY: &str = "content_safety";
pub const CATEGORY_BEHAVIOR: &str = "user_behavior";

/// A single analytics event.
///
/// Tag-manager style events (page views, auth, searches...) carry no
/// category; engagement events always do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl EngagementEvent {
    /// A bare, uncategorized event; use the builders below to fill in the rest.
    pub fn event(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            category: None,
            label: None,
            value: None,
            parameters: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// A bare event filed under `category`.
    pub fn engagement(action: impl Into<String>, category: impl Into<String>) -> Self {
        let mut event = Self::event(action);
        event.category = Some(category.into());
        event
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }

    pub fn social_share(platform: &str, content_type: &str, content_id: &str) -> Self {
        Self::engagement("share", CATEGORY_SOCIAL)
            .with_label(platform)
            .with_value(1.0)
            .with_param("content_type", content_type)
            .with_param("content_id", content_id)
            .with_param("engagement_type", "share")
    }

    /// `action` is one of post, reply, like, delete.
    pub fn comment_interaction(action: &str, post_id: &str) -> Self {
        Self::engagement(format!("comment_{}", action), CATEGORY_USER)
            .with_label("comment_interaction")
            .with_value(1.0)
            .with_param("post_id", post_id)
            .with_param("engagement_type", "comment")
    }

    pub fn reaction(reaction_type: &str, content_id: &str) -> Self {
        Self::engagement("reaction", CATEGORY_USER)
            .with_label(reaction_type)
            .with_value(1.0)
            .with_param("reaction_type", reaction_type)
            .with_param("content_id", content_id)
            .with_param("engagement_type", "reaction")
    }

    /// `action` is one of report, flag, block.
    pub fn moderation(action: &str, reason: &str, content_id: &str) -> Self {
        Self::engagement(format!("moderation_{}", action), CATEGORY_SAFETY)
            .with_label(reason)
            .with_value(1.0)
            .with_param("moderation_reason", reason)
            .with_param("content_id", content_id)
            .with_param("safety_action", action)
    }

    pub fn session_summary(duration_secs: u64, page_views: u32, interactions: u32) -> Self {
        let engagement_rate = if page_views == 0 {
            0.0
        } else {
            f64::from(interactions) / f64::from(page_views)
        };

        Self::engagement("session_summary", CATEGORY_BEHAVIOR)
            .with_label("session_engagement")
            .with_value(duration_secs as f64)
            .with_param("session_duration", duration_secs)
            .with_param("page_views", page_views)
            .with_param("total_interactions", interactions)
            .with_param("engagement_rate", engagement_rate)
    }

    pub fn content_view(content_id: &str, content_type: &str, author: &str) -> Self {
        Self::event("view_item")
            .with_value(0.0)
            .with_param("currency", "USD")
            .with_param(
                "items",
                json!([{
                    "item_id": content_id,
                    "item_name": format!("{}_content", content_type),
                    "item_category": content_type,
                    "item_brand": "Geeks & Nerds",
                    "item_variant": author,
                    "quantity": 1
                }]),
            )
    }

    /// `action` is one of create, like, comment, share, delete.
    pub fn post_interaction(
        action: &str,
        post_id: &str,
        post_type: &str,
        user_id: Option<&str>,
    ) -> Self {
        Self::engagement("post_interaction", CATEGORY_USER)
            .with_label(action)
            .with_param("interaction_type", action)
            .with_param("post_id", post_id)
            .with_param("post_type", post_type)
            .with_param("user_id", user_id.unwrap_or("anonymous"))
    }

    pub fn page_view(page_path: &str, page_title: &str) -> Self {
        Self::event("page_view")
            .with_param("page_path", page_path)
            .with_param("page_title", page_title)
    }

    /// `action` is one of login, register, logout.
    pub fn auth(action: &str, user_id: Option<&str>) -> Self {
        Self::event("auth_event")
            .with_param("auth_action", action)
            .with_param("user_id", user_id.unwrap_or("anonymous"))
    }

    /// `action` is one of upload, download, view.
    pub fn file_action(
        action: &str,
        file_type: &str,
        file_name: &str,
        file_size: Option<u64>,
    ) -> Self {
        let event = Self::event("file_action")
            .with_param("file_action", action)
            .with_param("file_type", file_type)
            .with_param("file_name", file_name);
        match file_size {
            Some(size) => event.with_param("file_size", size),
            None => event,
        }
    }

    pub fn search(search_term: &str, results_count: Option<u64>) -> Self {
        let event = Self::event("search").with_param("search_term", search_term);
        match results_count {
            Some(count) => event.with_param("search_results_count", count),
            None => event,
        }
    }

    pub fn form_submission(
        form_name: &str,
        form_type: &str,
        success: bool,
        error_message: Option<&str>,
    ) -> Self {
        let event = Self::event("form_submission")
            .with_param("form_name", form_name)
            .with_param("form_type", form_type)
            .with_param("submission_success", success);
        match error_message {
            Some(message) => event.with_param("error_message", message),
            None => event,
        }
    }

    /// Arbitrary named event with caller-supplied parameters.
    pub fn custom(event_name: impl Into<String>, parameters: Map<String, Value>) -> Self {
        let mut event = Self::event(event_name);
        event.parameters = parameters;
        event
    }

    pub fn content_compliance(content_id: &str, is_compliant: bool, categories: &[String]) -> Self {
        let (label, status) = if is_compliant {
            ("compliant", "approved")
        } else {
            ("non_compliant", "flagged")
        };

        Self::engagement("content_compliance_check", CATEGORY_SAFETY)
            .with_label(label)
            .with_value(if is_compliant { 1.0 } else { 0.0 })
            .with_param("content_id", content_id)
            .with_param("is_advertiser_friendly", is_compliant)
            .with_param("content_categories", categories.join(","))
            .with_param("compliance_status", status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_and_moderation_actions_are_prefixed() {
        let event = EngagementEvent::comment_interaction("reply", "p1");
        assert_eq!(event.action, "comment_reply");
        assert_eq!(event.category(), Some(CATEGORY_USER));
        assert_eq!(event.param("post_id"), Some(&json!("p1")));

        let event = EngagementEvent::moderation("block", "spam", "p2");
        assert_eq!(event.action, "moderation_block");
        assert_eq!(event.category(), Some(CATEGORY_SAFETY));
        assert_eq!(event.label.as_deref(), Some("spam"));
        assert_eq!(event.param("safety_action"), Some(&json!("block")));
    }

    #[test]
    fn test_session_summary_rate() {
        let event = EngagementEvent::session_summary(120, 4, 10);
        assert_eq!(event.value, Some(120.0));
        assert_eq!(event.param("engagement_rate"), Some(&json!(2.5)));

        let event = EngagementEvent::session_summary(5, 0, 3);
        assert_eq!(event.param("engagement_rate"), Some(&json!(0.0)));
    }

    #[test]
    fn test_content_compliance() {
        let categories = vec!["frontend-development".to_string(), "design-ux".to_string()];

        let event = EngagementEvent::content_compliance("p1", true, &categories);
        assert_eq!(event.label.as_deref(), Some("compliant"));
        assert_eq!(event.value, Some(1.0));
        assert_eq!(
            event.param("content_categories"),
            Some(&json!("frontend-development,design-ux"))
        );
        assert_eq!(event.param("compliance_status"), Some(&json!("approved")));

        let event = EngagementEvent::content_compliance("p1", false, &[]);
        assert_eq!(event.label.as_deref(), Some("non_compliant"));
        assert_eq!(event.value, Some(0.0));
        assert_eq!(event.param("compliance_status"), Some(&json!("flagged")));
    }

    #[test]
    fn test_post_interaction_defaults_to_anonymous() {
        let event = EngagementEvent::post_interaction("create", "p1", "code", None);
        assert_eq!(event.param("user_id"), Some(&json!("anonymous")));

        let event = EngagementEvent::post_interaction("like", "p1", "text", Some("u9"));
        assert_eq!(event.param("user_id"), Some(&json!("u9")));
    }

    #[test]
    fn test_content_view_item() {
        let event = EngagementEvent::content_view("p1", "resume", "ada");
        assert_eq!(event.action, "view_item");
        assert_eq!(event.category(), None);
        let items = event.param("items").unwrap();
        assert_eq!(items[0]["item_name"], "resume_content");
        assert_eq!(items[0]["item_variant"], "ada");
    }

    #[test]
    fn test_tag_manager_events_are_uncategorized() {
        let event = EngagementEvent::page_view("/feed", "Feed");
        assert_eq!(event.category(), None);
        assert_eq!(event.param("page_path"), Some(&json!("/feed")));

        let event = EngagementEvent::auth("login", None);
        assert_eq!(event.action, "auth_event");
        assert_eq!(event.param("user_id"), Some(&json!("anonymous")));

        let event = EngagementEvent::file_action("upload", "pdf", "resume.pdf", Some(2048));
        assert_eq!(event.param("file_size"), Some(&json!(2048)));
        let event = EngagementEvent::file_action("view", "pdf", "resume.pdf", None);
        assert!(event.param("file_size").is_none());

        let event = EngagementEvent::search("rust jobs", Some(3));
        assert_eq!(event.param("search_results_count"), Some(&json!(3)));

        let event = EngagementEvent::form_submission("signup", "auth", false, Some("taken"));
        assert_eq!(event.param("submission_success"), Some(&json!(false)));
        assert_eq!(event.param("error_message"), Some(&json!("taken")));

        let mut params = Map::new();
        params.insert("theme".to_string(), json!("dark"));
        let event = EngagementEvent::custom("theme_changed", params);
        assert_eq!(event.action, "theme_changed");
        assert_eq!(event.param("theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let event = EngagementEvent::engagement("ping", CATEGORY_USER);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["category"], CATEGORY_USER);
        assert!(json.get("label").is_none());
        assert!(json.get("value").is_none());
        assert!(json.get("parameters").is_none());

        let back: EngagementEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
