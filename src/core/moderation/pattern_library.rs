// Pattern library - the regex tables behind the compliance scorer.
//
// Tables come in as a serde-friendly PatternConfig (built-in defaults, or a
// JSON file loaded by the infra layer) and get compiled once into a
// PatternLibrary. All patterns are matched case-insensitively.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

use super::moderation_models::FALLBACK_TOPIC;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid pattern for '{category}' ({pattern}): {source}")]
    InvalidPattern {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// One scoring category and the patterns that trigger it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPatterns {
    pub category: String,
    pub patterns: Vec<String>,
}

/// One topical tag and the single pattern that assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicPattern {
    pub topic: String,
    pub pattern: String,
}

/// Uncompiled pattern tables. Order is kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default)]
    pub prohibited: Vec<CategoryPatterns>,
    #[serde(default)]
    pub positive: Vec<CategoryPatterns>,
    #[serde(default)]
    pub topics: Vec<TopicPattern>,
}

fn group(category: &str, patterns: &[&str]) -> CategoryPatterns {
    CategoryPatterns {
        category: category.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

fn topic(topic: &str, pattern: &str) -> TopicPattern {
    TopicPattern {
        topic: topic.to_string(),
        pattern: pattern.to_string(),
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            prohibited: vec![
                group(
                    "violence",
                    &[
                        r"\b(kill|murder|death|violence|harm|hurt|attack|fight|war|weapon|gun|knife|bomb)\b",
                        r"\b(blood|gore|torture|abuse|assault|threat)\b",
                    ],
                ),
                group(
                    "adult",
                    &[
                        r"\b(sex|porn|nude|naked|adult|explicit|nsfw)\b",
                        r"\b(dating|hookup|escort|massage)\b",
                    ],
                ),
                group(
                    "hate",
                    &[
                        r"\b(hate|racist|discrimination|bigot|nazi|supremacist)\b",
                        r"\b(terrorist|extremist|radical|fanatic)\b",
                    ],
                ),
                group(
                    "illegal",
                    &[
                        r"\b(drug|cocaine|heroin|marijuana|weed|illegal|piracy|hack|crack|steal)\b",
                        r"\b(fraud|scam|cheat|counterfeit|fake)\b",
                    ],
                ),
                group(
                    "spam",
                    &[
                        r"\b(click here|free money|get rich|miracle cure|guaranteed|limited time)\b",
                        r"\b(buy now|act fast|don't wait|urgent|exclusive offer)\b",
                    ],
                ),
            ],
            positive: vec![
                group(
                    "technical",
                    &[
                        r"\b(code|programming|development|software|algorithm|database|api|framework)\b",
                        r"\b(javascript|python|react|node|typescript|css|html|sql|git)\b",
                    ],
                ),
                group(
                    "professional",
                    &[
                        r"\b(career|job|interview|resume|skills|experience|education|learning)\b",
                        r"\b(team|collaboration|project|meeting|presentation|leadership)\b",
                    ],
                ),
                group(
                    "educational",
                    &[
                        r"\b(tutorial|guide|learn|teach|explain|understand|knowledge|study)\b",
                        r"\b(course|training|workshop|certification|degree|university)\b",
                    ],
                ),
            ],
            topics: vec![
                topic(
                    "frontend-development",
                    r"\b(javascript|js|react|vue|angular|node)\b",
                ),
                topic(
                    "backend-development",
                    r"\b(python|django|flask|fastapi|backend|api)\b",
                ),
                topic(
                    "devops-infrastructure",
                    r"\b(devops|docker|kubernetes|aws|cloud|deployment)\b",
                ),
                topic(
                    "artificial-intelligence",
                    r"\b(ai|ml|machine learning|data science|tensorflow|pytorch)\b",
                ),
                topic(
                    "mobile-development",
                    r"\b(mobile|ios|android|react native|flutter)\b",
                ),
                topic(
                    "career-development",
                    r"\b(career|job|interview|hiring|resume|salary)\b",
                ),
                topic(
                    "entrepreneurship",
                    r"\b(startup|entrepreneur|business|funding|investment)\b",
                ),
                topic(
                    "design-ux",
                    r"\b(design|ui|ux|user experience|interface|prototype)\b",
                ),
            ],
        }
    }
}

// ============================================================================
// COMPILED LIBRARY
// ============================================================================

/// A compiled scoring category.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    category: String,
    patterns: Vec<Regex>,
}

impl PatternGroup {
    pub fn category(&self) -> &str {
        &self.category
    }

    /// How many distinct patterns in this group match `text`.
    /// Multiple hits of the same pattern count once.
    pub fn matching_patterns(&self, text: &str) -> usize {
        self.patterns.iter().filter(|p| p.is_match(text)).count()
    }
}

#[derive(Debug, Clone)]
struct CompiledTopic {
    topic: String,
    pattern: Regex,
}

/// Compiled, immutable pattern tables shared by every moderator.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    prohibited: Vec<PatternGroup>,
    positive: Vec<PatternGroup>,
    topics: Vec<CompiledTopic>,
}

lazy_static! {
    static ref BUILTIN: Arc<PatternLibrary> = Arc::new(
        PatternLibrary::from_config(PatternConfig::default())
            .expect("built-in moderation patterns must compile")
    );
}

/// Compile with ASCII semantics: `\b` only treats `[A-Za-z0-9_]` as word
/// characters and case-insensitivity only folds ASCII letters.
///
/// Patterns that could match arbitrary bytes (`.`, `[^\s]`, ...) are not
/// allowed on `&str` without Unicode mode. Those are compiled in Unicode mode
/// with their word boundaries pinned to ASCII.
fn compile(category: &str, pattern: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(false)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&ascii_word_boundaries(pattern))
                .case_insensitive(true)
                .build()
        })
        .map_err(|source| PatternError::InvalidPattern {
            category: category.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// Rewrite `\b`/`\B` to their ASCII forms, leaving other escapes alone.
fn ascii_word_boundaries(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => out.push_str(r"(?-u:\b)"),
            Some('B') => out.push_str(r"(?-u:\B)"),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn compile_groups(groups: Vec<CategoryPatterns>) -> Result<Vec<PatternGroup>, PatternError> {
    groups
        .into_iter()
        .map(|g| {
            let patterns = g
                .patterns
                .iter()
                .map(|p| compile(&g.category, p))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PatternGroup {
                category: g.category,
                patterns,
            })
        })
        .collect()
}

impl PatternLibrary {
    /// Compile a set of tables. Fails on the first pattern that doesn't parse.
    pub fn from_config(config: PatternConfig) -> Result<Self, PatternError> {
        let prohibited = compile_groups(config.prohibited)?;
        let positive = compile_groups(config.positive)?;
        let topics = config
            .topics
            .into_iter()
            .map(|t| {
                let pattern = compile(&t.topic, &t.pattern)?;
                Ok(CompiledTopic {
                    topic: t.topic,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;

        tracing::debug!(
            prohibited = prohibited.len(),
            positive = positive.len(),
            topics = topics.len(),
            "Compiled moderation pattern library"
        );

        Ok(Self {
            prohibited,
            positive,
            topics,
        })
    }

    /// The default tables, compiled on first use.
    pub fn builtin() -> Arc<PatternLibrary> {
        Arc::clone(&BUILTIN)
    }

    pub fn prohibited(&self) -> &[PatternGroup] {
        &self.prohibited
    }

    pub fn positive(&self) -> &[PatternGroup] {
        &self.positive
    }

    /// Topical tags for `text`, in set order. Falls back to `general-tech`.
    pub fn topics_for(&self, text: &str) -> BTreeSet<String> {
        let mut topics: BTreeSet<String> = self
            .topics
            .iter()
            .filter(|t| t.pattern.is_match(text))
            .map(|t| t.topic.clone())
            .collect();

        if topics.is_empty() {
            topics.insert(FALLBACK_TOPIC.to_string());
        }
        topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_compile() {
        let library = PatternLibrary::builtin();
        let names: Vec<&str> = library.prohibited().iter().map(|g| g.category()).collect();
        assert_eq!(names, vec!["violence", "adult", "hate", "illegal", "spam"]);

        let names: Vec<&str> = library.positive().iter().map(|g| g.category()).collect();
        assert_eq!(names, vec!["technical", "professional", "educational"]);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_whole_word() {
        let library = PatternLibrary::builtin();
        let violence = &library.prohibited()[0];

        assert_eq!(violence.matching_patterns("KILL the process"), 1);
        // "skill" must not trip the "kill" alternative
        assert_eq!(violence.matching_patterns("great skills"), 0);
        // one hit per pattern, not per occurrence
        assert_eq!(violence.matching_patterns("war war war"), 1);
        assert_eq!(violence.matching_patterns("gun and blood"), 2);
    }

    #[test]
    fn test_word_boundaries_are_ascii() {
        let library = PatternLibrary::builtin();
        let violence = &library.prohibited()[0];
        let adult = &library.prohibited()[1];
        let illegal = &library.prohibited()[3];

        // Accented letters are not word characters, so the English word
        // still ends at the boundary.
        assert_eq!(illegal.matching_patterns("hackó"), 1);
        assert_eq!(violence.matching_patterns("guné"), 1);
        assert_eq!(violence.matching_patterns("éwar"), 1);
        // Only ASCII letters fold: the long s is not an 's'.
        assert_eq!(adult.matching_patterns("ſex"), 0);
        assert_eq!(adult.matching_patterns("SEX"), 1);
    }

    #[test]
    fn test_byte_matching_patterns_still_compile() {
        let config = PatternConfig {
            prohibited: vec![group("links", &[r"\bhttps?://[^\s]+", r"\bpromo.code\b"])],
            positive: Vec::new(),
            topics: Vec::new(),
        };
        let library = PatternLibrary::from_config(config).unwrap();
        let links = &library.prohibited()[0];

        assert_eq!(links.matching_patterns("see HTTPS://x.example"), 1);
        assert_eq!(links.matching_patterns("promo-codeé"), 1);
    }

    #[test]
    fn test_ascii_word_boundary_rewrite() {
        assert_eq!(ascii_word_boundaries(r"\bfoo\B"), r"(?-u:\b)foo(?-u:\B)");
        assert_eq!(ascii_word_boundaries(r"a\\b"), r"a\\b");
        assert_eq!(ascii_word_boundaries(r"\d+\s"), r"\d+\s");
    }

    #[test]
    fn test_multi_word_spam_phrases() {
        let library = PatternLibrary::builtin();
        let spam = &library.prohibited()[4];

        assert_eq!(spam.matching_patterns("Click here for FREE MONEY"), 1);
        assert_eq!(spam.matching_patterns("Buy now, don't wait"), 1);
        assert_eq!(spam.matching_patterns("guaranteed! act fast"), 2);
    }

    #[test]
    fn test_topics_fall_back_to_general_tech() {
        let library = PatternLibrary::builtin();

        let topics = library.topics_for("Thoughts on the weather today");
        assert_eq!(topics, BTreeSet::from(["general-tech".to_string()]));

        let topics = library.topics_for("Shipping a React app on Docker, hiring now");
        assert!(topics.contains("frontend-development"));
        assert!(topics.contains("devops-infrastructure"));
        assert!(topics.contains("career-development"));
        assert!(!topics.contains("general-tech"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let config = PatternConfig {
            prohibited: vec![group("broken", &[r"\b(unclosed\b"])],
            positive: Vec::new(),
            topics: Vec::new(),
        };

        match PatternLibrary::from_config(config) {
            Err(PatternError::InvalidPattern { category, .. }) => assert_eq!(category, "broken"),
            other => panic!("expected InvalidPattern, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_config_defaults_missing_sections() {
        let config: PatternConfig =
            serde_json::from_str(r#"{"positive":[{"category":"rust","patterns":["\\brust\\b"]}]}"#)
                .unwrap();
        assert!(config.prohibited.is_empty());
        assert!(config.topics.is_empty());

        let library = PatternLibrary::from_config(config).unwrap();
        assert_eq!(library.positive()[0].matching_patterns("I love Rust"), 1);
        assert!(library.topics_for("anything").contains("general-tech"));
    }
}
