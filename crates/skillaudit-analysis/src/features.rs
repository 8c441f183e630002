//! Feature extraction
//!
//! Turns a skill's description and tool declaration into the three sets the
//! similarity engine compares. Sets are ordered so iteration is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use skillaudit_types::Skill;

use crate::config::{AnalysisConfig, Stopwords};

/// Minimum token length, in characters, for a keyword
const MIN_KEYWORD_CHARS: usize = 2;

/// Comparable features of one skill
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillFeatures {
    /// Lower-cased quoted trigger phrases
    pub triggers: BTreeSet<String>,
    /// Lower-cased, stopword-filtered content words
    pub keywords: BTreeSet<String>,
    /// Declared tools, case preserved
    pub tools: BTreeSet<String>,
}

impl SkillFeatures {
    /// Extract all features of a skill
    pub fn extract(skill: &Skill, stopwords: &Stopwords) -> Self {
        Self {
            triggers: extract_triggers(&skill.description),
            keywords: extract_keywords(&skill.description, stopwords),
            tools: extract_tools(skill.tools.as_deref()),
        }
    }
}

/// Every double-quoted phrase, lower-cased
///
/// Quotes pair up left to right. An empty pair `""` does not match, and its
/// closing quote may open the next phrase. A trailing unterminated quote yields
/// nothing.
pub fn extract_triggers(text: &str) -> BTreeSet<String> {
    let mut triggers = BTreeSet::new();
    let mut rest = text;

    while let Some(open) = rest.find('"') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('"') else {
            break;
        };

        if close == 0 {
            rest = after_open;
            continue;
        }

        triggers.insert(after_open[..close].to_lowercase());
        rest = &after_open[close + 1..];
    }

    triggers
}

fn is_keyword_char(c: char) -> bool {
    c.is_ascii_lowercase() || ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Lower-cased runs of ASCII letters or CJK ideographs, minus stopwords
pub fn extract_keywords(text: &str, stopwords: &Stopwords) -> BTreeSet<String> {
    let lowered = text.to_lowercase();

    lowered
        .split(|c: char| !is_keyword_char(c))
        .filter(|token| token.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|token| !stopwords.contains(token))
        .map(str::to_string)
        .collect()
}

/// Comma-separated tool names, trimmed, empties dropped
pub fn extract_tools(declared: Option<&str>) -> BTreeSet<String> {
    declared
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tool| !tool.is_empty())
        .map(str::to_string)
        .collect()
}

/// Features of every skill in a corpus, computed once and keyed by name
#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    entries: BTreeMap<String, SkillFeatures>,
}

impl FeatureIndex {
    /// Extract features for all skills; a later skill replaces an earlier one of the same name
    pub fn build(skills: &[Skill], config: &AnalysisConfig) -> Self {
        let entries = skills
            .iter()
            .map(|skill| {
                (
                    skill.name.clone(),
                    SkillFeatures::extract(skill, &config.stopwords),
                )
            })
            .collect();
        Self { entries }
    }

    /// Features of one skill
    pub fn get(&self, name: &str) -> Option<&SkillFeatures> {
        self.entries.get(name)
    }

    /// Skills with their features, in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillFeatures)> {
        self.entries.iter().map(|(name, f)| (name.as_str(), f))
    }

    /// Number of indexed skills
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_triggers_are_lowercased() {
        let triggers = extract_triggers(r#"Use when the user says "Deploy App" or "rollback""#);
        assert_eq!(triggers, set(&["deploy app", "rollback"]));
    }

    #[test]
    fn test_triggers_case_insensitive_identity() {
        let triggers = extract_triggers(r#""Ship It" and "ship it""#);
        assert_eq!(triggers, set(&["ship it"]));
    }

    #[test]
    fn test_no_quotes_no_triggers() {
        assert!(extract_triggers("Plain description without phrases").is_empty());
    }

    #[test]
    fn test_unterminated_quote_is_ignored() {
        let triggers = extract_triggers(r#"Say "hello" then "never closed"#);
        assert_eq!(triggers, set(&["hello"]));
    }

    #[test]
    fn test_empty_quotes_shift_pairing() {
        let triggers = extract_triggers(r#"a "" b "c""#);
        assert_eq!(triggers, set(&[" b "]));
    }

    #[test]
    fn test_keywords_filter_stopwords_and_short_tokens() {
        let keywords = extract_keywords(
            "Handles the deploy of a Kubernetes cluster when the user asks",
            &Stopwords::default(),
        );
        assert_eq!(keywords, set(&["handles", "deploy", "kubernetes", "cluster"]));
    }

    #[test]
    fn test_keywords_split_on_digits_and_punctuation() {
        let keywords = extract_keywords("k8s-deploy, v2.release", &Stopwords::none());
        assert_eq!(keywords, set(&["deploy", "release"]));
    }

    #[test]
    fn test_keywords_include_cjk_runs() {
        let keywords = extract_keywords("部署 應用 使用 Docker", &Stopwords::default());
        assert_eq!(keywords, set(&["部署", "應用", "docker"]));
    }

    #[test]
    fn test_keywords_honor_custom_stopwords() {
        let keywords = extract_keywords("deploy review", &Stopwords::new(["deploy"]));
        assert_eq!(keywords, set(&["review"]));
    }

    #[test]
    fn test_tools_trimmed_case_preserved() {
        assert_eq!(
            extract_tools(Some(" Read, Grep ,, Bash ")),
            set(&["Read", "Grep", "Bash"])
        );
    }

    #[test]
    fn test_absent_tools_is_empty() {
        assert!(extract_tools(None).is_empty());
        assert!(extract_tools(Some("")).is_empty());
        assert!(extract_tools(Some(" , ")).is_empty());
    }

    #[test]
    fn test_feature_index_last_name_wins() {
        let skills = vec![
            Skill::new("dup", "first version"),
            Skill::new("dup", "second version"),
            Skill::new("other", "text"),
        ];
        let index = FeatureIndex::build(&skills, &AnalysisConfig::default());
        assert_eq!(index.len(), 2);
        assert!(index.get("dup").unwrap().keywords.contains("second"));
    }
}
