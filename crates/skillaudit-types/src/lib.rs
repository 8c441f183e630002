//! SkillAudit Types - Core types for the skill overlap audit
//!
//! This module defines the data model shared by the loader, the analysis core
//! and the report renderers.

use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// Number of decimal places kept for scores in machine-readable output
pub const SCORE_DECIMALS: usize = 3;

/// A single skill definition loaded from a `SKILL.md` document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    pub description: String,
    /// Raw comma-separated tool declaration, exactly as written
    pub tools: Option<String>,
    pub version: Option<String>,
    pub body_line_count: usize,
    pub source_path: PathBuf,
}

impl Skill {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tools: None,
            version: None,
            body_line_count: 0,
            source_path: PathBuf::new(),
        }
    }

    pub fn with_tools(mut self, tools: impl Into<String>) -> Self {
        self.tools = Some(tools.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_body_line_count(mut self, lines: usize) -> Self {
        self.body_line_count = lines;
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }
}

// ============================================================================
// Analysis Results
// ============================================================================

/// One unordered pair of skills whose composite score passed the reporting threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlapRecord {
    /// Skill names, lexicographically ordered
    pub pair: (String, String),
    #[serde(serialize_with = "serialize_score")]
    pub composite: f64,
    #[serde(rename = "keyword_sim", serialize_with = "serialize_score")]
    pub keyword_similarity: f64,
    #[serde(rename = "tool_sim", serialize_with = "serialize_score")]
    pub tool_similarity: f64,
    pub trigger_overlap: Vec<String>,
    pub shared_keywords: Vec<String>,
}

impl OverlapRecord {
    /// Build a record, normalizing the pair into lexicographic order
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        let pair = if a <= b { (a, b) } else { (b, a) };
        Self {
            pair,
            composite: 0.0,
            keyword_similarity: 0.0,
            tool_similarity: 0.0,
            trigger_overlap: Vec::new(),
            shared_keywords: Vec::new(),
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.pair.0 == name || self.pair.1 == name
    }

    /// Ranking order: published composite descending, then pair ascending
    ///
    /// Compares the rounded composite so records that print the same score
    /// are listed in pair order.
    pub fn rank_cmp(&self, other: &Self) -> std::cmp::Ordering {
        round_score(other.composite)
            .total_cmp(&round_score(self.composite))
            .then_with(|| self.pair.cmp(&other.pair))
    }
}

/// A maximal group of at least two transitively overlapping skills
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Cluster {
    members: Vec<String>,
}

impl Cluster {
    /// Create a cluster; members are sorted and deduplicated
    pub fn new(members: impl IntoIterator<Item = String>) -> Self {
        let mut members: Vec<String> = members.into_iter().collect();
        members.sort();
        members.dedup();
        Self { members }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.binary_search_by(|m| m.as_str().cmp(name)).is_ok()
    }

    /// Smallest member name, used to order clusters
    pub fn representative(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }
}

/// Inventory entry for one analyzed skill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillSummary {
    pub name: String,
    pub version: Option<String>,
    pub body_lines: usize,
    /// Raw tool declaration
    pub tools: Option<String>,
}

impl From<&Skill> for SkillSummary {
    fn from(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            version: skill.version.clone(),
            body_lines: skill.body_line_count,
            tools: skill.tools.clone(),
        }
    }
}

/// Full result of one audit run, serialized as the machine-readable report
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditReport {
    pub total_skills: usize,
    pub overlaps: Vec<OverlapRecord>,
    pub clusters: Vec<Cluster>,
    /// Analyzed skills, ordered by name
    #[serde(default)]
    pub skills: Vec<SkillSummary>,
}

/// Round a score for display and serialization
///
/// Rounds the exact binary value half to even, so `0.3125` becomes `0.312`.
pub fn round_score(value: f64) -> f64 {
    format!("{:.*}", SCORE_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

fn serialize_score<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_score(*value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_score_ties_to_even() {
        assert_eq!(round_score(0.3125), 0.312);
        assert_eq!(round_score(0.0625), 0.062);
        assert_eq!(round_score(0.1875), 0.188);
        assert_eq!(round_score(2.0 / 3.0), 0.667);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn test_rank_cmp_uses_published_score() {
        // 0.18846 and 0.1875 both print as 0.188
        let mut later = OverlapRecord::new("c", "d");
        later.composite = 0.5 / 13.0 + 0.2 * 0.75;
        let mut earlier = OverlapRecord::new("a", "b");
        earlier.composite = 0.5 * 3.0 / 8.0;
        assert!(later.composite > earlier.composite);

        let mut records = vec![later, earlier];
        records.sort_by(OverlapRecord::rank_cmp);
        assert_eq!(records[0].pair.0, "a");
        assert_eq!(records[1].pair.0, "c");
    }

    #[test]
    fn test_skill_summary_from_skill() {
        let skill = Skill::new("pdf", "Reads PDFs")
            .with_tools("Read")
            .with_body_line_count(4);
        let summary = SkillSummary::from(&skill);
        assert_eq!(summary.name, "pdf");
        assert_eq!(summary.version, None);
        assert_eq!(summary.body_lines, 4);
        assert_eq!(summary.tools.as_deref(), Some("Read"));
    }

    #[test]
    fn test_overlap_pair_is_ordered() {
        let record = OverlapRecord::new("zeta", "alpha");
        assert_eq!(record.pair, ("alpha".to_string(), "zeta".to_string()));
        assert!(record.involves("zeta"));
        assert!(!record.involves("beta"));
    }

    #[test]
    fn test_overlap_serializes_rounded_scores() {
        let mut record = OverlapRecord::new("a", "b");
        record.composite = 1.0 / 3.0;
        record.keyword_similarity = 0.12345;
        record.tool_similarity = 2.0 / 3.0;
        record.trigger_overlap = vec!["deploy app".to_string()];

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["pair"], serde_json::json!(["a", "b"]));
        assert_eq!(json["composite"], serde_json::json!(0.333));
        assert_eq!(json["keyword_sim"], serde_json::json!(0.123));
        assert_eq!(json["tool_sim"], serde_json::json!(0.667));
        assert_eq!(json["trigger_overlap"], serde_json::json!(["deploy app"]));
    }

    #[test]
    fn test_rank_cmp_breaks_ties_by_pair() {
        let mut a = OverlapRecord::new("b", "c");
        a.composite = 0.5;
        let mut b = OverlapRecord::new("a", "z");
        b.composite = 0.5;
        let mut c = OverlapRecord::new("x", "y");
        c.composite = 0.9;

        let mut records = vec![a, b, c];
        records.sort_by(OverlapRecord::rank_cmp);
        let pairs: Vec<_> = records.iter().map(|r| r.pair.0.as_str()).collect();
        assert_eq!(pairs, vec!["x", "a", "b"]);
    }

    #[test]
    fn test_cluster_sorted_and_transparent() {
        let cluster = Cluster::new(vec!["c".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(cluster.representative(), Some("a"));
        assert!(cluster.contains("b"));
        assert!(!cluster.contains("d"));
        assert_eq!(
            serde_json::to_string(&cluster).unwrap(),
            r#"["a","b","c"]"#
        );
    }
}
