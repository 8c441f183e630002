//! `SkillAudit` Analysis Core
//!
//! Detects overlapping skill definitions.
//!
//! ## Pipeline
//!
//! 1. Extract triggers, keywords and tools once per skill ([`FeatureIndex`])
//! 2. Score every unordered pair and keep those above the reporting threshold
//!    ([`SimilarityEngine`])
//! 3. Group skills connected by scores at or above the cluster threshold
//!    ([`ClusterBuilder`])
//!
//! Every step is a pure function of the skills and the [`AnalysisConfig`].

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod cluster;
pub mod config;
pub mod features;
pub mod similarity;

pub use cluster::{ClusterBuilder, DisjointSet};
pub use config::{AnalysisConfig, ScoreWeights, Stopwords};
pub use features::{FeatureIndex, SkillFeatures};
pub use similarity::{jaccard, PairScore, SimilarityEngine};

use std::collections::BTreeMap;

use skillaudit_types::{AuditReport, Skill, SkillSummary};
use tracing::info;

/// Run the full overlap analysis over a set of skills
pub fn analyze(skills: &[Skill], config: &AnalysisConfig) -> AuditReport {
    let index = FeatureIndex::build(skills, config);
    let overlaps = SimilarityEngine::new(config).compute_overlaps(&index);
    let clusters = ClusterBuilder::new(config).build(&overlaps);

    info!(
        "Analyzed {} skills: {} overlap pairs, {} clusters (threshold {})",
        index.len(),
        overlaps.len(),
        clusters.len(),
        config.cluster_threshold
    );

    AuditReport {
        total_skills: index.len(),
        overlaps,
        clusters,
        skills: inventory(skills),
    }
}

/// One summary per skill name, ordered by name; a later skill replaces an earlier one
fn inventory(skills: &[Skill]) -> Vec<SkillSummary> {
    let by_name: BTreeMap<&str, SkillSummary> = skills
        .iter()
        .map(|skill| (skill.name.as_str(), SkillSummary::from(skill)))
        .collect();
    by_name.into_values().collect()
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{analyze, AnalysisConfig, ScoreWeights, Stopwords};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_corpus() {
        let report = analyze(&[], &AnalysisConfig::default());
        assert_eq!(report, AuditReport::default());
    }

    #[test]
    fn test_one_skill_has_no_overlaps_or_clusters() {
        let report = analyze(
            &[Skill::new("solo", r#"Handles "deploy app" requests"#)],
            &AnalysisConfig::default(),
        );
        assert_eq!(report.total_skills, 1);
        assert!(report.overlaps.is_empty());
        assert!(report.clusters.is_empty());
        assert_eq!(report.skills.len(), 1);
    }

    #[test]
    fn test_inventory_sorted_and_deduplicated() {
        let skills = vec![
            Skill::new("zeta", "last").with_version("2.0"),
            Skill::new("alpha", "first"),
            Skill::new("zeta", "replacement").with_version("3.0"),
        ];
        let report = analyze(&skills, &AnalysisConfig::default());
        let names: Vec<&str> = report.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(report.skills[1].version.as_deref(), Some("3.0"));
        assert_eq!(report.total_skills, report.skills.len());
    }

    #[test]
    fn test_custom_weights_change_clustering() {
        let skills = vec![
            Skill::new("a", "terraform modules").with_tools("Bash"),
            Skill::new("b", "ansible playbooks").with_tools("Bash"),
        ];

        // tools only: 0.2 * 1.0 is reported but stays below the cluster threshold
        let default_report = analyze(&skills, &AnalysisConfig::default());
        assert_eq!(default_report.overlaps.len(), 1);
        assert!(default_report.clusters.is_empty());

        let tool_heavy = AnalysisConfig::default().with_weights(ScoreWeights {
            keyword: 0.2,
            tool: 0.8,
            trigger_bonus: 0.0,
        });
        let report = analyze(&skills, &tool_heavy);
        assert_eq!(report.overlaps.len(), 1);
        assert_eq!(report.clusters.len(), 1);
    }
}
