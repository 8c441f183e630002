//! Pairwise similarity scoring
//!
//! Scoring formula:
//!
//!   composite = 0.5 * keyword_similarity
//!             + 0.2 * tool_similarity
//!             + 0.3 (if any trigger phrase is shared)
//!
//! Keyword overlap is the broad topical signal, a shared trigger phrase is a
//! strong but binary signal, and tool lists are short and coarse. Weights come
//! from [`ScoreWeights`].

use std::collections::BTreeSet;

use skillaudit_types::OverlapRecord;
use tracing::debug;

use crate::config::{AnalysisConfig, ScoreWeights};
use crate::features::{FeatureIndex, SkillFeatures};

/// Jaccard index |A ∩ B| / |A ∪ B|, defined as 0.0 when both sets are empty
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}

/// Similarity of one pair before thresholding
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    /// Jaccard index of keyword sets
    pub keyword_similarity: f64,
    /// Jaccard index of tool sets
    pub tool_similarity: f64,
    /// Trigger phrases present in both skills
    pub trigger_overlap: BTreeSet<String>,
    /// Weighted blend, clamped to [0, 1]
    pub composite: f64,
}

impl PairScore {
    /// Score two feature sets
    pub fn compute(a: &SkillFeatures, b: &SkillFeatures, weights: &ScoreWeights) -> Self {
        let keyword_similarity = jaccard(&a.keywords, &b.keywords);
        let tool_similarity = jaccard(&a.tools, &b.tools);
        let trigger_overlap: BTreeSet<String> =
            a.triggers.intersection(&b.triggers).cloned().collect();

        let trigger_bonus = if trigger_overlap.is_empty() {
            0.0
        } else {
            weights.trigger_bonus
        };
        let composite = (weights.keyword * keyword_similarity
            + weights.tool * tool_similarity
            + trigger_bonus)
            .clamp(0.0, 1.0);

        Self {
            keyword_similarity,
            tool_similarity,
            trigger_overlap,
            composite,
        }
    }
}

/// Computes overlap records for every unordered pair in a feature index
pub struct SimilarityEngine<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> SimilarityEngine<'a> {
    /// Create an engine bound to a configuration
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Score every pair once and keep those strictly above the reporting threshold
    ///
    /// Results are ordered by published composite descending, then by pair name.
    pub fn compute_overlaps(&self, index: &FeatureIndex) -> Vec<OverlapRecord> {
        let entries: Vec<(&str, &SkillFeatures)> = index.iter().collect();
        let mut records = Vec::new();
        let mut evaluated = 0usize;

        for (i, (name_a, features_a)) in entries.iter().enumerate() {
            for (name_b, features_b) in &entries[i + 1..] {
                evaluated += 1;
                let score = PairScore::compute(features_a, features_b, &self.config.weights);

                if score.composite > self.config.report_threshold {
                    records.push(self.record(name_a, features_a, name_b, features_b, score));
                }
            }
        }

        records.sort_by(OverlapRecord::rank_cmp);

        debug!(
            "Evaluated {} pairs, {} above threshold {}",
            evaluated,
            records.len(),
            self.config.report_threshold
        );

        records
    }

    fn record(
        &self,
        name_a: &str,
        features_a: &SkillFeatures,
        name_b: &str,
        features_b: &SkillFeatures,
        score: PairScore,
    ) -> OverlapRecord {
        let mut record = OverlapRecord::new(name_a, name_b);
        record.composite = score.composite;
        record.keyword_similarity = score.keyword_similarity;
        record.tool_similarity = score.tool_similarity;
        record.trigger_overlap = score.trigger_overlap.into_iter().collect();
        record.shared_keywords = features_a
            .keywords
            .intersection(&features_b.keywords)
            .take(self.config.shared_keyword_limit)
            .cloned()
            .collect();
        record
    }
}
