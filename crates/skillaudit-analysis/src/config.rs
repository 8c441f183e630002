//! Analysis configuration
//!
//! Weights, thresholds and the stopword list travel together as one immutable
//! value, so alternate settings can be tested without touching global state.

use std::collections::HashSet;

/// Minimum composite score (exclusive) for a pair to be reported
pub const DEFAULT_REPORT_THRESHOLD: f64 = 0.15;

/// Minimum composite score (inclusive) for a reported pair to join a cluster
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.25;

/// Maximum number of shared keywords kept on an overlap record
pub const DEFAULT_SHARED_KEYWORD_LIMIT: usize = 10;

/// Default stopword enumeration
const DEFAULT_STOPWORDS: &[&str] = &[
    // English: articles and conjunctions
    "the", "an", "and", "or", "but",
    // English: prepositions
    "in", "on", "at", "to", "for", "of", "with", "by", "from",
    "into", "about", "after", "before", "over",
    // English: be / auxiliaries
    "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "can",
    // English: pronouns and demonstratives
    "this", "that", "these", "those", "it", "its",
    "they", "them", "their",
    // English: negation and logic
    "not", "no", "if", "then", "than", "so", "as",
    // English: adverbs and quantifiers
    "also", "just", "only", "very", "more", "most",
    "some", "any", "all", "each", "every", "both",
    "few", "many", "much", "such",
    // English: other function words
    "other", "another", "same", "different", "new",
    "when", "how", "what", "which", "who", "where", "why",
    // Verbs without domain meaning
    "use", "used", "using", "make", "like",
    // Nouns too generic to tell skills apart
    "user", "users", "skill", "skills", "tool", "tools",
    "file", "files",
    // Trigger-phrase boilerplate
    "asks", "mentions", "discusses", "including", "provides",
    // Traditional Chinese function words
    "的", "是", "在", "了", "和", "與", "或", "也", "都",
    "不", "有", "這", "那", "就", "要", "會",
    "可以", "可", "能", "把", "讓", "被",
    "對", "從", "到", "做", "用", "使用", "需要",
    "一個", "這個", "那個",
    "如果", "當", "時", "進行", "以及", "等", "及",
];

/// Words excluded from keyword sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Build a stopword set from an explicit word list
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// A set that excludes nothing
    pub fn none() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Check whether a lower-cased token is a stopword
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().copied())
    }
}

/// Weights of the composite score
///
/// composite = keyword * keyword_similarity
///           + tool * tool_similarity
///           + trigger_bonus (when any trigger phrase is shared)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight of keyword Jaccard similarity
    pub keyword: f64,
    /// Weight of tool Jaccard similarity
    pub tool: f64,
    /// Flat bonus for any shared trigger phrase
    pub trigger_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword: 0.5,
            tool: 0.2,
            trigger_bonus: 0.3,
        }
    }
}

/// Complete configuration of one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Composite score weights
    pub weights: ScoreWeights,
    /// Pairs must score strictly above this to be reported
    pub report_threshold: f64,
    /// Reported pairs scoring at or above this are clustered
    pub cluster_threshold: f64,
    /// Cap on shared keywords kept per record
    pub shared_keyword_limit: usize,
    /// Words removed from keyword sets
    pub stopwords: Stopwords,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            report_threshold: DEFAULT_REPORT_THRESHOLD,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            shared_keyword_limit: DEFAULT_SHARED_KEYWORD_LIMIT,
            stopwords: Stopwords::default(),
        }
    }
}

impl AnalysisConfig {
    /// Replace the cluster threshold
    #[must_use]
    pub fn with_cluster_threshold(mut self, threshold: f64) -> Self {
        self.cluster_threshold = threshold;
        self
    }

    /// Replace the composite weights
    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the stopword set
    #[must_use]
    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }
}
