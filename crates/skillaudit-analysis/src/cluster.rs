//! Clustering of overlapping skills
//!
//! Connectivity is computed with an arena-indexed disjoint set. Two gates
//! apply in order: a record must first pass the reporting threshold (which
//! decides whether its skills are candidates at all), then the cluster
//! threshold (which decides whether it is an edge).

use std::collections::{BTreeMap, HashMap};

use skillaudit_types::{Cluster, OverlapRecord};

use crate::config::AnalysisConfig;

/// Disjoint-set forest over dense indices, with path compression and union by rank
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Create `len` singleton sets
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of the set containing `x`
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the sets containing `a` and `b`; returns false if already merged
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (root_a, root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

/// Groups skills connected by overlap records at or above the cluster threshold
pub struct ClusterBuilder<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ClusterBuilder<'a> {
    /// Create a builder bound to a configuration
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Build clusters of two or more skills, members sorted, clusters ordered by first member
    pub fn build(&self, overlaps: &[OverlapRecord]) -> Vec<Cluster> {
        let reported: Vec<&OverlapRecord> = overlaps
            .iter()
            .filter(|r| r.composite > self.config.report_threshold)
            .collect();

        // Candidates, indexed in order of first appearance
        let mut names: Vec<&str> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for record in &reported {
            for name in [record.pair.0.as_str(), record.pair.1.as_str()] {
                index.entry(name).or_insert_with(|| {
                    names.push(name);
                    names.len() - 1
                });
            }
        }

        let mut sets = DisjointSet::new(names.len());
        for record in &reported {
            if record.composite >= self.config.cluster_threshold {
                sets.union(index[record.pair.0.as_str()], index[record.pair.1.as_str()]);
            }
        }

        let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (i, name) in names.iter().enumerate() {
            groups.entry(sets.find(i)).or_default().push((*name).to_string());
        }

        let mut clusters: Vec<Cluster> = groups
            .into_values()
            .filter(|members| members.len() > 1)
            .map(Cluster::new)
            .collect();
        clusters.sort();
        clusters
    }
}
