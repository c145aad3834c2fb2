//! Binary CART decision tree
//!
//! Gini impurity, axis-aligned `value <= threshold` splits with thresholds at
//! midpoints between adjacent distinct values. Candidate features are visited
//! in an order shuffled by a seeded RNG at every node, and only a strictly
//! better split replaces the current best, so equal-quality splits resolve the
//! same way for the same seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const IMPURITY_EPSILON: f64 = 1e-12;

/// Fitting parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    pub random_state: u64,
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 4,
            random_state: 42,
            min_samples_split: 2,
        }
    }
}

/// Tree node. `counts` is `[absent, present]` among training rows reaching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        counts: [usize; 2],
    },
    Split {
        feature: usize,
        threshold: f64,
        counts: [usize; 2],
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn counts(&self) -> [usize; 2] {
        match self {
            Node::Leaf { counts } | Node::Split { counts, .. } => *counts,
        }
    }

    /// Majority class; ties go to "absent"
    pub fn predicts_present(&self) -> bool {
        let [absent, present] = self.counts();
        present > absent
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

/// Fitted single-output classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    n_features: usize,
    root: Node,
}

impl DecisionTree {
    /// Fit on `rows` (each of equal length) against boolean targets
    pub fn fit(rows: &[Vec<f64>], targets: &[bool], params: &TreeParams) -> Self {
        let n_features = rows.first().map(Vec::len).unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(params.random_state);
        let indices: Vec<usize> = (0..rows.len()).collect();

        let mut builder = Builder {
            rows,
            targets,
            params,
            n_features,
            rng: &mut rng,
        };
        let root = builder.grow(&indices, 0);

        Self { n_features, root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    /// Leaf reached by a feature vector; missing features read as 0
    pub fn leaf_for(&self, row: &[f64]) -> &Node {
        let mut node = &self.root;
        while let Node::Split {
            feature,
            threshold,
            left,
            right,
            ..
        } = node
        {
            let value = row.get(*feature).copied().unwrap_or(0.0);
            node = if value <= *threshold { left } else { right };
        }
        node
    }

    pub fn predict(&self, row: &[f64]) -> bool {
        self.leaf_for(row).predicts_present()
    }

    /// Features whose "greater than threshold" branch lies on the path to a
    /// leaf predicting the condition present
    pub fn positive_features(&self) -> BTreeSet<usize> {
        let mut found = BTreeSet::new();
        let mut path = Vec::new();
        collect_positive(&self.root, &mut path, &mut found);
        found
    }
}

fn collect_positive(node: &Node, path: &mut Vec<usize>, found: &mut BTreeSet<usize>) {
    match node {
        Node::Leaf { .. } => {
            if node.predicts_present() {
                found.extend(path.iter().copied());
            }
        }
        Node::Split {
            feature,
            left,
            right,
            ..
        } => {
            collect_positive(left, path, found);
            path.push(*feature);
            collect_positive(right, path, found);
            path.pop();
        }
    }
}

fn gini(counts: [usize; 2]) -> f64 {
    let total = (counts[0] + counts[1]) as f64;
    if total == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / total;
    let p1 = counts[1] as f64 / total;
    1.0 - p0 * p0 - p1 * p1
}

struct Candidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

struct Builder<'a> {
    rows: &'a [Vec<f64>],
    targets: &'a [bool],
    params: &'a TreeParams,
    n_features: usize,
    rng: &'a mut StdRng,
}

impl Builder<'_> {
    fn counts(&self, indices: &[usize]) -> [usize; 2] {
        let present = indices.iter().filter(|&&i| self.targets[i]).count();
        [indices.len() - present, present]
    }

    fn grow(&mut self, indices: &[usize], depth: usize) -> Node {
        let counts = self.counts(indices);

        if depth >= self.params.max_depth
            || indices.len() < self.params.min_samples_split
            || gini(counts) <= IMPURITY_EPSILON
        {
            return Node::Leaf { counts };
        }

        let Some(best) = self.best_split(indices) else {
            return Node::Leaf { counts };
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| self.rows[i][best.feature] <= best.threshold);

        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            counts,
            left: Box::new(self.grow(&left_idx, depth + 1)),
            right: Box::new(self.grow(&right_idx, depth + 1)),
        }
    }

    fn best_split(&mut self, indices: &[usize]) -> Option<Candidate> {
        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(&mut *self.rng);

        let total = indices.len() as f64;
        let node_counts = self.counts(indices);
        let mut best: Option<Candidate> = None;

        for feature in features {
            let mut column: Vec<(f64, bool)> = indices
                .iter()
                .map(|&i| (self.rows[i][feature], self.targets[i]))
                .collect();
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = [0usize; 2];
            for pos in 0..column.len() - 1 {
                left[column[pos].1 as usize] += 1;

                let (value, next) = (column[pos].0, column[pos + 1].0);
                if next <= value {
                    continue;
                }

                let right = [node_counts[0] - left[0], node_counts[1] - left[1]];
                let n_left = (pos + 1) as f64;
                let impurity =
                    (n_left * gini(left) + (total - n_left) * gini(right)) / total;

                let better = match &best {
                    Some(b) => impurity < b.impurity - IMPURITY_EPSILON,
                    None => true,
                };
                if better {
                    best = Some(Candidate {
                        feature,
                        threshold: value + (next - value) / 2.0,
                        impurity,
                    });
                }
            }
        }

        best
    }
}
