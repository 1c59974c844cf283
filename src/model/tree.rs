//! Regression tree, the forest building block.
//!
//! Splits minimize the variance of the target within each side, with
//! candidate thresholds at the midpoints of adjacent feature values.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Growth limits for a single tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeParams {
    /// Depth cap (None = grow until pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to attempt a split
    pub min_samples_split: usize,
    /// Minimum samples each side of a split must keep
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Seed for feature subsampling
    pub seed: u64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    params: TreeParams,
    root: Node,
}

impl RegressionTree {
    /// Fit a tree on the given feature matrix and targets.
    pub fn fit(params: TreeParams, features: &[Vec<f64>], targets: &[f64]) -> Self {
        let indices: Vec<usize> = (0..targets.len()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let root = grow(features, targets, &indices, 0, &params, &mut rng);
        Self { params, root }
    }

    /// Predict the target for a single feature row.
    pub fn predict_one(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

fn grow(
    features: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    depth: usize,
    params: &TreeParams,
    rng: &mut ChaCha8Rng,
) -> Node {
    let values: Vec<f64> = indices.iter().map(|&i| targets[i]).collect();
    let node_variance = variance(&values);

    let depth_reached = params.max_depth.is_some_and(|max| depth >= max);
    if depth_reached || indices.len() < params.min_samples_split || node_variance < 1e-12 {
        return Node::Leaf {
            value: mean(&values),
        };
    }

    match best_split(features, targets, indices, node_variance, params, rng) {
        Some((feature, threshold, left_indices, right_indices)) => {
            let left = grow(features, targets, &left_indices, depth + 1, params, rng);
            let right = grow(features, targets, &right_indices, depth + 1, params, rng);
            Node::Split {
                feature,
                threshold,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        None => Node::Leaf {
            value: mean(&values),
        },
    }
}

type Candidate = (usize, f64, Vec<usize>, Vec<usize>);

fn best_split(
    features: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    parent_variance: f64,
    params: &TreeParams,
    rng: &mut ChaCha8Rng,
) -> Option<Candidate> {
    let n_features = features[indices[0]].len();
    let max_features = params.max_features.unwrap_or(n_features).min(n_features);

    let mut feature_indices: Vec<usize> = (0..n_features).collect();
    feature_indices.shuffle(rng);
    feature_indices.truncate(max_features);

    let mut best_gain = 0.0;
    let mut best: Option<Candidate> = None;

    for &feature in &feature_indices {
        let mut values: Vec<f64> = indices.iter().map(|&i| features[i][feature]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values.dedup();

        for window in values.windows(2) {
            let threshold = (window[0] + window[1]) / 2.0;

            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .partition(|&&i| features[i][feature] <= threshold);

            if left.len() < params.min_samples_leaf || right.len() < params.min_samples_leaf {
                continue;
            }

            let left_values: Vec<f64> = left.iter().map(|&i| targets[i]).collect();
            let right_values: Vec<f64> = right.iter().map(|&i| targets[i]).collect();

            let n_left = left.len() as f64;
            let n_right = right.len() as f64;
            let weighted = (n_left * variance(&left_values) + n_right * variance(&right_values))
                / (n_left + n_right);
            let gain = parent_variance - weighted;

            if gain > best_gain {
                best_gain = gain;
                best = Some((feature, threshold, left, right));
            }
        }
    }

    best
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_target_yields_single_leaf() {
        let features = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let targets = vec![5.0, 5.0, 5.0, 5.0];

        let tree = RegressionTree::fit(TreeParams::default(), &features, &targets);
        assert_eq!(tree.predict_one(&[2.5]), 5.0);
    }

    #[test]
    fn test_learns_step_function() {
        let features: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..40).map(|i| if i < 20 { 10.0 } else { 50.0 }).collect();

        let tree = RegressionTree::fit(TreeParams::default(), &features, &targets);
        assert_eq!(tree.predict_one(&[5.0]), 10.0);
        assert_eq!(tree.predict_one(&[30.0]), 50.0);
    }

    #[test]
    fn test_max_depth_limits_tree() {
        let features: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..40).map(|i| i as f64).collect();

        let params = TreeParams {
            max_depth: Some(0),
            ..Default::default()
        };
        let tree = RegressionTree::fit(params, &features, &targets);

        // Depth zero means one leaf holding the global mean
        assert_eq!(tree.predict_one(&[0.0]), tree.predict_one(&[39.0]));
    }
}
