//! Random-forest regressor: bagged regression trees averaged at
//! inference time.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tree::{RegressionTree, TreeParams};

/// Forest hyperparameters.
///
/// Defaults give the classic 100-tree ensemble with unbounded depth and
/// all features considered at every split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Depth cap per tree (None = unbounded)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in each leaf
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Base seed; each tree derives its own from it
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

/// A fitted random-forest regressor for one target column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestRegressor {
    params: ForestParams,
    trees: Vec<RegressionTree>,
    /// Label column this forest was fitted against
    pub target: String,
}

impl ForestRegressor {
    /// Fit the forest: each tree trains on its own bootstrap sample of
    /// the rows, in parallel. Tree seeds derive from the base seed, so
    /// the same data and params always produce the same forest.
    pub fn fit(params: ForestParams, target: &str, features: &[Vec<f64>], targets: &[f64]) -> Self {
        let trees: Vec<RegressionTree> = (0..params.n_trees)
            .into_par_iter()
            .map(|i| {
                let seed = params.seed.wrapping_add(i as u64);
                let (sample_features, sample_targets) = bootstrap(features, targets, seed);

                let tree_params = TreeParams {
                    max_depth: params.max_depth,
                    min_samples_split: params.min_samples_split,
                    min_samples_leaf: params.min_samples_leaf,
                    max_features: params.max_features,
                    seed,
                };
                RegressionTree::fit(tree_params, &sample_features, &sample_targets)
            })
            .collect();

        Self {
            params,
            trees,
            target: target.to_string(),
        }
    }

    /// Predict the target for one feature row: the mean of all tree
    /// predictions.
    pub fn predict_one(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|tree| tree.predict_one(row)).sum();
        sum / self.trees.len() as f64
    }

    /// Predict targets for multiple rows.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.par_iter().map(|row| self.predict_one(row)).collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Sample rows with replacement.
fn bootstrap(features: &[Vec<f64>], targets: &[f64], seed: u64) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = targets.len();

    let mut sample_features = Vec::with_capacity(n);
    let mut sample_targets = Vec::with_capacity(n);
    for _ in 0..n {
        let i = rng.gen_range(0..n);
        sample_features.push(features[i].clone());
        sample_targets.push(targets[i]);
    }
    (sample_features, sample_targets)
}
