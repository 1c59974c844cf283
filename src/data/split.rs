//! Deterministic train/test partitioning.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::data::record::BpRecord;

/// Train/held-out partition of the dataset, with one label vector per
/// blood-pressure target.
#[derive(Debug, Clone)]
pub struct SplitData {
    pub train_features: Vec<Vec<f64>>,
    pub test_features: Vec<Vec<f64>>,
    pub train_upper: Vec<f64>,
    pub test_upper: Vec<f64>,
    pub train_lower: Vec<f64>,
    pub test_lower: Vec<f64>,
}

impl SplitData {
    pub fn train_rows(&self) -> usize {
        self.train_features.len()
    }

    pub fn test_rows(&self) -> usize {
        self.test_features.len()
    }
}

/// Shuffle row indices with a seeded RNG and carve off `test_ratio` of
/// the rows as the held-out set. The same records and seed always
/// produce the same partition.
pub fn split(records: &[BpRecord], test_ratio: f64, seed: u64) -> SplitData {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = (test_ratio * records.len() as f64) as usize;
    let (test_indices, train_indices) = indices.split_at(test_size);

    let collect_features = |idx: &[usize]| -> Vec<Vec<f64>> {
        idx.iter().map(|&i| records[i].features()).collect()
    };
    let collect_labels = |idx: &[usize], label: fn(&BpRecord) -> f64| -> Vec<f64> {
        idx.iter().map(|&i| label(&records[i])).collect()
    };

    SplitData {
        train_features: collect_features(train_indices),
        test_features: collect_features(test_indices),
        train_upper: collect_labels(train_indices, |r| r.upper_bp),
        test_upper: collect_labels(test_indices, |r| r.upper_bp),
        train_lower: collect_labels(train_indices, |r| r.lower_bp),
        test_lower: collect_labels(test_indices, |r| r.lower_bp),
    }
}
