//! Retraining pipeline: load the dataset, split it, fit both target
//! models, score them on the held-out rows and persist.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::data::split::{self, SplitData};
use crate::data::store::DatasetStore;
use crate::error::{Error, Result};
use crate::model::forest::{ForestParams, ForestRegressor};
use crate::model::store::ModelStore;

/// Held-out error scores for one target model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelScores {
    pub mse: f64,
    pub r2: f64,
}

/// Summary of one retrain run.
///
/// Scores are `None` when the dataset was too small to hold any rows
/// out for evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub trained_at: DateTime<Utc>,
    pub train_rows: usize,
    pub test_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<ModelScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<ModelScores>,
}

/// Run the full retrain pipeline against the configured storage.
pub fn retrain(config: &Config) -> Result<TrainingReport> {
    let dataset = DatasetStore::new(&config.storage.dataset_path);
    let records = dataset.load()?;
    if records.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let split = split::split(&records, config.training.test_ratio, config.training.seed);
    info!(
        train_rows = split.train_rows(),
        test_rows = split.test_rows(),
        n_trees = config.training.n_trees,
        "fitting forests"
    );

    let params = ForestParams {
        n_trees: config.training.n_trees,
        max_depth: config.training.max_depth,
        seed: config.training.seed,
        ..Default::default()
    };

    let upper = ForestRegressor::fit(
        params.clone(),
        "Upper_BP",
        &split.train_features,
        &split.train_upper,
    );
    let lower = ForestRegressor::fit(
        params,
        "Lower_BP",
        &split.train_features,
        &split.train_lower,
    );

    let report = TrainingReport {
        trained_at: Utc::now(),
        train_rows: split.train_rows(),
        test_rows: split.test_rows(),
        upper: evaluate(&upper, &split, &split.test_upper),
        lower: evaluate(&lower, &split, &split.test_lower),
    };

    ModelStore::new(&config.storage).save(&upper, &lower)?;
    Ok(report)
}

fn evaluate(model: &ForestRegressor, split: &SplitData, targets: &[f64]) -> Option<ModelScores> {
    if targets.is_empty() {
        return None;
    }

    let predictions = model.predict(&split.test_features);
    Some(ModelScores {
        mse: mse(&predictions, targets),
        r2: r2(&predictions, targets),
    })
}

fn mse(predictions: &[f64], targets: &[f64]) -> f64 {
    predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (p - t).powi(2))
        .sum::<f64>()
        / targets.len() as f64
}

fn r2(predictions: &[f64], targets: &[f64]) -> f64 {
    let mean = targets.iter().sum::<f64>() / targets.len() as f64;
    let ss_res: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = targets.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_helpers() {
        let targets = [1.0, 2.0, 3.0];
        assert_eq!(mse(&[1.0, 2.0, 3.0], &targets), 0.0);
        assert_eq!(r2(&[1.0, 2.0, 3.0], &targets), 1.0);
        assert!(r2(&[2.0, 2.0, 2.0], &targets) < 1.0);
    }
}
