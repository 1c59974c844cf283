//! Single-row inference against the persisted models.

use crate::config::StorageConfig;
use crate::error::Result;
use crate::model::store::ModelStore;

/// Loads the current models and runs one prediction per target.
pub struct Predictor {
    models: ModelStore,
}

impl Predictor {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            models: ModelStore::new(storage),
        }
    }

    /// Build one feature row from the four inputs and return the
    /// (systolic, diastolic) estimates. Values pass straight through to
    /// the models without range checks; fails with a model-not-found
    /// error before the first training run.
    pub fn predict(
        &self,
        workday: f64,
        stress_levels: f64,
        sleep_quality: f64,
        tiredness: f64,
    ) -> Result<(f64, f64)> {
        let (upper_model, lower_model) = self.models.load()?;
        let row = [workday, stress_levels, sleep_quality, tiredness];

        Ok((upper_model.predict_one(&row), lower_model.predict_one(&row)))
    }
}
