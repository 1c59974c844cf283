//! Model persistence.
//!
//! Both fitted forests are serialized as JSON, one file per target,
//! and replaced wholesale on every retrain. Writes go through a temp
//! file plus rename so a predict racing a retrain never observes a
//! half-written model.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::model::forest::ForestRegressor;

/// Handle on the two model file locations.
pub struct ModelStore {
    upper_path: PathBuf,
    lower_path: PathBuf,
}

impl ModelStore {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            upper_path: storage.upper_model_path(),
            lower_path: storage.lower_model_path(),
        }
    }

    /// Serialize both models, unconditionally overwriting any prior
    /// version.
    pub fn save(&self, upper: &ForestRegressor, lower: &ForestRegressor) -> Result<()> {
        if let Some(parent) = self.upper_path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_model(&self.upper_path, upper)?;
        write_model(&self.lower_path, lower)?;

        info!(
            "saved models to {} and {}",
            self.upper_path.display(),
            self.lower_path.display()
        );
        Ok(())
    }

    /// Deserialize both models. Fails with a model-not-found error if
    /// either file is absent, e.g. before the first training run.
    pub fn load(&self) -> Result<(ForestRegressor, ForestRegressor)> {
        Ok((read_model(&self.upper_path)?, read_model(&self.lower_path)?))
    }

    /// Whether both model files are present.
    pub fn is_trained(&self) -> bool {
        self.upper_path.exists() && self.lower_path.exists()
    }
}

fn write_model(path: &Path, model: &ForestRegressor) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    let file = File::create(&tmp_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, model)?;

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn read_model(path: &Path) -> Result<ForestRegressor> {
    if !path.exists() {
        return Err(Error::ModelNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
