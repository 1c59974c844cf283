//! Configuration management
//!
//! Storage paths, server bind address and training hyperparameters,
//! loaded from a TOML file with per-field defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no --config is given
const DEFAULT_CONFIG_FILE: &str = "bp-predictor.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Dataset and model file locations
    #[serde(default)]
    pub storage: StorageConfig,
    /// Training hyperparameters
    #[serde(default)]
    pub training: TrainingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Dataset and model file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// CSV file holding the labeled training rows
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    /// Directory the two fitted models are persisted under
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/bp_records.csv")
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("data/models")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            model_dir: default_model_dir(),
        }
    }
}

impl StorageConfig {
    /// Path of the persisted systolic model
    pub fn upper_model_path(&self) -> PathBuf {
        self.model_dir.join("upper_model.json")
    }

    /// Path of the persisted diastolic model
    pub fn lower_model_path(&self) -> PathBuf {
        self.model_dir.join("lower_model.json")
    }
}

/// Training hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Trees per forest
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    /// Fraction of rows held out for evaluation
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    /// Seed for the split shuffle and bootstrap sampling
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Depth cap per tree (unbounded when unset)
    pub max_depth: Option<usize>,
}

fn default_n_trees() -> usize {
    100
}

fn default_test_ratio() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_trees: default_n_trees(),
            test_ratio: default_test_ratio(),
            seed: default_seed(),
            max_depth: None,
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, the default file in the
    /// working directory, or built-in defaults when neither exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    let contents = std::fs::read_to_string(default_path)
                        .context("Failed to read config file")?;
                    toml::from_str(&contents).context("Failed to parse config file")
                } else {
                    Ok(Config::default())
                }
            }
        }
    }
}
