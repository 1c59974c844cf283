//! BP Predictor - Blood-Pressure Prediction Service Library
//!
//! Predicts systolic and diastolic blood pressure from four daily
//! lifestyle features:
//! - CSV dataset with incremental, append-only growth
//! - Two random-forest regressors, one per target, fitted in parallel
//! - JSON model persistence with atomic replacement on retrain
//! - Small axum web API: predict, add data, retrain
//!
//! # Example
//!
//! ```ignore
//! use bp_predictor::{Config, Predictor};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let predictor = Predictor::new(&config.storage);
//!     let (upper, lower) = predictor.predict(1.0, 3.0, 7.0, 2.0)?;
//!     println!("{upper:.0}/{lower:.0}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod predictor;
pub mod server;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data::{BpRecord, DatasetStore};
pub use error::{Error, Result};
pub use model::{ForestRegressor, ModelStore};
pub use predictor::Predictor;
pub use server::{router, ServerState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
