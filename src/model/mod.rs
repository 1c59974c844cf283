//! Random-forest regression models and their persistence.

pub mod forest;
pub mod store;
pub mod trainer;
pub mod tree;

pub use forest::{ForestParams, ForestRegressor};
pub use store::ModelStore;
pub use trainer::{retrain, TrainingReport};
