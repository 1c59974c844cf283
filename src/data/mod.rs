//! Dataset storage, record schema and train/test partitioning.

pub mod record;
pub mod split;
pub mod store;

pub use record::{BpRecord, REQUIRED_COLUMNS};
pub use split::SplitData;
pub use store::DatasetStore;
