// Adapters layer: concrete dataset sources.

pub mod dataset;

pub use dataset::{EmbeddedDataset, JsonFileDataset};
