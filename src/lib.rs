pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{EmbeddedDataset, JsonFileDataset};
pub use config::TomlConfig;
pub use core::{advisor::Advisor, session::Session};
pub use domain::model::{
    Age, AgeBracket, AgeGroup, CollisionPolicy, Recommendation, RecommendationPolicy, Selection,
    SymptomDataset, SymptomEntry, DISCLAIMER,
};
pub use domain::ports::{ConfigProvider, DatasetSource};
pub use utils::error::{AdvisorError, Result};
