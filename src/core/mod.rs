pub mod advisor;
pub mod age;
pub mod emergency;
pub mod scoring;
pub mod search;
pub mod session;

pub use crate::domain::model::{
    Age, AgeBracket, AgeGroup, Recommendation, Selection, SpecialistScores, SymptomDataset,
    SymptomEntry,
};
pub use crate::domain::ports::{ConfigProvider, DatasetSource};
pub use crate::utils::error::Result;
