use crate::domain::model::{CollisionPolicy, RecommendationPolicy, SymptomDataset};
use crate::utils::error::Result;

/// Somewhere a symptom table can be loaded from.
pub trait DatasetSource {
    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
    fn load(&self) -> Result<SymptomDataset>;
}

pub trait ConfigProvider {
    fn dataset_path(&self) -> Option<&str>;
    fn alternative_margin(&self) -> u32;
    fn max_alternatives(&self) -> usize;
    fn collision_policy(&self) -> CollisionPolicy;

    fn recommendation_policy(&self) -> RecommendationPolicy {
        RecommendationPolicy {
            alternative_margin: self.alternative_margin(),
            max_alternatives: self.max_alternatives(),
            collision_policy: self.collision_policy(),
        }
    }
}
