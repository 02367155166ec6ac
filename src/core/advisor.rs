use crate::core::{age, emergency, scoring, search::SearchMatcher};
use crate::domain::model::{
    Age, Recommendation, RecommendationPolicy, Selection, SpecialistScores, SymptomDataset,
};
use crate::domain::ports::{ConfigProvider, DatasetSource};
use crate::utils::error::{AdvisorError, Result};
use std::sync::Arc;

/// Turns a symptom selection and an age into a single recommendation.
///
/// Holds only read-only state, so one advisor can serve any number of
/// callers. Every call recomputes from scratch.
#[derive(Debug, Clone)]
pub struct Advisor {
    dataset: Arc<SymptomDataset>,
    policy: RecommendationPolicy,
    matcher: SearchMatcher,
}

impl Advisor {
    pub fn new(dataset: Arc<SymptomDataset>) -> Self {
        Self::with_policy(dataset, RecommendationPolicy::default())
    }

    pub fn with_policy(dataset: Arc<SymptomDataset>, policy: RecommendationPolicy) -> Self {
        Self {
            dataset,
            policy,
            matcher: SearchMatcher::new(),
        }
    }

    pub fn from_source<D, C>(source: &D, config: &C) -> Result<Self>
    where
        D: DatasetSource,
        C: ConfigProvider,
    {
        tracing::debug!("Loading symptom dataset from {}", source.describe());
        let dataset = source.load()?;
        tracing::info!("Loaded {} symptoms from {}", dataset.len(), source.describe());
        Ok(Self::with_policy(
            Arc::new(dataset),
            config.recommendation_policy(),
        ))
    }

    pub fn dataset(&self) -> &SymptomDataset {
        &self.dataset
    }

    pub fn policy(&self) -> RecommendationPolicy {
        self.policy
    }

    /// Dataset symptoms matching `query`, in dataset order.
    pub fn search(&self, query: &str) -> Vec<&str> {
        self.matcher.filter(query, self.dataset.symptom_names())
    }

    pub fn recommend(&self, selection: &Selection, age: Option<i64>) -> Result<Recommendation> {
        if selection.is_empty() {
            return Err(AdvisorError::NoSymptomsSelected);
        }
        let age = Age::from_input(age)?;

        if emergency::is_emergency(selection) {
            tracing::info!(
                "Red flag symptoms selected: {:?}",
                emergency::red_flags_in(selection)
            );
            return Ok(Recommendation::emergency());
        }

        let adapted = self.adapted_scores(selection, age);
        let ranked = adapted.ranked();

        let Some(&(top, top_score)) = ranked.first() else {
            let result = Recommendation::general_for(age);
            tracing::info!(
                "No age-appropriate specialist, falling back to {}",
                result.specialist()
            );
            return Ok(result);
        };

        let cutoff = top_score.saturating_sub(self.policy.alternative_margin);
        let alternatives: Vec<String> = ranked
            .iter()
            .skip(1)
            .take(self.policy.max_alternatives)
            .filter(|(_, score)| *score >= cutoff)
            .map(|(name, _)| name.to_string())
            .collect();

        let reason = format!(
            "Based on your symptoms ({}), a {} is best suited to help you.",
            selection.as_slice().join(", "),
            top
        );

        tracing::info!(
            "Recommending {} (score {}), alternatives: {:?}",
            top,
            top_score,
            alternatives
        );

        Ok(Recommendation::SpecialistMatch {
            specialist: top.to_string(),
            score: top_score,
            reason,
            alternatives,
        })
    }

    /// Scores keyed by age-appropriate display name, suppressed specialists
    /// removed.
    pub fn adapted_scores(&self, selection: &Selection, age: Age) -> SpecialistScores {
        let raw = scoring::score(selection, &self.dataset);
        let mut adapted = SpecialistScores::new();

        for (specialist, score) in raw.iter() {
            if let Some(display_name) = age::adapt(specialist, age, selection) {
                if let Some(existing) = adapted.get(&display_name) {
                    tracing::warn!(
                        "'{}' and another specialist both display as '{}' ({} vs {}), merging with {:?}",
                        specialist,
                        display_name,
                        existing,
                        score,
                        self.policy.collision_policy
                    );
                }
                adapted.merge(&display_name, score, self.policy.collision_policy);
            }
        }

        adapted
    }
}
