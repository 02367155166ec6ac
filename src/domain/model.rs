use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::validate_range;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 120;

pub const EMERGENCY_DEPARTMENT: &str = "Emergency Department";
pub const EMERGENCY_REASON: &str =
    "Your symptoms indicate a potential emergency. Please seek immediate medical attention.";
pub const EMERGENCY_INSTRUCTION: &str =
    "Call emergency services or go to the nearest hospital immediately.";
pub const GENERAL_REASON: &str = "Your symptoms are general. Start with a general practitioner.";
pub const PEDIATRIC_FALLBACK: &str = "Pediatrician";
pub const ADULT_FALLBACK: &str = "Internal Medicine / General Practitioner";
pub const DISCLAIMER: &str = "This tool provides guidance only. It does not replace professional \
medical advice. If you have severe or emergency symptoms, call emergency services immediately.";

/// One row of the symptom table: a symptom and the specialists that treat it,
/// in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomEntry {
    pub name: String,
    pub specialists: Vec<(String, u32)>,
}

impl SymptomEntry {
    pub fn new<N, S, I>(name: N, specialists: I) -> Self
    where
        N: Into<String>,
        S: Into<String>,
        I: IntoIterator<Item = (S, u32)>,
    {
        Self {
            name: name.into(),
            specialists: specialists
                .into_iter()
                .map(|(specialist, weight)| (specialist.into(), weight))
                .collect(),
        }
    }
}

/// Read-only symptom table. Built once, then shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SymptomDataset {
    entries: Vec<SymptomEntry>,
    index: HashMap<String, usize>,
}

impl SymptomDataset {
    pub fn from_entries(entries: Vec<SymptomEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(AdvisorError::DatasetError {
                    message: format!("symptom #{} has an empty name", position + 1),
                });
            }
            if let Some((specialist, _)) = entry.specialists.iter().find(|(_, w)| *w == 0) {
                return Err(AdvisorError::DatasetError {
                    message: format!(
                        "weight for '{}' under '{}' must be a positive integer",
                        specialist, entry.name
                    ),
                });
            }
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(AdvisorError::DatasetError {
                    message: format!("duplicate symptom '{}'", entry.name),
                });
            }
        }

        Ok(Self { entries, index })
    }

    pub fn get(&self, symptom: &str) -> Option<&SymptomEntry> {
        self.index.get(symptom).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.index.contains_key(symptom)
    }

    /// Symptom names in dataset order.
    pub fn symptom_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Selected symptoms in the order the user picked them. No duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    symptoms: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the symptom was already selected.
    pub fn insert(&mut self, symptom: impl Into<String>) -> bool {
        let symptom = symptom.into();
        if self.contains(&symptom) {
            return false;
        }
        self.symptoms.push(symptom);
        true
    }

    pub fn remove(&mut self, symptom: &str) -> bool {
        let before = self.symptoms.len();
        self.symptoms.retain(|s| s != symptom);
        self.symptoms.len() != before
    }

    /// Adds the symptom if absent, removes it otherwise. Returns whether it is
    /// selected afterwards.
    pub fn toggle(&mut self, symptom: &str) -> bool {
        if self.remove(symptom) {
            false
        } else {
            self.symptoms.push(symptom.to_string());
            true
        }
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.symptoms
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn clear(&mut self) {
        self.symptoms.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for symptom in iter {
            selection.insert(symptom);
        }
        selection
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    /// 0 to 12
    Child,
    /// 13 to 17
    Adolescent,
    /// 18 and over
    Adult,
}

impl AgeBracket {
    pub fn is_minor(self) -> bool {
        !matches!(self, AgeBracket::Adult)
    }
}

/// A validated age in years, 0 to 120 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Age(u8);

impl Age {
    pub fn new(years: i64) -> Result<Self> {
        validate_range("age", years, MIN_AGE, MAX_AGE)
            .map_err(|_| AdvisorError::InvalidAge { value: years })?;
        Ok(Self(years as u8))
    }

    /// Unset ages are a distinct rejection from out-of-range ones.
    pub fn from_input(years: Option<i64>) -> Result<Self> {
        years.ok_or(AdvisorError::MissingAge).and_then(Self::new)
    }

    pub fn years(self) -> u8 {
        self.0
    }

    pub fn bracket(self) -> AgeBracket {
        match self.0 {
            0..=12 => AgeBracket::Child,
            13..=17 => AgeBracket::Adolescent,
            _ => AgeBracket::Adult,
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three age options offered to users who would rather not type an age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Teen,
    Adult,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Child, AgeGroup::Teen, AgeGroup::Adult];

    pub fn representative_age(self) -> i64 {
        match self {
            AgeGroup::Child => 5,
            AgeGroup::Teen => 15,
            AgeGroup::Adult => 25,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Child => "0-12 years (Child)",
            AgeGroup::Teen => "13-17 years (Teenager)",
            AgeGroup::Adult => "18+ years (Adult)",
        }
    }
}

/// How scores are combined when two specialists adapt to the same display name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Later entry overwrites the score but keeps the first entry's position.
    #[default]
    LastWriteWins,
    Sum,
    Max,
}

impl CollisionPolicy {
    pub fn merge(self, existing: u32, incoming: u32) -> u32 {
        match self {
            CollisionPolicy::LastWriteWins => incoming,
            CollisionPolicy::Sum => existing.saturating_add(incoming),
            CollisionPolicy::Max => existing.max(incoming),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationPolicy {
    /// Alternatives must score at least `top - alternative_margin`.
    pub alternative_margin: u32,
    pub max_alternatives: usize,
    pub collision_policy: CollisionPolicy,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            alternative_margin: 2,
            max_alternatives: 2,
            collision_policy: CollisionPolicy::LastWriteWins,
        }
    }
}

/// Specialist totals in first-seen order. Recomputed per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecialistScores {
    scores: Vec<(String, u32)>,
}

impl SpecialistScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, specialist: &str, weight: u32) {
        self.merge(specialist, weight, CollisionPolicy::Sum);
    }

    pub fn merge(&mut self, specialist: &str, score: u32, policy: CollisionPolicy) {
        match self.scores.iter_mut().find(|(name, _)| name == specialist) {
            Some((_, existing)) => *existing = policy.merge(*existing, score),
            None => self.scores.push((specialist.to_string(), score)),
        }
    }

    pub fn get(&self, specialist: &str) -> Option<u32> {
        self.scores
            .iter()
            .find(|(name, _)| name == specialist)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Highest score first; equal scores keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Recommendation {
    #[serde(rename = "emergency")]
    Emergency { reason: String },

    #[serde(rename = "general")]
    GeneralFallback { specialist: String, reason: String },

    #[serde(rename = "specialist")]
    SpecialistMatch {
        specialist: String,
        score: u32,
        reason: String,
        alternatives: Vec<String>,
    },
}

impl Recommendation {
    pub fn emergency() -> Self {
        Recommendation::Emergency {
            reason: EMERGENCY_REASON.to_string(),
        }
    }

    pub fn general_for(age: Age) -> Self {
        let specialist = if age.bracket().is_minor() {
            PEDIATRIC_FALLBACK
        } else {
            ADULT_FALLBACK
        };
        Recommendation::GeneralFallback {
            specialist: specialist.to_string(),
            reason: GENERAL_REASON.to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Recommendation::Emergency { .. } => "emergency",
            Recommendation::GeneralFallback { .. } => "general",
            Recommendation::SpecialistMatch { .. } => "specialist",
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, Recommendation::Emergency { .. })
    }

    pub fn specialist(&self) -> &str {
        match self {
            Recommendation::Emergency { .. } => EMERGENCY_DEPARTMENT,
            Recommendation::GeneralFallback { specialist, .. }
            | Recommendation::SpecialistMatch { specialist, .. } => specialist,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Recommendation::Emergency { reason }
            | Recommendation::GeneralFallback { reason, .. }
            | Recommendation::SpecialistMatch { reason, .. } => reason,
        }
    }

    pub fn score(&self) -> Option<u32> {
        match self {
            Recommendation::SpecialistMatch { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn alternatives(&self) -> &[String] {
        match self {
            Recommendation::SpecialistMatch { alternatives, .. } => alternatives,
            _ => &[],
        }
    }

    /// Follow-up steps shown under a non-emergency result. Emergencies get
    /// the single `EMERGENCY_INSTRUCTION` instead.
    pub fn next_steps(&self) -> Vec<String> {
        match self {
            Recommendation::Emergency { .. } => vec![EMERGENCY_INSTRUCTION.to_string()],
            _ => vec![
                format!("Book an appointment with a {}", self.specialist()),
                "Prepare a list of your symptoms and when they started".to_string(),
                "Bring any relevant medical records".to_string(),
                "Note any medications you're currently taking".to_string(),
            ],
        }
    }
}
