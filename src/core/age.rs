//! Age-appropriate specialist names.
//!
//! Each specialist key resolves to an [`AgeRule`] for the user's
//! [`AgeBracket`]. Explicit rows in [`RULES`] win, then the two children's
//! lists apply to minors, and everything else is shown capitalized.

use crate::domain::model::{Age, AgeBracket, Selection};

/// Specialists that get a "Pediatric " prefix for anyone under 18.
pub const PEDIATRIC_ELIGIBLE: &[&str] = &[
    "cardiologist",
    "neurologist",
    "dermatologist",
    "gastroenterologist",
    "pulmonologist",
    "endocrinologist",
    "rheumatologist",
    "hematologist",
    "oncologist",
    "orthopedic",
    "ent",
    "ophthalmologist",
    "psychiatrist",
    "allergist",
    "nephrologist",
    "urologist",
    "neurosurgeon",
    "general surgeon",
    "infectious disease",
    "immunologist",
    "vascular surgeon",
    "plastic surgeon",
];

/// Specialists that keep their adult name for children.
pub const SAME_FOR_CHILDREN: &[&str] = &[
    "pediatrician",
    "dentist",
    "family medicine",
    "podiatrist",
    "sports medicine",
    "pain management",
    "psychologist",
    "diabetologist",
    "nutritionist",
];

/// Symptoms that make a urology referral appropriate for a young child.
pub const SEXUAL_SYMPTOMS: &[&str] = &[
    "erectile dysfunction",
    "impotence",
    "premature ejaculation",
    "sexual dysfunction",
    "blood in semen",
    "penile discharge",
    "penile pain",
    "pain during intercourse",
    "genital sores",
    "genital warts",
    "sexually transmitted disease",
    "chlamydia symptoms",
    "gonorrhea symptoms",
    "syphilis symptoms",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeRule {
    /// Drop the specialist and its score.
    Suppress,
    /// "Pediatric " + capitalized key.
    Pediatric,
    /// Pediatric name when any listed symptom is selected, suppressed otherwise.
    PediatricIfAnySelected(&'static [&'static str]),
    Capitalize,
    Rename(&'static str),
}

pub const RULES: &[(&str, AgeBracket, AgeRule)] = &[
    ("ob-gyn", AgeBracket::Child, AgeRule::Suppress),
    (
        "ob-gyn",
        AgeBracket::Adolescent,
        AgeRule::Rename("Adolescent Gynecologist"),
    ),
    (
        "urologist",
        AgeBracket::Child,
        AgeRule::PediatricIfAnySelected(SEXUAL_SYMPTOMS),
    ),
    ("internal medicine", AgeBracket::Child, AgeRule::Suppress),
    ("internal medicine", AgeBracket::Adolescent, AgeRule::Suppress),
    ("pediatrician", AgeBracket::Adult, AgeRule::Suppress),
];

pub fn rule_for(specialist: &str, bracket: AgeBracket) -> AgeRule {
    if let Some((_, _, rule)) = RULES
        .iter()
        .find(|(key, rule_bracket, _)| *key == specialist && *rule_bracket == bracket)
    {
        return *rule;
    }

    if bracket.is_minor() {
        if PEDIATRIC_ELIGIBLE.contains(&specialist) {
            return AgeRule::Pediatric;
        }
        if SAME_FOR_CHILDREN.contains(&specialist) {
            return AgeRule::Capitalize;
        }
    }

    AgeRule::Capitalize
}

/// Display name for `specialist` at `age`, or `None` if it should not be
/// recommended at that age.
pub fn adapt(specialist: &str, age: Age, selection: &Selection) -> Option<String> {
    let rule = rule_for(specialist, age.bracket());
    let adapted = match rule {
        AgeRule::Suppress => None,
        AgeRule::Pediatric => Some(pediatric_name(specialist)),
        AgeRule::PediatricIfAnySelected(symptoms) => selection
            .iter()
            .any(|selected| symptoms.contains(&selected))
            .then(|| pediatric_name(specialist)),
        AgeRule::Capitalize => Some(capitalize(specialist)),
        AgeRule::Rename(name) => Some(name.to_string()),
    };

    match &adapted {
        Some(name) => tracing::debug!("'{}' at age {} -> '{}'", specialist, age, name),
        None => tracing::debug!("'{}' suppressed at age {}", specialist, age),
    }
    adapted
}

/// Uppercases the first character only.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pediatric_name(specialist: &str) -> String {
    format!("Pediatric {}", capitalize(specialist))
}
