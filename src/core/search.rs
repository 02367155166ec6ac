//! Free-text symptom search.
//!
//! A query matches a symptom by case-insensitive substring, by every
//! whitespace-separated word appearing in it, or through [`SYNONYMS`] in
//! either direction.

/// Canonical term and the words users type for it. Matching works in both
/// directions.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("high", &["elevated", "increased", "raised"]),
    ("low", &["decreased", "reduced", "drop"]),
    ("pain", &["ache", "aching", "hurt", "hurting", "sore"]),
    ("blood pressure", &["bp", "hypertension", "hypotension"]),
    ("blood sugar", &["glucose", "diabetes", "diabetic"]),
    ("breathing", &["breath", "respiratory"]),
    ("vision", &["sight", "visual", "eye"]),
    ("hearing", &["deaf", "audio"]),
    ("stomach", &["abdominal", "belly", "gastric"]),
    ("heart", &["cardiac", "cardio"]),
    ("kidney", &["renal"]),
    ("liver", &["hepatic"]),
    ("skin", &["dermal", "rash"]),
];

/// Filters symptom names against a free-text query.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    synonyms: Vec<(String, Vec<String>)>,
}

impl Default for SearchMatcher {
    fn default() -> Self {
        Self::with_synonyms(SYNONYMS.iter().map(|(term, words)| (*term, words.iter().copied())))
    }
}

impl SearchMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_synonyms<T, W, I>(table: I) -> Self
    where
        T: AsRef<str>,
        W: IntoIterator,
        W::Item: AsRef<str>,
        I: IntoIterator<Item = (T, W)>,
    {
        let synonyms = table
            .into_iter()
            .map(|(term, words)| {
                (
                    term.as_ref().to_lowercase(),
                    words
                        .into_iter()
                        .map(|w| w.as_ref().to_lowercase())
                        .collect(),
                )
            })
            .collect();
        Self { synonyms }
    }

    /// Keeps the symptoms that match `query`, in their original order. An
    /// empty query keeps everything.
    pub fn filter<'a, I>(&self, query: &str, symptoms: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if query.is_empty() {
            return symptoms.into_iter().collect();
        }

        let query = query.to_lowercase();
        symptoms
            .into_iter()
            .filter(|symptom| self.matches_lowercase(&query, &symptom.to_lowercase()))
            .collect()
    }

    pub fn matches(&self, query: &str, symptom: &str) -> bool {
        query.is_empty() || self.matches_lowercase(&query.to_lowercase(), &symptom.to_lowercase())
    }

    fn matches_lowercase(&self, query: &str, symptom: &str) -> bool {
        if symptom.contains(query) {
            return true;
        }

        let all_words_found = query
            .split_whitespace()
            .all(|word| symptom.contains(word));
        if all_words_found {
            return true;
        }

        self.synonyms.iter().any(|(term, words)| {
            (query.contains(term.as_str()) && words.iter().any(|w| symptom.contains(w.as_str())))
                || (symptom.contains(term.as_str())
                    && words.iter().any(|w| query.contains(w.as_str())))
        })
    }
}
