use crate::core::advisor::Advisor;
use crate::domain::model::{AgeGroup, Recommendation, Selection};
use crate::utils::error::Result;

/// What a front end holds between user actions: the search box, the picked
/// symptoms, the age, and the last result.
///
/// Any change to the selection or the age clears the stored result, so a
/// result on screen always matches the current inputs.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    advisor: &'a Advisor,
    query: String,
    selection: Selection,
    age: Option<i64>,
    result: Option<Recommendation>,
}

impl<'a> Session<'a> {
    pub fn new(advisor: &'a Advisor) -> Self {
        Self {
            advisor,
            query: String::new(),
            selection: Selection::new(),
            age: None,
            result: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filtered_symptoms(&self) -> Vec<&'a str> {
        self.advisor.search(&self.query)
    }

    /// "Found N symptoms matching ..." line, or `None` while the query is empty.
    pub fn search_summary(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let count = self.filtered_symptoms().len();
        Some(format!(
            "Found {} symptom{} matching \"{}\"",
            count,
            if count == 1 { "" } else { "s" },
            self.query
        ))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selects or deselects a symptom. Returns whether it is selected now.
    pub fn toggle(&mut self, symptom: &str) -> bool {
        if !self.advisor.dataset().contains(symptom) {
            tracing::warn!("Toggling '{}', which is not in the dataset", symptom);
        }
        self.result = None;
        self.selection.toggle(symptom)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.result = None;
    }

    pub fn age(&self) -> Option<i64> {
        self.age
    }

    pub fn select_age(&mut self, age: Option<i64>) {
        self.age = age;
        self.result = None;
    }

    pub fn select_age_group(&mut self, group: AgeGroup) {
        self.select_age(Some(group.representative_age()));
    }

    pub fn result(&self) -> Option<&Recommendation> {
        self.result.as_ref()
    }

    pub fn can_recommend(&self) -> bool {
        !self.selection.is_empty() && self.age.is_some()
    }

    pub fn missing_input_hint(&self) -> Option<&'static str> {
        match (self.age.is_some(), self.selection.is_empty()) {
            (false, true) => Some("Please select your age group and symptoms"),
            (false, false) => Some("Please select your age group"),
            (true, true) => Some("Please select at least one symptom"),
            (true, false) => None,
        }
    }

    /// Runs the advisor on the current inputs and keeps the result. A
    /// rejected request leaves no result behind.
    pub fn find_specialist(&mut self) -> Result<&Recommendation> {
        self.result = None;
        let result = self.advisor.recommend(&self.selection, self.age)?;
        Ok(self.result.insert(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SymptomDataset, SymptomEntry};
    use crate::utils::error::AdvisorError;
    use std::sync::Arc;

    fn advisor() -> Advisor {
        let dataset = SymptomDataset::from_entries(vec![
            SymptomEntry::new("fever", [("pediatrician", 2), ("infectious disease", 2)]),
            SymptomEntry::new("skin rash", [("dermatologist", 3)]),
            SymptomEntry::new("itching", [("dermatologist", 2), ("allergist", 2)]),
        ])
        .unwrap();
        Advisor::new(Arc::new(dataset))
    }

    #[test]
    fn test_toggle_clears_previous_result() {
        let advisor = advisor();
        let mut session = Session::new(&advisor);
        session.select_age_group(AgeGroup::Adult);
        session.toggle("skin rash");
        session.find_specialist().unwrap();
        assert!(session.result().is_some());

        session.toggle("itching");
        assert!(session.result().is_none());
    }

    #[test]
    fn test_age_change_clears_previous_result() {
        let advisor = advisor();
        let mut session = Session::new(&advisor);
        session.select_age(Some(30));
        session.toggle("fever");
        assert_eq!(session.find_specialist().unwrap().specialist(), "Infectious disease");

        session.select_age_group(AgeGroup::Child);
        assert!(session.result().is_none());
        assert_eq!(session.find_specialist().unwrap().specialist(), "Pediatrician");
    }

    #[test]
    fn test_failed_request_leaves_no_result() {
        let advisor = advisor();
        let mut session = Session::new(&advisor);
        session.select_age(Some(30));
        session.toggle("fever");
        session.find_specialist().unwrap();

        session.select_age(Some(500));
        assert!(matches!(
            session.find_specialist(),
            Err(AdvisorError::InvalidAge { value: 500 })
        ));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_missing_input_hints() {
        let advisor = advisor();
        let mut session = Session::new(&advisor);
        assert_eq!(
            session.missing_input_hint(),
            Some("Please select your age group and symptoms")
        );
        assert!(!session.can_recommend());

        session.toggle("fever");
        assert_eq!(session.missing_input_hint(), Some("Please select your age group"));

        session.toggle("fever");
        session.select_age_group(AgeGroup::Teen);
        assert_eq!(session.missing_input_hint(), Some("Please select at least one symptom"));

        session.toggle("itching");
        assert_eq!(session.missing_input_hint(), None);
        assert!(session.can_recommend());
    }

    #[test]
    fn test_search_summary() {
        let advisor = advisor();
        let mut session = Session::new(&advisor);
        assert_eq!(session.search_summary(), None);
        assert_eq!(session.filtered_symptoms().len(), 3);

        session.set_query("rash");
        assert_eq!(session.filtered_symptoms(), vec!["skin rash"]);
        assert_eq!(
            session.search_summary().as_deref(),
            Some("Found 1 symptom matching \"rash\"")
        );

        session.set_query("zzz");
        assert_eq!(
            session.search_summary().as_deref(),
            Some("Found 0 symptoms matching \"zzz\"")
        );
    }
}
