use crate::domain::model::{Selection, SpecialistScores, SymptomDataset};

/// Sums specialist weights over every selected symptom. Symptoms the dataset
/// does not know contribute nothing.
pub fn score(selection: &Selection, dataset: &SymptomDataset) -> SpecialistScores {
    let mut scores = SpecialistScores::new();

    for symptom in selection.iter() {
        let Some(entry) = dataset.get(symptom) else {
            tracing::warn!("Ignoring unknown symptom '{}'", symptom);
            continue;
        };

        for (specialist, weight) in &entry.specialists {
            scores.add(specialist, *weight);
        }
    }

    tracing::debug!("Raw specialist scores: {:?}", scores);
    scores
}
