//! Red-flag symptoms that override every other recommendation.

use crate::domain::model::Selection;

pub const RED_FLAGS: &[&str] = &[
    "chest pain spreading to arm",
    "sudden severe headache",
    "difficulty breathing",
    "loss of consciousness",
];

/// Red-flag symptoms present in the selection, in selection order.
pub fn red_flags_in(selection: &Selection) -> Vec<&str> {
    selection
        .iter()
        .filter(|symptom| RED_FLAGS.contains(symptom))
        .collect()
}

pub fn is_emergency(selection: &Selection) -> bool {
    selection.iter().any(|symptom| RED_FLAGS.contains(&symptom))
}
