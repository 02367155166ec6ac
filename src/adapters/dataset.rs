use crate::domain::model::{SymptomDataset, SymptomEntry};
use crate::domain::ports::DatasetSource;
use crate::utils::error::{AdvisorError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

const BUNDLED_SYMPTOMS: &str = include_str!("../../data/symptoms.json");

impl SymptomDataset {
    /// Parses `{ "symptom": { "specialist": weight, ... }, ... }`, keeping
    /// the document order of symptoms and specialists.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(symptoms) = document else {
            return Err(dataset_error("top level must be an object of symptoms"));
        };

        let mut entries = Vec::with_capacity(symptoms.len());
        for (name, specialists) in symptoms {
            let Value::Object(specialists) = specialists else {
                return Err(dataset_error(format!(
                    "'{}' must map to an object of specialist weights",
                    name
                )));
            };

            let mut weights = Vec::with_capacity(specialists.len());
            for (specialist, weight) in specialists {
                let weight = weight
                    .as_u64()
                    .filter(|w| *w > 0)
                    .and_then(|w| u32::try_from(w).ok())
                    .ok_or_else(|| {
                        dataset_error(format!(
                            "weight for '{}' under '{}' must be a positive integer, got {}",
                            specialist, name, weight
                        ))
                    })?;
                weights.push((specialist, weight));
            }

            entries.push(SymptomEntry {
                name,
                specialists: weights,
            });
        }

        if entries.is_empty() {
            return Err(dataset_error("dataset contains no symptoms"));
        }

        SymptomDataset::from_entries(entries)
    }
}

fn dataset_error(message: impl Into<String>) -> AdvisorError {
    AdvisorError::DatasetError {
        message: message.into(),
    }
}

/// The symptom table compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDataset;

impl DatasetSource for EmbeddedDataset {
    fn describe(&self) -> String {
        "bundled dataset".to_string()
    }

    fn load(&self) -> Result<SymptomDataset> {
        SymptomDataset::from_json_str(BUNDLED_SYMPTOMS)
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileDataset {
    path: PathBuf,
}

impl JsonFileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for JsonFileDataset {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<SymptomDataset> {
        let content = std::fs::read_to_string(&self.path)?;
        SymptomDataset::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emergency::RED_FLAGS;

    #[test]
    fn test_parse_keeps_document_order() {
        let dataset = SymptomDataset::from_json_str(
            r#"{
                "wheezing": {"pulmonologist": 3, "allergist": 2},
                "acne": {"dermatologist": 3},
                "back pain": {"orthopedic": 2, "pain management": 1}
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = dataset.symptom_names().collect();
        assert_eq!(names, vec!["wheezing", "acne", "back pain"]);
        assert_eq!(
            dataset.get("wheezing").unwrap().specialists,
            vec![("pulmonologist".to_string(), 3), ("allergist".to_string(), 2)]
        );
    }

    #[test]
    fn test_parse_rejects_bad_weights() {
        for bad in [
            r#"{"acne": {"dermatologist": 0}}"#,
            r#"{"acne": {"dermatologist": -1}}"#,
            r#"{"acne": {"dermatologist": 1.5}}"#,
            r#"{"acne": {"dermatologist": "3"}}"#,
        ] {
            assert!(
                matches!(
                    SymptomDataset::from_json_str(bad),
                    Err(AdvisorError::DatasetError { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_wrong_shapes() {
        assert!(SymptomDataset::from_json_str(r#"["acne"]"#).is_err());
        assert!(SymptomDataset::from_json_str(r#"{"acne": 3}"#).is_err());
        assert!(SymptomDataset::from_json_str("{}").is_err());
        assert!(matches!(
            SymptomDataset::from_json_str("not json"),
            Err(AdvisorError::SerializationError(_))
        ));
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let dataset = EmbeddedDataset.load().unwrap();
        assert!(dataset.len() > 50);
        for flag in RED_FLAGS {
            assert!(dataset.contains(flag), "bundled dataset is missing '{flag}'");
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonFileDataset::new("/definitely/not/here/symptoms.json");
        assert!(matches!(source.load(), Err(AdvisorError::IoError(_))));
    }
}
