use anyhow::Result;
use tempfile::TempDir;
use who_to_consult::{
    Advisor, AdvisorError, CollisionPolicy, ConfigProvider, DatasetSource, JsonFileDataset,
    Selection, TomlConfig,
};

const SMALL_DATASET: &str = r#"{
    "itchy eyes": { "allergist": 3, "ophthalmologist": 2 },
    "runny nose": { "allergist": 2, "ent": 2 },
    "growth delay": { "pediatrician": 3 }
}"#;

#[test]
fn test_advisor_from_toml_and_json_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = temp_dir.path().join("symptoms.json");
    std::fs::write(&dataset_path, SMALL_DATASET)?;

    let normalized_path = dataset_path.to_str().unwrap().replace('\\', "/");
    let config_content = format!(
        r#"
[dataset]
path = "{}"

[recommendation]
alternative_margin = 0
max_alternatives = 1
collision_policy = "last-write-wins"
"#,
        normalized_path
    );
    let config_path = temp_dir.path().join("advisor.toml");
    std::fs::write(&config_path, config_content)?;

    let config = TomlConfig::from_file(&config_path)?;
    assert_eq!(config.collision_policy(), CollisionPolicy::LastWriteWins);

    let source = JsonFileDataset::new(config.dataset_path().unwrap());
    let advisor = Advisor::from_source(&source, &config)?;
    assert_eq!(advisor.dataset().len(), 3);
    assert_eq!(advisor.policy().max_alternatives, 1);

    let selection: Selection = ["itchy eyes", "runny nose"].into_iter().collect();
    let result = advisor.recommend(&selection, Some(30))?;

    // allergist 5, ophthalmologist 2, ent 2; margin 0 keeps only ties with the top
    assert_eq!(result.specialist(), "Allergist");
    assert_eq!(result.score(), Some(5));
    assert!(result.alternatives().is_empty());
    Ok(())
}

#[test]
fn test_file_order_drives_search_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = temp_dir.path().join("symptoms.json");
    std::fs::write(&dataset_path, SMALL_DATASET)?;

    let dataset = JsonFileDataset::new(&dataset_path).load()?;
    let names: Vec<&str> = dataset.symptom_names().collect();
    assert_eq!(names, vec!["itchy eyes", "runny nose", "growth delay"]);
    Ok(())
}

#[test]
fn test_malformed_dataset_file_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dataset_path = temp_dir.path().join("broken.json");
    std::fs::write(&dataset_path, r#"{ "cough": { "pulmonologist": 0 } }"#)?;

    let source = JsonFileDataset::new(&dataset_path);
    let error = Advisor::from_source(&source, &TomlConfig::default()).unwrap_err();
    assert!(matches!(error, AdvisorError::DatasetError { .. }));
    assert!(!error.is_validation());
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let result = TomlConfig::from_file("/no/such/dir/advisor.toml");
    assert!(matches!(result, Err(AdvisorError::IoError(_))));
}
