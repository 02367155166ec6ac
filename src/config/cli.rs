use crate::config::toml_config::TomlConfig;
use crate::domain::model::{AgeGroup, CollisionPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "who-to-consult")]
#[command(about = "Find the right medical specialist for your symptoms")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON symptom table to use instead of the bundled one
    #[arg(long)]
    pub dataset: Option<String>,

    /// Age in years (0-120)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "age_group")]
    pub age: Option<i64>,

    #[arg(long, value_enum)]
    pub age_group: Option<AgeGroup>,

    /// Selected symptom, repeat for several
    #[arg(short, long = "symptom")]
    pub symptoms: Vec<String>,

    /// Show symptoms matching this text
    #[arg(long)]
    pub search: Option<String>,

    /// List every known symptom
    #[arg(long)]
    pub list: bool,

    #[arg(long)]
    pub alternative_margin: Option<u32>,

    #[arg(long)]
    pub max_alternatives: Option<usize>,

    #[arg(long, value_enum)]
    pub collision_policy: Option<CollisionPolicy>,

    /// Print the recommendation as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// Age from `--age`, or the representative age of `--age-group`.
    pub fn age_input(&self) -> Option<i64> {
        self.age
            .or_else(|| self.age_group.map(AgeGroup::representative_age))
    }

    /// Loads the config file, if any, and lays command-line values over it.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(dataset) = &self.dataset {
            config.dataset.path = Some(dataset.clone());
        }
        if let Some(margin) = self.alternative_margin {
            config.recommendation.alternative_margin = Some(margin);
        }
        if let Some(max) = self.max_alternatives {
            config.recommendation.max_alternatives = Some(max);
        }
        if let Some(policy) = self.collision_policy {
            config.recommendation.collision_policy = Some(policy);
        }
        if self.verbose {
            config.logging.level = Some("debug".to_string());
        }
        if self.log_json {
            config.logging.json = Some(true);
        }

        Ok(config)
    }

    /// Validated arguments resolved into a validated config.
    pub fn load(&self) -> Result<TomlConfig> {
        self.validate()?;
        let config = self.resolve()?;
        config.validate()?;
        Ok(config)
    }

    /// Log level implied by the flags alone, for failures before a config exists.
    pub fn log_level(&self) -> Option<&str> {
        self.verbose.then_some("debug")
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(path) = &self.dataset {
            validate_path("dataset", path)?;
        }
        for symptom in &self.symptoms {
            validate_non_empty_string("symptom", symptom)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::AdvisorError;
    use tempfile::TempDir;

    #[test]
    fn test_parse_symptoms_and_age() {
        let config = CliConfig::parse_from([
            "who-to-consult",
            "--age",
            "34",
            "-s",
            "chest pain",
            "--symptom",
            "dizziness",
        ]);
        assert_eq!(config.age_input(), Some(34));
        assert_eq!(config.symptoms, vec!["chest pain", "dizziness"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_age_group_and_negative_age() {
        let config = CliConfig::parse_from(["who-to-consult", "--age-group", "teen"]);
        assert_eq!(config.age_input(), Some(15));

        let config = CliConfig::parse_from(["who-to-consult", "--age", "-4"]);
        assert_eq!(config.age_input(), Some(-4));

        assert!(CliConfig::try_parse_from([
            "who-to-consult",
            "--age",
            "4",
            "--age-group",
            "adult"
        ])
        .is_err());
    }

    #[test]
    fn test_blank_symptom_fails_validation() {
        let config = CliConfig::parse_from(["who-to-consult", "-s", "  "]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_command_line_overrides_defaults() {
        let config = CliConfig::parse_from([
            "who-to-consult",
            "--dataset",
            "custom.json",
            "--max-alternatives",
            "1",
            "--collision-policy",
            "max",
        ]);
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.dataset_path(), Some("custom.json"));
        assert_eq!(resolved.max_alternatives(), 1);
        assert_eq!(resolved.alternative_margin(), 2);
        assert_eq!(resolved.collision_policy(), CollisionPolicy::Max);
    }

    #[test]
    fn test_load_fails_before_logging_is_configured() {
        let config = CliConfig::parse_from([
            "who-to-consult",
            "--config",
            "/no/such/dir/advisor.toml",
            "--verbose",
        ]);
        assert!(matches!(config.load(), Err(AdvisorError::IoError(_))));
        assert_eq!(config.log_level(), Some("debug"));

        let quiet = CliConfig::parse_from(["who-to-consult", "-s", " "]);
        assert!(quiet.load().is_err());
        assert_eq!(quiet.log_level(), None);
    }

    #[test]
    fn test_load_validates_the_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("advisor.toml");
        std::fs::write(&config_path, "[logging]\nlevel = \"loud\"\n").unwrap();

        let config = CliConfig::parse_from([
            "who-to-consult",
            "--config",
            config_path.to_str().unwrap(),
        ]);
        assert!(config.resolve().is_ok());
        assert!(matches!(
            config.load(),
            Err(AdvisorError::InvalidConfigValueError { .. })
        ));

        // --verbose replaces the bad level before validation
        let verbose = CliConfig::parse_from([
            "who-to-consult",
            "--config",
            config_path.to_str().unwrap(),
            "--verbose",
        ]);
        assert_eq!(verbose.load().unwrap().log_level(), Some("debug"));
    }
}
