use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Dataset error: {message}")]
    DatasetError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No symptoms selected")]
    NoSymptomsSelected,

    #[error("Age is not set")]
    MissingAge,

    #[error("Age {value} is outside the supported range 0-120")]
    InvalidAge { value: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::NoSymptomsSelected
            | AdvisorError::MissingAge
            | AdvisorError::InvalidAge { .. } => ErrorCategory::Input,
            AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdvisorError::DatasetError { .. } | AdvisorError::SerializationError(_) => {
                ErrorCategory::Data
            }
            AdvisorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the binary: 2 for bad input, 1 for config or
    /// data problems, 3 for system failures.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// True for the rejections the advisor raises before computing anything.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AdvisorError::NoSymptomsSelected => {
                "Select at least one symptom with --symptom".to_string()
            }
            AdvisorError::MissingAge => {
                "Pass --age <0-120> or --age-group child|teen|adult".to_string()
            }
            AdvisorError::InvalidAge { .. } => "Use an age between 0 and 120".to_string(),
            AdvisorError::DatasetError { .. } | AdvisorError::SerializationError(_) => {
                "Check that the dataset maps symptom names to {specialist: positive integer} objects"
                    .to_string()
            }
            AdvisorError::ConfigValidationError { field, .. }
            | AdvisorError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in your configuration", field)
            }
            AdvisorError::IoError(_) => {
                "Make sure the file exists and is readable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdvisorError::NoSymptomsSelected => "Please select at least one symptom".to_string(),
            AdvisorError::MissingAge | AdvisorError::InvalidAge { .. } => {
                "Please enter a valid age".to_string()
            }
            AdvisorError::DatasetError { message } => {
                format!("The symptom dataset could not be used: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_input_category() {
        assert!(AdvisorError::NoSymptomsSelected.is_validation());
        assert!(AdvisorError::MissingAge.is_validation());
        assert!(AdvisorError::InvalidAge { value: 130 }.is_validation());
        assert_eq!(
            AdvisorError::InvalidAge { value: -1 }.severity(),
            ErrorSeverity::Medium
        );
    }

    #[test]
    fn test_user_friendly_messages() {
        assert_eq!(
            AdvisorError::NoSymptomsSelected.user_friendly_message(),
            "Please select at least one symptom"
        );
        assert_eq!(
            AdvisorError::InvalidAge { value: 200 }.user_friendly_message(),
            "Please enter a valid age"
        );
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = [
            AdvisorError::NoSymptomsSelected,
            AdvisorError::MissingAge,
            AdvisorError::InvalidAge { value: 121 },
            AdvisorError::ConfigValidationError {
                field: "logging.level".to_string(),
                message: "unknown level".to_string(),
            },
            AdvisorError::InvalidConfigValueError {
                field: "dataset.path".to_string(),
                value: "symptoms.csv".to_string(),
                reason: "expected a .json file".to_string(),
            },
            AdvisorError::DatasetError {
                message: "empty dataset".to_string(),
            },
            AdvisorError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "advisor.toml",
            )),
        ];
        let codes: Vec<i32> = errors.iter().map(AdvisorError::exit_code).collect();
        assert_eq!(codes, vec![2, 2, 2, 1, 1, 1, 3]);
    }

    #[test]
    fn test_dataset_error_is_high_severity() {
        let err = AdvisorError::DatasetError {
            message: "weight must be positive".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_validation());
    }
}
