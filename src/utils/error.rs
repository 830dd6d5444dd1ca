use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Processing,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MarkError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MarkError::IoError(_) => ErrorCategory::Io,
            MarkError::ConfigValidationError { .. }
            | MarkError::InvalidConfigValueError { .. }
            | MarkError::MissingConfigError { .. }
            | MarkError::ValidationError { .. } => ErrorCategory::Configuration,
            MarkError::ProcessingError { .. } => ErrorCategory::Processing,
            MarkError::ZipError(_) | MarkError::CsvError(_) | MarkError::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MarkError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the input file exists and the path is spelled correctly"
            }
            MarkError::IoError(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                "Check read permission on the input and write permission on the output directory"
            }
            MarkError::IoError(_) => "Check the input and output paths and retry",
            MarkError::MissingConfigError { .. } => {
                "Pass the content file as the first argument or set [input].path in the config file"
            }
            MarkError::ValidationError { .. } => {
                "Enable at least one mark type (drop --no-tvp or --no-aga)"
            }
            MarkError::ConfigValidationError { .. } | MarkError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            MarkError::ProcessingError { .. } => {
                "Check that mark lines end with four numeric coordinates"
            }
            MarkError::ZipError(_) | MarkError::CsvError(_) | MarkError::SerializationError(_) => {
                "Retry with --format html or without --bundle"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MarkError::IoError(e) => format!("Failed to read or write file: {}", e),
            MarkError::MissingConfigError { field } => {
                format!("Please select a TXT content file ({} is not set)", field)
            }
            MarkError::ValidationError { message } => message.clone(),
            MarkError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_configuration_error() {
        let err = MarkError::MissingConfigError {
            field: "input.path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("TXT content file"));
    }

    #[test]
    fn test_io_not_found_suggestion() {
        let err = MarkError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "content.txt",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("exists"));
    }

    #[test]
    fn test_severity_per_category() {
        let processing = MarkError::ProcessingError {
            message: "bad".to_string(),
        };
        assert_eq!(processing.category(), ErrorCategory::Processing);
        assert_eq!(processing.severity(), ErrorSeverity::Medium);

        let invalid = MarkError::InvalidConfigValueError {
            field: "output.formats".to_string(),
            value: "pdf".to_string(),
            reason: "unknown format".to_string(),
        };
        assert_eq!(invalid.severity(), ErrorSeverity::High);
        assert!(invalid.severity() < ErrorSeverity::Critical);
    }
}
