use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{kind} not found: {name}")]
    NotFoundError { kind: &'static str, name: String },

    #[error("Input stream closed unexpectedly")]
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClinicError {
    pub fn validation(field: &str, value: &str, reason: &str) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } | Self::NotFoundError { .. } => ErrorSeverity::Low,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorSeverity::Medium,
            Self::TomlError(_)
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::InputClosed => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { reason, .. } => format!("Input error: {}", reason),
            Self::NotFoundError { kind, name } => format!("{} '{}' was not found.", kind, name),
            Self::CsvError(e) => format!("The pets file could not be processed: {}", e),
            Self::SerializationError(e) => {
                format!("The consultations file could not be processed: {}", e)
            }
            Self::IoError(e) => format!("A file could not be read or written: {}", e),
            Self::InputClosed => "The input stream closed before the session ended.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Re-enter the value following the rule shown",
            Self::NotFoundError { .. } => "Register the missing record first",
            Self::CsvError(_) => "Check that the CSV header and every age column are well formed",
            Self::SerializationError(_) => "Check that the consultations file is a valid JSON array",
            Self::IoError(_) => "Check file permissions and free disk space",
            Self::TomlError(_) => "Check the configuration file syntax",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value named in the message"
            }
            Self::InputClosed => "Run the program from an interactive terminal",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClinicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_displays_reason_only() {
        let err = ClinicError::validation("age", "abc", "Age must be a non-negative integer.");
        assert_eq!(err.to_string(), "Age must be a non-negative integer.");
        assert_eq!(
            err.user_friendly_message(),
            "Input error: Age must be a non-negative integer."
        );
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = ClinicError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("denied"));
    }
}
