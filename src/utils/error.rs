use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Relay request failed: {0}")]
    RelayError(#[from] reqwest::Error),

    #[error("Relay rejected the submission with status {status}")]
    RelayStatusError { status: u16 },

    #[error("Submission failed: {reason}")]
    SubmissionFailed { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RelayError(_) | Self::RelayStatusError { .. } | Self::SubmissionFailed { .. } => {
                ErrorCategory::Network
            }
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::StorageError { .. } => {
                ErrorCategory::Storage
            }
            Self::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::RelayError(_) | Self::RelayStatusError { .. } | Self::SubmissionFailed { .. } => {
                "Errore nell'invio della richiesta. Riprova più tardi o contattaci direttamente."
                    .to_string()
            }
            Self::ValidationError { .. } => {
                "Per favore, controlla i campi evidenziati in rosso.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the relay endpoint and network, then resubmit",
            ErrorCategory::Configuration => "Fix the site configuration file and try again",
            ErrorCategory::Storage => "Check that the preference store path is writable",
            ErrorCategory::Input => "Correct the highlighted fields and resubmit",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
