use thiserror::Error;

#[derive(Error, Debug)]
pub enum TarotError {
    #[error("Reference file not found: {path}")]
    NotFoundError { path: String },

    #[error("Missing columns in reference file: {}. Available columns: {}", .missing.join(", "), .found.join(", "))]
    SchemaError {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Cannot draw {requested} cards from a deck of {available}")]
    InsufficientCardsError { requested: usize, available: usize },

    #[error("Draw count must be a positive integer, got {count}")]
    InvalidDrawCount { count: usize },

    #[error("Card '{card}' is not present in the reference table")]
    LookupError { card: String },

    #[error("Interpretation failed: {message}")]
    InterpretationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Startup,
    Draw,
    Interpretation,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TarotError {
    pub fn interpretation(message: impl Into<String>) -> Self {
        Self::InterpretationError {
            message: message.into(),
            source: None,
        }
    }

    pub fn interpretation_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::InterpretationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Folds any fault raised while talking to the model into an
    /// `InterpretationError`, keeping the original as its source.
    pub fn into_interpretation(self) -> Self {
        match self {
            err @ Self::InterpretationError { .. } => err,
            other => {
                let message = other.to_string();
                Self::interpretation_with_source(message, other)
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFoundError { .. } | Self::SchemaError { .. } | Self::CsvError(_) => {
                ErrorCategory::Startup
            }
            Self::InsufficientCardsError { .. }
            | Self::InvalidDrawCount { .. }
            | Self::LookupError { .. } => ErrorCategory::Draw,
            Self::InterpretationError { .. } => ErrorCategory::Interpretation,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::InsufficientCardsError { .. }
            | Self::InvalidDrawCount { .. }
            | Self::InterpretationError { .. } => ErrorSeverity::Medium,
            Self::LookupError { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::NotFoundError { .. }
            | Self::SchemaError { .. }
            | Self::CsvError(_)
            | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFoundError { path } => format!("The card deck file '{}' could not be found", path),
            Self::SchemaError { missing, .. } => format!(
                "The card deck file is missing the column(s): {}",
                missing.join(", ")
            ),
            Self::InsufficientCardsError {
                requested,
                available,
            } => format!(
                "The deck only has {} cards, {} were requested",
                available, requested
            ),
            Self::InterpretationError { message, .. } => {
                format!("The reading could not be interpreted: {}", message)
            }
            Self::LookupError { card } => format!(
                "The card '{}' was drawn but has no meaning in the deck",
                card
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Startup => {
                "Check the --deck path and make sure the file has the columns carte;dritto;rovescio"
            }
            ErrorCategory::Draw => "Choose a smaller spread or use a deck with more cards",
            ErrorCategory::Interpretation => {
                "Check the model endpoint, the API key and your network connection, then try again"
            }
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
            ErrorCategory::Input => "Describe your situation or question before drawing",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, TarotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_missing_and_found_columns() {
        let err = TarotError::SchemaError {
            missing: vec!["rovescio".to_string()],
            found: vec!["carte".to_string(), "dritto".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("rovescio"));
        assert!(message.contains("carte, dritto"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_into_interpretation_wraps_other_errors() {
        let io = TarotError::IoError(std::io::Error::other("connection reset"));
        let wrapped = io.into_interpretation();

        assert_eq!(wrapped.category(), ErrorCategory::Interpretation);
        assert!(wrapped.to_string().contains("connection reset"));
        assert!(std::error::Error::source(&wrapped).is_some());
    }

    #[test]
    fn test_into_interpretation_keeps_interpretation_errors() {
        let err = TarotError::interpretation("empty completion").into_interpretation();
        match err {
            TarotError::InterpretationError { message, source } => {
                assert_eq!(message, "empty completion");
                assert!(source.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
