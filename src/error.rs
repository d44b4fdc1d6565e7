//! Error types and handling for the traveller agent

use thiserror::Error;

/// Main error type for the traveller agent
#[derive(Error, Debug)]
pub enum TravelAiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Language model communication errors
    #[error("{message}")]
    Llm { message: String },

    /// Input validation errors, tied to the offending request field
    #[error("Invalid input for '{field}': {message}")]
    Validation { field: String, message: String },
}

impl TravelAiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new language model error
    pub fn llm<S: Into<String>>(message: S) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    /// Create a new validation error for `field`
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than the service
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, TravelAiError::Validation { .. })
    }
}

impl From<reqwest::Error> for TravelAiError {
    fn from(err: reqwest::Error) -> Self {
        TravelAiError::llm(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TravelAiError::config("missing API key");
        assert!(matches!(config_err, TravelAiError::Config { .. }));

        let llm_err = TravelAiError::llm("connection failed");
        assert!(matches!(llm_err, TravelAiError::Llm { .. }));

        let validation_err = TravelAiError::validation("budget", "must be greater than 0");
        assert!(matches!(
            validation_err,
            TravelAiError::Validation { ref field, .. } if field == "budget"
        ));
    }

    #[test]
    fn test_llm_error_displays_raw_message() {
        let err = TravelAiError::llm("HTTP 403 Forbidden: quota exceeded");
        assert_eq!(err.to_string(), "HTTP 403 Forbidden: quota exceeded");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(TravelAiError::validation("budget", "bad").is_client_error());
        assert!(!TravelAiError::llm("boom").is_client_error());
        assert!(!TravelAiError::config("boom").is_client_error());
    }
}
