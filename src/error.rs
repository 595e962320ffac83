//! Error types and handling for the walkcast library

use thiserror::Error;

/// Main error type for the walkcast library
#[derive(Error, Debug)]
pub enum WalkcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Columnar series shape violations (field array length != time length)
    #[error("Series shape error: {message}")]
    Shape { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl WalkcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new series shape error
    pub fn shape<S: Into<String>>(message: S) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WalkcastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WalkcastError::Api { .. } => {
                "Unable to connect to the weather service. Please check your internet connection."
                    .to_string()
            }
            WalkcastError::Shape { .. } => {
                "The weather service returned malformed data. Please try again later.".to_string()
            }
            WalkcastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WalkcastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            WalkcastError::General { message } => message.clone(),
        }
    }
}
