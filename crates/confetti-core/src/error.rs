//! Error types for Confetti

use thiserror::Error;

/// The main error type for Confetti operations
#[derive(Debug, Error)]
pub enum ConfettiError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid enum value: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        value: String,
        allowed: Vec<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type alias for Confetti operations
pub type Result<T> = std::result::Result<T, ConfettiError>;

impl From<toml::de::Error> for ConfettiError {
    fn from(err: toml::de::Error) -> Self {
        ConfettiError::TomlParseError(err.to_string())
    }
}
