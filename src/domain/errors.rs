//! Domain error types
//!
//! This module defines the error hierarchy for the cleaner. Structural errors
//! (missing formats, unknown generators, missing instances) are programmer
//! errors and are never retried. Errors raised by user-supplied callables pass
//! through [`CleanerError::Callback`] without being rewrapped.

use thiserror::Error;

/// Main cleaner error type
#[derive(Debug, Error)]
pub enum CleanerError {
    /// No format declared for a type, or the attribute is missing from it
    #[error("No format declared for type '{type_name}'{}", describe_attribute(.attribute))]
    NoFormatDeclared {
        type_name: String,
        attribute: Option<String>,
    },

    /// A generator recipe names a generator that was never registered
    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),

    /// An instance-dependent recipe was resolved without an instance
    #[error("An instance is required to resolve {0}")]
    MissingInstance(String),

    /// A generator rejected its arguments
    #[error("Invalid argument for generator '{generator}': {reason}")]
    InvalidArgument { generator: String, reason: String },

    /// The record has no attribute with this name
    #[error("Type '{type_name}' has no attribute '{attribute}'")]
    UnknownAttribute { type_name: String, attribute: String },

    /// The record refused the resolved value for an attribute
    #[error("Cannot assign to '{type_name}.{attribute}': {reason}")]
    InvalidAttributeValue {
        type_name: String,
        attribute: String,
        reason: String,
    },

    /// A value could not be converted into the requested Rust type
    #[error("Expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// Configuration or format library errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Errors raised inside user callables and generators
    #[error(transparent)]
    Callback(#[from] anyhow::Error),
}

fn describe_attribute(attribute: &Option<String>) -> String {
    match attribute {
        Some(name) => format!(" with attribute '{name}'"),
        None => String::new(),
    }
}

impl CleanerError {
    /// Creates a [`CleanerError::NoFormatDeclared`] for a whole type
    pub fn no_format(type_name: impl Into<String>) -> Self {
        Self::NoFormatDeclared {
            type_name: type_name.into(),
            attribute: None,
        }
    }

    /// Creates an [`CleanerError::InvalidArgument`]
    pub fn invalid_argument(generator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            generator: generator.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for CleanerError {
    fn from(err: std::io::Error) -> Self {
        CleanerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CleanerError {
    fn from(err: serde_json::Error) -> Self {
        CleanerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CleanerError {
    fn from(err: toml::de::Error) -> Self {
        CleanerError::Configuration(format!("TOML parse error: {err}"))
    }
}
