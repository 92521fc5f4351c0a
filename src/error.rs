//! Error types for netif-validate.

use crate::core::FieldPath;
use std::fmt;
use std::time::Duration;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading or checking platform configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to load configuration from a source.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// Failed to deserialize configuration.
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationError(String),

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Errors raised while fetching the interface inventory from a remote host.
///
/// Every variant aborts the validation pass; none of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The channel to the inventory service could not be established.
    #[error("failed to connect to inventory service at {endpoint}: {reason}")]
    Connection {
        /// Address that was dialed
        endpoint: String,
        /// Transport-level failure description
        reason: String,
    },

    /// The service was reached but the listing request failed or returned undecodable data.
    #[error("could not list network interfaces: {0}")]
    Request(String),

    /// The listing request did not complete within the configured timeout.
    #[error("could not list network interfaces: request timed out after {0:?}")]
    Timeout(Duration),

    /// The configured transport requires a cargo feature that is not enabled.
    #[error("feature not enabled: {0}")]
    FeatureNotEnabled(&'static str),
}

impl InventoryError {
    /// Whether the failure happened before a channel existed.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::FeatureNotEnabled(_)
        )
    }
}

/// Category of a field-addressed validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Infrastructure failure (inventory unreachable, request failed); not a user input problem.
    Internal,
    /// The declared value is absent from a non-empty inventory.
    NotFound,
    /// The inventory service reported no interfaces at all.
    EmptyInventory,
    /// A statically checked value is malformed.
    Invalid,
}

/// A validation failure attributed to a configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What went wrong
    pub kind: ValidationErrorKind,
    /// Where in the configuration the offending value was declared
    pub field: FieldPath,
    /// The offending value, when there is one
    pub value: Option<String>,
    /// Human-readable detail
    pub message: String,
}

impl ValidationError {
    /// Create an internal error tagged to `field`.
    pub fn internal(field: FieldPath, err: impl fmt::Display) -> Self {
        Self {
            kind: ValidationErrorKind::Internal,
            field,
            value: None,
            message: err.to_string(),
        }
    }

    /// Create an error for a declared interface that is missing from the inventory.
    pub fn not_found(field: FieldPath, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::NotFound,
            field,
            value: Some(value.into()),
            message: message.into(),
        }
    }

    /// Create an error for a check evaluated against an empty inventory.
    pub fn empty_inventory(field: FieldPath, value: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::EmptyInventory,
            field,
            value: Some(value.into()),
            message: "no interfaces found".to_string(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(field: FieldPath, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::Invalid,
            field,
            value: Some(value.into()),
            message: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ValidationErrorKind::Internal => {
                write!(f, "{}: Internal error: {}", self.field, self.message)
            }
            _ => match &self.value {
                Some(value) => write!(
                    f,
                    "{}: Invalid value: {:?}: {}",
                    self.field, value, self.message
                ),
                None => write!(f, "{}: Invalid value: {}", self.field, self.message),
            },
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}

/// Helpers over an ordered list of validation errors.
pub trait ValidationErrors {
    /// Join every error into a single message, or `None` when the list is empty.
    fn to_aggregate(&self) -> Option<String>;

    /// `Ok(())` for an empty list, otherwise a `ConfigError::ValidationError` listing all failures.
    fn into_result(self) -> Result<()>;
}

impl ValidationErrors for Vec<ValidationError> {
    fn to_aggregate(&self) -> Option<String> {
        match self.as_slice() {
            [] => None,
            [single] => Some(single.to_string()),
            errors => {
                let joined = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!("[{}]", joined))
            }
        }
    }

    fn into_result(self) -> Result<()> {
        match self.to_aggregate() {
            None => Ok(()),
            Some(message) => Err(ConfigError::ValidationError(message)),
        }
    }
}
