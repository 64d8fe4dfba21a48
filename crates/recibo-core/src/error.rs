//! # Error Types
//!
//! Domain-specific error types for recibo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  recibo-core errors (this file)                                        │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── BackupError      - Backup file could not be read or written       │
//! │                                                                         │
//! │  recibo-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors (form) → frontend message         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! CPF/CNPJ validators never produce errors: they return `bool` and the
//! caller picks the message. Everything else uses the enums below.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a single value doesn't meet requirements.
/// Form-level validation collects them per field in [`FieldErrors`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable amount, wrong IMEI length).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Backup Error
// =============================================================================

/// Errors raised while encoding or decoding a backup file.
///
/// The display strings are shown to the user as-is, so they stay in
/// Portuguese. `MalformedJson` and `InvalidEnvelope` must remain distinct:
/// the first means the file is not JSON at all, the second that it is JSON
/// but not a receipt backup.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The text is not valid JSON.
    #[error("Arquivo de backup inválido. Formato JSON incorreto.")]
    MalformedJson(#[source] serde_json::Error),

    /// Valid JSON, but `version` or `receipts` is missing or has the wrong shape.
    #[error("Arquivo de backup inválido ou corrompido.")]
    InvalidEnvelope { reason: String },

    /// One entry of `receipts` does not match the receipt schema.
    #[error("Recibo {index} do backup inválido: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope could not be serialized.
    #[error("Falha ao exportar os recibos: {0}")]
    Serialize(#[source] serde_json::Error),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "cpf".to_string(),
        };
        assert_eq!(err.to_string(), "cpf is required");

        let err = ValidationError::invalid_format("imei1", "must have 15 digits");
        assert_eq!(err.to_string(), "imei1 has invalid format: must have 15 digits");
    }

    #[test]
    fn test_backup_error_messages_are_distinct() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let malformed = BackupError::MalformedJson(json_err);
        let invalid = BackupError::InvalidEnvelope {
            reason: "missing version".to_string(),
        };
        assert_ne!(malformed.to_string(), invalid.to_string());
        assert!(malformed.to_string().contains("JSON"));
    }
}
