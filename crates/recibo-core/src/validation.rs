//! # Validation Module
//!
//! Single-field validators used by the receipt form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input masks (taxpayer::format, phone::format_phone,           │
//! │           sanitize_imei) - applied on every keystroke                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - one value, one rule                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: form::validate_step - collects per-field messages             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: SQLite NOT NULL constraints                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// IMEI length (14 digits + Luhn check digit).
pub const IMEI_DIGITS: usize = 15;

/// Date format typed on the issuance step.
pub const ISSUE_DATE_FORMAT: &str = "%d/%m/%Y";

/// The 27 federative units accepted for the customer's state.
pub const BRAZILIAN_STATES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a field is not blank.
///
/// ## Returns
/// The trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a state abbreviation (case-insensitive).
///
/// ```rust
/// use recibo_core::validation::validate_state;
///
/// assert_eq!(validate_state("pe").unwrap(), "PE");
/// assert!(validate_state("XX").is_err());
/// ```
pub fn validate_state(state: &str) -> ValidationResult<String> {
    let state = validate_required("state", state)?.to_ascii_uppercase();

    if !BRAZILIAN_STATES.contains(&state.as_str()) {
        return Err(ValidationError::NotAllowed {
            field: "state".to_string(),
            allowed: BRAZILIAN_STATES.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(state)
}

/// Keeps the digits of an IMEI and truncates to 15, as the input mask does.
pub fn sanitize_imei(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(IMEI_DIGITS)
        .collect()
}

/// Validates an IMEI: exactly 15 digits after sanitizing.
///
/// The Luhn digit is not checked.
pub fn validate_imei(field: &str, raw: &str) -> ValidationResult<String> {
    let imei = sanitize_imei(raw);

    if imei.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if imei.len() != IMEI_DIGITS {
        return Err(ValidationError::invalid_format(
            field,
            format!("must have {} digits", IMEI_DIGITS),
        ));
    }

    Ok(imei)
}

/// Validates an issue date typed as `DD/MM/AAAA`.
pub fn validate_issue_date(raw: &str) -> ValidationResult<NaiveDate> {
    let raw = validate_required("issueDate", raw)?;

    NaiveDate::parse_from_str(&raw, ISSUE_DATE_FORMAT)
        .map_err(|_| ValidationError::invalid_format("issueDate", "expected DD/MM/AAAA"))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale value typed in the form.
///
/// ## Rules
/// - Must parse (see [`Money::parse_brl`])
/// - Must be greater than zero
pub fn validate_sale_value(raw: &str) -> ValidationResult<Money> {
    let value = Money::parse_brl(raw)?;

    if !value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "saleValue".to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("city", "  Petrolina ").unwrap(), "Petrolina");
        assert!(validate_required("city", "").is_err());
        assert!(validate_required("city", "   ").is_err());
    }

    #[test]
    fn test_validate_state() {
        assert_eq!(validate_state("PE").unwrap(), "PE");
        assert_eq!(validate_state(" sp ").unwrap(), "SP");
        assert!(matches!(
            validate_state(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_state("ZZ"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_sanitize_imei() {
        assert_eq!(sanitize_imei("35-209900-176148-1"), "352099001761481");
        assert_eq!(sanitize_imei("3520990017614819999"), "352099001761481");
        assert_eq!(sanitize_imei("abc"), "");
    }

    #[test]
    fn test_validate_imei() {
        assert!(validate_imei("imei1", "352099001761481").is_ok());
        assert!(matches!(
            validate_imei("imei1", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_imei("imei1", "35209900"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_issue_date() {
        let date = validate_issue_date("17/10/2026").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert!(validate_issue_date("2026-10-17").is_err());
        assert!(validate_issue_date("31/02/2026").is_err());
        assert!(validate_issue_date("").is_err());
    }

    #[test]
    fn test_validate_sale_value() {
        assert_eq!(validate_sale_value("1.299,90").unwrap().cents(), 129990);
        assert!(matches!(
            validate_sale_value("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_sale_value("0,00"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_sale_value("").is_err());
        assert!(validate_sale_value("dez").is_err());
    }
}
