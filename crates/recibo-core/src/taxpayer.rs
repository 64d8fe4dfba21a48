//! # Taxpayer Identifiers (CPF / CNPJ)
//!
//! Validation and display masks for the two Brazilian taxpayer registries.
//!
//! ## Check Digits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Modulo-11, applied twice                                               │
//! │                                                                         │
//! │  CPF   529 982 247 | 2 5       CNPJ  06 227 875 0001 | 0 7              │
//! │        ─────────── │ │ │             ─────────────── │ │ │              │
//! │        9-digit base  │ └ over 10     12-digit base     │ └ over 13      │
//! │                      └ over 9                          └ over 12        │
//! │                                                                         │
//! │  sum = Σ digit × weight   (weights count down to 2, then wrap to 9)     │
//! │  r   = sum mod 11                                                       │
//! │  dv  = r < 2 ? 0 : 11 - r                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both kinds share [`check_digit`]; they differ only in length and in the
//! starting weight.
//!
//! Validators return `bool` and never fail. The canonical value of an
//! identifier is its digit string; the masked form is display only.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Kind
// =============================================================================

/// Which registry an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum TaxpayerKind {
    /// Individual (Cadastro de Pessoas Físicas), 11 digits.
    Cpf,
    /// Company (Cadastro Nacional da Pessoa Jurídica), 14 digits.
    Cnpj,
}

impl TaxpayerKind {
    /// Total number of digits, check digits included.
    pub const fn digit_count(self) -> usize {
        match self {
            TaxpayerKind::Cpf => 11,
            TaxpayerKind::Cnpj => 14,
        }
    }

    /// Weight applied to the first digit of a prefix of `prefix_len` digits.
    const fn initial_weight(self, prefix_len: usize) -> u32 {
        match self {
            TaxpayerKind::Cpf => prefix_len as u32 + 1,
            TaxpayerKind::Cnpj => prefix_len as u32 - 7,
        }
    }

    /// Separator inserted before the digit at each offset.
    const fn mask(self) -> &'static [(usize, char)] {
        match self {
            TaxpayerKind::Cpf => &[(3, '.'), (6, '.'), (9, '-')],
            TaxpayerKind::Cnpj => &[(2, '.'), (5, '.'), (8, '/'), (12, '-')],
        }
    }

    /// Field label used in messages.
    pub const fn label(self) -> &'static str {
        match self {
            TaxpayerKind::Cpf => "CPF",
            TaxpayerKind::Cnpj => "CNPJ",
        }
    }
}

impl fmt::Display for TaxpayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a CPF or CNPJ in any formatting.
///
/// ## Rules
/// 1. Every non-digit character is ignored
/// 2. Exactly 11 (CPF) or 14 (CNPJ) digits must remain
/// 3. All-identical sequences (`000.000.000-00`) are rejected
/// 4. Both check digits must match
///
/// ```rust
/// use recibo_core::taxpayer::{validate, TaxpayerKind};
///
/// assert!(validate(TaxpayerKind::Cpf, "529.982.247-25"));
/// assert!(!validate(TaxpayerKind::Cpf, "529.982.247-24"));
/// assert!(validate(TaxpayerKind::Cnpj, "06.227.875/0001-07"));
/// ```
pub fn validate(kind: TaxpayerKind, raw: &str) -> bool {
    let digits = digits_of(raw);

    if digits.len() != kind.digit_count() {
        return false;
    }

    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    let base_len = kind.digit_count() - 2;
    (base_len..kind.digit_count()).all(|position| {
        check_digit(kind, &digits[..position]) == digits[position]
    })
}

/// Validates a CPF. Shorthand for `validate(TaxpayerKind::Cpf, raw)`.
pub fn validate_cpf(raw: &str) -> bool {
    validate(TaxpayerKind::Cpf, raw)
}

/// Validates a CNPJ. Shorthand for `validate(TaxpayerKind::Cnpj, raw)`.
pub fn validate_cnpj(raw: &str) -> bool {
    validate(TaxpayerKind::Cnpj, raw)
}

/// Computes the check digit that follows `prefix`.
fn check_digit(kind: TaxpayerKind, prefix: &[u32]) -> u32 {
    let mut weight = kind.initial_weight(prefix.len());
    let mut sum = 0u32;

    for digit in prefix {
        sum += digit * weight;
        weight -= 1;
        if weight < 2 {
            weight = 9;
        }
    }

    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

fn digits_of(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}

// =============================================================================
// Formatting
// =============================================================================

/// Applies the display mask to whatever digits are present.
///
/// Safe to call on every keystroke: a separator only appears once a digit
/// exists after it, and digits beyond the kind's length are dropped.
/// Formatting is idempotent.
///
/// ```rust
/// use recibo_core::taxpayer::{format, TaxpayerKind};
///
/// assert_eq!(format(TaxpayerKind::Cpf, "52998224725"), "529.982.247-25");
/// assert_eq!(format(TaxpayerKind::Cpf, "5299"), "529.9");
/// assert_eq!(format(TaxpayerKind::Cnpj, "06227875000107"), "06.227.875/0001-07");
/// ```
pub fn format(kind: TaxpayerKind, raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(kind.digit_count())
        .collect();

    let mask = kind.mask();
    let mut out = String::with_capacity(digits.len() + mask.len());

    for (index, digit) in digits.iter().enumerate() {
        if let Some((_, separator)) = mask.iter().find(|(offset, _)| *offset == index) {
            out.push(*separator);
        }
        out.push(*digit);
    }

    out
}

/// Formats a CPF. Shorthand for `format(TaxpayerKind::Cpf, raw)`.
pub fn format_cpf(raw: &str) -> String {
    format(TaxpayerKind::Cpf, raw)
}

/// Formats a CNPJ. Shorthand for `format(TaxpayerKind::Cnpj, raw)`.
pub fn format_cnpj(raw: &str) -> String {
    format(TaxpayerKind::Cnpj, raw)
}

// =============================================================================
// Validated Identifier
// =============================================================================

/// A CPF or CNPJ that passed validation. Holds the raw digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxpayerId {
    kind: TaxpayerKind,
    digits: String,
}

impl TaxpayerId {
    /// Parses and validates an identifier of the given kind.
    pub fn parse(kind: TaxpayerKind, raw: &str) -> Option<Self> {
        if !validate(kind, raw) {
            return None;
        }
        Some(TaxpayerId {
            kind,
            digits: raw.chars().filter(|c| c.is_ascii_digit()).collect(),
        })
    }

    /// Parses either kind, deciding by digit count.
    pub fn detect(raw: &str) -> Option<Self> {
        let count = raw.chars().filter(|c| c.is_ascii_digit()).count();
        match count {
            11 => Self::parse(TaxpayerKind::Cpf, raw),
            14 => Self::parse(TaxpayerKind::Cnpj, raw),
            _ => None,
        }
    }

    pub fn kind(&self) -> TaxpayerKind {
        self.kind
    }

    /// The canonical digit string.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The masked display form.
    pub fn formatted(&self) -> String {
        format(self.kind, &self.digits)
    }
}

impl fmt::Display for TaxpayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
