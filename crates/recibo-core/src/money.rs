//! # Money Module
//!
//! Provides the `Money` type for sale values in Brazilian reais.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The web form stored sale values as JS numbers:                         │
//! │    10.999 → "dez reais e cem centavos"  ❌ WRONG!                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    "10,999" is rounded ONCE, at parse time, to 1100 centavos            │
//! │    → "onze reais"                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use recibo_core::money::Money;
//!
//! let price = Money::parse_brl("R$ 1.500,50").unwrap();
//! assert_eq!(price.cents(), 150050);
//! assert_eq!(price.to_string(), "R$ 1.500,50");
//! assert_eq!(price.to_words(), "mil e quinhentos reais e cinquenta centavos");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::words;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction; sale values
///   are checked to be positive by the form layer
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// ```rust
    /// use recibo_core::money::Money;
    ///
    /// assert_eq!(Money::from_reais_centavos(1500, 50).cents(), 150050);
    /// ```
    #[inline]
    pub const fn from_reais_centavos(reais: i64, centavos: i64) -> Self {
        if reais < 0 {
            Money(reais * 100 - centavos)
        } else {
            Money(reais * 100 + centavos)
        }
    }

    /// Creates a Money value from a floating-point amount of reais,
    /// rounding to the nearest centavo.
    ///
    /// Only used at the JSON boundary, where backups written by the web
    /// application carry `saleValue` as a plain number.
    pub fn from_reais_f64(reais: f64) -> Self {
        Money((reais * 100.0).round() as i64)
    }

    /// Parses a user-typed amount.
    ///
    /// ## Accepted Shapes
    /// - `1500`, `1500.5`, `1500.50` (dot decimal, as an `<input type=number>` sends it)
    /// - `1500,50`, `1.500,50` (Brazilian notation, dots as thousands separators)
    /// - any of the above prefixed with `R$`
    ///
    /// More than two fractional digits are rounded half-up to the centavo.
    ///
    /// ```rust
    /// use recibo_core::money::Money;
    ///
    /// assert_eq!(Money::parse_brl("1.500,50").unwrap().cents(), 150050);
    /// assert_eq!(Money::parse_brl("10.999").unwrap().cents(), 1100);
    /// assert!(Money::parse_brl("-5").is_err());
    /// assert!(Money::parse_brl("abc").is_err());
    /// ```
    pub fn parse_brl(input: &str) -> Result<Self, ValidationError> {
        const FIELD: &str = "saleValue";

        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: FIELD.to_string(),
            });
        }

        if trimmed.starts_with('-') {
            return Err(ValidationError::OutOfRange {
                field: FIELD.to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        // Brazilian notation when a comma is present; otherwise the dot is the
        // decimal point.
        let (int_part, frac_part) = if trimmed.contains(',') {
            let mut pieces = trimmed.splitn(2, ',');
            let int_part = pieces.next().unwrap_or_default();
            let frac_part = pieces.next().unwrap_or_default();
            if frac_part.contains(',') || frac_part.contains('.') {
                return Err(ValidationError::invalid_format(FIELD, "misplaced separator"));
            }
            (int_part.replace('.', ""), frac_part.to_string())
        } else {
            let mut pieces = trimmed.splitn(2, '.');
            let int_part = pieces.next().unwrap_or_default();
            let frac_part = pieces.next().unwrap_or_default();
            if frac_part.contains('.') {
                return Err(ValidationError::invalid_format(FIELD, "misplaced separator"));
            }
            (int_part.to_string(), frac_part.to_string())
        };

        let int_part = if int_part.is_empty() { "0".to_string() } else { int_part };

        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ValidationError::invalid_format(FIELD, "not a number"));
        }

        let too_large = || ValidationError::invalid_format(FIELD, "amount too large");

        let reais: i64 = int_part.parse().map_err(|_| too_large())?;

        let frac_digits: Vec<u32> = frac_part.chars().filter_map(|c| c.to_digit(10)).collect();
        let tenths = frac_digits.first().copied().unwrap_or(0) as i64;
        let hundredths = frac_digits.get(1).copied().unwrap_or(0) as i64;
        let round_up = frac_digits.get(2).is_some_and(|d| *d >= 5);

        let cents = reais
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(too_large)?;

        Ok(Money(cents))
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the value as a float of reais (JSON boundary only).
    #[inline]
    pub fn as_reais_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Renders the amount in Brazilian Portuguese words.
    ///
    /// See [`words::amount_in_words`].
    pub fn to_words(&self) -> String {
        words::amount_in_words(*self)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian display format: `R$ 1.500,50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.reais().unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.centavos_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Serde Adapter
// =============================================================================

/// Serializes a `Money` field as a decimal number of reais.
///
/// Backups exported by the web application store `"saleValue": 1500.5`;
/// records carrying this attribute stay interchangeable with those files.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::as_reais")]
/// pub sale_value: Money,
/// ```
pub mod as_reais {
    use super::Money;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_reais_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let reais = f64::deserialize(deserializer)?;
        if !reais.is_finite() {
            return Err(de::Error::custom("sale value must be a finite number"));
        }
        Ok(Money::from_reais_f64(reais))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
