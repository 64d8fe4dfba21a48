//! # Warranty Duration
//!
//! Builds and reads the canonical duration string stored on every receipt:
//!
//! ```text
//! "12 meses (360 dias)"
//!   │         │
//!   │         └── days = months × days-per-month (see DayConvention)
//!   └──────────── months, as typed in the form
//! ```
//!
//! ## One Convention, Both Directions
//! Receipts written by older builds mixed 30 and 30.44 days per month, and
//! the detail view always recomputed with 30. Here the convention is an
//! explicit argument used for generation AND for the disclaimer text derived
//! while parsing, so a given installation is consistent end to end.
//! [`DayConvention::Commercial`] (30) is the default.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::DEFAULT_WARRANTY_MONTHS;

// =============================================================================
// Day Convention
// =============================================================================

/// How many days a warranty month is worth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum DayConvention {
    /// Exactly 30 days per month.
    #[default]
    Commercial,
    /// 30.44 days per month (365.25 / 12, truncated), days rounded down.
    AverageMonth,
}

impl DayConvention {
    /// Number of days covered by `months`.
    ///
    /// ```rust
    /// use recibo_core::warranty::DayConvention;
    ///
    /// assert_eq!(DayConvention::Commercial.days_for(12), 360);
    /// assert_eq!(DayConvention::AverageMonth.days_for(12), 365);
    /// ```
    pub const fn days_for(self, months: u32) -> u64 {
        let months = months as u64;
        match self {
            DayConvention::Commercial => months * 30,
            // floor(months × 30.44) in integer arithmetic
            DayConvention::AverageMonth => months * 3044 / 100,
        }
    }
}

impl FromStr for DayConvention {
    type Err = ValidationError;

    /// Accepts `30` / `30.44` (as used in configuration) or the variant names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "30" | "commercial" => Ok(DayConvention::Commercial),
            "30.44" | "30,44" | "average" | "averagemonth" => Ok(DayConvention::AverageMonth),
            other => Err(ValidationError::NotAllowed {
                field: format!("dayConvention ({})", other),
                allowed: vec!["30".to_string(), "30.44".to_string()],
            }),
        }
    }
}

// =============================================================================
// Warranty Duration
// =============================================================================

/// A warranty period decomposed from its canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WarrantyDuration {
    pub months: u32,
    #[ts(type = "number")]
    pub days: u64,
}

impl WarrantyDuration {
    /// Creates a duration for `months`, deriving days from the convention.
    ///
    /// ## Rules
    /// - months must be at least 1; any positive count is representable
    pub fn new(months: u32, convention: DayConvention) -> Result<Self, ValidationError> {
        if months == 0 {
            return Err(ValidationError::OutOfRange {
                field: "warrantyMonths".to_string(),
                min: 1,
                max: i64::from(u32::MAX),
            });
        }

        Ok(WarrantyDuration {
            months,
            days: convention.days_for(months),
        })
    }

    /// Reads both numbers back out of a canonical string.
    ///
    /// Returns `None` unless the string has the full
    /// `"<months> meses (<days> dias)"` shape. Round-trips every string
    /// produced by [`WarrantyDuration::canonical`].
    pub fn parse(s: &str) -> Option<Self> {
        let caps = canonical_regex().captures(s)?;
        let months = caps.name("months")?.as_str().parse().ok()?;
        let days = caps.name("days")?.as_str().parse().ok()?;
        Some(WarrantyDuration { months, days })
    }

    /// The canonical `"<months> meses (<days> dias)"` string.
    pub fn canonical(&self) -> String {
        format!("{} meses ({} dias)", self.months, self.days)
    }

    /// The disclaimer sentence printed on the receipt.
    pub fn warranty_text(&self) -> String {
        warranty_text(self.months, self.days)
    }
}

impl fmt::Display for WarrantyDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

// =============================================================================
// String Operations
// =============================================================================

/// Builds the canonical duration string.
///
/// ```rust
/// use recibo_core::warranty::{to_canonical, DayConvention};
///
/// assert_eq!(to_canonical(12, DayConvention::Commercial).unwrap(), "12 meses (360 dias)");
/// assert_eq!(to_canonical(6, DayConvention::AverageMonth).unwrap(), "6 meses (182 dias)");
/// assert!(to_canonical(0, DayConvention::Commercial).is_err());
/// ```
pub fn to_canonical(months: u32, convention: DayConvention) -> Result<String, ValidationError> {
    WarrantyDuration::new(months, convention).map(|d| d.canonical())
}

/// Result of reading a stored duration string for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParsedWarranty {
    /// Months recovered from the string, or the default.
    pub months: u32,
    /// Disclaimer sentence with months and recomputed days.
    pub warranty_text: String,
    /// Whether the default was used because nothing matched.
    pub defaulted: bool,
}

/// Reads the month count from a stored duration string and derives the
/// disclaimer sentence.
///
/// ## Behavior
/// - Takes the first integer followed by `mes`/`meses`/`mês`
/// - Days are recomputed from the months with `convention`; the day count
///   embedded in the string is not trusted
/// - Falls back to [`DEFAULT_WARRANTY_MONTHS`] when nothing matches or the
///   matched count is zero or does not fit a `u32`, and logs the fallback
///
/// ```rust
/// use recibo_core::warranty::{parse_canonical, DayConvention};
///
/// let parsed = parse_canonical("6 meses (180 dias)", DayConvention::Commercial);
/// assert_eq!(parsed.months, 6);
/// assert!(parsed.warranty_text.starts_with("Garantia válida por 6 meses (180 dias)."));
///
/// let fallback = parse_canonical("vitalícia", DayConvention::Commercial);
/// assert_eq!(fallback.months, 12);
/// assert!(fallback.defaulted);
/// ```
pub fn parse_canonical(s: &str, convention: DayConvention) -> ParsedWarranty {
    let found = months_regex()
        .captures(s)
        .and_then(|caps| caps.name("months"))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|months| *months > 0);

    let (months, defaulted) = match found {
        Some(months) => (months, false),
        None => {
            warn!(
                input = %s,
                default_months = DEFAULT_WARRANTY_MONTHS,
                "Warranty duration not recognized, using default"
            );
            (DEFAULT_WARRANTY_MONTHS, true)
        }
    };

    ParsedWarranty {
        months,
        warranty_text: warranty_text(months, convention.days_for(months)),
        defaulted,
    }
}

/// The fixed disclaimer sentence.
pub fn warranty_text(months: u32, days: u64) -> String {
    format!(
        "Garantia válida por {} meses ({} dias). Não cobre impacto, oxidação ou qualquer dano provocado por mau uso do aparelho.",
        months, days
    )
}

fn months_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?P<months>\d+)\s*m(?:e|ê)s(?:es)?")
            .unwrap_or_else(|e| unreachable!("invalid months pattern: {e}"))
    })
}

fn canonical_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?P<months>\d+)\s*m(?:e|ê)s(?:es)?\s*\(\s*(?P<days>\d+)\s*dias?\s*\)\s*$")
            .unwrap_or_else(|e| unreachable!("invalid canonical pattern: {e}"))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_for() {
        assert_eq!(DayConvention::Commercial.days_for(1), 30);
        assert_eq!(DayConvention::Commercial.days_for(3), 90);
        assert_eq!(DayConvention::AverageMonth.days_for(1), 30);
        assert_eq!(DayConvention::AverageMonth.days_for(3), 91);
        assert_eq!(DayConvention::AverageMonth.days_for(24), 730);
    }

    #[test]
    fn test_to_canonical_commercial_is_exact() {
        for months in [1, 3, 6, 12, 18, 24, 36] {
            let s = to_canonical(months, DayConvention::Commercial).unwrap();
            assert_eq!(s, format!("{} meses ({} dias)", months, months * 30));
        }
    }

    #[test]
    fn test_to_canonical_rejects_zero() {
        assert!(matches!(
            to_canonical(0, DayConvention::Commercial),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_to_canonical_has_no_upper_bound() {
        assert_eq!(
            to_canonical(121, DayConvention::Commercial).unwrap(),
            "121 meses (3630 dias)"
        );
        assert_eq!(
            to_canonical(1000, DayConvention::Commercial).unwrap(),
            "1000 meses (30000 dias)"
        );
        assert_eq!(
            to_canonical(u32::MAX, DayConvention::Commercial).unwrap(),
            format!("{} meses ({} dias)", u32::MAX, u64::from(u32::MAX) * 30)
        );

        for months in [121, 240, 1000] {
            for convention in [DayConvention::Commercial, DayConvention::AverageMonth] {
                let s = to_canonical(months, convention).unwrap();
                assert_eq!(parse_canonical(&s, convention).months, months);
                assert_eq!(WarrantyDuration::parse(&s).unwrap().canonical(), s);
            }
        }
    }

    #[test]
    fn test_round_trip_months() {
        for months in 1..=60 {
            for convention in [DayConvention::Commercial, DayConvention::AverageMonth] {
                let s = to_canonical(months, convention).unwrap();
                assert_eq!(parse_canonical(&s, convention).months, months);

                let parsed = WarrantyDuration::parse(&s).unwrap();
                assert_eq!(parsed.canonical(), s);
            }
        }
    }

    #[test]
    fn test_parse_canonical_recomputes_days() {
        // String produced with 30.44, read back with 30: days come from months.
        let parsed = parse_canonical("12 meses (365 dias)", DayConvention::Commercial);
        assert_eq!(parsed.months, 12);
        assert!(parsed.warranty_text.contains("(360 dias)"));
        assert!(!parsed.defaulted);
    }

    #[test]
    fn test_parse_canonical_accepts_singular_and_accent() {
        assert_eq!(parse_canonical("1 mês", DayConvention::Commercial).months, 1);
        assert_eq!(parse_canonical("3 meses", DayConvention::Commercial).months, 3);
        assert_eq!(parse_canonical("Garantia de 9meses", DayConvention::Commercial).months, 9);
    }

    #[test]
    fn test_parse_canonical_defaults_to_twelve() {
        for input in ["", "sem garantia", "365 dias", "0 meses", "99999999999 meses"] {
            let parsed = parse_canonical(input, DayConvention::Commercial);
            assert_eq!(parsed.months, DEFAULT_WARRANTY_MONTHS);
            assert!(parsed.defaulted);
            assert!(parsed.warranty_text.contains("12 meses (360 dias)"));
        }
    }

    #[test]
    fn test_parse_canonical_keeps_large_matches() {
        let parsed = parse_canonical("200 meses (6000 dias)", DayConvention::Commercial);
        assert_eq!(parsed.months, 200);
        assert!(!parsed.defaulted);
        assert!(parsed.warranty_text.contains("200 meses (6000 dias)"));
    }

    #[test]
    fn test_strict_parse_rejects_partial() {
        assert!(WarrantyDuration::parse("12 meses").is_none());
        assert!(WarrantyDuration::parse("doze meses (360 dias)").is_none());
        assert_eq!(
            WarrantyDuration::parse("12 meses (360 dias)"),
            Some(WarrantyDuration { months: 12, days: 360 })
        );
    }

    #[test]
    fn test_day_convention_from_str() {
        assert_eq!("30".parse::<DayConvention>().unwrap(), DayConvention::Commercial);
        assert_eq!("30.44".parse::<DayConvention>().unwrap(), DayConvention::AverageMonth);
        assert!("31".parse::<DayConvention>().is_err());
    }
}
