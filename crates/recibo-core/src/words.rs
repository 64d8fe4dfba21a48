//! # Amount in Words
//!
//! Renders a sale value as Brazilian Portuguese prose for the "valor por
//! extenso" line of the receipt.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Inside a group (0-999)                                                 │
//! │    100        → "cem"            (never "cento")                        │
//! │    101        → "cento e um"                                            │
//! │    10..=19    → dez, onze, ... dezenove   (one lexeme, not "dez e X")   │
//! │    235        → "duzentos e trinta e cinco"                             │
//! │                                                                         │
//! │  Between groups                                                         │
//! │    1_000      → "mil"            (never "um mil")                       │
//! │    1_234      → "mil duzentos e trinta e quatro"                        │
//! │    1_500      → "mil e quinhentos"  (last group < 100 or whole hundred) │
//! │    2_000_000  → "dois milhões de reais"                                 │
//! │                                                                         │
//! │  Currency                                                               │
//! │    "um real" / "N reais", "um centavo" / "N centavos",                  │
//! │    cents clause omitted when zero, 0 → "zero reais"                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Receipts issued by the web app wrote " e " before every remainder group
//! and never "de" ("mil e duzentos e trinta e quatro reais", "um milhão
//! reais"), so a stored `saleValueInWords` may differ from what this module
//! generates for the same amount.

use crate::money::Money;

const UNITS: [&str; 10] = [
    "", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove",
];

const TEENS: [&str; 10] = [
    "dez",
    "onze",
    "doze",
    "treze",
    "quatorze",
    "quinze",
    "dezesseis",
    "dezessete",
    "dezoito",
    "dezenove",
];

const TENS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta", "oitenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "cento",
    "duzentos",
    "trezentos",
    "quatrocentos",
    "quinhentos",
    "seiscentos",
    "setecentos",
    "oitocentos",
    "novecentos",
];

/// (singular, plural) names for each power of one thousand above the units
/// group. Index 0 is "mil", which never takes a number before it when the
/// group is one.
const SCALES: [(&str, &str); 5] = [
    ("mil", "mil"),
    ("milhão", "milhões"),
    ("bilhão", "bilhões"),
    ("trilhão", "trilhões"),
    ("quatrilhão", "quatrilhões"),
];

/// Renders a monetary amount in words, currency-suffixed.
///
/// The sign is ignored: receipt values are validated positive before they
/// get here.
///
/// ```rust
/// use recibo_core::money::Money;
/// use recibo_core::words::amount_in_words;
///
/// assert_eq!(amount_in_words(Money::from_cents(0)), "zero reais");
/// assert_eq!(amount_in_words(Money::from_cents(100)), "um real");
/// assert_eq!(amount_in_words(Money::from_cents(10100)), "cento e um reais");
/// assert_eq!(
///     amount_in_words(Money::from_cents(150050)),
///     "mil e quinhentos reais e cinquenta centavos"
/// );
/// ```
pub fn amount_in_words(amount: Money) -> String {
    let total = amount.cents().unsigned_abs();
    let integer = total / 100;
    let centavos = total % 100;

    if integer == 0 && centavos == 0 {
        return "zero reais".to_string();
    }

    let mut clauses = Vec::with_capacity(2);

    if integer > 0 {
        let currency = if integer == 1 {
            "real"
        } else if integer % 1_000_000 == 0 {
            // "um milhão de reais", "dois bilhões de reais"
            "de reais"
        } else {
            "reais"
        };
        clauses.push(format!("{} {}", number_in_words(integer), currency));
    }

    if centavos > 0 {
        let currency = if centavos == 1 { "centavo" } else { "centavos" };
        clauses.push(format!("{} {}", group_in_words(centavos as u16), currency));
    }

    clauses.join(" e ")
}

/// Renders a non-negative integer in words, without currency.
///
/// ```rust
/// use recibo_core::words::number_in_words;
///
/// assert_eq!(number_in_words(0), "zero");
/// assert_eq!(number_in_words(15), "quinze");
/// assert_eq!(number_in_words(1_234), "mil duzentos e trinta e quatro");
/// assert_eq!(number_in_words(2_500_000), "dois milhões e quinhentos mil");
/// ```
pub fn number_in_words(n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    // Split into groups of three digits, least significant first.
    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push((rest % 1000) as u16);
        rest /= 1000;
    }

    let non_zero: Vec<(usize, u16)> = groups
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, value)| **value > 0)
        .map(|(scale, value)| (scale, *value))
        .collect();

    let mut out = String::new();
    for (position, (scale, value)) in non_zero.iter().enumerate() {
        if position > 0 {
            let is_last = position == non_zero.len() - 1;
            if is_last && (*value < 100 || *value % 100 == 0) {
                out.push_str(" e ");
            } else {
                out.push(' ');
            }
        }
        out.push_str(&scaled_group(*scale, *value));
    }

    out
}

/// Renders one three-digit group together with its scale word.
fn scaled_group(scale: usize, value: u16) -> String {
    match scale {
        0 => group_in_words(value),
        1 if value == 1 => "mil".to_string(),
        _ => {
            // u64 has at most 7 groups; index 6 would be quintilhões, which
            // cannot occur for an i64 amount of centavos.
            let (singular, plural) = SCALES[(scale - 1).min(SCALES.len() - 1)];
            if value == 1 && scale > 1 {
                format!("um {}", singular)
            } else {
                format!("{} {}", group_in_words(value), plural)
            }
        }
    }
}

/// Renders a number in `1..=999`. Returns an empty string for zero.
fn group_in_words(n: u16) -> String {
    if n == 0 {
        return String::new();
    }
    if n == 100 {
        return "cem".to_string();
    }

    let hundreds = (n / 100) as usize;
    let tens = ((n % 100) / 10) as usize;
    let units = (n % 10) as usize;

    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if hundreds > 0 {
        parts.push(HUNDREDS[hundreds]);
    }
    if tens == 1 {
        parts.push(TEENS[units]);
    } else {
        if tens > 1 {
            parts.push(TENS[tens]);
        }
        if units > 0 {
            parts.push(UNITS[units]);
        }
    }

    parts.join(" e ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn words(reais: i64, centavos: i64) -> String {
        amount_in_words(Money::from_reais_centavos(reais, centavos))
    }

    #[test]
    fn test_zero() {
        assert_eq!(words(0, 0), "zero reais");
    }

    #[test]
    fn test_singular_forms() {
        assert_eq!(words(1, 0), "um real");
        assert_eq!(words(1, 1), "um real e um centavo");
        assert_eq!(words(0, 1), "um centavo");
    }

    #[test]
    fn test_cem_and_cento() {
        assert_eq!(words(100, 0), "cem reais");
        assert_eq!(words(101, 0), "cento e um reais");
        assert_eq!(words(110, 0), "cento e dez reais");
        assert_eq!(words(199, 0), "cento e noventa e nove reais");
        assert_eq!(words(200, 0), "duzentos reais");
    }

    #[test]
    fn test_teens_are_single_lexemes() {
        assert_eq!(words(15, 0), "quinze reais");
        assert_eq!(words(11, 0), "onze reais");
        assert_eq!(words(19, 0), "dezenove reais");
        assert_eq!(words(315, 0), "trezentos e quinze reais");
        assert!(!words(15, 0).contains("dez e"));
    }

    #[test]
    fn test_tens_and_units_conjunction() {
        assert_eq!(words(20, 0), "vinte reais");
        assert_eq!(words(21, 0), "vinte e um reais");
        assert_eq!(words(305, 0), "trezentos e cinco reais");
        assert_eq!(words(999, 0), "novecentos e noventa e nove reais");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(words(1000, 0), "mil reais");
        assert_eq!(words(1001, 0), "mil e um reais");
        assert_eq!(words(1100, 0), "mil e cem reais");
        assert_eq!(words(1234, 0), "mil duzentos e trinta e quatro reais");
        assert_eq!(words(2000, 0), "dois mil reais");
        assert_eq!(words(15_300, 0), "quinze mil e trezentos reais");
        assert_eq!(
            words(999_999, 0),
            "novecentos e noventa e nove mil novecentos e noventa e nove reais"
        );
    }

    #[test]
    fn test_group_joining_differs_from_web_app_wording() {
        assert_ne!(words(1234, 0), "mil e duzentos e trinta e quatro reais");
        assert_ne!(words(1_000_000, 0), "um milhão reais");
        assert_eq!(words(1_234, 0), "mil duzentos e trinta e quatro reais");
    }

    #[test]
    fn test_millions() {
        assert_eq!(words(1_000_000, 0), "um milhão de reais");
        assert_eq!(words(2_000_000, 0), "dois milhões de reais");
        assert_eq!(words(1_000_001, 0), "um milhão e um reais");
        assert_eq!(words(1_001_000, 0), "um milhão e mil reais");
        assert_eq!(words(2_500_000, 0), "dois milhões e quinhentos mil reais");
        assert_eq!(
            words(1_200_300, 0),
            "um milhão duzentos mil e trezentos reais"
        );
    }

    #[test]
    fn test_billions() {
        assert_eq!(words(1_000_000_000, 0), "um bilhão de reais");
        assert_eq!(words(3_000_000_005, 0), "três bilhões e cinco reais");
    }

    #[test]
    fn test_cents_clause() {
        assert_eq!(
            words(1500, 50),
            "mil e quinhentos reais e cinquenta centavos"
        );
        assert_eq!(words(2, 99), "dois reais e noventa e nove centavos");
        assert_eq!(words(0, 50), "cinquenta centavos");
        assert_eq!(words(10, 0), "dez reais");
        assert!(!words(1500, 0).contains("centavo"));
    }

    #[test]
    fn test_number_in_words_direct() {
        assert_eq!(number_in_words(0), "zero");
        assert_eq!(number_in_words(100), "cem");
        assert_eq!(number_in_words(1_000_100), "um milhão e cem");
    }
}
