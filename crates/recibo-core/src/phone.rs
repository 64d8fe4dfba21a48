//! # Phone Mask
//!
//! Incremental display mask for Brazilian phone numbers, applied while the
//! customer's number is typed.
//!
//! ```text
//! 8          → (8
//! 873862     → (87) 3862
//! 8738620240 → (87) 3862-0240     landline, 10 digits
//! 87988775727→ (87) 98877-5727    mobile, 11 digits
//! ```

/// Maximum digits kept: two for the area code plus nine for a mobile.
pub const MAX_PHONE_DIGITS: usize = 11;

/// A landline: two for the area code plus eight.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Formats whatever digits are present. Extra digits are dropped and the
/// result is idempotent.
///
/// ```rust
/// use recibo_core::phone::format_phone;
///
/// assert_eq!(format_phone("87988775727"), "(87) 98877-5727");
/// assert_eq!(format_phone("(87) 3862-0240"), "(87) 3862-0240");
/// ```
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_PHONE_DIGITS)
        .collect();

    if digits.is_empty() {
        return String::new();
    }
    if digits.len() <= 2 {
        return format!("({}", digits);
    }

    let (area, rest) = digits.split_at(2);
    if rest.len() <= 4 {
        return format!("({}) {}", area, rest);
    }

    // Landlines split 4-4; an 11th digit means a 9-prefixed mobile, 5-4.
    let split = if digits.len() == MAX_PHONE_DIGITS { 5 } else { 4 };
    let (head, tail) = rest.split_at(split);
    format!("({}) {}-{}", area, head, tail)
}

/// Number of digits in a phone string, ignoring the mask.
pub fn phone_digit_count(raw: &str) -> usize {
    raw.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Whether `raw` holds a full landline or mobile number.
pub fn is_complete_phone(raw: &str) -> bool {
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&phone_digit_count(raw))
}
