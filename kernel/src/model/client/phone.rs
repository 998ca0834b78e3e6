//! Dialing format used for WhatsApp confirmations.

/// Mobile prefix that replaces a national trunk `0`.
pub const COUNTRY_MOBILE_PREFIX: &str = "549";

/// Normalizes a phone number into international dialing digits.
///
/// Non-digits are dropped and a leading trunk `0` is replaced by
/// [`COUNTRY_MOBILE_PREFIX`]; anything else is left as is. Returns `None` when
/// no digits remain.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    match digits.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => Some(format!("{COUNTRY_MOBILE_PREFIX}{rest}")),
        _ => Some(digits),
    }
}
