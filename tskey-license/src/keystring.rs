//! Base-24 key-string codec.
//!
//! Printable keys are 35 base-24 digits drawn from a confusion-resistant
//! alphabet (no 0/O, 1/I, 5/S, etc.), left-padded with the zero symbol and
//! grouped as seven hyphen-separated blocks of five.

use crate::error::{LicenseError, LicenseResult};
use num_bigint::BigUint;

/// The 24-symbol key alphabet. Index is digit value.
pub const KEY_ALPHABET: &str = "BCDFGHJKMPQRTVWXY2346789";

/// Total base-24 digits in a key.
pub const KEY_DIGITS: usize = 35;

/// Digits per hyphen-separated group.
pub const GROUP_LEN: usize = 5;

/// Encodes an integer as a formatted key string.
///
/// The protocol only feeds values below 24^35 in here (the packed payload is
/// 160 bits); larger values would not fit the fixed digit count.
pub fn encode_key(n: &BigUint) -> String {
    let digits = n.to_radix_be(24);
    debug_assert!(digits.len() <= KEY_DIGITS);

    let alphabet = KEY_ALPHABET.as_bytes();
    let mut chars = Vec::with_capacity(KEY_DIGITS);
    chars.resize(KEY_DIGITS.saturating_sub(digits.len()), alphabet[0]);
    chars.extend(digits.iter().map(|&d| alphabet[d as usize]));

    let groups: Vec<&str> = chars
        .chunks(GROUP_LEN)
        // The alphabet is ASCII, so the chunks are valid UTF-8.
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect();
    groups.join("-")
}

/// Decodes a formatted key string back to an integer.
///
/// Hyphens are stripped first; the rest must be a whole number of 5-digit
/// groups over the key alphabet.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidKeyFormat`] on a bad length or an
/// out-of-alphabet character.
pub fn decode_key(key: &str) -> LicenseResult<BigUint> {
    let stripped: String = key.chars().filter(|&c| c != '-').collect();

    if stripped.len() % GROUP_LEN != 0 {
        return Err(LicenseError::InvalidKeyFormat(format!(
            "length {} is not a multiple of {GROUP_LEN}",
            stripped.len()
        )));
    }

    let mut out = BigUint::from(0u32);
    for c in stripped.chars() {
        let value = KEY_ALPHABET
            .find(c)
            .ok_or_else(|| LicenseError::InvalidKeyFormat(format!("illegal character {c:?}")))?;
        out = out * 24u32 + value as u32;
    }
    Ok(out)
}
