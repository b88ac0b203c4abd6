//! Fixed-width little-endian integer packing.
//!
//! The key protocol packs every integer field little-endian at a fixed
//! width, and relies on silent truncation when a value does not fit: the
//! high-order bytes are dropped, not rejected. Several pipeline steps
//! (the 48-byte curve coordinates, the 21st payload byte) depend on that
//! truncation, so it is part of the codec contract here.

use num_bigint::BigUint;

/// Encodes a non-negative integer as little-endian bytes.
///
/// With `width` given, the result is exactly `width` bytes: shorter values
/// are zero-padded on the high end, longer values are truncated to the low
/// `width` bytes. With `width` omitted, the minimal encoding is returned
/// (at least one byte, so zero encodes as `[0]`).
pub fn to_bytes_le(n: &BigUint, width: Option<usize>) -> Vec<u8> {
    let mut bytes = n.to_bytes_le();
    match width {
        None => bytes,
        Some(w) => {
            bytes.resize(w, 0);
            bytes
        }
    }
}

/// Decodes a little-endian byte sequence to a non-negative integer.
///
/// Empty input decodes to zero.
pub fn from_bytes_le(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}
