//! Uniform scalar sampling from the system CSPRNG.

use crate::error::{CryptoError, CryptoResult};
use num_bigint::BigUint;
use num_traits::One;
use rand::RngCore;

/// Ceiling on rejection-sampling redraws.
///
/// Each draw is masked to the bit length of the range, so it is accepted
/// with probability above 1/2; the ceiling is unreachable in practice.
const MAX_REDRAWS: usize = 100;

/// Draws a uniform scalar from `[1, upper)` using `OsRng`.
///
/// Draws the minimal number of random bytes covering `upper − 1`, masks to
/// its bit length, and redraws until the value falls inside the range.
///
/// # Errors
///
/// Returns [`CryptoError::SamplingExhausted`] if the redraw ceiling is hit.
pub fn sample_scalar(upper: &BigUint) -> CryptoResult<BigUint> {
    debug_assert!(upper > &BigUint::one());

    let range = upper - BigUint::one();
    let bits = range.bits();
    let num_bytes = ((bits + 7) / 8) as usize;
    let mask = (BigUint::one() << bits) - BigUint::one();

    let mut buf = vec![0u8; num_bytes];
    for _ in 0..MAX_REDRAWS {
        rand::rngs::OsRng.fill_bytes(&mut buf);
        let candidate = (BigUint::from_bytes_be(&buf) & &mask) + BigUint::one();
        if &candidate < upper {
            return Ok(candidate);
        }
    }
    Err(CryptoError::SamplingExhausted(MAX_REDRAWS))
}
