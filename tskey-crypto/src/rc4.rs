//! RC4 stream cipher.
//!
//! Used purely as an obfuscation layer over the signed payload; integrity
//! comes from the embedded signature, not from this cipher. Applying the
//! cipher twice under the same key returns the original input.

/// Size of the permutation state.
const STATE_SIZE: usize = 256;

/// Applies the RC4 keystream to `data` under `key`.
///
/// Encryption and decryption are the same operation.
pub fn rc4_apply(key: &[u8], data: &[u8]) -> Vec<u8> {
    debug_assert!(!key.is_empty());

    let mut s = [0u8; STATE_SIZE];
    for (i, b) in s.iter_mut().enumerate() {
        *b = i as u8;
    }

    // Key scheduling
    let mut j = 0usize;
    for i in 0..STATE_SIZE {
        j = (j + s[i] as usize + key[i % key.len()] as usize) % STATE_SIZE;
        s.swap(i, j);
    }

    // Keystream generation
    let mut i = 0usize;
    let mut j = 0usize;
    let mut out = Vec::with_capacity(data.len());
    for &byte in data {
        i = (i + 1) % STATE_SIZE;
        j = (j + s[i] as usize) % STATE_SIZE;
        s.swap(i, j);
        let t = (s[i] as usize + s[j] as usize) % STATE_SIZE;
        out.push(byte ^ s[t]);
    }
    out
}
