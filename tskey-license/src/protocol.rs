//! Schnorr-style sign/verify engine over the configured curves.
//!
//! Generation signs the 7-byte inner payload, packs the signature into 14
//! little-endian bytes, RC4-obfuscates the 21-byte blob under an
//! identifier-derived key, and renders the low 160 bits as a base-24 key
//! string. Every width in the pipeline is protocol-fixed: the 48-byte
//! coordinate serialization and the 20-of-21-byte payload cut both truncate
//! silently, and validation reconstructs the dropped byte as zero.
//!
//! Generation retries with fresh randomness until an attempt survives both
//! the 69-bit response mask and a full validation pass, up to a fixed
//! ceiling.

use crate::curves::{CurveConfig, KeyClass};
use crate::error::{LicenseError, LicenseResult};
use crate::keystring::{decode_key, encode_key};
use crate::payload::{
    build_server_payload, extract_numeric_id, PackParams, INNER_PAYLOAD_LEN, SERVER_ID_BITS,
};
use md5::Md5;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::{debug, warn};
use tskey_crypto::{from_bytes_le, rc4_apply, sample_scalar, to_bytes_le};

/// Ceiling on signature attempts per generated key.
pub const ATTEMPT_CEILING: usize = 1000;

/// Serialized width of each affine coordinate fed to the challenge digest.
/// Narrower than the curve moduli; the high byte is dropped by design.
const COORD_LEN: usize = 48;

/// Serialized signature width: h in the low 35 bits, s in the next 69.
const SIGDATA_LEN: usize = 14;

/// Inner payload plus signature.
const SIGNED_PAYLOAD_LEN: usize = INNER_PAYLOAD_LEN + SIGDATA_LEN;

/// RC4 key width: 5 digest bytes followed by 11 zero bytes.
const OBFUSCATION_KEY_LEN: usize = 16;

const H_BITS: u32 = 35;
const S_BITS: u32 = 69;

/// A generated, formatted product key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductKey {
    key: String,
    class: KeyClass,
}

impl ProductKey {
    /// Returns the formatted key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Returns the key class this key was issued under.
    #[must_use]
    pub fn class(&self) -> KeyClass {
        self.class
    }
}

impl std::fmt::Display for ProductKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}

/// The licensing scheme with both curve classes loaded and validated.
///
/// Construction fails if either parameter set fails its on-curve checks;
/// nothing can be generated or validated past that point. All methods take
/// `&self` and share no mutable state.
#[derive(Clone, Debug)]
pub struct LicenseScheme {
    server: CurveConfig,
    pack: CurveConfig,
}

/// Progress of one bounded generation run.
enum AttemptState {
    Idle,
    Attempting { attempt: usize },
    Accepted { key: String },
    Exhausted,
}

/// Result of a single signature attempt.
enum AttemptOutcome {
    Accepted(String),
    Rejected(&'static str),
}

impl LicenseScheme {
    /// Loads both curve configurations.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::CurveInitialization`] if either class fails
    /// validation.
    pub fn load() -> LicenseResult<Self> {
        Ok(Self {
            server: CurveConfig::load(KeyClass::Server)?,
            pack: CurveConfig::load(KeyClass::Pack)?,
        })
    }

    /// Generates a server-class key bound to the identifier's numeric ID.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidIdentifier`] for a malformed
    /// identifier and [`LicenseError::GenerationExhausted`] if no attempt is
    /// accepted within the ceiling.
    pub fn generate_server_key(&self, identifier: &str) -> LicenseResult<ProductKey> {
        let identifier = identifier.trim();
        let id = extract_numeric_id(identifier)?;
        self.generate(identifier, build_server_payload(id), KeyClass::Server)
    }

    /// Generates a pack-class key carrying the given metadata.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidPackParams`] for out-of-range metadata
    /// and [`LicenseError::GenerationExhausted`] if no attempt is accepted
    /// within the ceiling.
    pub fn generate_pack_key(
        &self,
        identifier: &str,
        params: &PackParams,
    ) -> LicenseResult<ProductKey> {
        let identifier = identifier.trim();
        self.generate(identifier, params.build_payload()?, KeyClass::Pack)
    }

    /// Checks whether `key` is an authentic key for `identifier` under the
    /// given class.
    ///
    /// An invalid key is an expected outcome, so every failure — bad
    /// format, signature mismatch, identifier mismatch — maps to `false`.
    #[must_use]
    pub fn validate(&self, identifier: &str, key: &str, class: KeyClass) -> bool {
        let identifier = identifier.trim();
        let packed = match decode_key(key) {
            Ok(n) => n,
            Err(e) => {
                debug!(%e, "key string rejected");
                return false;
            }
        };

        // Reconstruct the 21-byte blob; the top byte is zero by
        // construction since only 20 bytes went into the key.
        let obfuscated = to_bytes_le(&packed, Some(SIGNED_PAYLOAD_LEN));
        let plain = rc4_apply(&obfuscation_key(identifier), &obfuscated);
        if plain.len() < SIGNED_PAYLOAD_LEN {
            return false;
        }

        let inner = &plain[..INNER_PAYLOAD_LEN];
        let sigdata = from_bytes_le(&plain[INNER_PAYLOAD_LEN..SIGNED_PAYLOAD_LEN]);

        let h = &sigdata & &bit_mask(H_BITS);
        let s = (&sigdata >> H_BITS) & bit_mask(S_BITS);

        let config = self.config(class);
        let curve = config.curve();

        // R' = h·K + s·G; equals the signing nonce point when the signature
        // is genuine, because s = c − priv·h (mod n) and K = priv·G.
        let recovered = curve.add(
            &curve.mul(config.public(), &h),
            &curve.mul(config.generator(), &s),
        );
        let (rx, ry) = match recovered.coordinates() {
            Ok(coords) => coords,
            Err(_) => return false,
        };

        let expected = challenge(inner, rx, ry);
        if h != BigUint::from(expected) {
            return false;
        }

        match class {
            KeyClass::Server => {
                let id_from_key = from_bytes_le(inner) & bit_mask(SERVER_ID_BITS);
                match extract_numeric_id(identifier) {
                    Ok(id) => id_from_key == BigUint::from(id),
                    Err(_) => false,
                }
            }
            KeyClass::Pack => true,
        }
    }

    /// Runs the bounded attempt loop for one key.
    fn generate(
        &self,
        identifier: &str,
        inner: [u8; INNER_PAYLOAD_LEN],
        class: KeyClass,
    ) -> LicenseResult<ProductKey> {
        if !crate::channel::identifier_matches_known_format(identifier) {
            warn!(identifier, "identifier does not match a known format, proceeding anyway");
        }

        let obfuscation_key = obfuscation_key(identifier);
        let key = run_attempts(ATTEMPT_CEILING, |attempt| {
            let outcome = self.attempt_signature(identifier, &inner, class, &obfuscation_key);
            if let AttemptOutcome::Rejected(reason) = &outcome {
                debug!(attempt, reason, "signature attempt rejected");
            }
            outcome
        })?;

        Ok(ProductKey { key, class })
    }

    /// One signature attempt: fresh nonce through to post-hoc validation.
    fn attempt_signature(
        &self,
        identifier: &str,
        inner: &[u8; INNER_PAYLOAD_LEN],
        class: KeyClass,
        obfuscation_key: &[u8; OBFUSCATION_KEY_LEN],
    ) -> AttemptOutcome {
        let config = self.config(class);
        let curve = config.curve();
        let order = curve.order();

        let nonce = match sample_scalar(order) {
            Ok(nonce) => nonce,
            Err(_) => return AttemptOutcome::Rejected("nonce sampling failed"),
        };

        let nonce_point = curve.mul(config.generator(), &nonce);
        let (rx, ry) = match nonce_point.coordinates() {
            Ok(coords) => coords,
            Err(_) => return AttemptOutcome::Rejected("nonce point at infinity"),
        };

        let h = challenge(inner, rx, ry);

        // s = (c − priv·h) mod n
        let offset = (config.private_scalar() * BigUint::from(h)) % order;
        let s = (nonce + order - offset) % order;

        // The response must already fit 69 bits, and the all-ones value is
        // also rejected.
        let s_mask = bit_mask(S_BITS);
        let s_masked = &s & &s_mask;
        if s_masked != s || s_masked >= s_mask {
            return AttemptOutcome::Rejected("response outside 69-bit field");
        }

        let sigdata = (s_masked << H_BITS) | (BigUint::from(h) & bit_mask(H_BITS));

        let mut signed = Vec::with_capacity(SIGNED_PAYLOAD_LEN);
        signed.extend_from_slice(inner);
        signed.extend_from_slice(&to_bytes_le(&sigdata, Some(SIGDATA_LEN)));

        let obfuscated = rc4_apply(obfuscation_key, &signed);

        // Only the low 160 bits make it into the key.
        let packed = from_bytes_le(&obfuscated[..SIGNED_PAYLOAD_LEN - 1]);
        let key = encode_key(&packed);

        if self.validate(identifier, &key, class) {
            AttemptOutcome::Accepted(key)
        } else {
            warn!(%key, "generated key failed its own validation, retrying");
            AttemptOutcome::Rejected("post-hoc validation failed")
        }
    }

    fn config(&self, class: KeyClass) -> &CurveConfig {
        match class {
            KeyClass::Server => &self.server,
            KeyClass::Pack => &self.pack,
        }
    }
}

/// Drives the `Idle → Attempting → {Accepted, Exhausted}` machine.
fn run_attempts<F>(ceiling: usize, mut attempt_fn: F) -> LicenseResult<String>
where
    F: FnMut(usize) -> AttemptOutcome,
{
    let mut state = AttemptState::Idle;
    loop {
        state = match state {
            AttemptState::Idle => AttemptState::Attempting { attempt: 1 },
            AttemptState::Attempting { attempt } => match attempt_fn(attempt) {
                AttemptOutcome::Accepted(key) => AttemptState::Accepted { key },
                AttemptOutcome::Rejected(_) if attempt >= ceiling => AttemptState::Exhausted,
                AttemptOutcome::Rejected(_) => AttemptState::Attempting {
                    attempt: attempt + 1,
                },
            },
            AttemptState::Accepted { key } => return Ok(key),
            AttemptState::Exhausted => return Err(LicenseError::GenerationExhausted(ceiling)),
        };
    }
}

/// Derives the RC4 obfuscation key for an identifier: the first 5 bytes of
/// MD5 over the identifier's UTF-16LE encoding, zero-extended to 16 bytes.
fn obfuscation_key(identifier: &str) -> [u8; OBFUSCATION_KEY_LEN] {
    let mut utf16le = Vec::with_capacity(identifier.len() * 2);
    for unit in identifier.encode_utf16() {
        utf16le.extend_from_slice(&unit.to_le_bytes());
    }
    let digest = Md5::digest(&utf16le);

    let mut key = [0u8; OBFUSCATION_KEY_LEN];
    key[..5].copy_from_slice(&digest[..5]);
    key
}

/// Folds SHA-1 over `inner ‖ Rx ‖ Ry` into the 35-bit challenge: the low
/// 32 bits come from digest bytes [0,4) little-endian, the top 3 bits from
/// bytes [4,8) little-endian shifted down 29.
fn challenge(inner: &[u8], rx: &BigUint, ry: &BigUint) -> u64 {
    let mut hasher = Sha1::new();
    hasher.update(inner);
    hasher.update(to_bytes_le(rx, Some(COORD_LEN)));
    hasher.update(to_bytes_le(ry, Some(COORD_LEN)));
    let digest = hasher.finalize();

    let low = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let top = u32::from_le_bytes([digest[4], digest[5], digest[6], digest[7]]) >> 29;
    (u64::from(top) << 32) | u64::from(low)
}

fn bit_mask(bits: u32) -> BigUint {
    (BigUint::from(1u32) << bits) - 1u32
}
