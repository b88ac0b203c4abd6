//! Inner-payload construction.
//!
//! Both key classes sign a 7-byte little-endian payload. Server keys carry
//! a 39-bit numeric ID pulled out of the product identifier; pack keys carry
//! a 56-bit bit-field packing channel, quantity, two fixed protocol tags and
//! a version code.

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Serialize};

/// Length of the signed inner payload.
pub const INNER_PAYLOAD_LEN: usize = 7;

/// Bit width of the numeric ID embedded in server-class payloads.
pub const SERVER_ID_BITS: u32 = 39;

/// Inclusive upper bound on the pack license quantity.
pub const MAX_QUANTITY: u32 = 9999;

// Fixed tags baked into every pack payload.
const PACK_TYPE_TAG: u128 = 2;
const PACK_SUB_TAG: u128 = 144;

/// Extracts the numeric ID from a product identifier.
///
/// Reads the character ranges [10, 16) and [18, 23), concatenates them,
/// drops anything from the first hyphen on, and parses the rest as decimal.
/// For the supported identifier shapes the hyphen split discards the
/// non-numeric tail that range [10, 16) picks up on retail identifiers.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidIdentifier`] if the identifier is shorter
/// than 23 characters or the numeric segment does not parse.
pub fn extract_numeric_id(identifier: &str) -> LicenseResult<u64> {
    let first = identifier.get(10..16);
    let second = identifier.get(18..23);
    let (first, second) = match (first, second) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return Err(LicenseError::InvalidIdentifier(
                "identifier must be at least 23 characters".to_string(),
            ))
        }
    };

    let combined = format!("{first}{second}");
    let numeric = combined.split('-').next().unwrap_or("");
    numeric.parse::<u64>().map_err(|_| {
        LicenseError::InvalidIdentifier(format!("numeric segment {numeric:?} does not parse"))
    })
}

/// Builds the 7-byte server-class payload for a numeric ID.
///
/// IDs extracted from well-formed identifiers are at most 11 decimal digits,
/// comfortably inside the 39-bit field, so this cannot truncate.
pub fn build_server_payload(id: u64) -> [u8; INNER_PAYLOAD_LEN] {
    let bytes = id.to_le_bytes();
    let mut payload = [0u8; INNER_PAYLOAD_LEN];
    payload.copy_from_slice(&bytes[..INNER_PAYLOAD_LEN]);
    payload
}

/// Metadata carried by a pack-class key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackParams {
    /// Channel ID selecting the license program.
    pub channel_id: u32,
    /// Number of licenses in the pack (1..=9999).
    pub quantity: u32,
    /// Major product version.
    pub major_version: u32,
    /// Minor product version.
    pub minor_version: u32,
}

impl PackParams {
    /// Returns the packed version code.
    ///
    /// Versions up to and including 5.0 share the legacy code 1; anything
    /// newer packs major and minor into a single field.
    pub fn version_code(&self) -> u32 {
        if (self.major_version == 5 && self.minor_version > 0) || self.major_version > 5 {
            (self.major_version << 3) | self.minor_version
        } else {
            1
        }
    }

    /// Packs the metadata into the 7-byte inner payload:
    /// `channel<<46 | quantity<<32 | 2<<18 | 144<<10 | version<<3`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidPackParams`] if the quantity is out of
    /// bounds or the packed field overflows 56 bits.
    pub fn build_payload(&self) -> LicenseResult<[u8; INNER_PAYLOAD_LEN]> {
        if self.quantity < 1 || self.quantity > MAX_QUANTITY {
            return Err(LicenseError::InvalidPackParams(format!(
                "quantity {} outside 1..={MAX_QUANTITY}",
                self.quantity
            )));
        }

        let packed: u128 = (u128::from(self.channel_id) << 46)
            | (u128::from(self.quantity) << 32)
            | (PACK_TYPE_TAG << 18)
            | (PACK_SUB_TAG << 10)
            | (u128::from(self.version_code()) << 3);

        if packed >> (INNER_PAYLOAD_LEN as u32 * 8) != 0 {
            return Err(LicenseError::InvalidPackParams(
                "packed metadata does not fit 7 bytes".to_string(),
            ));
        }

        let bytes = packed.to_le_bytes();
        let mut payload = [0u8; INNER_PAYLOAD_LEN];
        payload.copy_from_slice(&bytes[..INNER_PAYLOAD_LEN]);
        Ok(payload)
    }
}
