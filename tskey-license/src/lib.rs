//! License-key issuance and verification for tskey.
//!
//! This crate implements a two-class product-key scheme:
//! - **Server** keys bind a Schnorr-style signature to a numeric ID derived
//!   from the product identifier
//! - **Pack** keys bind the signature to packed channel/quantity/version
//!   metadata
//!
//! # Key Format
//!
//! Keys are 35 base-24 characters over the alphabet
//! `BCDFGHJKMPQRTVWXY2346789`, grouped as seven hyphen-separated blocks of
//! five. The encoded integer is the RC4-obfuscated signed payload, keyed by
//! an MD5 digest of the identifier.
//!
//! # Example
//!
//! ```no_run
//! use tskey_license::{KeyClass, LicenseScheme};
//!
//! # fn main() -> Result<(), tskey_license::LicenseError> {
//! let scheme = LicenseScheme::load()?;
//! let key = scheme.generate_server_key("12345-OEM-1234567-12345")?;
//! assert!(scheme.validate("12345-OEM-1234567-12345", key.as_str(), KeyClass::Server));
//! # Ok(())
//! # }
//! ```

mod channel;
mod curves;
mod error;
mod keystring;
mod payload;
mod protocol;

pub use channel::{identifier_matches_known_format, ChannelSelector, KNOWN_CHANNELS};
pub use curves::{CurveConfig, KeyClass};
pub use error::{LicenseError, LicenseResult};
pub use keystring::{decode_key, encode_key, GROUP_LEN, KEY_ALPHABET, KEY_DIGITS};
pub use payload::{
    build_server_payload, extract_numeric_id, PackParams, INNER_PAYLOAD_LEN, MAX_QUANTITY,
    SERVER_ID_BITS,
};
pub use protocol::{LicenseScheme, ProductKey, ATTEMPT_CEILING};
