//! Arithmetic and cipher primitives for the tskey licensing protocol.
//!
//! This crate holds the pieces with no licensing semantics of their own:
//! - Fixed-width little-endian integer packing with the protocol's silent
//!   truncation contract
//! - The RC4 stream cipher used as an obfuscation layer
//! - Short Weierstrass curve arithmetic over arbitrary-precision integers
//! - Unbiased scalar sampling from the system CSPRNG
//!
//! The licensing protocol itself lives in `tskey-license`.

mod bytes;
mod curve;
mod error;
mod rc4;
mod sample;

pub use bytes::{from_bytes_le, to_bytes_le};
pub use curve::{Curve, Point};
pub use error::{CryptoError, CryptoResult};
pub use rc4::rc4_apply;
pub use sample::sample_scalar;
