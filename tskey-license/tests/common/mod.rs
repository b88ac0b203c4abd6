//! Shared test helpers for license tests.

#![allow(dead_code)]

use tskey_license::LicenseScheme;

/// Retail-shaped identifier. Its numeric ID is 0: range [10,16) picks up
/// "0-1234" and the hyphen split keeps only the leading "0".
pub const RETAIL_PID: &str = "12345-67890-12345-AB123";

/// OEM-shaped identifier with numeric ID 12345612345.
pub const OEM_PID: &str = "12345-OEM-1234567-12345";

/// Known-good server-class key for [`RETAIL_PID`], generated with a
/// reference implementation of the protocol.
pub const RETAIL_SERVER_KEY: &str = "XMPTM-BT4CF-GKWBV-X2HYM-CFHJ7-7JC8J-R6GBR";

/// Known-good server-class key for [`OEM_PID`].
pub const OEM_SERVER_KEY: &str = "RHCWQ-FRQ9Y-2TYTF-QHQQY-WTP2D-CJYPM-XWB4K";

/// Known-good pack-class key for [`RETAIL_PID`] with channel 1, quantity 5,
/// version 5.0.
pub const RETAIL_PACK_KEY: &str = "TGB46-QBVJ8-GM7D2-7B8JV-MGRH3-FPJGV-DHCMF";

/// Loads the scheme; curve constants are fixed, so this cannot fail.
pub fn scheme() -> LicenseScheme {
    LicenseScheme::load().expect("curve constants validate")
}
