//! Channel catalog and identifier-format advisory checks.
//!
//! Pack keys are issued against a channel/version combination. The catalog
//! lists the known combinations; the selector string format is
//! `CHID_MAJOR_MINOR`, e.g. `029_10_2`.

use crate::error::{LicenseError, LicenseResult};
use crate::payload::PackParams;
use serde::{Deserialize, Serialize};

/// Known channel/version combinations and their descriptions.
pub const KNOWN_CHANNELS: &[(&str, &str)] = &[
    ("001_5_0", "Windows 2000 Per Device"),
    ("002_5_0", "Windows 2000 Internet Connector"),
    ("003_5_2", "Windows Server 2003 Per User"),
    ("004_5_2", "Windows Server 2003 Per Device"),
    ("005_6_0", "Windows Server 2008 (R2) Per Device"),
    ("006_6_0", "Windows Server 2008 (R2) Per User"),
    ("009_6_0", "Windows Server 2008 (R2) VDI Standard"),
    ("010_6_0", "Windows Server 2008 (R2) VDI Premium"),
    ("016_6_0", "Windows Server 2008 (R2) VDI Suite"),
    ("011_6_2", "Windows Server 2012 (R2) Per Device"),
    ("012_6_2", "Windows Server 2012 (R2) Per User"),
    ("015_6_2", "Windows Server 2012 (R2) VDI Suite"),
    ("020_10_0", "Windows Server 2016 Per Device"),
    ("021_10_0", "Windows Server 2016 Per User"),
    ("022_10_0", "Windows Server 2016 VDI Suite"),
    ("026_10_1", "Windows Server 2019 Per Device"),
    ("027_10_1", "Windows Server 2019 Per User"),
    ("028_10_1", "Windows Server 2019 VDI Suite"),
    ("029_10_2", "Windows Server 2022 Per Device"),
    ("030_10_2", "Windows Server 2022 Per User"),
    ("031_10_2", "Windows Server 2022 VDI Suite"),
    ("032_10_3", "Windows Server 2025 Per Device"),
    ("033_10_3", "Windows Server 2025 Per User"),
    ("034_10_3", "Windows Server 2025 VDI Suite"),
];

/// A parsed `CHID_MAJOR_MINOR` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSelector {
    /// Channel ID.
    pub channel_id: u32,
    /// Major product version.
    pub major_version: u32,
    /// Minor product version.
    pub minor_version: u32,
}

impl ChannelSelector {
    /// Parses a selector string such as `029_10_2`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidChannelSelector`] unless the string is
    /// three underscore-separated decimal fields.
    pub fn parse(selector: &str) -> LicenseResult<Self> {
        let parts: Vec<&str> = selector.split('_').collect();
        if parts.len() != 3 {
            return Err(LicenseError::InvalidChannelSelector(
                "expected CHID_MAJOR_MINOR".to_string(),
            ));
        }

        let field = |s: &str| {
            s.parse::<u32>().map_err(|_| {
                LicenseError::InvalidChannelSelector(format!("non-numeric field {s:?}"))
            })
        };
        Ok(Self {
            channel_id: field(parts[0])?,
            major_version: field(parts[1])?,
            minor_version: field(parts[2])?,
        })
    }

    /// Returns the catalog description for this combination, if known.
    pub fn description(&self) -> Option<&'static str> {
        let code = format!(
            "{:03}_{}_{}",
            self.channel_id, self.major_version, self.minor_version
        );
        KNOWN_CHANNELS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, desc)| *desc)
    }

    /// Combines the selector with a quantity into pack parameters.
    pub fn with_quantity(&self, quantity: u32) -> PackParams {
        PackParams {
            channel_id: self.channel_id,
            quantity,
            major_version: self.major_version,
            minor_version: self.minor_version,
        }
    }
}

/// Reports whether an identifier matches one of the known shapes:
/// `NNNNN-NNNNN-NNNNN-AANNN`, `NNNNN-OEM-NNNNNNN-NNNNN` or
/// `NNNNN-NNN-NNNNNNN-NNNNN`.
///
/// A mismatch is advisory only; key generation proceeds regardless.
pub fn identifier_matches_known_format(identifier: &str) -> bool {
    let parts: Vec<&str> = identifier.split('-').collect();
    if parts.len() != 4 {
        return false;
    }

    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(parts[0], 5) {
        return false;
    }

    // NNNNN-NNNNN-NNNNN-AANNN
    let retail = digits(parts[1], 5)
        && digits(parts[2], 5)
        && parts[3].len() == 5
        && parts[3].bytes().take(2).all(|b| b.is_ascii_alphabetic())
        && parts[3].bytes().skip(2).all(|b| b.is_ascii_digit());

    // NNNNN-OEM-NNNNNNN-NNNNN
    let oem = parts[1].eq_ignore_ascii_case("OEM") && digits(parts[2], 7) && digits(parts[3], 5);

    // NNNNN-NNN-NNNNNNN-NNNNN
    let volume = digits(parts[1], 3) && digits(parts[2], 7) && digits(parts[3], 5);

    retail || oem || volume
}
