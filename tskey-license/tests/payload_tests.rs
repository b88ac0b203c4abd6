use pretty_assertions::assert_eq;
use tskey_license::{
    build_server_payload, extract_numeric_id, LicenseError, PackParams, INNER_PAYLOAD_LEN,
    MAX_QUANTITY,
};

// ── extract_numeric_id ───────────────────────────────────────────

#[test]
fn retail_identifier_stops_at_hyphen() {
    // [10,16) = "0-1234", [18,23) = "AB123"; the split keeps "0".
    assert_eq!(extract_numeric_id("12345-67890-12345-AB123").unwrap(), 0);
}

#[test]
fn oem_identifier_concatenates_both_ranges() {
    // [10,16) = "123456", [18,23) = "12345".
    assert_eq!(
        extract_numeric_id("12345-OEM-1234567-12345").unwrap(),
        12_345_612_345
    );
}

#[test]
fn volume_identifier_concatenates_both_ranges() {
    assert_eq!(
        extract_numeric_id("12345-678-1234567-12345").unwrap(),
        12_345_612_345
    );
}

#[test]
fn short_identifier_is_rejected() {
    assert!(matches!(
        extract_numeric_id("12345-67890"),
        Err(LicenseError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        extract_numeric_id(""),
        Err(LicenseError::InvalidIdentifier(_))
    ));
}

#[test]
fn non_numeric_segment_is_rejected() {
    // 23 characters, but [10,16) lands on letters.
    assert!(matches!(
        extract_numeric_id("ABCDEFGHIJKLMNOPQRSTUVW"),
        Err(LicenseError::InvalidIdentifier(_))
    ));
}

#[test]
fn multibyte_identifier_is_rejected_not_panicked() {
    // 23 three-byte characters; the ranges fall off char boundaries.
    let identifier: String = std::iter::repeat('日').take(23).collect();
    assert!(extract_numeric_id(&identifier).is_err());
}

// ── build_server_payload ─────────────────────────────────────────

#[test]
fn server_payload_is_little_endian() {
    assert_eq!(build_server_payload(0x0102), [0x02, 0x01, 0, 0, 0, 0, 0]);
}

#[test]
fn server_payload_is_seven_bytes() {
    assert_eq!(build_server_payload(u64::from(u32::MAX)).len(), INNER_PAYLOAD_LEN);
}

// ── PackParams ───────────────────────────────────────────────────

fn params(channel_id: u32, quantity: u32, major: u32, minor: u32) -> PackParams {
    PackParams {
        channel_id,
        quantity,
        major_version: major,
        minor_version: minor,
    }
}

#[test]
fn version_code_is_legacy_below_5_1() {
    assert_eq!(params(1, 1, 5, 0).version_code(), 1);
    assert_eq!(params(1, 1, 4, 9).version_code(), 1);
    assert_eq!(params(1, 1, 0, 0).version_code(), 1);
}

#[test]
fn version_code_packs_major_and_minor_above_5_0() {
    assert_eq!(params(1, 1, 5, 2).version_code(), 42);
    assert_eq!(params(1, 1, 6, 0).version_code(), 48);
    assert_eq!(params(1, 1, 10, 3).version_code(), 83);
}

#[test]
fn pack_payload_reference_packing() {
    // channel 1, quantity 5, version 5.0:
    // 1<<46 | 5<<32 | 2<<18 | 144<<10 | 1<<3, little-endian.
    let payload = params(1, 5, 5, 0).build_payload().unwrap();
    assert_eq!(payload, [8, 64, 10, 0, 5, 64, 0]);
}

#[test]
fn quantity_bounds_are_enforced() {
    assert!(matches!(
        params(1, 0, 5, 0).build_payload(),
        Err(LicenseError::InvalidPackParams(_))
    ));
    assert!(matches!(
        params(1, MAX_QUANTITY + 1, 5, 0).build_payload(),
        Err(LicenseError::InvalidPackParams(_))
    ));
    assert!(params(1, 1, 5, 0).build_payload().is_ok());
    assert!(params(1, MAX_QUANTITY, 5, 0).build_payload().is_ok());
}

#[test]
fn oversized_channel_overflows_the_field() {
    // channel<<46 must stay inside 56 bits, so channel is 10 bits wide.
    assert!(params(1 << 10, 1, 5, 0).build_payload().is_err());
    assert!(params((1 << 10) - 1, 1, 5, 0).build_payload().is_ok());
}

#[test]
fn pack_params_serde_roundtrip() {
    let p = params(29, 100, 10, 2);
    let json = serde_json::to_string(&p).unwrap();
    let restored: PackParams = serde_json::from_str(&json).unwrap();
    assert_eq!(p, restored);
}
