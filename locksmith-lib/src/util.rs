//! Shared encoding utilities.

use crate::oid;
use base64::Engine;

/// Format bytes as colon-separated uppercase hex (e.g., "AB:CD:EF").
pub fn hex_colon_upper(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// Format bytes as an unsigned big-endian number in uppercase hex, split into
/// space-separated groups of four digits counted from the most significant
/// end (e.g., `[0x01, 0x23, 0x45]` renders as "1234 5").
///
/// Leading zero digits are dropped; an all-zero or empty input renders "0".
pub fn hex_grouped(bytes: &[u8]) -> String {
    let hex = hex::encode_upper(bytes);
    let digits = hex.trim_start_matches('0');
    if digits.is_empty() {
        return "0".into();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Render each octet as an unsigned decimal, joined by dots ("192.168.0.1").
pub fn dotted_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Encode bytes as base64 with PEM-style 64-character line wrapping.
pub fn base64_wrap(data: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    encoded
        .as_bytes()
        .chunks(64)
        .filter_map(|c| std::str::from_utf8(c).ok())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap DER bytes in a `CERTIFICATE` PEM envelope.
pub fn der_to_pem(der: &[u8]) -> String {
    format!(
        "-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----\n",
        base64_wrap(der)
    )
}

/// Whether the input looks like PEM (starts with `-----BEGIN` after whitespace).
pub fn is_pem(input: &[u8]) -> bool {
    let start = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(input.len());
    input
        .get(start..)
        .is_some_and(|rest| rest.starts_with(b"-----BEGIN"))
}

/// Short attribute name for a distinguished-name OID ("CN", "O", ...).
pub fn oid_short_name(oid_str: &str) -> String {
    match oid_str {
        oid::COMMON_NAME => "CN",
        oid::SURNAME => "SN",
        oid::SERIAL_NUMBER => "serialNumber",
        oid::COUNTRY => "C",
        oid::LOCALITY => "L",
        oid::STATE_OR_PROVINCE => "ST",
        oid::STREET_ADDRESS => "street",
        oid::ORGANIZATION => "O",
        oid::ORGANIZATIONAL_UNIT => "OU",
        oid::TITLE => "title",
        oid::POSTAL_CODE => "postalCode",
        oid::GIVEN_NAME => "GN",
        oid::EMAIL_ADDRESS => "emailAddress",
        oid::DOMAIN_COMPONENT => "DC",
        oid::USER_ID => "UID",
        other => return other.to_string(),
    }
    .to_string()
}
