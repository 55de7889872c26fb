//! Distinguished names, dates and key summaries shared by the certificate
//! model and the extension decoder.

use crate::asn1::DecodeError;
use crate::util;
use serde::Serialize;
use x509_parser::prelude::*;

/// Distinguished name with ordered components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistinguishedName {
    /// Ordered list of (attribute_type, value) pairs.
    /// Attribute types use short names where known (e.g., "CN", "O", "C").
    pub components: Vec<(String, String)>,
}

impl DistinguishedName {
    /// Build from a parsed X.509 name.
    pub fn from_x509(name: &X509Name) -> Self {
        let mut components = Vec::new();
        for rdn in name.iter() {
            for attr in rdn.iter() {
                let key = util::oid_short_name(&attr.attr_type().to_id_string());
                let value = attr.as_str().unwrap_or("<binary>").to_string();
                components.push((key, value));
            }
        }
        DistinguishedName { components }
    }

    /// Parse a DER-encoded `Name` (a SEQUENCE of RDNs).
    pub fn from_der(der: &[u8]) -> Result<Self, DecodeError> {
        let (rest, name) = X509Name::from_der(der).map_err(|e| DecodeError::InvalidValue {
            what: "directory name",
            detail: e.to_string(),
        })?;
        if !rest.is_empty() {
            return Err(DecodeError::TrailingData {
                remaining: rest.len(),
            });
        }
        Ok(Self::from_x509(&name))
    }

    /// Value of the first component with the given short name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.components
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Format as a comma-separated one-line string matching OpenSSL's default format.
    /// Example: "C = US, O = Org, CN = example.com"
    ///
    /// Values containing commas, equals signs, or backslashes are escaped
    /// to prevent ambiguous output.
    pub fn to_oneline(&self) -> String {
        let mut result = String::new();
        for (i, (k, v)) in self.components.iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            result.push_str(k);
            result.push_str(" = ");
            for ch in v.chars() {
                match ch {
                    '\\' => result.push_str("\\\\"),
                    ',' => result.push_str("\\,"),
                    '=' => result.push_str("\\="),
                    _ => result.push(ch),
                }
            }
        }
        result
    }
}

impl std::fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_oneline())
    }
}

/// Date-time representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTime {
    /// ISO 8601 formatted string.
    pub iso8601: String,
    /// Unix timestamp.
    pub timestamp: i64,
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_abbrev(dt: &::time::OffsetDateTime) -> &'static str {
    MONTHS
        .get(usize::from(u8::from(dt.month())).saturating_sub(1))
        .copied()
        .unwrap_or("???")
}

impl DateTime {
    pub fn from_offset(dt: ::time::OffsetDateTime) -> Self {
        let utc = dt.to_offset(::time::UtcOffset::UTC);
        DateTime {
            iso8601: format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                utc.year(),
                u8::from(utc.month()),
                utc.day(),
                utc.hour(),
                utc.minute(),
                utc.second()
            ),
            timestamp: utc.unix_timestamp(),
        }
    }

    pub fn from_asn1(time: &ASN1Time) -> Self {
        Self::from_offset(time.to_datetime())
    }

    fn utc(&self) -> Option<::time::OffsetDateTime> {
        ::time::OffsetDateTime::from_unix_timestamp(self.timestamp).ok()
    }

    /// Format in OpenSSL's default date style: `Feb  3 23:57:06 2026 GMT`.
    pub fn to_openssl(&self) -> String {
        match self.utc() {
            Some(dt) => format!(
                "{} {:2} {:02}:{:02}:{:02} {} GMT",
                month_abbrev(&dt),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second(),
                dt.year()
            ),
            None => self.iso8601.clone(),
        }
    }

    /// Medium date with long time: `Jan 5, 2011 3:04:05 PM UTC`.
    pub fn to_medium(&self) -> String {
        match self.utc() {
            Some(dt) => {
                let (hour, meridiem) = match dt.hour() {
                    0 => (12, "AM"),
                    h @ 1..=11 => (h, "AM"),
                    12 => (12, "PM"),
                    h => (h - 12, "PM"),
                };
                format!(
                    "{} {}, {} {}:{:02}:{:02} {} UTC",
                    month_abbrev(&dt),
                    dt.day(),
                    dt.year(),
                    hour,
                    dt.minute(),
                    dt.second(),
                    meridiem
                )
            }
            None => self.iso8601.clone(),
        }
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_openssl())
    }
}

/// Public key information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyInfo {
    /// Algorithm name: "RSA", "EC", "Ed25519", etc.
    pub algorithm: String,
    /// Key size in bits (e.g., 2048 for RSA, 256 for P-256).
    pub key_size: Option<usize>,
}

impl PublicKeyInfo {
    pub(crate) fn from_spki(spki: &SubjectPublicKeyInfo) -> Self {
        use crate::oid;
        use x509_parser::public_key::PublicKey;

        let oid_str = spki.algorithm.algorithm.to_id_string();
        let algorithm = match oid_str.as_str() {
            oid::RSA_ENCRYPTION => "RSA".to_string(),
            oid::EC_PUBLIC_KEY => "EC".to_string(),
            oid::DSA => "DSA".to_string(),
            oid::ED25519 => "Ed25519".to_string(),
            oid::ED448 => "Ed448".to_string(),
            _ => oid_str,
        };
        let key_size = match spki.parsed() {
            Ok(PublicKey::RSA(rsa)) => Some(rsa.key_size()),
            Ok(PublicKey::EC(ec)) => Some(ec.key_size()),
            Ok(PublicKey::DSA(y)) => Some(y.len() * 8),
            _ => match algorithm.as_str() {
                "Ed25519" => Some(256),
                "Ed448" => Some(448),
                _ => None,
            },
        };
        PublicKeyInfo {
            algorithm,
            key_size,
        }
    }
}
