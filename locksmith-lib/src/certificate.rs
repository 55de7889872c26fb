//! Parsed X.509 certificates.
//!
//! [`Certificate`] owns its DER encoding and everything the rest of the crate
//! reads from it, so it can be stored in pools and passed between threads
//! without borrowing the input buffer.

use crate::chain::{CertificateId, ChainCertificate};
use crate::fields::{DateTime, DistinguishedName, PublicKeyInfo};
use crate::oid;
use crate::util;
use crate::LocksmithError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use x509_parser::prelude::*;

/// One extension as it appears in the certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawExtension {
    pub oid: String,
    pub critical: bool,
    /// The extnValue contents, without the OCTET STRING wrapper.
    #[serde(with = "hex_bytes")]
    pub value: Vec<u8>,
}

/// A parsed certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
    subject_raw: Vec<u8>,
    issuer_raw: Vec<u8>,
    serial_raw: Vec<u8>,
    spki_der: Vec<u8>,
    id: CertificateId,
    /// X.509 version number (1, 2 or 3).
    pub version: u32,
    /// Colon-separated uppercase hex.
    pub serial: String,
    pub subject: DistinguishedName,
    pub issuer: DistinguishedName,
    pub not_before: DateTime,
    pub not_after: DateTime,
    pub signature_algorithm: String,
    pub public_key: PublicKeyInfo,
    /// Extensions in certificate order.
    pub extensions: Vec<RawExtension>,
}

impl Certificate {
    /// The full DER encoding.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// DER of the SubjectPublicKeyInfo.
    pub fn spki_der(&self) -> &[u8] {
        &self.spki_der
    }

    /// Raw serial number content octets.
    pub fn serial_raw(&self) -> &[u8] {
        &self.serial_raw
    }

    /// SHA-256 over the DER, colon-separated uppercase hex.
    pub fn fingerprint(&self) -> String {
        util::hex_colon_upper(&Sha256::digest(&self.der))
    }

    pub fn extension(&self, oid: &str) -> Option<&RawExtension> {
        self.extensions.iter().find(|e| e.oid == oid)
    }

    /// PEM encoding of the certificate.
    pub fn to_pem(&self) -> String {
        util::der_to_pem(&self.der)
    }
}

impl ChainCertificate for Certificate {
    fn subject_raw(&self) -> &[u8] {
        &self.subject_raw
    }

    fn issuer_raw(&self) -> &[u8] {
        &self.issuer_raw
    }

    fn id(&self) -> CertificateId {
        self.id
    }

    fn subject_display(&self) -> String {
        self.subject.to_oneline()
    }
}

/// Parse a certificate from PEM or DER (auto-detected).
///
/// If the input begins with `-----BEGIN` (after stripping whitespace), it is
/// treated as PEM. Otherwise it is treated as DER.
pub fn parse_cert(input: &[u8]) -> Result<Certificate, LocksmithError> {
    if input.is_empty() {
        return Err(LocksmithError::ParseError("empty input".into()));
    }

    if util::is_pem(input) {
        parse_pem(input)
    } else {
        parse_der(input)
    }
}

/// Parse the first certificate of a PEM document.
pub fn parse_pem(input: &[u8]) -> Result<Certificate, LocksmithError> {
    let (_, pem) = x509_parser::pem::parse_x509_pem(input)
        .map_err(|e| LocksmithError::PemError(format!("{}", e)))?;

    if !is_certificate_label(&pem.label) {
        return Err(LocksmithError::PemError(format!(
            "expected CERTIFICATE, got {}",
            pem.label
        )));
    }

    parse_der(&pem.contents)
}

/// Parse a certificate from DER format.
///
/// Trailing bytes after the certificate are ignored.
pub fn parse_der(input: &[u8]) -> Result<Certificate, LocksmithError> {
    let (remaining, x509) = X509Certificate::from_der(input)
        .map_err(|e| LocksmithError::DerError(format!("{}", e)))?;

    let cert_len = input.len() - remaining.len();
    let cert_der = input.get(..cert_len).unwrap_or(input);
    build_certificate(&x509, cert_der)
}

/// Parse every certificate in a PEM bundle.
///
/// Non-certificate blocks are skipped. A malformed block after at least one
/// good certificate ends the bundle; before any, it is an error.
pub fn parse_pem_chain(input: &[u8]) -> Result<Vec<Certificate>, LocksmithError> {
    let mut certs = Vec::new();

    for pem_result in Pem::iter_from_buffer(input) {
        match pem_result {
            Ok(pem) => {
                if is_certificate_label(&pem.label) {
                    certs.push(parse_der(&pem.contents)?);
                }
            }
            Err(e) => {
                if !certs.is_empty() {
                    break;
                }
                return Err(LocksmithError::PemError(format!("failed to parse PEM: {}", e)));
            }
        }
    }

    if certs.is_empty() {
        return Err(LocksmithError::PemError(
            "no certificates found in PEM input".into(),
        ));
    }

    Ok(certs)
}

fn is_certificate_label(label: &str) -> bool {
    matches!(label, "CERTIFICATE" | "TRUSTED CERTIFICATE" | "X509 CERTIFICATE")
}

fn build_certificate(x509: &X509Certificate, raw_der: &[u8]) -> Result<Certificate, LocksmithError> {
    let tbs = &x509.tbs_certificate;

    let raw_version = tbs.version.0;
    if raw_version > 2 {
        return Err(LocksmithError::ParseError(format!(
            "unsupported X.509 version {} (expected v1, v2, or v3)",
            raw_version + 1
        )));
    }

    let subject_raw = tbs.subject.as_raw().to_vec();
    let issuer_raw = tbs.issuer.as_raw().to_vec();
    let serial_raw = tbs.raw_serial().to_vec();
    let id = CertificateId::from_parts(&serial_raw, &issuer_raw, &subject_raw);

    let extensions = tbs
        .extensions()
        .iter()
        .map(|ext| RawExtension {
            oid: ext.oid.to_id_string(),
            critical: ext.critical,
            value: ext.value.to_vec(),
        })
        .collect();

    Ok(Certificate {
        der: raw_der.to_vec(),
        spki_der: tbs.subject_pki.raw.to_vec(),
        version: raw_version + 1,
        serial: format_serial(&serial_raw),
        subject: DistinguishedName::from_x509(&tbs.subject),
        issuer: DistinguishedName::from_x509(&tbs.issuer),
        not_before: DateTime::from_asn1(&tbs.validity.not_before),
        not_after: DateTime::from_asn1(&tbs.validity.not_after),
        signature_algorithm: format_sig_algorithm(&x509.signature_algorithm),
        public_key: PublicKeyInfo::from_spki(&tbs.subject_pki),
        extensions,
        subject_raw,
        issuer_raw,
        serial_raw,
        id,
    })
}

/// Colon-separated uppercase hex, stripping leading zero bytes but keeping at
/// least one byte.
fn format_serial(raw: &[u8]) -> String {
    let stripped = match raw.iter().position(|&b| b != 0) {
        Some(pos) => raw.get(pos..).unwrap_or(raw),
        None => raw.get(raw.len().saturating_sub(1)..).unwrap_or(raw),
    };
    util::hex_colon_upper(stripped)
}

fn format_sig_algorithm(algo: &AlgorithmIdentifier) -> String {
    match algo.algorithm.to_id_string().as_str() {
        oid::MD5_WITH_RSA => "md5WithRSAEncryption".into(),
        oid::SHA1_WITH_RSA => "sha1WithRSAEncryption".into(),
        oid::SHA256_WITH_RSA => "sha256WithRSAEncryption".into(),
        oid::SHA384_WITH_RSA => "sha384WithRSAEncryption".into(),
        oid::SHA512_WITH_RSA => "sha512WithRSAEncryption".into(),
        oid::DSA_WITH_SHA1 => "dsaWithSHA1".into(),
        oid::ECDSA_WITH_SHA256 => "ecdsa-with-SHA256".into(),
        oid::ECDSA_WITH_SHA384 => "ecdsa-with-SHA384".into(),
        oid::ECDSA_WITH_SHA512 => "ecdsa-with-SHA512".into(),
        oid::ED25519 => "Ed25519".into(),
        oid::ED448 => "Ed448".into(),
        other => other.to_string(),
    }
}

mod hex_bytes {
    pub fn serialize<S: serde::Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serial_strips_leading_zeros() {
        assert_eq!(format_serial(&[0x00, 0x8F, 0x01]), "8F:01");
        assert_eq!(format_serial(&[0x00]), "00");
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(matches!(parse_cert(b""), Err(LocksmithError::ParseError(_))));
        assert!(matches!(parse_cert(b"\x30\x03\x02\x01"), Err(LocksmithError::DerError(_))));
        assert!(matches!(
            parse_pem_chain(b"no pem here"),
            Err(LocksmithError::PemError(_))
        ));
    }
}
