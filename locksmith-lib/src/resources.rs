//! Display strings for decoded extensions.
//!
//! The decoder never hard-codes user-facing labels; it asks a
//! [`ResourceProvider`] for a template by key. Keys are either symbolic
//! (`"basic-constraints.ca"`) or a dotted OID, so that sub-identifiers such as
//! extended key usages or access methods resolve to a friendly name when one is
//! known. A key no provider knows renders as [`MISSING`].

use crate::oid;
use crate::LocksmithError;
use std::collections::HashMap;
use std::path::Path;

/// Text substituted for a key that no provider can resolve.
pub const MISSING: &str = "?";

/// Source of display templates.
pub trait ResourceProvider: Send + Sync {
    /// Raw template for `key`, if known.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Template for `key`, or [`MISSING`].
    fn text(&self, key: &str) -> &str {
        self.lookup(key).unwrap_or(MISSING)
    }

    /// Template for `key`, falling back to the template for `fallback`.
    fn text_or(&self, key: &str, fallback: &str) -> &str {
        self.lookup(key)
            .or_else(|| self.lookup(fallback))
            .unwrap_or(MISSING)
    }
}

/// Substitute `{0}`, `{1}`, ... placeholders with `args`.
///
/// Placeholders without a matching argument are left as written.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let (head, tail) = rest.split_at(open);
        out.push_str(head);
        let close = tail.find('}');
        let index = close
            .and_then(|c| tail.get(1..c))
            .and_then(|digits| digits.parse::<usize>().ok());
        match (close, index.and_then(|i| args.get(i))) {
            (Some(c), Some(arg)) => {
                out.push_str(arg);
                rest = tail.get(c + 1..).unwrap_or_default();
            }
            _ => {
                out.push('{');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }
    out.push_str(rest);
    out
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishResources;

impl ResourceProvider for EnglishResources {
    fn lookup(&self, key: &str) -> Option<&str> {
        ENGLISH
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// A set of string overrides layered over another provider.
///
/// Typically loaded from a flat JSON object mapping keys to templates, which
/// lets a caller relabel or translate output without touching the decoder.
#[derive(Debug, Clone, Default)]
pub struct ResourceOverrides<P = EnglishResources> {
    entries: HashMap<String, String>,
    base: P,
}

impl ResourceOverrides<EnglishResources> {
    /// Overrides on top of the English strings.
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self::with_base(entries, EnglishResources)
    }

    /// Parse a JSON object of `"key": "template"` pairs.
    pub fn from_json(json: &[u8]) -> Result<Self, LocksmithError> {
        let entries: HashMap<String, String> = serde_json::from_slice(json)?;
        Ok(Self::new(entries))
    }

    /// Load a JSON override file.
    pub fn from_json_file(path: &Path) -> Result<Self, LocksmithError> {
        let data = std::fs::read(path).map_err(|e| {
            LocksmithError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        Self::from_json(&data)
    }
}

impl<P: ResourceProvider> ResourceOverrides<P> {
    pub fn with_base(entries: HashMap<String, String>, base: P) -> Self {
        ResourceOverrides { entries, base }
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: ResourceProvider> ResourceProvider for ResourceOverrides<P> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .or_else(|| self.base.lookup(key))
    }
}

static ENGLISH: &[(&str, &str)] = &[
    // Key Usage
    ("key-usage.digital-signature", "Digital Signature"),
    ("key-usage.non-repudiation", "Non Repudiation"),
    ("key-usage.key-encipherment", "Key Encipherment"),
    ("key-usage.data-encipherment", "Data Encipherment"),
    ("key-usage.key-agreement", "Key Agreement"),
    ("key-usage.key-cert-sign", "Certificate Signing"),
    ("key-usage.crl-sign", "CRL Signing"),
    ("key-usage.encipher-only", "Encipher Only"),
    ("key-usage.decipher-only", "Decipher Only"),
    // Netscape Certificate Type
    ("netscape-cert-type.ssl-client", "SSL Client"),
    ("netscape-cert-type.ssl-server", "SSL Server"),
    ("netscape-cert-type.smime", "S/MIME"),
    ("netscape-cert-type.object-signing", "Object Signing"),
    ("netscape-cert-type.ssl-ca", "SSL CA"),
    ("netscape-cert-type.smime-ca", "S/MIME CA"),
    ("netscape-cert-type.object-signing-ca", "Object Signing CA"),
    // CRL distribution point reason flags
    ("reason-flag.unused", "Unused"),
    ("reason-flag.key-compromise", "Key Compromise"),
    ("reason-flag.ca-compromise", "CA Compromise"),
    ("reason-flag.affiliation-changed", "Affiliation Changed"),
    ("reason-flag.superseded", "Superseded"),
    ("reason-flag.cessation-of-operation", "Cessation of Operation"),
    ("reason-flag.certificate-hold", "Certificate Hold"),
    ("reason-flag.privilege-withdrawn", "Privilege Withdrawn"),
    ("reason-flag.aa-compromise", "AA Compromise"),
    // Basic Constraints
    ("basic-constraints.ca", "Subject is a CA"),
    ("basic-constraints.not-ca", "Subject is not a CA"),
    ("basic-constraints.path-length", "Path length constraint: {0}"),
    // Private Key Usage Period
    ("private-key-usage-period.0", "Not before: {0}"),
    ("private-key-usage-period.1", "Not after: {0}"),
    // CRL entry reason codes
    ("crl-reason.0", "Unspecified"),
    ("crl-reason.1", "Key Compromise"),
    ("crl-reason.2", "CA Compromise"),
    ("crl-reason.3", "Affiliation Changed"),
    ("crl-reason.4", "Superseded"),
    ("crl-reason.5", "Cessation of Operation"),
    ("crl-reason.6", "Certificate Hold"),
    ("crl-reason.8", "Remove from CRL"),
    ("crl-reason.9", "Privilege Withdrawn"),
    ("crl-reason.10", "AA Compromise"),
    ("crl-reason.unrecognised", "Unrecognised CRL reason: {0}"),
    // Hold instruction codes
    (oid::HOLD_INSTRUCTION_NONE, "None"),
    (oid::HOLD_INSTRUCTION_CALL_ISSUER, "Call Issuer"),
    (oid::HOLD_INSTRUCTION_REJECT, "Reject"),
    ("hold-instruction.unrecognised", "Unrecognised hold instruction code: {0}"),
    // Policy Mappings
    ("policy-mapping", "Policy Mapping #{0}"),
    ("policy-mapping.issuer-domain", "Issuer Domain Policy: {0}"),
    ("policy-mapping.subject-domain", "Subject Domain Policy: {0}"),
    // Authority Key Identifier
    ("aki.key-id", "Key identifier: {0}"),
    ("aki.issuer", "Certificate issuer:"),
    ("aki.serial", "Certificate serial number: {0}"),
    // Policy Constraints
    ("policy-constraints.require-explicit", "Require explicit policy: skip {0} certificates"),
    ("policy-constraints.inhibit-mapping", "Inhibit policy mapping: skip {0} certificates"),
    // Inhibit Any-Policy
    ("inhibit-any-policy", "Inhibit any policy: skip {0} certificates"),
    // Extended Key Usage
    (oid::EKU_SERVER_AUTH, "TLS Web Server Authentication"),
    (oid::EKU_CLIENT_AUTH, "TLS Web Client Authentication"),
    (oid::EKU_CODE_SIGNING, "Code Signing"),
    (oid::EKU_EMAIL_PROTECTION, "Email Protection"),
    (oid::EKU_IPSEC_END_SYSTEM, "IPSec End System"),
    (oid::EKU_IPSEC_TUNNEL, "IPSec Tunnel"),
    (oid::EKU_IPSEC_USER, "IPSec User"),
    (oid::EKU_TIME_STAMPING, "Time Stamping"),
    (oid::EKU_OCSP_SIGNING, "OCSP Signing"),
    (oid::EKU_ANY, "Any Extended Key Usage"),
    (oid::EKU_MS_SMART_CARD_LOGON, "Smart Card Logon"),
    (oid::EKU_MS_SERVER_GATED_CRYPTO, "Microsoft Server Gated Crypto"),
    (oid::EKU_MS_ENCRYPTED_FILE_SYSTEM, "Encrypting File System"),
    (oid::EKU_NS_SERVER_GATED_CRYPTO, "Netscape Server Gated Crypto"),
    ("ext-key-usage.unrecognised", "Unrecognised extended key usage: {0}"),
    // Microsoft
    ("ms-template.id", "Template ID: {0}"),
    ("ms-template.major", "Major version: {0}"),
    ("ms-template.minor", "Minor version: {0}"),
    ("ms-ca-version", "Certificate index: {0}, key index: {1}"),
    // S/MIME capabilities
    (oid::SMIME_DES_EDE3_CBC, "Triple DES (CBC)"),
    (oid::SMIME_RC2_CBC, "RC2 (CBC)"),
    (oid::SMIME_DES_CBC, "DES (CBC)"),
    (oid::SMIME_AES128_CBC, "AES-128 (CBC)"),
    (oid::SMIME_AES192_CBC, "AES-192 (CBC)"),
    (oid::SMIME_AES256_CBC, "AES-256 (CBC)"),
    (oid::SMIME_PREFER_SIGNED_DATA, "Prefer Signed Data"),
    (oid::SMIME_CAN_NOT_DECRYPT_ANY, "Cannot Decrypt Any"),
    ("smime.unrecognised", "Unrecognised S/MIME capability: {0}"),
    ("smime.parameters", "Parameters: {0}"),
    // Information access
    (oid::ACCESS_OCSP, "OCSP"),
    (oid::ACCESS_CA_ISSUERS, "CA Issuers"),
    (oid::ACCESS_TIME_STAMPING, "Time Stamping"),
    (oid::ACCESS_CA_REPOSITORY, "CA Repository"),
    ("access.unrecognised", "Unrecognised access method: {0}"),
    ("access.description", "Access method: {0}, access location: {1}"),
    // CRL Distribution Points
    ("crl-dp.full-name", "Full name:"),
    ("crl-dp.relative-name", "Name relative to CRL issuer:"),
    ("crl-dp.reasons", "Reasons:"),
    ("crl-dp.crl-issuer", "CRL issuer:"),
    // Certificate Policies
    ("policy.identifier", "Policy identifier: {0}"),
    (oid::QUALIFIER_CPS, "CPS pointer"),
    (oid::QUALIFIER_USER_NOTICE, "User notice"),
    ("policy.unrecognised-qualifier", "Unrecognised policy qualifier: {0}"),
    ("policy.cps-uri", "CPS URI: {0}"),
    ("policy.explicit-text", "Explicit text:"),
    ("policy.notice-ref", "Notice reference:"),
    ("policy.notice-organization", "Organization: {0}"),
    ("policy.notice-numbers", "Notice numbers: {0}"),
    // General names
    ("general-name.other", "Other name: {0} = {1}"),
    ("general-name.rfc822", "Email: {0}"),
    ("general-name.dns", "DNS name: {0}"),
    ("general-name.directory", "Directory name: {0}"),
    ("general-name.uri", "URI: {0}"),
    ("general-name.ip", "IP address: {0}"),
    ("general-name.registered-id", "Registered ID: {0}"),
    ("general-name.unsupported", "unsupported type {0}"),
    // Novell Security Attributes
    ("novell.version", "Major version: {0}, minor version: {1}"),
    ("novell.nonverified", "Nonverified subscriber information: {0}"),
    ("novell.uri", "URI: {0}"),
    ("novell.glb", "GLB extensions:"),
    ("novell.key-quality", "Key quality:"),
    ("novell.crypto-process-quality", "Cryptographic process quality:"),
    ("novell.cert-class", "Certificate class:"),
    ("novell.cert-class.1", "Class 1"),
    ("novell.cert-class.2", "Class 2"),
    ("novell.cert-class.3", "Class 3"),
    ("novell.cert-class.4", "Class 4"),
    ("novell.cert-class.unrecognised", "Unrecognised certificate class: {0}"),
    ("novell.cert-class-valid.true", "Class is valid"),
    ("novell.cert-class-valid.false", "Class is not valid"),
    ("novell.enterprise-id", "Enterprise ID:"),
    ("novell.enforce-quality", "Enforce quality:"),
    ("novell.compusec-quality", "Computer security quality:"),
    ("novell.compusec.1", "TCSEC"),
    ("novell.compusec.2", "ITSEC"),
    ("novell.compusec.unrecognised", "Unrecognised security criteria: {0}"),
    ("novell.rating", "Rating:"),
    ("novell.rating.unrecognised", "Unrecognised rating: {0}"),
    ("tcsec.0", "D"),
    ("tcsec.1", "C1"),
    ("tcsec.2", "C2"),
    ("tcsec.3", "B1"),
    ("tcsec.4", "B2"),
    ("tcsec.5", "B3"),
    ("tcsec.6", "A1"),
    ("tcsec.unrecognised", "Unrecognised TCSEC rating: {0}"),
    ("novell.crypto-quality", "Cryptographic module quality:"),
    ("novell.key-storage-quality", "Key storage quality:"),
    ("novell.key-storage-quality.0", "Unknown"),
    ("novell.key-storage-quality.1", "Software"),
    ("novell.key-storage-quality.2", "Protected software"),
    ("novell.key-storage-quality.3", "Smart card"),
    ("novell.key-storage-quality.4", "Hardware"),
    ("novell.key-storage-quality.unrecognised", "Unrecognised key storage quality: {0}"),
    ("decode-not-implemented", "(decoding not implemented)"),
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn template_substitution() {
        assert_eq!(format_template("a {0} b {1}", &["x", "y"]), "a x b y");
        assert_eq!(format_template("{1}{0}", &["x", "y"]), "yx");
        assert_eq!(format_template("keep {2} {", &["x"]), "keep {2} {");
        assert_eq!(format_template("no args", &[]), "no args");
    }

    #[test]
    fn missing_key_renders_question_mark() {
        assert_eq!(EnglishResources.text("no.such.key"), MISSING);
        assert_eq!(EnglishResources.text_or("no.such.key", "also.missing"), MISSING);
    }

    #[test]
    fn fallback_key_is_used() {
        let r = EnglishResources;
        assert_eq!(
            r.text_or("crl-reason.7", "crl-reason.unrecognised"),
            "Unrecognised CRL reason: {0}"
        );
        assert_eq!(r.text_or("crl-reason.1", "crl-reason.unrecognised"), "Key Compromise");
    }

    #[test]
    fn overrides_take_precedence() {
        let json = br#"{"basic-constraints.ca": "Autorite de certification"}"#;
        let r = ResourceOverrides::from_json(json).unwrap();
        assert_eq!(r.text("basic-constraints.ca"), "Autorite de certification");
        assert_eq!(r.text("basic-constraints.not-ca"), "Subject is not a CA");
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn overrides_reject_non_string_values() {
        assert!(ResourceOverrides::from_json(br#"{"a": 1}"#).is_err());
    }
}
