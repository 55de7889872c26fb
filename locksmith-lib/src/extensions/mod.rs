//! X.509v3 extension decoding.
//!
//! [`ExtensionDecoder::decode`] takes a dotted OID and the extnValue contents
//! (the bytes inside the OCTET STRING wrapper) and renders them as
//! newline-terminated lines of text. Labels come from a
//! [`ResourceProvider`], so the same decoder serves any language.
//!
//! An OID missing from the [`registry`] renders as `"?"`. A recognized OID
//! whose value does not have the expected ASN.1 shape fails with a
//! [`DecodeError`].

mod decode;
mod distribution;
pub mod flags;
mod general_name;
mod policies;
pub mod registry;
mod vendor;

pub use general_name::object_string;
pub use registry::{ExtensionKind, RegistryEntry, REGISTRY};

use crate::asn1::{self, DecodeError};
use crate::certificate::RawExtension;
use crate::resources::{format_template, ResourceProvider, MISSING};
use serde::Serialize;

/// One decoded extension, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedExtension {
    pub oid: String,
    pub name: String,
    pub critical: bool,
    /// Decoded text, or grouped hex of the raw value when decoding failed.
    pub text: String,
    /// Why decoding failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Renders extension values using a borrowed set of display strings.
#[derive(Clone, Copy)]
pub struct ExtensionDecoder<'r> {
    resources: &'r dyn ResourceProvider,
}

impl std::fmt::Debug for ExtensionDecoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionDecoder").finish_non_exhaustive()
    }
}

impl<'r> ExtensionDecoder<'r> {
    pub fn new(resources: &'r dyn ResourceProvider) -> Self {
        ExtensionDecoder { resources }
    }

    /// Decode one extension value.
    ///
    /// `raw` is the extnValue contents. Unknown OIDs return `"?"`.
    pub fn decode(&self, oid: &str, raw: &[u8]) -> Result<String, DecodeError> {
        let Some(entry) = registry::lookup(oid) else {
            tracing::trace!(oid, "no decoder registered");
            return Ok(MISSING.to_string());
        };
        tracing::trace!(oid, kind = ?entry.kind, "decoding extension");

        let value = asn1::parse(raw)?;
        match entry.kind {
            ExtensionKind::CommonName => Ok(line(object_string(&value))),
            ExtensionKind::SubjectKeyIdentifier => self.subject_key_identifier(&value),
            ExtensionKind::KeyUsage => self.bit_flags(&value, flags::KEY_USAGE),
            ExtensionKind::NetscapeCertType => self.bit_flags(&value, flags::NETSCAPE_CERT_TYPE),
            ExtensionKind::PrivateKeyUsagePeriod => self.private_key_usage_period(&value),
            ExtensionKind::SubjectAltName
            | ExtensionKind::IssuerAltName
            | ExtensionKind::CertificateIssuer => {
                let mut out = String::new();
                self.general_names(value.as_sequence()?, "", &mut out)?;
                Ok(out)
            }
            ExtensionKind::BasicConstraints => self.basic_constraints(&value),
            ExtensionKind::CrlNumber | ExtensionKind::DeltaCrlIndicator => {
                Ok(line(value.as_integer()?.to_hex_grouped()))
            }
            ExtensionKind::ReasonCode => self.reason_code(&value),
            ExtensionKind::HoldInstructionCode => self.hold_instruction(&value),
            ExtensionKind::InvalidityDate => self.invalidity_date(&value),
            ExtensionKind::CrlDistributionPoints | ExtensionKind::FreshestCrl => {
                self.distribution_points(&value)
            }
            ExtensionKind::CertificatePolicies => self.certificate_policies(&value),
            ExtensionKind::PolicyMappings => self.policy_mappings(&value),
            ExtensionKind::AuthorityKeyIdentifier => self.authority_key_identifier(&value),
            ExtensionKind::PolicyConstraints => self.policy_constraints(&value),
            ExtensionKind::ExtendedKeyUsage => self.extended_key_usage(&value),
            ExtensionKind::InhibitAnyPolicy => self.inhibit_any_policy(&value),
            ExtensionKind::EntrustVersion => self.entrust_version(&value),
            ExtensionKind::SmimeCapabilities => self.smime_capabilities(&value),
            ExtensionKind::MsCertTemplateV1 => self.ms_template_v1(&value),
            ExtensionKind::MsCaVersion => self.ms_ca_version(&value),
            ExtensionKind::MsCertTemplateV2 => self.ms_template_v2(&value),
            ExtensionKind::AuthorityInfoAccess | ExtensionKind::SubjectInfoAccess => {
                self.information_access(&value)
            }
            ExtensionKind::NovellSecurityAttributes => self.novell_security_attributes(&value),
            ExtensionKind::NetscapeString | ExtensionKind::DnbDunsNumber => {
                Ok(line(value.as_string_of(asn1::StringKind::Ia5)?.to_string()))
            }
        }
    }

    /// Display name for an extension OID.
    ///
    /// Resource key `extension.<oid>` wins, then the registry name, then the
    /// OID itself.
    pub fn name_of(&self, oid: &str) -> String {
        if let Some(name) = self.resources.lookup(&format!("extension.{}", oid)) {
            return name.to_string();
        }
        registry::lookup(oid)
            .map(|e| e.name.to_string())
            .unwrap_or_else(|| oid.to_string())
    }

    /// Decode a certificate's extensions, critical ones first.
    ///
    /// Relative order within each group is preserved. A value that fails to
    /// decode is shown as grouped hex and its error recorded.
    pub fn decode_all(&self, extensions: &[RawExtension]) -> Vec<DecodedExtension> {
        let (critical, non_critical): (Vec<_>, Vec<_>) =
            extensions.iter().partition(|e| e.critical);
        critical
            .into_iter()
            .chain(non_critical)
            .map(|ext| {
                let (text, error) = match self.decode(&ext.oid, &ext.value) {
                    Ok(text) => (text, None),
                    Err(e) => {
                        tracing::debug!(oid = %ext.oid, error = %e, "extension fell back to hex");
                        (line(crate::util::hex_grouped(&ext.value)), Some(e.to_string()))
                    }
                };
                DecodedExtension {
                    oid: ext.oid.clone(),
                    name: self.name_of(&ext.oid),
                    critical: ext.critical,
                    text,
                    error,
                }
            })
            .collect()
    }

    fn format(&self, key: &str, args: &[&str]) -> String {
        format_template(self.resources.text(key), args)
    }

    fn format_or(&self, key: &str, fallback: &str, args: &[&str]) -> String {
        format_template(self.resources.text_or(key, fallback), args)
    }

    fn label(&self, key: &str) -> &str {
        self.resources.text(key)
    }
}

/// Decode a single extension value with the given display strings.
pub fn decode_extension(
    oid: &str,
    raw: &[u8],
    resources: &dyn ResourceProvider,
) -> Result<String, DecodeError> {
    ExtensionDecoder::new(resources).decode(oid, raw)
}

fn line(mut text: String) -> String {
    text.push('\n');
    text
}
