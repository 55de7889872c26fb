//! Static table of the extensions the decoder understands.

use crate::oid;

/// How an extension value is laid out, and therefore which decoder applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    CommonName,
    SubjectKeyIdentifier,
    KeyUsage,
    PrivateKeyUsagePeriod,
    SubjectAltName,
    IssuerAltName,
    BasicConstraints,
    CrlNumber,
    ReasonCode,
    HoldInstructionCode,
    InvalidityDate,
    DeltaCrlIndicator,
    CertificateIssuer,
    CrlDistributionPoints,
    CertificatePolicies,
    PolicyMappings,
    AuthorityKeyIdentifier,
    PolicyConstraints,
    ExtendedKeyUsage,
    FreshestCrl,
    InhibitAnyPolicy,
    EntrustVersion,
    SmimeCapabilities,
    MsCertTemplateV1,
    MsCaVersion,
    MsCertTemplateV2,
    AuthorityInfoAccess,
    SubjectInfoAccess,
    NovellSecurityAttributes,
    NetscapeCertType,
    /// The IA5String-valued Netscape URL, name and comment extensions.
    NetscapeString,
    DnbDunsNumber,
}

/// One row of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub oid: &'static str,
    pub name: &'static str,
    pub kind: ExtensionKind,
}

const fn entry(oid: &'static str, name: &'static str, kind: ExtensionKind) -> RegistryEntry {
    RegistryEntry { oid, name, kind }
}

/// Every supported extension, keyed by dotted OID.
pub static REGISTRY: &[RegistryEntry] = &[
    entry(oid::COMMON_NAME, "Common Name", ExtensionKind::CommonName),
    entry(oid::EXT_SUBJECT_KEY_ID, "Subject Key Identifier", ExtensionKind::SubjectKeyIdentifier),
    entry(oid::EXT_KEY_USAGE, "Key Usage", ExtensionKind::KeyUsage),
    entry(oid::EXT_PRIVATE_KEY_USAGE_PERIOD, "Private Key Usage Period", ExtensionKind::PrivateKeyUsagePeriod),
    entry(oid::EXT_SUBJECT_ALT_NAME, "Subject Alternative Name", ExtensionKind::SubjectAltName),
    entry(oid::EXT_ISSUER_ALT_NAME, "Issuer Alternative Name", ExtensionKind::IssuerAltName),
    entry(oid::EXT_BASIC_CONSTRAINTS, "Basic Constraints", ExtensionKind::BasicConstraints),
    entry(oid::EXT_CRL_NUMBER, "CRL Number", ExtensionKind::CrlNumber),
    entry(oid::EXT_REASON_CODE, "Reason Code", ExtensionKind::ReasonCode),
    entry(oid::EXT_HOLD_INSTRUCTION_CODE, "Hold Instruction Code", ExtensionKind::HoldInstructionCode),
    entry(oid::EXT_INVALIDITY_DATE, "Invalidity Date", ExtensionKind::InvalidityDate),
    entry(oid::EXT_DELTA_CRL_INDICATOR, "Delta CRL Indicator", ExtensionKind::DeltaCrlIndicator),
    entry(oid::EXT_CERTIFICATE_ISSUER, "Certificate Issuer", ExtensionKind::CertificateIssuer),
    entry(oid::EXT_CRL_DISTRIBUTION_POINTS, "CRL Distribution Points", ExtensionKind::CrlDistributionPoints),
    entry(oid::EXT_CERTIFICATE_POLICIES, "Certificate Policies", ExtensionKind::CertificatePolicies),
    entry(oid::EXT_POLICY_MAPPINGS, "Policy Mappings", ExtensionKind::PolicyMappings),
    entry(oid::EXT_AUTHORITY_KEY_ID, "Authority Key Identifier", ExtensionKind::AuthorityKeyIdentifier),
    entry(oid::EXT_POLICY_CONSTRAINTS, "Policy Constraints", ExtensionKind::PolicyConstraints),
    entry(oid::EXT_EXTENDED_KEY_USAGE, "Extended Key Usage", ExtensionKind::ExtendedKeyUsage),
    entry(oid::EXT_FRESHEST_CRL, "Freshest CRL", ExtensionKind::FreshestCrl),
    entry(oid::EXT_INHIBIT_ANY_POLICY, "Inhibit Any Policy", ExtensionKind::InhibitAnyPolicy),
    entry(oid::EXT_ENTRUST_VERSION, "Entrust Version Extension", ExtensionKind::EntrustVersion),
    entry(oid::EXT_SMIME_CAPABILITIES, "S/MIME Capabilities", ExtensionKind::SmimeCapabilities),
    entry(oid::EXT_MS_CERT_TEMPLATE_V1, "Microsoft Certificate Template Name", ExtensionKind::MsCertTemplateV1),
    entry(oid::EXT_MS_CA_VERSION, "Microsoft CA Version", ExtensionKind::MsCaVersion),
    entry(oid::EXT_MS_CERT_TEMPLATE_V2, "Microsoft Certificate Template", ExtensionKind::MsCertTemplateV2),
    entry(oid::EXT_AUTHORITY_INFO_ACCESS, "Authority Information Access", ExtensionKind::AuthorityInfoAccess),
    entry(oid::EXT_SUBJECT_INFO_ACCESS, "Subject Information Access", ExtensionKind::SubjectInfoAccess),
    entry(oid::EXT_NOVELL_SECURITY_ATTRIBUTES, "Novell Security Attributes", ExtensionKind::NovellSecurityAttributes),
    entry(oid::EXT_NETSCAPE_CERT_TYPE, "Netscape Certificate Type", ExtensionKind::NetscapeCertType),
    entry(oid::EXT_NETSCAPE_BASE_URL, "Netscape Base URL", ExtensionKind::NetscapeString),
    entry(oid::EXT_NETSCAPE_REVOCATION_URL, "Netscape Revocation URL", ExtensionKind::NetscapeString),
    entry(oid::EXT_NETSCAPE_CA_REVOCATION_URL, "Netscape CA Revocation URL", ExtensionKind::NetscapeString),
    entry(oid::EXT_NETSCAPE_RENEWAL_URL, "Netscape Certificate Renewal URL", ExtensionKind::NetscapeString),
    entry(oid::EXT_NETSCAPE_CA_POLICY_URL, "Netscape CA Policy URL", ExtensionKind::NetscapeString),
    entry(oid::EXT_NETSCAPE_SSL_SERVER_NAME, "Netscape SSL Server Name", ExtensionKind::NetscapeString),
    entry(oid::EXT_NETSCAPE_COMMENT, "Netscape Comment", ExtensionKind::NetscapeString),
    entry(oid::EXT_DNB_DUNS_NUMBER, "D&B D-U-N-S Number", ExtensionKind::DnbDunsNumber),
];

/// Find the registry row for an exact dotted OID.
pub fn lookup(oid: &str) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|e| e.oid == oid)
}
