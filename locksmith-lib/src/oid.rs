//! OID string constants used throughout locksmith-lib.
//!
//! Extension identifiers come from RFC 5280 plus the vendor extensions the
//! decoder understands (Netscape, Microsoft, Entrust, Novell, D&B). Grouping
//! them here avoids magic strings scattered across modules.

// ── X.509 Distinguished Name attributes (RFC 4519 / X.520) ──────────────

pub const COMMON_NAME: &str = "2.5.4.3";
pub const SURNAME: &str = "2.5.4.4";
pub const SERIAL_NUMBER: &str = "2.5.4.5";
pub const COUNTRY: &str = "2.5.4.6";
pub const LOCALITY: &str = "2.5.4.7";
pub const STATE_OR_PROVINCE: &str = "2.5.4.8";
pub const STREET_ADDRESS: &str = "2.5.4.9";
pub const ORGANIZATION: &str = "2.5.4.10";
pub const ORGANIZATIONAL_UNIT: &str = "2.5.4.11";
pub const TITLE: &str = "2.5.4.12";
pub const POSTAL_CODE: &str = "2.5.4.17";
pub const GIVEN_NAME: &str = "2.5.4.42";
pub const EMAIL_ADDRESS: &str = "1.2.840.113549.1.9.1"; // PKCS#9
pub const DOMAIN_COMPONENT: &str = "0.9.2342.19200300.100.1.25";
pub const USER_ID: &str = "0.9.2342.19200300.100.1.1";

// ── Signature algorithms ─────────────────────────────────────────────────

pub const MD5_WITH_RSA: &str = "1.2.840.113549.1.1.4";
pub const SHA1_WITH_RSA: &str = "1.2.840.113549.1.1.5";
pub const SHA256_WITH_RSA: &str = "1.2.840.113549.1.1.11";
pub const SHA384_WITH_RSA: &str = "1.2.840.113549.1.1.12";
pub const SHA512_WITH_RSA: &str = "1.2.840.113549.1.1.13";
pub const DSA_WITH_SHA1: &str = "1.2.840.10040.4.3";
pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";
pub const ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";
pub const ED25519: &str = "1.3.101.112";
pub const ED448: &str = "1.3.101.113";

// ── Public key types ─────────────────────────────────────────────────────

pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const DSA: &str = "1.2.840.10040.4.1";
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

// ── X.509v3 certificate and CRL extensions (RFC 5280) ───────────────────

pub const EXT_SUBJECT_KEY_ID: &str = "2.5.29.14";
pub const EXT_KEY_USAGE: &str = "2.5.29.15";
pub const EXT_PRIVATE_KEY_USAGE_PERIOD: &str = "2.5.29.16";
pub const EXT_SUBJECT_ALT_NAME: &str = "2.5.29.17";
pub const EXT_ISSUER_ALT_NAME: &str = "2.5.29.18";
pub const EXT_BASIC_CONSTRAINTS: &str = "2.5.29.19";
pub const EXT_CRL_NUMBER: &str = "2.5.29.20";
pub const EXT_REASON_CODE: &str = "2.5.29.21";
pub const EXT_HOLD_INSTRUCTION_CODE: &str = "2.5.29.23";
pub const EXT_INVALIDITY_DATE: &str = "2.5.29.24";
pub const EXT_DELTA_CRL_INDICATOR: &str = "2.5.29.27";
pub const EXT_CERTIFICATE_ISSUER: &str = "2.5.29.29";
pub const EXT_CRL_DISTRIBUTION_POINTS: &str = "2.5.29.31";
pub const EXT_CERTIFICATE_POLICIES: &str = "2.5.29.32";
pub const EXT_POLICY_MAPPINGS: &str = "2.5.29.33";
pub const EXT_AUTHORITY_KEY_ID: &str = "2.5.29.35";
pub const EXT_POLICY_CONSTRAINTS: &str = "2.5.29.36";
pub const EXT_EXTENDED_KEY_USAGE: &str = "2.5.29.37";
pub const EXT_FRESHEST_CRL: &str = "2.5.29.46";
pub const EXT_INHIBIT_ANY_POLICY: &str = "2.5.29.54";

// ── PKIX information access (RFC 5280 Section 4.2.2) ────────────────────

pub const EXT_AUTHORITY_INFO_ACCESS: &str = "1.3.6.1.5.5.7.1.1";
pub const EXT_SUBJECT_INFO_ACCESS: &str = "1.3.6.1.5.5.7.1.11";
pub const ACCESS_OCSP: &str = "1.3.6.1.5.5.7.48.1";
pub const ACCESS_CA_ISSUERS: &str = "1.3.6.1.5.5.7.48.2";
pub const ACCESS_TIME_STAMPING: &str = "1.3.6.1.5.5.7.48.3";
pub const ACCESS_CA_REPOSITORY: &str = "1.3.6.1.5.5.7.48.5";

// ── Policy qualifiers (RFC 5280 Section 4.2.1.4) ─────────────────────────

pub const QUALIFIER_CPS: &str = "1.3.6.1.5.5.7.2.1";
pub const QUALIFIER_USER_NOTICE: &str = "1.3.6.1.5.5.7.2.2";
pub const ANY_POLICY: &str = "2.5.29.32.0";

// ── Hold instruction codes (RFC 5280 Section 5.3.2) ──────────────────────

pub const HOLD_INSTRUCTION_NONE: &str = "1.2.840.10040.2.1";
pub const HOLD_INSTRUCTION_CALL_ISSUER: &str = "1.2.840.10040.2.2";
pub const HOLD_INSTRUCTION_REJECT: &str = "1.2.840.10040.2.3";

// ── Extended Key Usage values (RFC 5280 Section 4.2.1.12) ────────────────

pub const EKU_SERVER_AUTH: &str = "1.3.6.1.5.5.7.3.1";
pub const EKU_CLIENT_AUTH: &str = "1.3.6.1.5.5.7.3.2";
pub const EKU_CODE_SIGNING: &str = "1.3.6.1.5.5.7.3.3";
pub const EKU_EMAIL_PROTECTION: &str = "1.3.6.1.5.5.7.3.4";
pub const EKU_IPSEC_END_SYSTEM: &str = "1.3.6.1.5.5.7.3.5";
pub const EKU_IPSEC_TUNNEL: &str = "1.3.6.1.5.5.7.3.6";
pub const EKU_IPSEC_USER: &str = "1.3.6.1.5.5.7.3.7";
pub const EKU_TIME_STAMPING: &str = "1.3.6.1.5.5.7.3.8";
pub const EKU_OCSP_SIGNING: &str = "1.3.6.1.5.5.7.3.9";
pub const EKU_ANY: &str = "2.5.29.37.0";
pub const EKU_MS_SMART_CARD_LOGON: &str = "1.3.6.1.4.1.311.20.2.2";
pub const EKU_MS_SERVER_GATED_CRYPTO: &str = "1.3.6.1.4.1.311.10.3.3";
pub const EKU_MS_ENCRYPTED_FILE_SYSTEM: &str = "1.3.6.1.4.1.311.10.3.4";
pub const EKU_NS_SERVER_GATED_CRYPTO: &str = "2.16.840.1.113730.4.1";

// ── S/MIME capabilities (RFC 4262) ───────────────────────────────────────

pub const SMIME_DES_EDE3_CBC: &str = "1.2.840.113549.3.7";
pub const SMIME_RC2_CBC: &str = "1.2.840.113549.3.2";
pub const SMIME_DES_CBC: &str = "1.3.14.3.2.7";
pub const SMIME_AES128_CBC: &str = "2.16.840.1.101.3.4.1.2";
pub const SMIME_AES192_CBC: &str = "2.16.840.1.101.3.4.1.22";
pub const SMIME_AES256_CBC: &str = "2.16.840.1.101.3.4.1.42";
pub const SMIME_PREFER_SIGNED_DATA: &str = "1.2.840.113549.1.9.15.1";
pub const SMIME_CAN_NOT_DECRYPT_ANY: &str = "1.2.840.113549.1.9.15.2";

// ── Vendor extensions ────────────────────────────────────────────────────

pub const EXT_ENTRUST_VERSION: &str = "1.2.840.113533.7.65.0";
pub const EXT_SMIME_CAPABILITIES: &str = "1.2.840.113549.1.9.15";
pub const EXT_MS_CERT_TEMPLATE_V1: &str = "1.3.6.1.4.1.311.20.2";
pub const EXT_MS_CA_VERSION: &str = "1.3.6.1.4.1.311.21.1";
pub const EXT_MS_CERT_TEMPLATE_V2: &str = "1.3.6.1.4.1.311.21.7";
pub const EXT_NOVELL_SECURITY_ATTRIBUTES: &str = "2.16.840.1.113719.1.9.4.1";
pub const EXT_DNB_DUNS_NUMBER: &str = "2.16.840.1.113733.1.6.15";

// ── Netscape extensions (legacy) ─────────────────────────────────────────

pub const EXT_NETSCAPE_CERT_TYPE: &str = "2.16.840.1.113730.1.1";
pub const EXT_NETSCAPE_BASE_URL: &str = "2.16.840.1.113730.1.2";
pub const EXT_NETSCAPE_REVOCATION_URL: &str = "2.16.840.1.113730.1.3";
pub const EXT_NETSCAPE_CA_REVOCATION_URL: &str = "2.16.840.1.113730.1.4";
pub const EXT_NETSCAPE_RENEWAL_URL: &str = "2.16.840.1.113730.1.7";
pub const EXT_NETSCAPE_CA_POLICY_URL: &str = "2.16.840.1.113730.1.8";
pub const EXT_NETSCAPE_SSL_SERVER_NAME: &str = "2.16.840.1.113730.1.12";
pub const EXT_NETSCAPE_COMMENT: &str = "2.16.840.1.113730.1.13";
