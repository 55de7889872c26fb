#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Extension decoding against hand-built DER values.

use locksmith_lib::oid;
use locksmith_lib::*;

fn decode(oid: &str, raw: &[u8]) -> String {
    decode_extension(oid, raw, &EnglishResources)
        .unwrap_or_else(|e| panic!("decoding {oid} failed: {e}"))
}

/// Short-form DER element built from concatenated content parts.
fn tlv(tag: u8, parts: &[&[u8]]) -> Vec<u8> {
    let content: Vec<u8> = parts.concat();
    assert!(content.len() < 0x80);
    let mut out = vec![tag, content.len() as u8];
    out.extend_from_slice(&content);
    out
}

// ---------------------------------------------------------------------------
// Bit string extensions
// ---------------------------------------------------------------------------

#[test]
fn key_usage_digital_signature() {
    assert_eq!(decode(oid::EXT_KEY_USAGE, &[0x03, 0x02, 0x07, 0x80]), "Digital Signature\n");
}

#[test]
fn key_usage_lists_flags_in_bit_order() {
    assert_eq!(
        decode(oid::EXT_KEY_USAGE, &[0x03, 0x02, 0x01, 0x06]),
        "Certificate Signing\nCRL Signing\n"
    );
}

#[test]
fn encipher_only_needs_key_agreement() {
    assert_eq!(decode(oid::EXT_KEY_USAGE, &[0x03, 0x02, 0x00, 0x01]), "");
    assert_eq!(
        decode(oid::EXT_KEY_USAGE, &[0x03, 0x02, 0x00, 0x09]),
        "Key Agreement\nEncipher Only\n"
    );
}

#[test]
fn decipher_only_needs_key_agreement() {
    assert_eq!(
        decode(oid::EXT_KEY_USAGE, &[0x03, 0x03, 0x07, 0x08, 0x80]),
        "Key Agreement\nDecipher Only\n"
    );
    assert_eq!(decode(oid::EXT_KEY_USAGE, &[0x03, 0x03, 0x07, 0x00, 0x80]), "");
}

#[test]
fn netscape_cert_type() {
    assert_eq!(
        decode(oid::EXT_NETSCAPE_CERT_TYPE, &[0x03, 0x02, 0x00, 0xC0]),
        "SSL Client\nSSL Server\n"
    );
}

// ---------------------------------------------------------------------------
// Basic Constraints
// ---------------------------------------------------------------------------

#[test]
fn basic_constraints_ca_with_path_length() {
    let der = [0x30, 0x06, 0x01, 0x01, 0xFF, 0x02, 0x01, 0x03];
    assert_eq!(
        decode(oid::EXT_BASIC_CONSTRAINTS, &der),
        "Subject is a CA\nPath length constraint: 3\n"
    );
}

#[test]
fn basic_constraints_not_ca() {
    let der = [0x30, 0x03, 0x01, 0x01, 0x00];
    assert_eq!(decode(oid::EXT_BASIC_CONSTRAINTS, &der), "Subject is not a CA\n");
}

#[test]
fn basic_constraints_empty_sequence_is_not_ca() {
    assert_eq!(decode(oid::EXT_BASIC_CONSTRAINTS, &[0x30, 0x00]), "Subject is not a CA\n");
}

#[test]
fn basic_constraints_ca_without_path_length() {
    let der = [0x30, 0x03, 0x01, 0x01, 0xFF];
    assert_eq!(decode(oid::EXT_BASIC_CONSTRAINTS, &der), "Subject is a CA\n");
}

// ---------------------------------------------------------------------------
// Errors and unknown OIDs
// ---------------------------------------------------------------------------

#[test]
fn unknown_oid_renders_placeholder() {
    assert_eq!(decode("1.2.3.4", &[0x05, 0x00]), "?");
    // Nothing is parsed for an unknown OID, so garbage is fine too.
    assert_eq!(decode("1.2.3.4", &[0xFF]), "?");
}

#[test]
fn truncated_value_is_an_error() {
    let der = [0x30, 0x06, 0x01, 0x01];
    assert!(decode_extension(oid::EXT_BASIC_CONSTRAINTS, &der, &EnglishResources).is_err());
}

#[test]
fn wrong_shape_is_an_error() {
    // Key Usage must be a BIT STRING.
    let der = [0x04, 0x01, 0x80];
    assert!(decode_extension(oid::EXT_KEY_USAGE, &der, &EnglishResources).is_err());
}

// ---------------------------------------------------------------------------
// Names, identifiers and policies
// ---------------------------------------------------------------------------

#[test]
fn subject_alt_name_dns_and_ip() {
    let mut der = vec![0x30, 0x13, 0x82, 0x0B];
    der.extend_from_slice(b"example.com");
    der.extend_from_slice(&[0x87, 0x04, 192, 168, 1, 1]);
    assert_eq!(
        decode(oid::EXT_SUBJECT_ALT_NAME, &der),
        "DNS name: example.com\nIP address: 192.168.1.1\n"
    );
}

#[test]
fn general_name_variants() {
    // otherName: UPN 1.3.6.1.4.1.311.20.2.3 with [0] EXPLICIT UTF8String
    let upn_oid = [0x06, 0x0A, 0x2B, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x14, 0x02, 0x03];
    let other = tlv(0xA0, &[&upn_oid, &tlv(0xA0, &[&tlv(0x0C, &[b"u@x"])])]);
    let email = tlv(0x81, &[b"a@b.c"]);
    // directoryName: CN=Dir
    let cn = tlv(0x30, &[&[0x06, 0x03, 0x55, 0x04, 0x03], &tlv(0x0C, &[b"Dir"])]);
    let directory = tlv(0xA4, &[&tlv(0x30, &[&tlv(0x31, &[&cn])])]);
    let uri = tlv(0x86, &[b"http://x/"]);
    let registered = tlv(0x88, &[&[0x2A, 0x03]]);
    let x400 = tlv(0xA3, &[]);
    let der = tlv(0x30, &[&other, &email, &directory, &uri, &registered, &x400]);

    assert_eq!(
        decode(oid::EXT_SUBJECT_ALT_NAME, &der),
        "Other name: 1.3.6.1.4.1.311.20.2.3 = [0] u@x\n\
         Email: a@b.c\n\
         Directory name: CN = Dir\n\
         URI: http://x/\n\
         Registered ID: 42.3\n\
         unsupported type 3\n"
    );
}

#[test]
fn non_tagged_general_name_is_an_error() {
    let der = tlv(0x30, &[&tlv(0x16, &[b"bare"])]);
    assert!(decode_extension(oid::EXT_SUBJECT_ALT_NAME, &der, &EnglishResources).is_err());
}

#[test]
fn authority_key_identifier_id_and_serial() {
    let der = [0x30, 0x09, 0x80, 0x04, 0xAB, 0xCD, 0xEF, 0x01, 0x82, 0x01, 0x05];
    assert_eq!(
        decode(oid::EXT_AUTHORITY_KEY_ID, &der),
        "Key identifier: ABCD EF01\nCertificate serial number: 5\n"
    );
}

#[test]
fn extended_key_usage_with_unrecognised_purpose() {
    let der = [
        0x30, 0x0F, //
        0x06, 0x08, 0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x01, // serverAuth
        0x06, 0x03, 0x2A, 0x03, 0x04, // 1.2.3.4
    ];
    assert_eq!(
        decode(oid::EXT_EXTENDED_KEY_USAGE, &der),
        "TLS Web Server Authentication\nUnrecognised extended key usage: 1.2.3.4\n"
    );
}

#[test]
fn certificate_policies_with_cps_pointer() {
    let mut der = vec![
        0x30, 0x20, 0x30, 0x1E, //
        0x06, 0x04, 0x55, 0x1D, 0x20, 0x00, // anyPolicy
        0x30, 0x16, 0x30, 0x14, //
        0x06, 0x08, 0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x02, 0x01, // id-qt-cps
        0x16, 0x08,
    ];
    der.extend_from_slice(b"http://x");
    assert_eq!(
        decode(oid::EXT_CERTIFICATE_POLICIES, &der),
        "Policy identifier: 2.5.29.32.0\n\tCPS pointer\n\t\tCPS URI: http://x\n\n"
    );
}

#[test]
fn user_notice_numbers_render_in_decimal() {
    let reference = tlv(
        0x30,
        &[
            &tlv(0x0C, &[b"Org"]),
            &tlv(0x30, &[&[0x02, 0x01, 0x01], &[0x02, 0x02, 0x01, 0x2C]]),
        ],
    );
    let notice = tlv(0x30, &[&reference, &tlv(0x0C, &[b"Hi"])]);
    let qualifier = tlv(
        0x30,
        &[&[0x06, 0x08, 0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x02, 0x02], &notice],
    );
    let policy = tlv(0x30, &[&[0x06, 0x02, 0x2A, 0x03], &tlv(0x30, &[&qualifier])]);
    let der = tlv(0x30, &[&policy]);

    assert_eq!(
        decode(oid::EXT_CERTIFICATE_POLICIES, &der),
        "Policy identifier: 1.2.3\n\tUser notice\n\
         \t\tNotice reference:\n\t\t\tOrganization: Org\n\t\t\tNotice numbers: 1, 300\n\
         \t\tExplicit text:\n\t\t\tHi\n\n"
    );
}

#[test]
fn crl_distribution_point_full_name() {
    let mut der = vec![0x30, 0x10, 0x30, 0x0E, 0xA0, 0x0C, 0xA0, 0x0A, 0x86, 0x08];
    der.extend_from_slice(b"http://c");
    assert_eq!(
        decode(oid::EXT_CRL_DISTRIBUTION_POINTS, &der),
        "Full name:\n\tURI: http://c\n"
    );
}

#[test]
fn crl_distribution_point_relative_name_and_reasons() {
    let attribute = tlv(0x30, &[&[0x06, 0x03, 0x55, 0x04, 0x03], &tlv(0x13, &[b"CRL1"])]);
    let relative = tlv(0xA1, &[&attribute]);
    // keyCompromise and cACompromise
    let reasons = [0x81, 0x02, 0x05, 0x60];
    let point = tlv(0x30, &[&tlv(0xA0, &[&relative]), &reasons]);
    let der = tlv(0x30, &[&point]);

    assert_eq!(
        decode(oid::EXT_CRL_DISTRIBUTION_POINTS, &der),
        "Name relative to CRL issuer:\n\tCN = CRL1\nReasons:\n\tKey Compromise\n\tCA Compromise\n"
    );
    assert_eq!(
        decode(oid::EXT_FRESHEST_CRL, &der),
        decode(oid::EXT_CRL_DISTRIBUTION_POINTS, &der)
    );
}

#[test]
fn crl_distribution_point_issuer() {
    let issuer = tlv(0xA2, &[&tlv(0x86, &[b"http://i"])]);
    let der = tlv(0x30, &[&tlv(0x30, &[&issuer])]);
    assert_eq!(
        decode(oid::EXT_CRL_DISTRIBUTION_POINTS, &der),
        "CRL issuer:\n\tURI: http://i\n"
    );
}

#[test]
fn policy_mappings_are_numbered() {
    let any_policy = [0x06, 0x04, 0x55, 0x1D, 0x20, 0x00];
    let mapped = [0x06, 0x02, 0x2A, 0x03];
    let der = tlv(0x30, &[&tlv(0x30, &[&any_policy, &mapped])]);
    assert_eq!(
        decode(oid::EXT_POLICY_MAPPINGS, &der),
        "Policy Mapping #1\n\tIssuer Domain Policy: 2.5.29.32.0\n\tSubject Domain Policy: 1.2.3\n"
    );
}

#[test]
fn inhibit_any_policy_skip_count() {
    assert_eq!(
        decode(oid::EXT_INHIBIT_ANY_POLICY, &[0x02, 0x01, 0x02]),
        "Inhibit any policy: skip 2 certificates\n"
    );
}

#[test]
fn authority_info_access_ocsp() {
    let mut der = vec![
        0x30, 0x16, 0x30, 0x14, //
        0x06, 0x08, 0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01, // id-ad-ocsp
        0x86, 0x08,
    ];
    der.extend_from_slice(b"http://o");
    assert_eq!(
        decode(oid::EXT_AUTHORITY_INFO_ACCESS, &der),
        "Access method: OCSP, access location: URI: http://o\n"
    );
}

#[test]
fn policy_constraints_both_fields() {
    let der = [0x30, 0x06, 0x80, 0x01, 0x00, 0x81, 0x01, 0x02];
    assert_eq!(
        decode(oid::EXT_POLICY_CONSTRAINTS, &der),
        "Require explicit policy: skip 0 certificates\nInhibit policy mapping: skip 2 certificates\n"
    );
}

// ---------------------------------------------------------------------------
// CRL entry extensions
// ---------------------------------------------------------------------------

#[test]
fn crl_numbers_render_as_grouped_hex() {
    assert_eq!(decode(oid::EXT_CRL_NUMBER, &[0x02, 0x02, 0x12, 0x34]), "1234\n");
    assert_eq!(
        decode(oid::EXT_DELTA_CRL_INDICATOR, &[0x02, 0x05, 0x00, 0x89, 0xAB, 0xCD, 0xEF]),
        "89AB CDEF\n"
    );
}

#[test]
fn reason_codes() {
    assert_eq!(decode(oid::EXT_REASON_CODE, &[0x0A, 0x01, 0x01]), "Key Compromise\n");
    assert_eq!(
        decode(oid::EXT_REASON_CODE, &[0x0A, 0x01, 0x07]),
        "Unrecognised CRL reason: 7\n"
    );
}

#[test]
fn invalidity_date_medium_format() {
    let mut der = vec![0x18, 0x0F];
    der.extend_from_slice(b"20110105150405Z");
    assert_eq!(decode(oid::EXT_INVALIDITY_DATE, &der), "Jan 5, 2011 3:04:05 PM UTC\n");
}

#[test]
fn private_key_usage_period_both_bounds() {
    let mut der = vec![0x30, 0x22, 0x80, 0x0F];
    der.extend_from_slice(b"20110105150405Z");
    der.extend_from_slice(&[0x81, 0x0F]);
    der.extend_from_slice(b"20201231120000Z");
    assert_eq!(
        decode(oid::EXT_PRIVATE_KEY_USAGE_PERIOD, &der),
        "Not before: Jan 5, 2011 3:04:05 PM UTC\nNot after: Dec 31, 2020 12:00:00 PM UTC\n"
    );
}

#[test]
fn hold_instruction_call_issuer() {
    let der = [0x06, 0x07, 0x2A, 0x86, 0x48, 0xCE, 0x38, 0x02, 0x02];
    assert_eq!(decode(oid::EXT_HOLD_INSTRUCTION_CODE, &der), "Call Issuer\n");
}

// ---------------------------------------------------------------------------
// Vendor extensions
// ---------------------------------------------------------------------------

#[test]
fn ms_ca_version_splits_indices() {
    let der = [0x02, 0x03, 0x01, 0x00, 0x02];
    assert_eq!(
        decode(oid::EXT_MS_CA_VERSION, &der),
        "Certificate index: 2, key index: 1\n"
    );
}

#[test]
fn ms_template_v2() {
    let der = [
        0x30, 0x0B, 0x06, 0x03, 0x2A, 0x03, 0x04, 0x02, 0x01, 0x64, 0x02, 0x01, 0x03,
    ];
    assert_eq!(
        decode(oid::EXT_MS_CERT_TEMPLATE_V2, &der),
        "Template ID: 1.2.3.4\nMajor version: 100\nMinor version: 3\n"
    );
}

#[test]
fn ms_template_v2_without_minor_version() {
    let der = [0x30, 0x08, 0x06, 0x03, 0x2A, 0x03, 0x04, 0x02, 0x01, 0x01];
    assert_eq!(
        decode(oid::EXT_MS_CERT_TEMPLATE_V2, &der),
        "Template ID: 1.2.3.4\nMajor version: 1\n"
    );
}

#[test]
fn ms_template_v1_bmp_name() {
    let der = [0x1E, 0x08, 0x00, 0x55, 0x00, 0x73, 0x00, 0x65, 0x00, 0x72];
    assert_eq!(decode(oid::EXT_MS_CERT_TEMPLATE_V1, &der), "User\n");
}

#[test]
fn entrust_version_string() {
    let der = tlv(0x30, &[&tlv(0x1B, &[b"V8.1"]), &[0x03, 0x02, 0x04, 0x90]]);
    assert_eq!(decode(oid::EXT_ENTRUST_VERSION, &der), "V8.1\n");
}

#[test]
fn netscape_and_duns_strings() {
    let comment = tlv(0x16, &[b"hello"]);
    assert_eq!(decode(oid::EXT_NETSCAPE_COMMENT, &comment), "hello\n");
    let duns = tlv(0x16, &[b"123456789"]);
    assert_eq!(decode(oid::EXT_DNB_DUNS_NUMBER, &duns), "123456789\n");
    // Only IA5String is accepted.
    let utf8 = tlv(0x0C, &[b"hello"]);
    assert!(decode_extension(oid::EXT_NETSCAPE_COMMENT, &utf8, &EnglishResources).is_err());
}

#[test]
fn smime_capabilities_with_parameters() {
    let aes256 = tlv(0x30, &[&[0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2A]]);
    let rc2 = tlv(
        0x30,
        &[
            &[0x06, 0x08, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x03, 0x02],
            &[0x02, 0x02, 0x00, 0x80],
        ],
    );
    let unknown = tlv(0x30, &[&[0x06, 0x02, 0x2A, 0x03]]);
    let der = tlv(0x30, &[&aes256, &rc2, &unknown]);

    assert_eq!(
        decode(oid::EXT_SMIME_CAPABILITIES, &der),
        "AES-256 (CBC)\nRC2 (CBC)\n\tParameters: 80\nUnrecognised S/MIME capability: 1.2.3\n"
    );
}

/// QualityAttributes with implicit tagging, as most encoders emit it.
fn novell_quality(tag: u8, enforce: bool, compusec: &[(u8, u8)], storage: u8) -> Vec<u8> {
    let pairs: Vec<Vec<u8>> = compusec
        .iter()
        .map(|&(criteria, rating)| tlv(0x30, &[&[0x02, 0x01, criteria], &[0x02, 0x01, rating]]))
        .collect();
    let pair_refs: Vec<&[u8]> = pairs.iter().map(Vec::as_slice).collect();
    tlv(
        tag,
        &[
            &[0x01, 0x01, if enforce { 0xFF } else { 0x00 }],
            &tlv(0x30, &pair_refs),
            &tlv(0x30, &[]),
            &[0x02, 0x01, storage],
        ],
    )
}

#[test]
fn novell_security_attributes() {
    let glb = tlv(
        0x30,
        &[
            &novell_quality(0xA0, true, &[(1, 2)], 3),
            &novell_quality(0xA1, false, &[], 0),
            &tlv(0xA2, &[&[0x02, 0x01, 0x02]]),
        ],
    );
    let der = tlv(
        0x30,
        &[
            &[0x04, 0x02, 0x01, 0x02],
            &[0x01, 0x01, 0x00],
            &tlv(0x16, &[b"Novell"]),
            &tlv(0x16, &[b"http://n/"]),
            &glb,
        ],
    );

    assert_eq!(
        decode(oid::EXT_NOVELL_SECURITY_ATTRIBUTES, &der),
        "Novell\n\
         Major version: 1, minor version: 2\n\
         Nonverified subscriber information: false\n\
         URI: http://n/\n\
         GLB extensions:\n\
         \tKey quality:\n\
         \t\tEnforce quality: true\n\
         \t\tComputer security quality:\n\
         \t\t\tTCSEC\n\
         \t\t\t\tRating: C2\n\
         \t\tCryptographic module quality: (decoding not implemented)\n\
         \t\tKey storage quality:\n\
         \t\t\tSmart card\n\
         \tCryptographic process quality:\n\
         \t\tEnforce quality: false\n\
         \t\tCryptographic module quality: (decoding not implemented)\n\
         \t\tKey storage quality:\n\
         \t\t\tUnknown\n\
         \tCertificate class:\n\
         \t\tClass 2\n\
         \t\tClass is valid\n\
         \tEnterprise ID: (decoding not implemented)\n"
    );
}

// ---------------------------------------------------------------------------
// Resources and batch decoding
// ---------------------------------------------------------------------------

#[test]
fn overrides_relabel_output() {
    let resources = ResourceOverrides::from_json(
        br#"{"key-usage.digital-signature": "Signature numerique", "extension.2.5.29.15": "Utilisation de la cle"}"#,
    )
    .unwrap();
    assert_eq!(
        decode_extension(oid::EXT_KEY_USAGE, &[0x03, 0x02, 0x07, 0x80], &resources).unwrap(),
        "Signature numerique\n"
    );
    let decoder = ExtensionDecoder::new(&resources);
    assert_eq!(decoder.name_of(oid::EXT_KEY_USAGE), "Utilisation de la cle");
    assert_eq!(decoder.name_of(oid::EXT_BASIC_CONSTRAINTS), "Basic Constraints");
    assert_eq!(decoder.name_of("1.2.3.4"), "1.2.3.4");
}

#[test]
fn missing_label_renders_placeholder() {
    struct Empty;
    impl ResourceProvider for Empty {
        fn lookup(&self, _key: &str) -> Option<&str> {
            None
        }
    }
    assert_eq!(
        decode_extension(oid::EXT_KEY_USAGE, &[0x03, 0x02, 0x07, 0x80], &Empty).unwrap(),
        "?\n"
    );
}

#[test]
fn decode_all_puts_critical_first_and_falls_back_to_hex() {
    let extensions = vec![
        RawExtension {
            oid: oid::EXT_KEY_USAGE.into(),
            critical: false,
            value: vec![0x03, 0x02, 0x07, 0x80],
        },
        RawExtension {
            oid: oid::EXT_BASIC_CONSTRAINTS.into(),
            critical: true,
            value: vec![0x30, 0x03, 0x01, 0x01, 0xFF],
        },
        RawExtension {
            oid: oid::EXT_POLICY_CONSTRAINTS.into(),
            critical: true,
            value: vec![0x30, 0x06, 0x01],
        },
    ];
    let decoded = ExtensionDecoder::new(&EnglishResources).decode_all(&extensions);

    let oids: Vec<&str> = decoded.iter().map(|d| d.oid.as_str()).collect();
    assert_eq!(
        oids,
        [oid::EXT_BASIC_CONSTRAINTS, oid::EXT_POLICY_CONSTRAINTS, oid::EXT_KEY_USAGE]
    );
    assert_eq!(decoded[0].text, "Subject is a CA\n");
    assert!(decoded[0].error.is_none());
    assert_eq!(decoded[1].text, "3006 01\n");
    assert!(decoded[1].error.is_some());
    assert_eq!(decoded[2].text, "Digital Signature\n");
}
