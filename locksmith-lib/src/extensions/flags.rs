//! Named bit tables for BIT STRING valued extensions.
//!
//! Bits are numbered MSB-first as in ASN.1: bit 0 is `0x80` of the first
//! content octet. Tables list flags in output order.

/// A single named bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitFlag {
    pub byte: usize,
    pub mask: u8,
    /// Resource key of the label.
    pub key: &'static str,
    /// Key of another flag that must also be asserted for this one to count.
    pub requires: Option<&'static str>,
}

const fn flag(byte: usize, mask: u8, key: &'static str) -> BitFlag {
    BitFlag {
        byte,
        mask,
        key,
        requires: None,
    }
}

const fn gated(byte: usize, mask: u8, key: &'static str, requires: &'static str) -> BitFlag {
    BitFlag {
        byte,
        mask,
        key,
        requires: Some(requires),
    }
}

const KEY_AGREEMENT: &str = "key-usage.key-agreement";

/// RFC 5280 KeyUsage.
pub static KEY_USAGE: &[BitFlag] = &[
    flag(0, 0x80, "key-usage.digital-signature"),
    flag(0, 0x40, "key-usage.non-repudiation"),
    flag(0, 0x20, "key-usage.key-encipherment"),
    flag(0, 0x10, "key-usage.data-encipherment"),
    flag(0, 0x08, KEY_AGREEMENT),
    flag(0, 0x04, "key-usage.key-cert-sign"),
    flag(0, 0x02, "key-usage.crl-sign"),
    gated(0, 0x01, "key-usage.encipher-only", KEY_AGREEMENT),
    gated(1, 0x80, "key-usage.decipher-only", KEY_AGREEMENT),
];

/// Netscape certificate type; bit 4 (`0x08`) is reserved and never shown.
pub static NETSCAPE_CERT_TYPE: &[BitFlag] = &[
    flag(0, 0x80, "netscape-cert-type.ssl-client"),
    flag(0, 0x40, "netscape-cert-type.ssl-server"),
    flag(0, 0x20, "netscape-cert-type.smime"),
    flag(0, 0x10, "netscape-cert-type.object-signing"),
    flag(0, 0x04, "netscape-cert-type.ssl-ca"),
    flag(0, 0x02, "netscape-cert-type.smime-ca"),
    flag(0, 0x01, "netscape-cert-type.object-signing-ca"),
];

/// RFC 5280 ReasonFlags, used by CRL distribution points.
pub static REASON_FLAGS: &[BitFlag] = &[
    flag(0, 0x80, "reason-flag.unused"),
    flag(0, 0x40, "reason-flag.key-compromise"),
    flag(0, 0x20, "reason-flag.ca-compromise"),
    flag(0, 0x10, "reason-flag.affiliation-changed"),
    flag(0, 0x08, "reason-flag.superseded"),
    flag(0, 0x04, "reason-flag.cessation-of-operation"),
    flag(0, 0x02, "reason-flag.certificate-hold"),
    flag(0, 0x01, "reason-flag.privilege-withdrawn"),
    flag(1, 0x80, "reason-flag.aa-compromise"),
];

/// Flags from `table` that are set in `data`, in table order.
pub fn asserted<'t>(table: &'t [BitFlag], data: &[u8]) -> Vec<&'t BitFlag> {
    let mut out: Vec<&BitFlag> = Vec::new();
    for f in table {
        let set = data.get(f.byte).is_some_and(|b| b & f.mask != 0);
        let gate_open = f
            .requires
            .map_or(true, |required| out.iter().any(|prior| prior.key == required));
        if set && gate_open {
            out.push(f);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(table: &[BitFlag], data: &[u8]) -> Vec<&'static str> {
        asserted(table, data).iter().map(|f| f.key).collect()
    }

    #[test]
    fn digital_signature_only() {
        assert_eq!(keys(KEY_USAGE, &[0x80]), vec!["key-usage.digital-signature"]);
    }

    #[test]
    fn decipher_only_needs_key_agreement() {
        assert!(keys(KEY_USAGE, &[0x00, 0x80]).is_empty());
        assert_eq!(
            keys(KEY_USAGE, &[0x08, 0x80]),
            vec!["key-usage.key-agreement", "key-usage.decipher-only"]
        );
        assert_eq!(keys(KEY_USAGE, &[0x01]), Vec::<&str>::new());
    }

    #[test]
    fn netscape_reserved_bit_ignored() {
        assert_eq!(keys(NETSCAPE_CERT_TYPE, &[0x08]), Vec::<&str>::new());
        assert_eq!(
            keys(NETSCAPE_CERT_TYPE, &[0xC0]),
            vec!["netscape-cert-type.ssl-client", "netscape-cert-type.ssl-server"]
        );
    }
}
