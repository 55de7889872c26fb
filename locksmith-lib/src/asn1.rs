//! DER values for X.509v3 extension decoding.
//!
//! Wraps the `asn1_rs` parser re-exported by `x509-parser` and narrows its
//! output to a closed set of [`Asn1Node`] shapes. Anything outside that set
//! (indefinite lengths, unknown universal tags, constructed string
//! encodings) is rejected with a [`DecodeError`] rather than guessed at.
//!
//! Context-specific and application tags are kept as raw [`Tagged`] content,
//! because only the caller knows whether a given tag is EXPLICIT or IMPLICIT.

use std::fmt;

use x509_parser::der_parser::asn1_rs::{
    Any, BitString, BmpString, Class, DerConstraint, Enumerated, Error as Asn1Error, FromDer,
    GeneralString, GeneralizedTime, Ia5String, Integer, Null, NumericString, Oid, PrintableString,
    Tag, TeletexString, UniversalString, Utf8String, VisibleString,
};
use x509_parser::nom::Err as NomErr;

/// Maximum nesting depth accepted while parsing.
pub const MAX_DEPTH: usize = 64;

/// Errors raised while reading DER or interpreting its structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    Truncated,

    #[error("{remaining} trailing byte(s) after encoded value")]
    TrailingData { remaining: usize },

    #[error("indefinite length encoding is not allowed in DER")]
    IndefiniteLength,

    #[error("unsupported universal tag {0}")]
    UnsupportedTag(u32),

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),

    #[error("malformed DER: {0}")]
    Der(String),

    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid {what}: {detail}")]
    InvalidValue { what: &'static str, detail: String },

    #[error("missing {0}")]
    Missing(&'static str),
}

impl DecodeError {
    fn invalid(what: &'static str, detail: impl Into<String>) -> Self {
        DecodeError::InvalidValue {
            what,
            detail: detail.into(),
        }
    }
}

impl From<Asn1Error> for DecodeError {
    fn from(err: Asn1Error) -> Self {
        match err {
            Asn1Error::Incomplete(_) => DecodeError::Truncated,
            Asn1Error::IndefiniteLengthUnexpected
            | Asn1Error::DerConstraintFailed(DerConstraint::IndefiniteLength) => {
                DecodeError::IndefiniteLength
            }
            other => DecodeError::Der(other.to_string()),
        }
    }
}

impl From<NomErr<Asn1Error>> for DecodeError {
    fn from(err: NomErr<Asn1Error>) -> Self {
        match err {
            NomErr::Incomplete(_) => DecodeError::Truncated,
            NomErr::Error(e) | NomErr::Failure(e) => e.into(),
        }
    }
}

/// The character string types the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    Utf8,
    Numeric,
    Printable,
    Teletex,
    Ia5,
    Visible,
    General,
    Universal,
    Bmp,
}

impl StringKind {
    fn of(tag: Tag) -> Option<Self> {
        Some(match tag {
            Tag::Utf8String => StringKind::Utf8,
            Tag::NumericString => StringKind::Numeric,
            Tag::PrintableString => StringKind::Printable,
            Tag::TeletexString => StringKind::Teletex,
            Tag::Ia5String => StringKind::Ia5,
            Tag::VisibleString => StringKind::Visible,
            Tag::GeneralString => StringKind::General,
            Tag::UniversalString => StringKind::Universal,
            Tag::BmpString => StringKind::Bmp,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            StringKind::Utf8 => "UTF8String",
            StringKind::Numeric => "NumericString",
            StringKind::Printable => "PrintableString",
            StringKind::Teletex => "TeletexString",
            StringKind::Ia5 => "IA5String",
            StringKind::Visible => "VisibleString",
            StringKind::General => "GeneralString",
            StringKind::Universal => "UniversalString",
            StringKind::Bmp => "BMPString",
        }
    }

    fn decode(self, any: Any<'_>) -> Result<String, Asn1Error> {
        Ok(match self {
            StringKind::Utf8 => Utf8String::try_from(any)?.string(),
            StringKind::Numeric => NumericString::try_from(any)?.string(),
            StringKind::Printable => PrintableString::try_from(any)?.string(),
            StringKind::Teletex => TeletexString::try_from(any)?.string(),
            StringKind::Ia5 => Ia5String::try_from(any)?.string(),
            StringKind::Visible => VisibleString::try_from(any)?.string(),
            StringKind::General => GeneralString::try_from(any)?.string(),
            StringKind::Universal => UniversalString::try_from(any)?.string(),
            StringKind::Bmp => BmpString::try_from(any)?.string(),
        })
    }
}

impl fmt::Display for StringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A DER INTEGER (or ENUMERATED) kept as its two's complement content octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asn1Integer<'a> {
    bytes: &'a [u8],
}

impl<'a> Asn1Integer<'a> {
    /// Raw two's complement content octets.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn is_negative(&self) -> bool {
        self.bytes.first().is_some_and(|b| b & 0x80 != 0)
    }

    /// Value as `i64`, or `None` when it does not fit.
    pub fn to_i64(&self) -> Option<i64> {
        Integer::new(self.bytes).as_i64().ok()
    }

    /// Value as `u64`, or `None` when negative or too large.
    pub fn to_u64(&self) -> Option<u64> {
        if self.is_negative() {
            return None;
        }
        Integer::new(self.bytes).as_u64().ok()
    }

    /// Big-endian magnitude of the value, without leading zero octets.
    pub fn magnitude(&self) -> Vec<u8> {
        if !self.is_negative() {
            return strip_leading_zeros(self.bytes).to_vec();
        }
        let mut out: Vec<u8> = self.bytes.iter().map(|b| !b).collect();
        for byte in out.iter_mut().rev() {
            let (sum, carry) = byte.overflowing_add(1);
            *byte = sum;
            if !carry {
                break;
            }
        }
        strip_leading_zeros(&out).to_vec()
    }

    /// Decimal rendering, falling back to grouped hex for very large values.
    pub fn to_decimal(&self) -> String {
        match self.to_i64() {
            Some(v) => v.to_string(),
            None => self.to_hex_grouped(),
        }
    }

    /// Uppercase hex in 4-digit groups, most significant first.
    pub fn to_hex_grouped(&self) -> String {
        let hex = crate::util::hex_grouped(&self.magnitude());
        if self.is_negative() {
            format!("-{}", hex)
        } else {
            hex
        }
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b != 0) {
        Some(pos) => bytes.get(pos..).unwrap_or_default(),
        None => &[],
    }
}

/// A context-specific, application or private tagged value.
///
/// The content is left unparsed; use [`Tagged::explicit`] or
/// [`Tagged::implicit_items`] once the tagging mode is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged<'a> {
    pub class: Class,
    pub number: u32,
    pub constructed: bool,
    pub content: &'a [u8],
    depth: usize,
}

impl<'a> Tagged<'a> {
    /// Parse the content as a single EXPLICIT inner value.
    pub fn explicit(&self) -> Result<Asn1Node<'a>, DecodeError> {
        if !self.constructed {
            return Err(DecodeError::UnexpectedShape {
                expected: "explicitly tagged value",
                found: "primitive tagged value",
            });
        }
        single(self.content, self.depth + 1)
    }

    /// Parse the content as the members of an IMPLICIT SEQUENCE or SET.
    pub fn implicit_items(&self) -> Result<Vec<Asn1Node<'a>>, DecodeError> {
        if !self.constructed {
            return Err(DecodeError::UnexpectedShape {
                expected: "constructed tagged value",
                found: "primitive tagged value",
            });
        }
        items(self.content, self.depth + 1)
    }

    /// Interpret IMPLICIT primitive content as an INTEGER.
    pub fn implicit_integer(&self) -> Result<Asn1Integer<'a>, DecodeError> {
        self.primitive("integer")?;
        integer(Any::from_tag_and_data(Tag::Integer, self.content))
    }

    /// Interpret IMPLICIT primitive content as a BIT STRING; returns
    /// `(unused_bits, data)`.
    pub fn implicit_bit_string(&self) -> Result<(u8, &'a [u8]), DecodeError> {
        self.primitive("bit string")?;
        node(Any::from_tag_and_data(Tag::BitString, self.content), self.depth)?.as_bit_string()
    }

    /// Interpret IMPLICIT primitive content as a GeneralizedTime.
    pub fn implicit_time(&self) -> Result<::time::OffsetDateTime, DecodeError> {
        self.primitive("generalized time")?;
        generalized_time(Any::from_tag_and_data(Tag::GeneralizedTime, self.content))
    }

    fn primitive(&self, what: &'static str) -> Result<(), DecodeError> {
        if self.constructed || self.content.is_empty() {
            return Err(DecodeError::invalid(what, "empty or constructed content"));
        }
        Ok(())
    }
}

/// A parsed DER value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asn1Node<'a> {
    Boolean(bool),
    Integer(Asn1Integer<'a>),
    BitString { unused_bits: u8, data: &'a [u8] },
    OctetString(&'a [u8]),
    Null,
    ObjectIdentifier(String),
    Enumerated(Asn1Integer<'a>),
    String { kind: StringKind, value: String },
    GeneralizedTime(::time::OffsetDateTime),
    Sequence(Vec<Asn1Node<'a>>),
    Set(Vec<Asn1Node<'a>>),
    Tagged(Tagged<'a>),
}

impl<'a> Asn1Node<'a> {
    /// Short type name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Asn1Node::Boolean(_) => "BOOLEAN",
            Asn1Node::Integer(_) => "INTEGER",
            Asn1Node::BitString { .. } => "BIT STRING",
            Asn1Node::OctetString(_) => "OCTET STRING",
            Asn1Node::Null => "NULL",
            Asn1Node::ObjectIdentifier(_) => "OBJECT IDENTIFIER",
            Asn1Node::Enumerated(_) => "ENUMERATED",
            Asn1Node::String { .. } => "character string",
            Asn1Node::GeneralizedTime(_) => "GeneralizedTime",
            Asn1Node::Sequence(_) => "SEQUENCE",
            Asn1Node::Set(_) => "SET",
            Asn1Node::Tagged(_) => "tagged value",
        }
    }

    fn shape_error(&self, expected: &'static str) -> DecodeError {
        DecodeError::UnexpectedShape {
            expected,
            found: self.kind_name(),
        }
    }

    pub fn as_sequence(&self) -> Result<&[Asn1Node<'a>], DecodeError> {
        match self {
            Asn1Node::Sequence(items) => Ok(items),
            other => Err(other.shape_error("SEQUENCE")),
        }
    }

    pub fn as_set(&self) -> Result<&[Asn1Node<'a>], DecodeError> {
        match self {
            Asn1Node::Set(items) => Ok(items),
            other => Err(other.shape_error("SET")),
        }
    }

    pub fn as_bool(&self) -> Result<bool, DecodeError> {
        match self {
            Asn1Node::Boolean(b) => Ok(*b),
            other => Err(other.shape_error("BOOLEAN")),
        }
    }

    pub fn as_integer(&self) -> Result<&Asn1Integer<'a>, DecodeError> {
        match self {
            Asn1Node::Integer(i) => Ok(i),
            other => Err(other.shape_error("INTEGER")),
        }
    }

    pub fn as_enumerated(&self) -> Result<&Asn1Integer<'a>, DecodeError> {
        match self {
            Asn1Node::Enumerated(i) => Ok(i),
            other => Err(other.shape_error("ENUMERATED")),
        }
    }

    pub fn as_octets(&self) -> Result<&'a [u8], DecodeError> {
        match self {
            Asn1Node::OctetString(bytes) => Ok(bytes),
            other => Err(other.shape_error("OCTET STRING")),
        }
    }

    /// Returns `(unused_bits, data)`.
    pub fn as_bit_string(&self) -> Result<(u8, &'a [u8]), DecodeError> {
        match self {
            Asn1Node::BitString { unused_bits, data } => Ok((*unused_bits, data)),
            other => Err(other.shape_error("BIT STRING")),
        }
    }

    pub fn as_oid(&self) -> Result<&str, DecodeError> {
        match self {
            Asn1Node::ObjectIdentifier(oid) => Ok(oid),
            other => Err(other.shape_error("OBJECT IDENTIFIER")),
        }
    }

    /// Any character string type.
    pub fn as_str(&self) -> Result<&str, DecodeError> {
        match self {
            Asn1Node::String { value, .. } => Ok(value),
            other => Err(other.shape_error("character string")),
        }
    }

    /// A character string of one specific type.
    pub fn as_string_of(&self, expected: StringKind) -> Result<&str, DecodeError> {
        match self {
            Asn1Node::String { kind, value } if *kind == expected => Ok(value),
            Asn1Node::String { .. } => Err(DecodeError::UnexpectedShape {
                expected: expected.name(),
                found: "other string type",
            }),
            other => Err(other.shape_error(expected.name())),
        }
    }

    pub fn as_generalized_time(&self) -> Result<::time::OffsetDateTime, DecodeError> {
        match self {
            Asn1Node::GeneralizedTime(t) => Ok(*t),
            other => Err(other.shape_error("GeneralizedTime")),
        }
    }

    pub fn as_tagged(&self) -> Result<&Tagged<'a>, DecodeError> {
        match self {
            Asn1Node::Tagged(t) => Ok(t),
            other => Err(other.shape_error("tagged value")),
        }
    }
}

/// Fetch a positional member, naming it in the error when absent.
pub fn member<'n, 'a>(
    items: &'n [Asn1Node<'a>],
    index: usize,
    what: &'static str,
) -> Result<&'n Asn1Node<'a>, DecodeError> {
    items.get(index).ok_or(DecodeError::Missing(what))
}

/// Parse exactly one DER value; trailing bytes are an error.
pub fn parse(input: &[u8]) -> Result<Asn1Node<'_>, DecodeError> {
    single(input, 0)
}

/// Parse a concatenation of DER values.
pub fn parse_all(input: &[u8]) -> Result<Vec<Asn1Node<'_>>, DecodeError> {
    items(input, 0)
}

fn single(input: &[u8], depth: usize) -> Result<Asn1Node<'_>, DecodeError> {
    let (rest, any) = Any::from_der(input)?;
    if !rest.is_empty() {
        return Err(DecodeError::TrailingData {
            remaining: rest.len(),
        });
    }
    node(any, depth)
}

fn items(mut input: &[u8], depth: usize) -> Result<Vec<Asn1Node<'_>>, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::TooDeep(MAX_DEPTH));
    }
    let mut out = Vec::new();
    while !input.is_empty() {
        let (rest, any) = Any::from_der(input)?;
        out.push(node(any, depth)?);
        input = rest;
    }
    Ok(out)
}

fn node(any: Any<'_>, depth: usize) -> Result<Asn1Node<'_>, DecodeError> {
    let tag = any.header.tag();
    let constructed = any.header.is_constructed();

    if any.header.class() != Class::Universal {
        return Ok(Asn1Node::Tagged(Tagged {
            class: any.header.class(),
            number: tag.0,
            constructed,
            content: any.data,
            depth,
        }));
    }

    if constructed {
        return match tag {
            Tag::Sequence => Ok(Asn1Node::Sequence(items(any.data, depth + 1)?)),
            Tag::Set => Ok(Asn1Node::Set(items(any.data, depth + 1)?)),
            other => Err(DecodeError::UnsupportedTag(other.0)),
        };
    }

    match tag {
        Tag::Boolean => Ok(Asn1Node::Boolean(bool::try_from(any)?)),
        Tag::Integer => integer(any).map(Asn1Node::Integer),
        Tag::Enumerated => {
            let bytes = any.data;
            Enumerated::try_from(any)?;
            Ok(Asn1Node::Enumerated(Asn1Integer { bytes }))
        }
        Tag::BitString => {
            let content = any.data;
            BitString::try_from(any)?;
            match content.split_first() {
                Some((&unused_bits, data)) if unused_bits < 8 => {
                    Ok(Asn1Node::BitString { unused_bits, data })
                }
                _ => Err(DecodeError::invalid("bit string", "bad unused-bits count")),
            }
        }
        Tag::OctetString => Ok(Asn1Node::OctetString(<&[u8]>::try_from(any)?)),
        Tag::Null => {
            Null::try_from(any)?;
            Ok(Asn1Node::Null)
        }
        Tag::Oid => Ok(Asn1Node::ObjectIdentifier(Oid::try_from(any)?.to_id_string())),
        Tag::GeneralizedTime => generalized_time(any).map(Asn1Node::GeneralizedTime),
        other => {
            let kind = StringKind::of(other).ok_or(DecodeError::UnsupportedTag(other.0))?;
            Ok(Asn1Node::String {
                kind,
                value: kind.decode(any)?,
            })
        }
    }
}

fn integer(any: Any<'_>) -> Result<Asn1Integer<'_>, DecodeError> {
    let bytes = any.data;
    if bytes.is_empty() {
        return Err(DecodeError::invalid("integer", "empty content"));
    }
    Integer::try_from(any)?;
    Ok(Asn1Integer { bytes })
}

fn generalized_time(any: Any<'_>) -> Result<::time::OffsetDateTime, DecodeError> {
    Ok(GeneralizedTime::try_from(any)?.utc_datetime()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_sequence() {
        // SEQUENCE { BOOLEAN TRUE, INTEGER 3 }
        let der = [0x30, 0x06, 0x01, 0x01, 0xFF, 0x02, 0x01, 0x03];
        let node = parse(&der).unwrap();
        let items = node.as_sequence().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].as_bool().unwrap());
        assert_eq!(items[1].as_integer().unwrap().to_i64(), Some(3));
    }

    #[test]
    fn decodes_object_identifiers() {
        let der = [0x06, 0x03, 0x55, 0x1D, 0x13];
        assert_eq!(parse(&der).unwrap().as_oid().unwrap(), "2.5.29.19");

        let der = [0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x09, 0x0F];
        assert_eq!(
            parse(&der).unwrap().as_oid().unwrap(),
            "1.2.840.113549.1.9.15"
        );
    }

    #[test]
    fn set_is_not_a_sequence() {
        // SET { OID 2.5.4.3 }
        let der = [0x31, 0x05, 0x06, 0x03, 0x55, 0x04, 0x03];
        let node = parse(&der).unwrap();
        assert_eq!(node.as_set().unwrap().len(), 1);
        assert!(node.as_sequence().is_err());
    }

    #[test]
    fn decodes_long_form_length() {
        let mut der = vec![0x04, 0x81, 0x80];
        der.extend(std::iter::repeat(0xAB).take(0x80));
        assert_eq!(parse(&der).unwrap().as_octets().unwrap().len(), 0x80);
    }

    #[test]
    fn rejects_truncated_input() {
        let der = [0x30, 0x06, 0x01, 0x01, 0xFF];
        assert_eq!(parse(&der), Err(DecodeError::Truncated));
        assert_eq!(parse(&[]), Err(DecodeError::Truncated));
    }

    #[test]
    fn rejects_trailing_data() {
        let der = [0x05, 0x00, 0x00];
        assert_eq!(parse(&der), Err(DecodeError::TrailingData { remaining: 1 }));
    }

    #[test]
    fn rejects_indefinite_length() {
        let der = [0x30, 0x80, 0x00, 0x00];
        assert!(parse(&der).is_err());
    }

    #[test]
    fn rejects_unknown_universal_tag() {
        // UTCTime is outside the supported set.
        let der = [0x17, 0x01, 0x30];
        assert_eq!(parse(&der), Err(DecodeError::UnsupportedTag(23)));
    }

    #[test]
    fn rejects_excessive_nesting() {
        let mut nested = vec![0x30, 0x00];
        for _ in 0..(MAX_DEPTH + 2) {
            let mut outer = vec![0x30, nested.len() as u8];
            if nested.len() >= 0x80 {
                outer = vec![0x30, 0x81, nested.len() as u8];
            }
            outer.extend_from_slice(&nested);
            nested = outer;
        }
        assert_eq!(parse(&nested), Err(DecodeError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn decodes_bmp_string() {
        let der = [0x1E, 0x04, 0x00, 0x48, 0x00, 0x69];
        let node = parse(&der).unwrap();
        assert_eq!(node.as_str().unwrap(), "Hi");
        assert_eq!(node.as_string_of(StringKind::Bmp).unwrap(), "Hi");
        assert!(node.as_string_of(StringKind::Utf8).is_err());
    }

    #[test]
    fn decodes_generalized_time() {
        let mut der = vec![0x18, 0x0F];
        der.extend_from_slice(b"20110105150405Z");
        let time = parse(&der).unwrap().as_generalized_time().unwrap();
        assert_eq!(time.unix_timestamp(), 1_294_239_845);
    }

    #[test]
    fn tagged_values_stay_lazy() {
        // [0] IMPLICIT OCTET STRING 01 02
        let der = [0x80, 0x02, 0x01, 0x02];
        let node = parse(&der).unwrap();
        let tagged = node.as_tagged().unwrap();
        assert_eq!(tagged.class, Class::ContextSpecific);
        assert_eq!(tagged.number, 0);
        assert!(!tagged.constructed);
        assert_eq!(tagged.content, &[0x01, 0x02]);
        assert!(tagged.explicit().is_err());
        assert_eq!(tagged.implicit_integer().unwrap().to_u64(), Some(0x0102));

        // [1] EXPLICIT INTEGER 5
        let der = [0xA1, 0x03, 0x02, 0x01, 0x05];
        let node = parse(&der).unwrap();
        let inner = node.as_tagged().unwrap().explicit().unwrap();
        assert_eq!(inner.as_integer().unwrap().to_u64(), Some(5));
    }

    #[test]
    fn implicit_generalized_time() {
        let mut der = vec![0x81, 0x0F];
        der.extend_from_slice(b"20201231120000Z");
        let node = parse(&der).unwrap();
        let time = node.as_tagged().unwrap().implicit_time().unwrap();
        assert_eq!(time.unix_timestamp(), 1_609_416_000);
    }

    #[test]
    fn integer_helpers() {
        let neg = Asn1Integer { bytes: &[0xFF, 0x01] };
        assert!(neg.is_negative());
        assert_eq!(neg.to_i64(), Some(-255));
        assert_eq!(neg.to_u64(), None);
        assert_eq!(neg.magnitude(), vec![0xFF]);
        assert_eq!(neg.to_hex_grouped(), "-FF");

        let big = Asn1Integer {
            bytes: &[0x00, 0x81, 0x02, 0x03],
        };
        assert_eq!(big.to_u64(), Some(0x810203));
        assert_eq!(big.to_hex_grouped(), "8102 03");
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let der = [0x05, 0x00];
        let err = parse(&der).unwrap().as_sequence().unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedShape {
                expected: "SEQUENCE",
                found: "NULL"
            }
        );
    }
}
