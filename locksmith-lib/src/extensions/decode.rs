//! Decoders for the RFC 5280 certificate and CRL extensions.

use super::flags::{self, BitFlag};
use super::{line, ExtensionDecoder};
use crate::asn1::{member, Asn1Node, DecodeError};
use crate::fields::DateTime;
use crate::util;

impl ExtensionDecoder<'_> {
    pub(super) fn subject_key_identifier(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        Ok(line(util::hex_grouped(value.as_octets()?)))
    }

    /// One line per asserted bit, in table order.
    pub(super) fn bit_flags(
        &self,
        value: &Asn1Node<'_>,
        table: &[BitFlag],
    ) -> Result<String, DecodeError> {
        let (_, data) = value.as_bit_string()?;
        Ok(flags::asserted(table, data)
            .into_iter()
            .map(|f| line(self.label(f.key).to_string()))
            .collect())
    }

    pub(super) fn private_key_usage_period(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for item in value.as_sequence()? {
            let tagged = item.as_tagged()?;
            let time = DateTime::from_offset(tagged.implicit_time()?);
            let key = format!("private-key-usage-period.{}", tagged.number);
            out.push_str(&line(self.format(&key, &[&time.to_medium()])));
        }
        Ok(out)
    }

    /// The path length line only appears for a CA that carries one.
    pub(super) fn basic_constraints(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut items = value.as_sequence()?.iter().peekable();
        let ca = match items.peek().copied() {
            Some(Asn1Node::Boolean(b)) => {
                items.next();
                *b
            }
            _ => false,
        };
        let path_len = items.next().map(Asn1Node::as_integer).transpose()?;

        if !ca {
            return Ok(line(self.label("basic-constraints.not-ca").to_string()));
        }
        let mut out = line(self.label("basic-constraints.ca").to_string());
        if let Some(len) = path_len {
            out.push_str(&line(
                self.format("basic-constraints.path-length", &[&len.to_decimal()]),
            ));
        }
        Ok(out)
    }

    pub(super) fn reason_code(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let code = value.as_enumerated()?.to_decimal();
        let key = format!("crl-reason.{}", code);
        Ok(line(self.format_or(&key, "crl-reason.unrecognised", &[&code])))
    }

    pub(super) fn hold_instruction(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let oid = value.as_oid()?;
        Ok(line(self.format_or(oid, "hold-instruction.unrecognised", &[oid])))
    }

    pub(super) fn invalidity_date(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let time = DateTime::from_offset(value.as_generalized_time()?);
        Ok(line(time.to_medium()))
    }

    pub(super) fn policy_mappings(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for (i, mapping) in value.as_sequence()?.iter().enumerate() {
            let pair = mapping.as_sequence()?;
            out.push_str(&line(self.format("policy-mapping", &[&(i + 1).to_string()])));
            if let Some(issuer) = pair.first() {
                out.push('\t');
                out.push_str(&line(
                    self.format("policy-mapping.issuer-domain", &[issuer.as_oid()?]),
                ));
            }
            if let Some(subject) = pair.get(1) {
                out.push('\t');
                out.push_str(&line(
                    self.format("policy-mapping.subject-domain", &[subject.as_oid()?]),
                ));
            }
        }
        Ok(out)
    }

    /// Key identifier, then issuer names, then serial; each only when present.
    pub(super) fn authority_key_identifier(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut key_id = None;
        let mut issuer = None;
        let mut serial = None;
        for item in value.as_sequence()? {
            let tagged = item.as_tagged()?;
            match tagged.number {
                0 => key_id = Some(tagged.content),
                1 => issuer = Some(tagged.implicit_items()?),
                2 => serial = Some(tagged.implicit_integer()?),
                _ => {}
            }
        }

        let mut out = String::new();
        if let Some(id) = key_id {
            out.push_str(&line(self.format("aki.key-id", &[&util::hex_grouped(id)])));
        }
        if let Some(names) = issuer {
            out.push_str(&line(self.label("aki.issuer").to_string()));
            self.general_names(&names, "\t", &mut out)?;
        }
        if let Some(serial) = serial {
            // Rendered unsigned, as the raw octets.
            let hex = util::hex_grouped(serial.as_bytes());
            out.push_str(&line(self.format("aki.serial", &[&hex])));
        }
        Ok(out)
    }

    pub(super) fn policy_constraints(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for item in value.as_sequence()? {
            let tagged = item.as_tagged()?;
            let key = match tagged.number {
                0 => "policy-constraints.require-explicit",
                1 => "policy-constraints.inhibit-mapping",
                _ => continue,
            };
            let skip = tagged.implicit_integer()?.to_decimal();
            out.push_str(&line(self.format(key, &[&skip])));
        }
        Ok(out)
    }

    pub(super) fn extended_key_usage(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for usage in value.as_sequence()? {
            let oid = usage.as_oid()?;
            out.push_str(&line(self.format_or(oid, "ext-key-usage.unrecognised", &[oid])));
        }
        Ok(out)
    }

    pub(super) fn inhibit_any_policy(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let skip = value.as_integer()?.to_decimal();
        Ok(line(self.format("inhibit-any-policy", &[&skip])))
    }

    /// Authority and Subject Information Access share one layout.
    pub(super) fn information_access(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for description in value.as_sequence()? {
            let fields = description.as_sequence()?;
            let oid = member(fields, 0, "access method")?.as_oid()?;
            let method = self.format_or(oid, "access.unrecognised", &[oid]);
            let location = self.general_name(member(fields, 1, "access location")?)?;
            out.push_str(&line(self.format("access.description", &[&method, &location])));
        }
        Ok(out)
    }
}
