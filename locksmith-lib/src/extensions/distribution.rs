//! CRL Distribution Points and Freshest CRL.

use super::flags;
use super::{line, object_string, ExtensionDecoder};
use crate::asn1::{member, Asn1Node, DecodeError};
use crate::fields::DistinguishedName;
use crate::util;

impl ExtensionDecoder<'_> {
    /// ```text
    /// DistributionPoint ::= SEQUENCE {
    ///     distributionPoint [0] DistributionPointName OPTIONAL,
    ///     reasons           [1] ReasonFlags OPTIONAL,
    ///     cRLIssuer         [2] GeneralNames OPTIONAL }
    /// ```
    pub(super) fn distribution_points(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for point in value.as_sequence()? {
            for field in point.as_sequence()? {
                let tagged = field.as_tagged()?;
                match tagged.number {
                    0 => self.distribution_point_name(&tagged.explicit()?, &mut out)?,
                    1 => {
                        out.push_str(&line(self.label("crl-dp.reasons").to_string()));
                        let (_, bits) = tagged.implicit_bit_string()?;
                        for flag in flags::asserted(flags::REASON_FLAGS, bits) {
                            out.push('\t');
                            out.push_str(&line(self.label(flag.key).to_string()));
                        }
                    }
                    2 => {
                        out.push_str(&line(self.label("crl-dp.crl-issuer").to_string()));
                        self.general_names(&tagged.implicit_items()?, "\t", &mut out)?;
                    }
                    _ => {}
                }
            }
        }
        Ok(out)
    }

    fn distribution_point_name(&self, name: &Asn1Node<'_>, out: &mut String) -> Result<(), DecodeError> {
        let tagged = name.as_tagged()?;
        match tagged.number {
            0 => {
                out.push_str(&line(self.label("crl-dp.full-name").to_string()));
                self.general_names(&tagged.implicit_items()?, "\t", out)?;
            }
            1 => {
                out.push_str(&line(self.label("crl-dp.relative-name").to_string()));
                // The implicit SET holds one RDN's attributes.
                let mut components = Vec::new();
                for attribute in tagged.implicit_items()? {
                    let pair = attribute.as_sequence()?;
                    let oid = member(pair, 0, "attribute type")?.as_oid()?;
                    let value = object_string(member(pair, 1, "attribute value")?);
                    components.push((util::oid_short_name(oid), value));
                }
                out.push('\t');
                out.push_str(&line(DistinguishedName { components }.to_oneline()));
            }
            _ => {}
        }
        Ok(())
    }
}
