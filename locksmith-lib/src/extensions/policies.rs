//! Certificate Policies.

use super::{line, object_string, ExtensionDecoder};
use crate::asn1::{member, Asn1Node, DecodeError};
use crate::oid;

impl ExtensionDecoder<'_> {
    pub(super) fn certificate_policies(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for policy in value.as_sequence()? {
            let info = policy.as_sequence()?;
            let id = member(info, 0, "policy identifier")?.as_oid()?;
            out.push_str(&line(self.format("policy.identifier", &[id])));

            if let Some(qualifiers) = info.get(1) {
                for qualifier in qualifiers.as_sequence()? {
                    self.policy_qualifier(qualifier.as_sequence()?, &mut out)?;
                }
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn policy_qualifier(&self, fields: &[Asn1Node<'_>], out: &mut String) -> Result<(), DecodeError> {
        let qualifier_id = member(fields, 0, "policy qualifier id")?.as_oid()?;
        out.push('\t');
        out.push_str(&line(self.format_or(
            qualifier_id,
            "policy.unrecognised-qualifier",
            &[qualifier_id],
        )));

        let Some(qualifier) = fields.get(1) else {
            return Ok(());
        };
        match qualifier_id {
            oid::QUALIFIER_CPS => {
                out.push_str("\t\t");
                out.push_str(&line(self.format("policy.cps-uri", &[qualifier.as_str()?])));
            }
            oid::QUALIFIER_USER_NOTICE => {
                for part in qualifier.as_sequence()? {
                    self.user_notice_part(part, out)?;
                }
            }
            _ => {
                out.push_str("\t\t");
                out.push_str(&line(object_string(qualifier)));
            }
        }
        Ok(())
    }

    /// A UserNotice member: either explicit text or a notice reference.
    fn user_notice_part(&self, part: &Asn1Node<'_>, out: &mut String) -> Result<(), DecodeError> {
        match part {
            Asn1Node::String { value, .. } => {
                out.push_str("\t\t");
                out.push_str(&line(self.label("policy.explicit-text").to_string()));
                out.push_str("\t\t\t");
                out.push_str(&line(value.clone()));
            }
            Asn1Node::Sequence(reference) => {
                let organization = object_string(member(reference, 0, "notice organization")?);
                // Decimal, unlike the grouped hex used for other integers.
                let numbers = member(reference, 1, "notice numbers")?
                    .as_sequence()?
                    .iter()
                    .map(|n| n.as_integer().map(|i| i.to_decimal()))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(", ");
                out.push_str("\t\t");
                out.push_str(&line(self.label("policy.notice-ref").to_string()));
                out.push_str("\t\t\t");
                out.push_str(&line(self.format("policy.notice-organization", &[&organization])));
                out.push_str("\t\t\t");
                out.push_str(&line(self.format("policy.notice-numbers", &[&numbers])));
            }
            _ => {}
        }
        Ok(())
    }
}
