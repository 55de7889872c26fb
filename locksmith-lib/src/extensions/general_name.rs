//! GeneralName rendering and the generic object-to-text renderer.

use super::ExtensionDecoder;
use crate::asn1::{member, Asn1Node, DecodeError};
use crate::fields::{DateTime, DistinguishedName};
use crate::util;

impl ExtensionDecoder<'_> {
    /// Render one GeneralName by its context tag number.
    ///
    /// Tag numbers without a renderer produce a placeholder line instead of
    /// an error; a non-tagged element is malformed and fails.
    pub(super) fn general_name(&self, node: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let tagged = node.as_tagged()?;
        let text = |bytes: &[u8]| String::from_utf8_lossy(bytes).into_owned();
        Ok(match tagged.number {
            0 => {
                let items = tagged.implicit_items()?;
                let type_id = member(&items, 0, "other name type")?.as_oid()?;
                let value = object_string(member(&items, 1, "other name value")?);
                self.format("general-name.other", &[type_id, &value])
            }
            1 => self.format("general-name.rfc822", &[&text(tagged.content)]),
            2 => self.format("general-name.dns", &[&text(tagged.content)]),
            4 => {
                let name = DistinguishedName::from_der(tagged.content)?;
                self.format("general-name.directory", &[&name.to_oneline()])
            }
            6 => self.format("general-name.uri", &[&text(tagged.content)]),
            7 => self.format("general-name.ip", &[&util::dotted_bytes(tagged.content)]),
            8 => self.format(
                "general-name.registered-id",
                &[&util::dotted_bytes(tagged.content)],
            ),
            other => self.format("general-name.unsupported", &[&other.to_string()]),
        })
    }

    /// Render a list of GeneralNames, one per line, each prefixed by `indent`.
    pub(super) fn general_names(
        &self,
        names: &[Asn1Node<'_>],
        indent: &str,
        out: &mut String,
    ) -> Result<(), DecodeError> {
        for name in names {
            out.push_str(indent);
            out.push_str(&self.general_name(name)?);
            out.push('\n');
        }
        Ok(())
    }
}

/// Best-effort text for an arbitrary value.
///
/// Strings render verbatim, integers and octet strings as grouped hex, and
/// tagged values as `[n] ` followed by their content.
pub fn object_string(node: &Asn1Node<'_>) -> String {
    match node {
        Asn1Node::String { value, .. } => value.clone(),
        Asn1Node::Integer(i) | Asn1Node::Enumerated(i) => i.to_hex_grouped(),
        Asn1Node::OctetString(bytes) => util::hex_grouped(bytes),
        Asn1Node::BitString { data, .. } => util::hex_grouped(data),
        Asn1Node::Boolean(b) => b.to_string(),
        Asn1Node::Null => "NULL".into(),
        Asn1Node::ObjectIdentifier(oid) => oid.clone(),
        Asn1Node::GeneralizedTime(time) => DateTime::from_offset(*time).to_medium(),
        Asn1Node::Sequence(items) | Asn1Node::Set(items) => format!(
            "[{}]",
            items.iter().map(object_string).collect::<Vec<_>>().join(", ")
        ),
        Asn1Node::Tagged(tagged) => {
            let inner = match tagged.explicit() {
                Ok(value) => object_string(&value),
                Err(_) => util::hex_grouped(tagged.content),
            };
            format!("[{}] {}", tagged.number, inner)
        }
    }
}
