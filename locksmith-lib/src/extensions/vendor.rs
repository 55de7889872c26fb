//! Vendor extensions: Entrust, Microsoft, S/MIME and Novell.

use super::{line, object_string, ExtensionDecoder};
use crate::asn1::{member, Asn1Node, DecodeError, StringKind, Tagged};

impl ExtensionDecoder<'_> {
    pub(super) fn entrust_version(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let version = member(value.as_sequence()?, 0, "entrust version")?;
        Ok(line(version.as_str()?.to_string()))
    }

    pub(super) fn ms_template_v1(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        Ok(line(value.as_string_of(StringKind::Bmp)?.to_string()))
    }

    /// Low 16 bits are the certificate index, high bits the key index.
    pub(super) fn ms_ca_version(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let version = value
            .as_integer()?
            .to_i64()
            .ok_or_else(|| DecodeError::InvalidValue {
                what: "CA version",
                detail: "does not fit in 64 bits".into(),
            })?;
        let cert_index = (version & 0xffff).to_string();
        let key_index = (version >> 16).to_string();
        Ok(line(self.format("ms-ca-version", &[&cert_index, &key_index])))
    }

    pub(super) fn ms_template_v2(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let fields = value.as_sequence()?;
        let id = member(fields, 0, "template id")?.as_oid()?;
        let major = member(fields, 1, "template major version")?.as_integer()?;

        let mut out = line(self.format("ms-template.id", &[id]));
        out.push_str(&line(self.format("ms-template.major", &[&major.to_decimal()])));
        if let Some(minor) = fields.get(2) {
            let minor = minor.as_integer()?.to_decimal();
            out.push_str(&line(self.format("ms-template.minor", &[&minor])));
        }
        Ok(out)
    }

    pub(super) fn smime_capabilities(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for capability in value.as_sequence()? {
            let fields = capability.as_sequence()?;
            let id = member(fields, 0, "capability id")?.as_oid()?;
            out.push_str(&self.format_or(id, "smime.unrecognised", &[id]));
            if let Some(parameters) = fields.get(1) {
                out.push_str("\n\t");
                out.push_str(&self.format("smime.parameters", &[&object_string(parameters)]));
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// ```text
    /// NovellSecurityAttributes ::= SEQUENCE {
    ///     versionNumber      OCTET STRING (SIZE (2)),
    ///     nsiFlag            BOOLEAN,
    ///     trademark          IA5String,
    ///     uriReference       IA5String,
    ///     gLBExtensions      SEQUENCE {
    ///         keyQuality     [0] QualityAttributes,
    ///         cryptoQuality  [1] QualityAttributes,
    ///         certClass      [2] SEQUENCE { INTEGER, BOOLEAN DEFAULT TRUE },
    ///         enterpriseId   [3] ... } }
    /// ```
    pub(super) fn novell_security_attributes(&self, value: &Asn1Node<'_>) -> Result<String, DecodeError> {
        let fields = value.as_sequence()?;
        let mut out = String::new();

        out.push_str(&line(member(fields, 2, "trademark")?.as_str()?.to_string()));

        let version = member(fields, 0, "version")?.as_octets()?;
        let (major, minor) = match version {
            [major, minor, ..] => (*major as i8, *minor as i8),
            _ => return Err(DecodeError::Missing("minor version")),
        };
        out.push_str(&line(self.format(
            "novell.version",
            &[&major.to_string(), &minor.to_string()],
        )));

        let nonverified = member(fields, 1, "nonverified flag")?.as_bool()?;
        out.push_str(&line(self.format("novell.nonverified", &[&nonverified.to_string()])));

        let uri = member(fields, 3, "uri reference")?.as_str()?;
        out.push_str(&line(self.format("novell.uri", &[uri])));

        let glb = member(fields, 4, "GLB extensions")?.as_sequence()?;
        out.push_str(&line(self.label("novell.glb").to_string()));

        let key_quality = tagged_sequence(member(glb, 0, "key quality")?.as_tagged()?)?;
        out.push('\t');
        out.push_str(&line(self.label("novell.key-quality").to_string()));
        self.novell_quality(&key_quality, &mut out)?;

        let process_quality =
            tagged_sequence(member(glb, 1, "crypto process quality")?.as_tagged()?)?;
        out.push('\t');
        out.push_str(&line(self.label("novell.crypto-process-quality").to_string()));
        self.novell_quality(&process_quality, &mut out)?;

        let class = tagged_sequence(member(glb, 2, "certificate class")?.as_tagged()?)?;
        let class_value = member(&class, 0, "certificate class value")?
            .as_integer()?
            .to_decimal();
        let class_valid = class.get(1).map(Asn1Node::as_bool).transpose()?.unwrap_or(true);
        out.push('\t');
        out.push_str(&line(self.label("novell.cert-class").to_string()));
        out.push_str("\t\t");
        out.push_str(&line(self.format_or(
            &format!("novell.cert-class.{}", class_value),
            "novell.cert-class.unrecognised",
            &[&class_value],
        )));
        out.push_str("\t\t");
        out.push_str(&line(
            self.label(&format!("novell.cert-class-valid.{}", class_valid)).to_string(),
        ));

        out.push('\t');
        out.push_str(&line(format!(
            "{} {}",
            self.label("novell.enterprise-id"),
            self.label("decode-not-implemented")
        )));
        Ok(out)
    }

    /// ```text
    /// QualityAttributes ::= SEQUENCE {
    ///     enforceQuality      BOOLEAN,
    ///     compusecQuality     SEQUENCE OF SEQUENCE { INTEGER, INTEGER },
    ///     cryptoQuality       SEQUENCE OF ...,
    ///     keyStorageQuality   INTEGER }
    /// ```
    fn novell_quality(&self, fields: &[Asn1Node<'_>], out: &mut String) -> Result<(), DecodeError> {
        let enforce = member(fields, 0, "enforce quality")?.as_bool()?;
        out.push_str("\t\t");
        out.push_str(&line(format!("{} {}", self.label("novell.enforce-quality"), enforce)));

        let compusec = member(fields, 1, "compusec quality")?.as_sequence()?;
        if !compusec.is_empty() {
            out.push_str("\t\t");
            out.push_str(&line(self.label("novell.compusec-quality").to_string()));
        }
        for pair in compusec {
            let pair = pair.as_sequence()?;
            let criteria = member(pair, 0, "security criteria")?.as_integer()?.to_decimal();
            let rating = member(pair, 1, "security rating")?.as_integer()?.to_decimal();

            out.push_str("\t\t\t");
            out.push_str(&line(self.format_or(
                &format!("novell.compusec.{}", criteria),
                "novell.compusec.unrecognised",
                &[&criteria],
            )));

            // Only TCSEC ratings have names.
            let rating_text = if criteria == "1" {
                self.format_or(&format!("tcsec.{}", rating), "tcsec.unrecognised", &[&rating])
            } else {
                self.format("novell.rating.unrecognised", &[&rating])
            };
            out.push_str("\t\t\t\t");
            out.push_str(&line(format!("{} {}", self.label("novell.rating"), rating_text)));
        }

        out.push_str("\t\t");
        out.push_str(&line(format!(
            "{} {}",
            self.label("novell.crypto-quality"),
            self.label("decode-not-implemented")
        )));

        let storage = member(fields, 3, "key storage quality")?.as_integer()?.to_decimal();
        out.push_str("\t\t");
        out.push_str(&line(self.label("novell.key-storage-quality").to_string()));
        out.push_str("\t\t\t");
        out.push_str(&line(self.format_or(
            &format!("novell.key-storage-quality.{}", storage),
            "novell.key-storage-quality.unrecognised",
            &[&storage],
        )));
        Ok(())
    }
}

/// Members of a tagged SEQUENCE whose tagging mode is not fixed.
///
/// Encoders disagree on these; an explicit inner SEQUENCE is tried first, then
/// the content is read as implicit members.
fn tagged_sequence<'a>(tagged: &Tagged<'a>) -> Result<Vec<Asn1Node<'a>>, DecodeError> {
    if let Ok(Asn1Node::Sequence(items)) = tagged.explicit() {
        return Ok(items);
    }
    tagged.implicit_items()
}
