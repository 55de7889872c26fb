//! Human-readable and JSON formatting of certificates and chains.

use crate::certificate::Certificate;
use crate::chain::{ChainCertificate, Resolution};
use crate::extensions::{DecodedExtension, ExtensionDecoder};
use crate::fields::{DateTime, PublicKeyInfo};
use crate::resources::ResourceProvider;
use crate::LocksmithError;
use serde::Serialize;

/// Everything `show` prints about one certificate.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateSummary {
    pub version: u32,
    pub serial: String,
    pub signature_algorithm: String,
    pub issuer: String,
    pub subject: String,
    pub not_before: DateTime,
    pub not_after: DateTime,
    pub public_key: PublicKeyInfo,
    pub fingerprint_sha256: String,
    pub extensions: Vec<DecodedExtension>,
}

/// Collect the displayable fields of `cert`, decoding its extensions.
pub fn summarize(cert: &Certificate, resources: &dyn ResourceProvider) -> CertificateSummary {
    CertificateSummary {
        version: cert.version,
        serial: cert.serial.clone(),
        signature_algorithm: cert.signature_algorithm.clone(),
        issuer: cert.issuer.to_oneline(),
        subject: cert.subject.to_oneline(),
        not_before: cert.not_before.clone(),
        not_after: cert.not_after.clone(),
        public_key: cert.public_key.clone(),
        fingerprint_sha256: cert.fingerprint(),
        extensions: ExtensionDecoder::new(resources).decode_all(&cert.extensions),
    }
}

/// Format a certificate summary as human-readable text.
pub fn display_text(summary: &CertificateSummary) -> String {
    let mut out = String::new();

    out.push_str("Certificate:\n");
    out.push_str(&format!("  Version: {} (v{})\n", summary.version, summary.version));
    out.push_str(&format!("  Serial: {}\n", summary.serial));
    out.push_str(&format!("  Signature Algorithm: {}\n", summary.signature_algorithm));
    out.push_str(&format!("  Issuer: {}\n", summary.issuer));
    out.push_str("  Validity:\n");
    out.push_str(&format!("    Not Before: {}\n", summary.not_before.to_openssl()));
    out.push_str(&format!("    Not After:  {}\n", summary.not_after.to_openssl()));
    out.push_str(&format!("  Subject: {}\n", summary.subject));

    out.push_str("  Public Key:\n");
    out.push_str(&format!("    Algorithm: {}", summary.public_key.algorithm));
    if let Some(bits) = summary.public_key.key_size {
        out.push_str(&format!(" ({} bit)", bits));
    }
    out.push('\n');

    if !summary.extensions.is_empty() {
        out.push_str("  Extensions:\n");
        display_extensions(&mut out, &summary.extensions);
    }

    out.push_str(&format!("  Fingerprint (SHA-256): {}\n", summary.fingerprint_sha256));
    out
}

/// Append decoded extensions, each body line indented under its heading.
pub(crate) fn display_extensions(out: &mut String, extensions: &[DecodedExtension]) {
    for ext in extensions {
        let critical = if ext.critical { " [critical]" } else { "" };
        out.push_str(&format!("    {} ({}):{}\n", ext.name, ext.oid, critical));
        for line in ext.text.lines() {
            if !line.is_empty() {
                out.push_str("      ");
                out.push_str(line);
            }
            out.push('\n');
        }
        if let Some(error) = &ext.error {
            out.push_str(&format!("      (could not decode: {})\n", error));
        }
    }
}

/// One link of a resolved chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainEntry {
    pub subject: String,
    pub issuer: String,
    pub serial: String,
    pub fingerprint_sha256: String,
}

/// Outcome of resolving one target.
#[derive(Debug, Clone, Serialize)]
pub struct ChainReport {
    pub target: String,
    pub trusted: bool,
    pub cycle_detected: bool,
    /// Leaf first. Empty when not trusted.
    pub chain: Vec<ChainEntry>,
}

pub fn chain_report(target: &Certificate, resolution: &Resolution<'_, Certificate>) -> ChainReport {
    let (chain, cycle_detected) = match resolution {
        Resolution::Trusted(chain) => (chain.iter().map(|c| chain_entry(c)).collect(), false),
        Resolution::NotTrusted { cycle_detected } => (Vec::new(), *cycle_detected),
    };
    ChainReport {
        target: target.subject_display(),
        trusted: resolution.is_trusted(),
        cycle_detected,
        chain,
    }
}

fn chain_entry(cert: &Certificate) -> ChainEntry {
    ChainEntry {
        subject: cert.subject.to_oneline(),
        issuer: cert.issuer.to_oneline(),
        serial: cert.serial.clone(),
        fingerprint_sha256: cert.fingerprint(),
    }
}

/// Format a chain report as text, one indented line per link.
pub fn display_chain(report: &ChainReport) -> String {
    let mut out = format!("Target: {}\n", report.target);
    if !report.trusted {
        out.push_str("  Not trusted");
        if report.cycle_detected {
            out.push_str(" (issuer cycle detected)");
        }
        out.push('\n');
        return out;
    }
    out.push_str("  Trusted chain:\n");
    for (depth, entry) in report.chain.iter().enumerate() {
        out.push_str(&format!("    {}: {}\n", depth, entry.subject));
    }
    out
}

/// Serialize any report to pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, LocksmithError> {
    serde_json::to_string_pretty(value).map_err(LocksmithError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_bodies_are_indented() {
        let mut out = String::new();
        display_extensions(
            &mut out,
            &[DecodedExtension {
                oid: "2.5.29.19".into(),
                name: "Basic Constraints".into(),
                critical: true,
                text: "Subject is a CA\nPath length constraint: 0\n".into(),
                error: None,
            }],
        );
        assert_eq!(
            out,
            "    Basic Constraints (2.5.29.19): [critical]\n      Subject is a CA\n      Path length constraint: 0\n"
        );
    }

    #[test]
    fn blank_lines_inside_a_body_are_kept() {
        let mut out = String::new();
        display_extensions(
            &mut out,
            &[DecodedExtension {
                oid: "2.5.29.32".into(),
                name: "Certificate Policies".into(),
                critical: false,
                text: "Policy: 1.2.3\n\nPolicy: 1.2.4\n".into(),
                error: None,
            }],
        );
        assert_eq!(
            out,
            "    Certificate Policies (2.5.29.32):\n      Policy: 1.2.3\n\n      Policy: 1.2.4\n"
        );
    }

    #[test]
    fn untrusted_report() {
        let report = ChainReport {
            target: "CN = leaf".into(),
            trusted: false,
            cycle_detected: true,
            chain: Vec::new(),
        };
        assert_eq!(
            display_chain(&report),
            "Target: CN = leaf\n  Not trusted (issuer cycle detected)\n"
        );
    }
}
