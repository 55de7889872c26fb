use super::{SignatureVerifier, VerificationFailure};
use crate::certificate::Certificate;
use x509_parser::prelude::*;

/// Verifies signatures with `x509-parser`'s built-in verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct X509SignatureVerifier;

impl SignatureVerifier<Certificate> for X509SignatureVerifier {
    fn verify(&self, certificate: &Certificate, issuer: &Certificate) -> Result<(), VerificationFailure> {
        let (_, cert) = X509Certificate::from_der(certificate.der())
            .map_err(|e| VerificationFailure(format!("certificate: {}", e)))?;
        let (_, key) = SubjectPublicKeyInfo::from_der(issuer.spki_der())
            .map_err(|e| VerificationFailure(format!("issuer public key: {}", e)))?;
        cert.verify_signature(Some(&key))
            .map_err(|e| VerificationFailure(e.to_string()))
    }
}
