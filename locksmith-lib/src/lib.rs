//! locksmith-lib: trust-chain resolution and X.509v3 extension decoding.
//!
//! Three pieces, usable on their own:
//!
//! - [`chain::resolve`] walks from a target certificate through a
//!   [`CertificatePool`] to a self-issued anchor, verifying each signature.
//! - [`chain::order`] sorts an unordered bag of certificates into a chain.
//! - [`ExtensionDecoder`] renders extension values as display text, with
//!   labels supplied by a [`ResourceProvider`].

pub mod asn1;
mod certificate;
pub mod chain;
mod display;
pub mod extensions;
mod fields;
pub mod oid;
pub mod resources;
mod util;

pub use asn1::DecodeError;
pub use certificate::{parse_cert, parse_der, parse_pem, parse_pem_chain, Certificate, RawExtension};
pub use chain::{
    order, order_leaf_first, resolve, CertificateId, CertificatePool, ChainCertificate, ChainError,
    Resolution, SignatureVerifier, TrustStoreLocation, VerificationFailure, X509SignatureVerifier,
};
pub use display::{
    chain_report, display_chain, display_text, summarize, to_json, CertificateSummary, ChainReport,
};
pub use extensions::{decode_extension, DecodedExtension, ExtensionDecoder};
pub use fields::{DateTime, DistinguishedName, PublicKeyInfo};
pub use resources::{EnglishResources, ResourceOverrides, ResourceProvider};
pub use util::{der_to_pem, hex_grouped, is_pem};

/// Errors returned by locksmith-lib.
#[derive(Debug, thiserror::Error)]
pub enum LocksmithError {
    #[error("Failed to parse certificate: {0}")]
    ParseError(String),

    #[error("Invalid PEM format: {0}")]
    PemError(String),

    #[error("Invalid DER format: {0}")]
    DerError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Extension decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}

/// Decode every extension of `cert`, critical ones first.
pub fn decode_certificate(cert: &Certificate, resources: &dyn ResourceProvider) -> Vec<DecodedExtension> {
    ExtensionDecoder::new(resources).decode_all(&cert.extensions)
}
