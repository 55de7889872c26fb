//! Trust-chain resolution and certificate chain ordering.
//!
//! Both algorithms are generic over [`ChainCertificate`], so they only see
//! subject and issuer names plus an identity, and over [`SignatureVerifier`],
//! so the cryptography is supplied by the caller. [`X509SignatureVerifier`]
//! is the implementation for parsed [`Certificate`](crate::Certificate)s.
//!
//! Conventions differ on purpose: [`resolve`] returns chains leaf first,
//! [`order`] returns them root first.

mod order;
mod pool;
mod resolver;
mod verify;

pub use order::{order, order_leaf_first};
pub use pool::{CertificatePool, TrustStoreLocation};
pub use resolver::{resolve, Resolution};
pub use verify::X509SignatureVerifier;

use sha2::{Digest, Sha256};
use std::fmt;

/// Identity of a certificate: SHA-256 over its serial, issuer and subject.
///
/// Two encodings of the same certificate (same serial under the same issuer
/// for the same subject) share an identity even if other fields differ.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CertificateId([u8; 32]);

impl CertificateId {
    /// Hash length-prefixed parts so that field boundaries cannot shift.
    pub fn from_parts(serial: &[u8], issuer: &[u8], subject: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        for part in [serial, issuer, subject] {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part);
        }
        CertificateId(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CertificateId({})", self)
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// What the chain algorithms need to know about a certificate.
pub trait ChainCertificate {
    /// Subject name, compared byte for byte.
    fn subject_raw(&self) -> &[u8];

    /// Issuer name, compared byte for byte.
    fn issuer_raw(&self) -> &[u8];

    fn id(&self) -> CertificateId;

    /// Subject for logs and error messages.
    fn subject_display(&self) -> String;

    /// Subject and issuer names are identical.
    fn is_self_issued(&self) -> bool {
        self.subject_raw() == self.issuer_raw()
    }

    /// `self` names `other` as its issuer.
    fn is_issued_by(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.issuer_raw() == other.subject_raw()
    }
}

/// Checks a certificate's signature against a candidate issuer's public key.
pub trait SignatureVerifier<C: ?Sized> {
    fn verify(&self, certificate: &C, issuer: &C) -> Result<(), VerificationFailure>;
}

/// A signature did not verify. The resolver treats this as "try the next
/// candidate", never as a failure of the whole resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("signature verification failed: {0}")]
pub struct VerificationFailure(pub String);

/// Errors from [`order`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("issuer cycle detected at {subject}")]
    CycleDetected { subject: String },
}
