//! Candidate issuer pools.
//!
//! A [`CertificatePool`] holds the certificates a resolution may chain
//! through. Iteration follows insertion order, and a certificate whose
//! [`CertificateId`] is already present is not added twice.

use super::{CertificateId, ChainCertificate};
use crate::certificate::{parse_der, parse_pem_chain, Certificate};
use crate::LocksmithError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Where the platform keeps its trust anchors.
///
/// [`TrustStoreLocation::probe`] asks `openssl-probe`, which honours
/// `SSL_CERT_FILE` and `SSL_CERT_DIR` before searching the usual
/// distribution paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustStoreLocation {
    /// A PEM bundle holding many certificates.
    pub bundle: Option<PathBuf>,
    /// Directories of individual PEM files or OpenSSL hash links.
    pub dirs: Vec<PathBuf>,
}

impl TrustStoreLocation {
    pub fn probe() -> Self {
        let found = openssl_probe::probe();
        TrustStoreLocation {
            bundle: found.cert_file,
            dirs: found.cert_dir.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bundle.is_none() && self.dirs.is_empty()
    }
}

/// Whether a directory entry may hold PEM certificates: a `.pem`, `.crt`
/// or `.cer` file, or a `c_rehash` link named `<8 hex digits>.<n>`.
fn is_certificate_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if ["pem", "crt", "cer"].iter().any(|known| ext.eq_ignore_ascii_case(known)) {
        return true;
    }
    let hashed_stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.len() == 8 && stem.bytes().all(|b| b.is_ascii_hexdigit()));
    hashed_stem && !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_digit())
}

/// An insertion-ordered, deduplicated set of certificates.
#[derive(Clone)]
pub struct CertificatePool<C = Certificate> {
    certs: Vec<C>,
    ids: HashSet<CertificateId>,
}

impl<C> std::fmt::Debug for CertificatePool<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertificatePool")
            .field("count", &self.certs.len())
            .finish()
    }
}

impl<C> Default for CertificatePool<C> {
    fn default() -> Self {
        CertificatePool {
            certs: Vec::new(),
            ids: HashSet::new(),
        }
    }
}

impl<C: ChainCertificate> CertificatePool<C> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a certificate. Returns `false` if one with the same identity was
    /// already present.
    pub fn insert(&mut self, cert: C) -> bool {
        if !self.ids.insert(cert.id()) {
            tracing::trace!(subject = %cert.subject_display(), "duplicate pool entry skipped");
            return false;
        }
        self.certs.push(cert);
        true
    }

    pub fn contains(&self, id: &CertificateId) -> bool {
        self.ids.contains(id)
    }

    /// Certificates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.certs.iter()
    }

    /// Pool members whose subject is `issuer_raw`, in insertion order.
    pub fn issuers_named<'p>(&'p self, issuer_raw: &'p [u8]) -> impl Iterator<Item = &'p C> + 'p {
        self.certs
            .iter()
            .filter(move |c| c.subject_raw() == issuer_raw)
    }

    pub fn len(&self) -> usize {
        self.certs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certs.is_empty()
    }
}

impl<C: ChainCertificate> FromIterator<C> for CertificatePool<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut pool = CertificatePool::new();
        pool.extend(iter);
        pool
    }
}

impl<C: ChainCertificate> Extend<C> for CertificatePool<C> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        for cert in iter {
            self.insert(cert);
        }
    }
}

impl<'p, C> IntoIterator for &'p CertificatePool<C> {
    type Item = &'p C;
    type IntoIter = std::slice::Iter<'p, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.certs.iter()
    }
}

impl CertificatePool<Certificate> {
    /// A pool holding the platform trust store found by
    /// [`TrustStoreLocation::probe`].
    pub fn system() -> Result<Self, LocksmithError> {
        let mut pool = CertificatePool::new();
        pool.add_trust_store(&TrustStoreLocation::probe())?;
        Ok(pool)
    }

    /// Add the bundle and every directory of `location`. Returns how many
    /// certificates were new.
    ///
    /// Unreadable sources are logged and skipped; the call fails only when
    /// no source could be read at all.
    pub fn add_trust_store(&mut self, location: &TrustStoreLocation) -> Result<usize, LocksmithError> {
        let mut added = 0;
        let mut readable = false;
        if let Some(bundle) = &location.bundle {
            match self.add_pem_file(bundle) {
                Ok(n) => {
                    tracing::debug!(path = %bundle.display(), added = n, "loaded trust store bundle");
                    added += n;
                    readable = true;
                }
                Err(e) => tracing::warn!(path = %bundle.display(), error = %e, "trust store bundle unreadable"),
            }
        }
        for dir in &location.dirs {
            match self.add_pem_directory(dir) {
                Ok(n) => {
                    tracing::debug!(dir = %dir.display(), added = n, "loaded trust store directory");
                    added += n;
                    readable = true;
                }
                Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "trust store directory unreadable"),
            }
        }
        if !readable {
            return Err(LocksmithError::ParseError("no system trust store found".into()));
        }
        Ok(added)
    }

    /// Create a pool from a PEM bundle.
    pub fn from_pem(pem_data: &[u8]) -> Result<Self, LocksmithError> {
        let mut pool = CertificatePool::new();
        pool.add_pem_bundle(pem_data)?;
        Ok(pool)
    }

    /// Add a DER-encoded certificate.
    pub fn add_der(&mut self, der: &[u8]) -> Result<bool, LocksmithError> {
        Ok(self.insert(parse_der(der)?))
    }

    /// Add all certificates from a PEM bundle. Returns how many were new.
    pub fn add_pem_bundle(&mut self, pem_data: &[u8]) -> Result<usize, LocksmithError> {
        let mut added = 0;
        for cert in parse_pem_chain(pem_data)? {
            if self.insert(cert) {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn add_pem_file(&mut self, path: &Path) -> Result<usize, LocksmithError> {
        let data = std::fs::read(path).map_err(|e| {
            LocksmithError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        self.add_pem_bundle(&data)
    }

    /// Load certificates from a directory of PEM files (like OpenSSL's -CApath).
    ///
    /// Files that fail to parse are skipped.
    pub fn add_pem_directory(&mut self, dir: &Path) -> Result<usize, LocksmithError> {
        let mut total = 0;
        let entries = std::fs::read_dir(dir).map_err(|e| {
            LocksmithError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", dir.display(), e),
            ))
        })?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || !is_certificate_file(&path) {
                continue;
            }
            match self.add_pem_file(&path) {
                Ok(added) => total += added,
                Err(e) => tracing::debug!(path = %path.display(), error = %e, "skipping file"),
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_certificate_file_names() {
        assert!(is_certificate_file(Path::new("/etc/ssl/certs/ca.pem")));
        assert!(is_certificate_file(Path::new("Root.CRT")));
        assert!(is_certificate_file(Path::new("a1b2c3d4.0")));
        assert!(is_certificate_file(Path::new("a1b2c3d4.12")));
        assert!(!is_certificate_file(Path::new("README")));
        assert!(!is_certificate_file(Path::new("key.der")));
        assert!(!is_certificate_file(Path::new("backup.1")));
        assert!(!is_certificate_file(Path::new("a1b2c3d4.x")));
    }

    #[test]
    fn empty_location_is_an_error() {
        let mut pool = CertificatePool::new();
        assert!(TrustStoreLocation::default().is_empty());
        assert!(pool.add_trust_store(&TrustStoreLocation::default()).is_err());
    }

    #[test]
    fn unreadable_sources_are_an_error() {
        let location = TrustStoreLocation {
            bundle: Some(PathBuf::from("/nonexistent/locksmith/bundle.pem")),
            dirs: vec![PathBuf::from("/nonexistent/locksmith/certs")],
        };
        let mut pool = CertificatePool::new();
        assert!(pool.add_trust_store(&location).is_err());
        assert!(pool.is_empty());
    }
}
