//! Depth-first trust-chain resolution.

use super::{CertificateId, CertificatePool, ChainCertificate, SignatureVerifier};
use std::collections::HashSet;

/// Outcome of [`resolve`].
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, C> {
    /// Leaf first; the last element is self-issued.
    Trusted(Vec<&'a C>),
    /// No path to a self-issued pool member.
    NotTrusted {
        /// A candidate was skipped because it was already on the path.
        cycle_detected: bool,
    },
}

impl<'a, C> Resolution<'a, C> {
    pub fn is_trusted(&self) -> bool {
        matches!(self, Resolution::Trusted(_))
    }

    pub fn chain(&self) -> Option<&[&'a C]> {
        match self {
            Resolution::Trusted(chain) => Some(chain),
            Resolution::NotTrusted { .. } => None,
        }
    }
}

/// Find a chain from `target` to a self-issued certificate in `pool`.
///
/// Candidates are tried in pool order and the first complete chain wins. A
/// candidate whose signature check fails is skipped. Each certificate appears
/// at most once per path, so cyclic issuer graphs terminate.
///
/// A candidate whose whole issuer subtree failed without touching the current
/// path is remembered as a dead end and not explored again, which keeps wide
/// root-less pools polynomial.
///
/// A self-issued target that is itself in the pool, and whose signature
/// verifies under its own key, resolves to `[target]`.
pub fn resolve<'a, C, V>(
    pool: &'a CertificatePool<C>,
    target: &'a C,
    verifier: &V,
) -> Resolution<'a, C>
where
    C: ChainCertificate,
    V: SignatureVerifier<C> + ?Sized,
{
    let target_id = target.id();
    if target.is_self_issued() && pool.contains(&target_id) {
        match verifier.verify(target, target) {
            Ok(()) => return Resolution::Trusted(vec![target]),
            Err(e) => tracing::debug!(
                subject = %target.subject_display(),
                error = %e,
                "pooled self-issued target failed its own signature check"
            ),
        }
    }

    let mut search = Search {
        pool,
        verifier,
        visited: HashSet::from([target_id]),
        dead_ends: HashSet::new(),
        path_hits: 0,
        cycle_detected: false,
    };
    match search.walk(target) {
        Some(chain) => Resolution::Trusted(chain),
        None => Resolution::NotTrusted {
            cycle_detected: search.cycle_detected,
        },
    }
}

struct Search<'a, 'v, C, V: ?Sized> {
    pool: &'a CertificatePool<C>,
    verifier: &'v V,
    /// Certificates on the current path.
    visited: HashSet<CertificateId>,
    /// Candidates whose subtree fails regardless of the path leading to them.
    dead_ends: HashSet<CertificateId>,
    /// Times a candidate was skipped for being on the path.
    path_hits: usize,
    cycle_detected: bool,
}

impl<'a, C, V> Search<'a, '_, C, V>
where
    C: ChainCertificate,
    V: SignatureVerifier<C> + ?Sized,
{
    fn walk(&mut self, current: &'a C) -> Option<Vec<&'a C>> {
        let current_id = current.id();
        let pool = self.pool;
        for candidate in pool.issuers_named(current.issuer_raw()) {
            let id = candidate.id();
            if id == current_id {
                continue;
            }
            if self.visited.contains(&id) {
                tracing::debug!(
                    subject = %candidate.subject_display(),
                    "candidate already on path, skipping"
                );
                self.cycle_detected = true;
                self.path_hits += 1;
                continue;
            }
            if self.dead_ends.contains(&id) {
                continue;
            }
            if let Err(e) = self.verifier.verify(current, candidate) {
                tracing::debug!(
                    subject = %current.subject_display(),
                    issuer = %candidate.subject_display(),
                    error = %e,
                    "candidate issuer rejected"
                );
                continue;
            }
            if candidate.is_self_issued() {
                return Some(vec![current, candidate]);
            }

            let hits_before = self.path_hits;
            self.visited.insert(id);
            if let Some(mut chain) = self.walk(candidate) {
                chain.insert(0, current);
                return Some(chain);
            }
            self.visited.remove(&id);
            if self.path_hits == hits_before {
                tracing::trace!(subject = %candidate.subject_display(), "dead end");
                self.dead_ends.insert(id);
            }
        }
        None
    }
}
