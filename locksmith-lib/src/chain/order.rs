//! Ordering an unordered bag of certificates into a chain.

use super::{CertificateId, ChainCertificate, ChainError};
use std::collections::HashSet;

/// Order `bag` root first, leaf last.
///
/// The first self-issued certificate in `bag` is the root. From there, the
/// walk repeatedly appends a certificate issued by the current one. Members
/// not reachable from the root are left out.
///
/// When `bag` has no self-issued member it is returned in its original
/// order, so callers can tell that nothing was reordered.
///
/// Fails with [`ChainError::CycleDetected`] when every certificate issued by
/// the current one is already in the chain.
pub fn order<C: ChainCertificate>(bag: &[C]) -> Result<Vec<&C>, ChainError> {
    let Some(root) = bag.iter().find(|c| c.is_self_issued()) else {
        tracing::debug!(count = bag.len(), "no self-issued certificate, leaving order as given");
        return Ok(bag.iter().collect());
    };

    let mut ordered = vec![root];
    let mut visited: HashSet<CertificateId> = HashSet::from([root.id()]);
    let mut current = root;

    loop {
        let current_id = current.id();
        let mut revisits = false;
        let next = bag.iter().find(|c| {
            if c.id() == current_id || !c.is_issued_by(current) {
                return false;
            }
            if visited.contains(&c.id()) {
                revisits = true;
                return false;
            }
            true
        });

        match next {
            Some(child) => {
                visited.insert(child.id());
                ordered.push(child);
                current = child;
            }
            None if revisits => {
                return Err(ChainError::CycleDetected {
                    subject: current.subject_display(),
                });
            }
            None => break,
        }
    }

    for dropped in bag.iter().filter(|c| !visited.contains(&c.id())) {
        tracing::debug!(subject = %dropped.subject_display(), "not linked to the chain, dropped");
    }
    Ok(ordered)
}

/// [`order`], reversed into the leaf-first convention used by
/// [`resolve`](super::resolve).
///
/// A bag with no self-issued member is returned as given, like [`order`].
pub fn order_leaf_first<C: ChainCertificate>(bag: &[C]) -> Result<Vec<&C>, ChainError> {
    let mut chain = order(bag)?;
    if bag.iter().any(|c| c.is_self_issued()) {
        chain.reverse();
    }
    Ok(chain)
}
