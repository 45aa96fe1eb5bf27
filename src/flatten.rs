//! Flattening of the SPF include graph for a single root domain.

use std::collections::HashSet;

use log::warn;

use crate::dns::{lookup_spf_includes, LookupOutcome, TxtSource};
use crate::error_handling::LookupErrorKind;

/// A TXT lookup that failed somewhere in one traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    /// The domain whose lookup failed.
    pub domain: String,
    /// What kind of failure it was.
    pub kind: LookupErrorKind,
}

/// The flattened include set for one root domain.
///
/// `included` holds every domain reachable from the root via nested
/// `include:` references. The root itself is never a member, even when a
/// cycle routes back to it. Domain names are compared character-identically:
/// no case-folding and no trailing-dot normalization is performed, so
/// `Example.COM` and `example.com` count as distinct entries (a known
/// limitation, kept to match observable upstream output).
#[derive(Debug, Clone)]
pub struct FlattenedResult {
    /// The domain the traversal started from.
    pub root: String,
    /// Every domain discovered through nested includes.
    pub included: HashSet<String>,
    /// Lookup failures absorbed during the traversal. A failed node
    /// contributes no further includes; everything discovered through other
    /// branches is retained.
    pub failures: Vec<LookupFailure>,
}

/// Per-domain outcome produced by the concurrent driver, one per input
/// occurrence.
#[derive(Debug, Clone)]
pub enum DomainOutcome {
    /// The traversal ran to completion; the flattened set may be empty.
    Flattened(FlattenedResult),
    /// The traversal died with an unexpected internal fault (e.g. a panic),
    /// caught at the driver boundary so sibling domains are unaffected.
    Failed {
        /// The input domain whose traversal died.
        domain: String,
        /// Opaque description of the fault.
        error: String,
    },
}

impl DomainOutcome {
    /// The input domain this outcome belongs to.
    pub fn domain(&self) -> &str {
        match self {
            DomainOutcome::Flattened(result) => &result.root,
            DomainOutcome::Failed { domain, .. } => domain,
        }
    }
}

/// Resolves the transitive closure of `include:` references for `root`.
///
/// The traversal keeps an explicit work list and checks a visited guard
/// before every push, so it terminates in at most |distinct reachable
/// domains| lookups even on cyclic include graphs (A includes B, B includes
/// A). Each discovered domain is queried exactly once per call; the visited
/// state is owned by this call and never shared.
///
/// Lookup failures on any node, the root included, are logged and recorded
/// but never abort the traversal of sibling branches.
pub async fn flatten(root: &str, source: &dyn TxtSource) -> FlattenedResult {
    let mut visited: HashSet<String> = HashSet::new();
    let mut failures: Vec<LookupFailure> = Vec::new();
    let mut work = vec![root.to_string()];

    while let Some(domain) = work.pop() {
        let lookup = lookup_spf_includes(source, &domain).await;
        match &lookup.outcome {
            LookupOutcome::Ok => {}
            LookupOutcome::NoSuchDomain => {
                warn!("No such domain: {domain}");
                failures.push(LookupFailure {
                    domain: domain.clone(),
                    kind: LookupErrorKind::NoSuchDomain,
                });
            }
            LookupOutcome::NoTxtAnswer => {
                warn!("No TXT record found for {domain}");
                failures.push(LookupFailure {
                    domain: domain.clone(),
                    kind: LookupErrorKind::NoTxtAnswer,
                });
            }
            LookupOutcome::OtherError(message) => {
                warn!("TXT lookup failed for {domain}: {message}");
                failures.push(LookupFailure {
                    domain: domain.clone(),
                    kind: LookupErrorKind::OtherLookupError,
                });
            }
        }
        for target in lookup.includes {
            // The root never enters its own flattened set, even when a
            // cycle routes back to it; it was already queried at the start.
            if target == root {
                continue;
            }
            if visited.insert(target.clone()) {
                work.push(target);
            }
        }
    }

    FlattenedResult {
        root: root.to_string(),
        included: visited,
        failures,
    }
}
