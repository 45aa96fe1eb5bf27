//! Rendering of per-domain result lines.

use std::collections::HashSet;

use crate::flatten::DomainOutcome;

/// Renders the single output line for one per-domain outcome.
///
/// A traversal that discovered nothing renders the same line whether its
/// lookups genuinely found no includes or failed outright; failures surface
/// through the log and the end-of-run statistics, not the output file. A
/// driver-boundary failure also collapses to the empty-set line so every
/// input occurrence yields exactly one line.
pub fn render_outcome(outcome: &DomainOutcome) -> String {
    match outcome {
        DomainOutcome::Flattened(result) => render_result_line(&result.root, &result.included),
        DomainOutcome::Failed { domain, .. } => render_result_line(domain, &HashSet::new()),
    }
}

/// Formats `<domain>: <comma-joined includes>`, or the no-includes message
/// when the set is empty.
///
/// The flattened set is unordered; it is sorted here so the output is stable
/// across runs.
pub fn render_result_line(domain: &str, included: &HashSet<String>) -> String {
    if included.is_empty() {
        format!("No included domains found in SPF for {domain}")
    } else {
        let mut domains: Vec<&str> = included.iter().map(String::as_str).collect();
        domains.sort_unstable();
        format!("{}: {}", domain, domains.join(", "))
    }
}
