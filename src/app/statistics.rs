//! End-of-run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorStats, LookupErrorKind};

/// Prints per-kind lookup failure counts to the log.
///
/// Silent when the run saw no failures.
pub fn print_error_statistics(error_stats: &ErrorStats) {
    let total = error_stats.total();
    if total == 0 {
        return;
    }

    info!("Lookup failure counts ({} total):", total);
    for kind in LookupErrorKind::iter() {
        let count = error_stats.get_count(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}
