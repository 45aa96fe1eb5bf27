//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs progress information about domain flattening.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed` - Atomic counter of completed traversals
/// * `failed` - Atomic counter of failed traversals
/// * `total` - Number of input domains in this run
pub fn log_progress(
    start_time: std::time::Instant,
    completed: &AtomicUsize,
    failed: &AtomicUsize,
    total: usize,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed.load(Ordering::SeqCst) + failed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Flattened {}/{} domains in {:.2} seconds (~{:.2} domains/sec)",
        done, total, elapsed_secs, rate
    );
}
