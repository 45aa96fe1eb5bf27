//! spf_flattener library: recursive SPF include flattening
//!
//! This library resolves the transitive closure of SPF `include:` references
//! for a set of input domains. For each domain it produces the flattened set
//! of all domains reachable via nested SPF includes, traversing the include
//! graph cycle-safely and querying each discovered domain exactly once.
//!
//! # Example
//!
//! ```no_run
//! use spf_flattener::{run_flatten, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.txt"),
//!     max_concurrency: 100,
//!     ..Default::default()
//! };
//!
//! let report = run_flatten(config).await?;
//! println!("Flattened {} domains: {} resolved, {} failed",
//!          report.total_domains, report.resolved, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod flatten;
pub mod initialization;
pub mod render;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{lookup_spf_includes, LookupOutcome, ResolverTxtSource, SpfLookup, TxtAnswer, TxtSource};
pub use error_handling::{ErrorStats, LookupErrorKind};
pub use flatten::{flatten, DomainOutcome, FlattenedResult, LookupFailure};
pub use render::{render_outcome, render_result_line};
pub use run::{run_flatten, run_with_source, FlattenReport, RunProgress};

// Internal run module (contains the concurrent driver)
mod run {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use tokio::io::AsyncWriteExt;
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, print_error_statistics, read_domain_list, shutdown_gracefully};
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::dns::{ResolverTxtSource, TxtSource};
    use crate::error_handling::{ErrorStats, LookupErrorKind};
    use crate::flatten::{flatten, DomainOutcome};
    use crate::initialization::{init_resolver, init_semaphore};
    use crate::render::render_outcome;

    /// Shared progress counters updated as traversals complete.
    #[derive(Debug, Default)]
    pub struct RunProgress {
        /// Traversals that ran to completion (flattened set possibly empty).
        pub completed: AtomicUsize,
        /// Traversals that died with an internal fault.
        pub failed: AtomicUsize,
    }

    impl RunProgress {
        /// Creates zeroed counters.
        pub fn new() -> Self {
            Self::default()
        }
    }

    /// Results of a flattening run.
    #[derive(Debug, Clone)]
    pub struct FlattenReport {
        /// Number of input domains processed (each occurrence counted)
        pub total_domains: usize,
        /// Traversals that completed, flattened set possibly empty
        pub resolved: usize,
        /// Traversals that died with an internal fault
        pub failed: usize,
        /// Path of the written results file
        pub output_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Flattens every domain in `domains` against `source`, with at most
    /// `max_concurrency` traversals in flight at a time.
    ///
    /// One traversal is dispatched per input occurrence (duplicates
    /// included) and outcomes come back in completion order, exactly one
    /// per occurrence. A traversal that dies with an unexpected internal
    /// fault is converted into a [`DomainOutcome::Failed`] for its domain;
    /// sibling traversals are unaffected. Lookup failures recorded along the
    /// way are counted into `error_stats`, and `progress` is updated as each
    /// traversal finishes.
    pub async fn run_with_source(
        domains: Vec<String>,
        source: Arc<dyn TxtSource>,
        max_concurrency: usize,
        error_stats: &ErrorStats,
        progress: &RunProgress,
    ) -> Vec<DomainOutcome> {
        let semaphore = init_semaphore(max_concurrency);
        let mut tasks = FuturesUnordered::new();

        for domain in domains {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping domain: {domain}");
                    continue;
                }
            };

            let task_source = Arc::clone(&source);
            let task_domain = domain.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                flatten(&task_domain, task_source.as_ref()).await
            });

            tasks.push(async move {
                match handle.await {
                    Ok(result) => DomainOutcome::Flattened(result),
                    Err(join_error) => {
                        warn!("Traversal for {domain} died: {join_error}");
                        DomainOutcome::Failed {
                            domain,
                            error: join_error.to_string(),
                        }
                    }
                }
            });
        }

        // Single collection point: outcomes and counters are only touched
        // from this loop, never from the worker tasks themselves.
        let mut outcomes = Vec::new();
        while let Some(outcome) = tasks.next().await {
            match &outcome {
                DomainOutcome::Flattened(result) => {
                    for failure in &result.failures {
                        error_stats.increment(failure.kind);
                    }
                    progress.completed.fetch_add(1, Ordering::SeqCst);
                }
                DomainOutcome::Failed { .. } => {
                    error_stats.increment(LookupErrorKind::TraversalPanic);
                    progress.failed.fetch_add(1, Ordering::SeqCst);
                }
            }
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Runs a full flattening pass with the provided configuration.
    ///
    /// This is the main entry point for the library. It reads the domain
    /// list from the input file (or stdin for `-`), flattens each domain
    /// against the system DNS resolver under the configured concurrency
    /// ceiling, and writes one rendered line per input occurrence to the
    /// output file in completion order.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be opened or read
    /// - The output file cannot be created or written
    pub async fn run_flatten(config: Config) -> Result<FlattenReport> {
        let domains = read_domain_list(&config.file).await?;
        let total = domains.len();
        info!("Total domains to flatten: {}", total);

        let resolver = init_resolver();
        let source: Arc<dyn TxtSource> = Arc::new(ResolverTxtSource::new(resolver));

        let start_time = std::time::Instant::now();
        let error_stats = ErrorStats::new();
        let progress = Arc::new(RunProgress::new());

        let cancel = CancellationToken::new();
        let cancel_logging = cancel.child_token();
        let progress_for_logging = Arc::clone(&progress);
        let logging_task = Some(tokio::task::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(
                            start_time,
                            &progress_for_logging.completed,
                            &progress_for_logging.failed,
                            total,
                        );
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        }));

        let outcomes = run_with_source(
            domains,
            source,
            config.max_concurrency,
            &error_stats,
            &progress,
        )
        .await;

        shutdown_gracefully(cancel, logging_task).await;

        let mut output = tokio::fs::File::create(&config.output)
            .await
            .with_context(|| format!("Failed to create output file {}", config.output.display()))?;
        for outcome in &outcomes {
            let line = render_outcome(outcome);
            output
                .write_all(line.as_bytes())
                .await
                .context("Failed to write result line")?;
            output
                .write_all(b"\n")
                .await
                .context("Failed to write result line")?;
        }
        output.flush().await.context("Failed to flush output file")?;

        log_progress(start_time, &progress.completed, &progress.failed, total);
        print_error_statistics(&error_stats);

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!("Results saved to {}", config.output.display());

        Ok(FlattenReport {
            total_domains: total,
            resolved: progress.completed.load(Ordering::SeqCst),
            failed: progress.failed.load(Ordering::SeqCst),
            output_path: config.output.clone(),
            elapsed_seconds,
        })
    }
}
