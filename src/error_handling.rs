//! Error taxonomy and failure statistics.

use log::SetLoggerError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    #[allow(dead_code)] // Reserved for future use if fallback fails
    DnsResolverError(String),
}

/// Kinds of failure that can occur while flattening a domain.
///
/// The first three mirror the typed outcomes of a TXT lookup; the last is
/// caught only at the driver boundary when a traversal dies with an
/// unexpected internal fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum LookupErrorKind {
    /// The name does not resolve at all (NXDOMAIN).
    NoSuchDomain,
    /// The name resolves but has no TXT records.
    NoTxtAnswer,
    /// Any other lookup failure: timeout, servfail, malformed response.
    OtherLookupError,
    /// A traversal task died with an unexpected internal fault.
    TraversalPanic,
}

impl LookupErrorKind {
    /// Human-readable label used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupErrorKind::NoSuchDomain => "No such domain",
            LookupErrorKind::NoTxtAnswer => "No TXT answer",
            LookupErrorKind::OtherLookupError => "Other lookup error",
            LookupErrorKind::TraversalPanic => "Traversal panic",
        }
    }
}

/// Thread-safe failure statistics tracker.
///
/// Tracks the count of each failure kind using atomic counters, allowing
/// concurrent access from multiple tasks. All kinds are initialized to zero
/// on creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using
/// `Arc`.
pub struct ErrorStats {
    errors: HashMap<LookupErrorKind, AtomicUsize>,
}

impl ErrorStats {
    /// Creates a tracker with every failure kind initialized to zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in LookupErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }
        ErrorStats { errors }
    }

    /// Increments the counter for `kind`.
    pub fn increment(&self, kind: LookupErrorKind) {
        // All LookupErrorKind variants are initialized in new(), so unwrap() is safe
        self.errors
            .get(&kind)
            .unwrap()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current count for `kind`.
    pub fn get_count(&self, kind: LookupErrorKind) -> usize {
        // All LookupErrorKind variants are initialized in new(), so unwrap() is safe
        self.errors.get(&kind).unwrap().load(Ordering::SeqCst)
    }

    /// Returns the total count across all failure kinds.
    pub fn total(&self) -> usize {
        LookupErrorKind::iter().map(|kind| self.get_count(kind)).sum()
    }
}

impl Default for ErrorStats {
    fn default() -> Self {
        Self::new()
    }
}
