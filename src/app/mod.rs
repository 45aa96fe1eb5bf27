//! Main application modules.
//!
//! Utilities for domain-list input, progress logging, shutdown handling, and
//! statistics printing used by the run loop.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use input::read_domain_list;
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::print_error_statistics;
