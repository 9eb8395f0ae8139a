//! # czk-planner
//!
//! Turns a duplicate scanner's grouped report into an auditable plan:
//! for every group, which file is kept and which files are removed.
//!
//! ## Core Philosophy
//! - **Deterministic** - the same report always yields the same rows
//! - **Explainable** - keep the largest, then the oldest, then the first path
//! - **Honest after deletion** - reconcile the plan with what is left on disk
//!
//! ## Architecture
//! - `core` - Loader, decision engine, report artifacts and run workflow
//! - `error` - Error types with file and group context
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{CzkError, Result};

/// Initialize tracing for the application
///
/// Reads `RUST_LOG` when set; otherwise logs warnings, or debug output when
/// `verbose` is true. Logs go to stderr so stdout stays parseable.
/// Calling this more than once is harmless.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
