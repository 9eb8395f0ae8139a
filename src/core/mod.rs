//! # Core Module
//!
//! The front-end agnostic planning engine.
//!
//! ## Modules
//! - `loader` - Validates the scanner's grouped JSON report
//! - `engine` - Decides which file of each group to keep
//! - `summary` - Derives headline counters from the rows
//! - `report` - Writes and reads the flat CSV artifacts
//! - `inventory` - Counts candidate media files
//! - `scanner` - Runs the external duplicate scanner
//! - `workflow` - Orchestrates a full run

pub mod engine;
pub mod inventory;
pub mod loader;
pub mod report;
pub mod scanner;
pub mod summary;
pub mod workflow;

// Re-export commonly used types
pub use engine::{build_rows, DuplicateRow, Mode};
pub use inventory::MediaKind;
pub use loader::{DuplicateGroup, DuplicateItem};
pub use summary::MediaSummary;
