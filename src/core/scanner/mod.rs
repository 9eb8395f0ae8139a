//! # Scanner Module
//!
//! Runs the external duplicate scanner that produces the grouped JSON report.
//!
//! The scanner itself is a black box: it is handed a directory and a report
//! path, and it exits with a status code. Exit codes 0 and 11 are success.
//!
//! ## Example
//! ```rust,ignore
//! use czk_planner::core::scanner::{CzkawkaCli, DuplicateScanner, ScanRequest};
//!
//! let scanner = CzkawkaCli::locate()?;
//! let outcome = scanner.scan(&request)?;
//! ```

mod czkawka;
mod settings;

pub use czkawka::{
    build_command, format_command, run_command, CzkawkaCli, CZKAWKA_BINARY, SUCCESS_CODES,
};
pub use settings::{
    HashAlgorithm, ImageSimilarity, ResizeFilter, ScannerSettings, HASH_SIZES, MAX_VIDEO_TOLERANCE,
};

use crate::core::inventory::MediaKind;
use crate::error::ScannerError;
use std::path::PathBuf;

/// Everything a scanner needs for one media pass
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub kind: MediaKind,
    pub target_dir: PathBuf,
    /// Where the scanner writes its grouped JSON report
    pub report_path: PathBuf,
    /// When false the scanner deletes duplicates
    pub dry_run: bool,
    pub settings: ScannerSettings,
}

/// Captured result of a successful scanner run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Trait for duplicate scanners
///
/// Implement this trait to substitute the external binary (e.g., for testing).
pub trait DuplicateScanner {
    /// Printable form of what `scan` will run
    fn describe(&self, request: &ScanRequest) -> String;

    /// Run the scan, writing the report to `request.report_path`
    fn scan(&self, request: &ScanRequest) -> Result<ScanOutcome, ScannerError>;
}
