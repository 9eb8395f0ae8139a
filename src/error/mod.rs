//! # Error Module
//!
//! Error types for the duplicate report planner.
//!
//! ## Design Principles
//! - **Never panic** on report data - return errors instead
//! - **Include context** - file paths, group/item coordinates, exit codes
//! - **Fail early** - malformed scanner output aborts before any row is written

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum CzkError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Scanner(#[from] ScannerError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("{0}")]
    Config(String),
}

/// Shape violations in the grouped duplicate payload.
///
/// Group and item numbers are 1-based, matching how the scanner report
/// is read by humans.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Expected top-level array")]
    NotAnArray,

    #[error("Expected group #{group} to be an array")]
    GroupNotArray { group: usize },

    #[error("Expected group #{group} item #{item} to be an object")]
    ItemNotObject { group: usize, item: usize },

    #[error("Expected non-empty string 'path' in group #{group} item #{item}")]
    MissingPath { group: usize, item: usize },
}

/// Errors raised while loading a scanner report from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read duplicate report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON file: {path} ({source})")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{source} in {path}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Errors around the external duplicate scanner process
#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("{name} is not installed or not available in PATH.")]
    NotInstalled { name: String },

    #[error("Failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Czkawka command failed.\nCommand: {command}\nExit code: {exit_code}\nstdout:\n{stdout}\nstderr:\n{stderr}"
    )]
    Failed {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
}

/// Errors while writing or reading the flat report artifacts
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to access report file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode removal list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, CzkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_coordinates() {
        let error = ValidationError::MissingPath { group: 3, item: 2 };
        let message = error.to_string();
        assert!(message.contains("group #3"));
        assert!(message.contains("item #2"));
        assert!(message.contains("'path'"));
    }

    #[test]
    fn load_error_includes_file_path() {
        let error = LoadError::Invalid {
            path: PathBuf::from("/reports/dupes.json"),
            source: ValidationError::GroupNotArray { group: 1 },
        };
        let message = error.to_string();
        assert!(message.contains("/reports/dupes.json"));
        assert!(message.contains("group #1"));
    }

    #[test]
    fn scanner_failure_reports_exit_code_and_streams() {
        let error = ScannerError::Failed {
            command: "czkawka_cli image".to_string(),
            exit_code: 2,
            stdout: "out".to_string(),
            stderr: "boom".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("Exit code: 2"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn top_level_error_is_transparent() {
        let error: CzkError = ScannerError::NotInstalled {
            name: "czkawka_cli".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "czkawka_cli is not installed or not available in PATH."
        );
    }
}
