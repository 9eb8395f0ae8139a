//! `czkawka_cli` discovery, command building and execution.

use super::{DuplicateScanner, ScanOutcome, ScanRequest, ScannerSettings};
use crate::core::inventory::MediaKind;
use crate::error::ScannerError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Name of the scanner binary looked up on PATH
pub const CZKAWKA_BINARY: &str = "czkawka_cli";

/// Exit codes treated as success; 11 means duplicates were found
pub const SUCCESS_CODES: [i32; 2] = [0, 11];

/// Build the argument vector for one media scan.
///
/// Both media use the scanner's AEB delete method so that a destructive
/// run removes exactly what the projected plan lists.
pub fn build_command(
    executable: &Path,
    kind: MediaKind,
    target_dir: &Path,
    report_path: &Path,
    dry_run: bool,
    settings: &ScannerSettings,
) -> Vec<String> {
    let mut command = vec![executable.display().to_string()];

    match kind {
        MediaKind::Images => command.extend([
            "image".to_string(),
            "-d".to_string(),
            target_dir.display().to_string(),
            "-s".to_string(),
            settings.image_similarity.as_str().to_string(),
            "-c".to_string(),
            settings.hash_size.to_string(),
            "-g".to_string(),
            settings.hash_algorithm.as_str().to_string(),
            "-z".to_string(),
            settings.image_filter.as_str().to_string(),
        ]),
        MediaKind::Videos => command.extend([
            "video".to_string(),
            "-d".to_string(),
            target_dir.display().to_string(),
            "-t".to_string(),
            settings.video_tolerance.to_string(),
        ]),
    }

    command.extend([
        "-D".to_string(),
        "AEB".to_string(),
        "-p".to_string(),
        report_path.display().to_string(),
        "-W".to_string(),
    ]);

    if dry_run {
        command.push("--dry-run".to_string());
    }

    command
}

/// Render a command as a single shell-safe line
pub fn format_command(command: &[String]) -> String {
    command
        .iter()
        .map(|token| shell_quote(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(token: &str) -> String {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c);
    if token.is_empty() {
        "''".to_string()
    } else if token.chars().all(is_safe) {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', "'\"'\"'"))
    }
}

/// Run a command to completion and enforce the success exit codes
pub fn run_command(command: &[String]) -> Result<ScanOutcome, ScannerError> {
    let rendered = format_command(command);
    let (program, args) = command.split_first().ok_or_else(|| ScannerError::Spawn {
        command: rendered.clone(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
    })?;

    debug!(command = %rendered, "running scanner");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| ScannerError::Spawn {
            command: rendered.clone(),
            source,
        })?;

    let outcome = ScanOutcome {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    };

    if !SUCCESS_CODES.contains(&outcome.exit_code) {
        return Err(ScannerError::Failed {
            command: rendered,
            exit_code: outcome.exit_code,
            stdout: outcome.stdout,
            stderr: outcome.stderr,
        });
    }

    info!(exit_code = outcome.exit_code, "scanner finished");
    Ok(outcome)
}

/// Scanner backed by the installed `czkawka_cli` binary
#[derive(Debug, Clone)]
pub struct CzkawkaCli {
    executable: PathBuf,
}

impl CzkawkaCli {
    pub fn new(executable: PathBuf) -> Self {
        Self { executable }
    }

    /// Locate `czkawka_cli` on PATH
    pub fn locate() -> Result<Self, ScannerError> {
        Self::locate_named(CZKAWKA_BINARY)
    }

    fn locate_named(name: &str) -> Result<Self, ScannerError> {
        which::which(name)
            .map(Self::new)
            .map_err(|_| ScannerError::NotInstalled {
                name: name.to_string(),
            })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, request: &ScanRequest) -> Vec<String> {
        build_command(
            &self.executable,
            request.kind,
            &request.target_dir,
            &request.report_path,
            request.dry_run,
            &request.settings,
        )
    }
}

impl DuplicateScanner for CzkawkaCli {
    fn describe(&self, request: &ScanRequest) -> String {
        format_command(&self.command(request))
    }

    fn scan(&self, request: &ScanRequest) -> Result<ScanOutcome, ScannerError> {
        run_command(&self.command(request))
    }
}
