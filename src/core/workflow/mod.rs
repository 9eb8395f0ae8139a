//! # Workflow Module
//!
//! Orchestrates one run over the selected media.
//!
//! ## Stages (per media)
//! 1. **Count** - candidate files under the target directory
//! 2. **Scan** - external scanner writes the grouped JSON report
//! 3. **Load** - validate the report into groups
//! 4. **Decide** - build sorted, numbered rows for the run mode
//! 5. **Write** - flush the CSV (and optional expanded CSV) to disk
//! 6. **Summarize** - derive the media summary from the rows
//!
//! Progress is surfaced through [`RunReporter`] so any front end can render it.

mod artifacts;

pub use artifacts::{artifact_paths, run_timestamp, sanitize_name, ArtifactPaths};

use crate::core::engine::{Mode, RowBuilder};
use crate::core::inventory::{count_media_files, MediaKind};
use crate::core::loader::{count_non_empty, load_duplicate_groups};
use crate::core::report::{expand_rows, write_csv_file, write_expanded_csv_file};
use crate::core::scanner::{DuplicateScanner, ScanOutcome, ScanRequest, ScannerSettings};
use crate::core::summary::MediaSummary;
use crate::error::{CzkError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolved configuration for a run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: Mode,
    /// Canonical directory handed to the scanner
    pub target_dir: PathBuf,
    /// Canonical directory receiving the artifacts
    pub out_dir: PathBuf,
    pub timestamp: String,
    pub media: Vec<MediaKind>,
    pub settings: ScannerSettings,
    pub write_expanded: bool,
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::new()
    }

    /// Projected runs are dry runs; reconciled runs follow real deletion
    pub fn dry_run(&self) -> bool {
        self.mode == Mode::Projected
    }

    /// Prefix shared by every artifact of this run
    pub fn base_name(&self) -> String {
        let name = self
            .target_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        sanitize_name(&name)
    }
}

/// Builder for run configuration
pub struct RunConfigBuilder {
    mode: Mode,
    target_dir: PathBuf,
    out_dir: PathBuf,
    timestamp: Option<String>,
    media: Vec<MediaKind>,
    settings: ScannerSettings,
    write_expanded: bool,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self {
            mode: Mode::Projected,
            target_dir: PathBuf::from("."),
            out_dir: PathBuf::from("."),
            timestamp: None,
            media: MediaKind::ALL.to_vec(),
            settings: ScannerSettings::default(),
            write_expanded: false,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = dir.into();
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Fix the artifact timestamp instead of using the current time
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn media(mut self, media: Vec<MediaKind>) -> Self {
        self.media = media;
        self
    }

    pub fn settings(mut self, settings: ScannerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn write_expanded(mut self, write: bool) -> Self {
        self.write_expanded = write;
        self
    }

    /// Validate settings, resolve directories and create the output directory
    pub fn build(self) -> Result<RunConfig> {
        self.settings.validate()?;
        if self.media.is_empty() {
            return Err(CzkError::Config("No media selected".to_string()));
        }

        let target = expand_home(&self.target_dir);
        let target_dir = target
            .canonicalize()
            .ok()
            .filter(|dir| dir.is_dir())
            .ok_or_else(|| {
                CzkError::Config(format!(
                    "Directory does not exist or is not a directory: {}",
                    target.display()
                ))
            })?;

        let out = expand_home(&self.out_dir);
        std::fs::create_dir_all(&out).map_err(|e| {
            CzkError::Config(format!("Cannot create output directory {}: {}", out.display(), e))
        })?;
        let out_dir = out.canonicalize().map_err(|e| {
            CzkError::Config(format!("Cannot resolve output directory {}: {}", out.display(), e))
        })?;

        Ok(RunConfig {
            mode: self.mode,
            target_dir,
            out_dir,
            timestamp: self.timestamp.unwrap_or_else(run_timestamp),
            media: self.media,
            settings: self.settings,
            write_expanded: self.write_expanded,
        })
    }
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace a leading `~` with the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

/// Result of one media pass
#[derive(Debug, Clone, Serialize)]
pub struct MediaRunResult {
    pub kind: MediaKind,
    pub summary: MediaSummary,
    pub exit_code: i32,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub expanded_path: Option<PathBuf>,
}

/// Result of a full run
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub mode: Mode,
    pub media: Vec<MediaRunResult>,
    pub combined: MediaSummary,
}

/// Receives progress from a run
///
/// All methods default to doing nothing.
pub trait RunReporter {
    fn run_started(&mut self, _config: &RunConfig) {}

    fn media_started(&mut self, _kind: MediaKind, _mode: Mode, _command: &str) {}

    fn scanner_finished(&mut self, _kind: MediaKind, _outcome: &ScanOutcome) {}

    /// Called once the CSV is on disk, so the reporter may read it back
    fn media_finished(&mut self, _result: &MediaRunResult) -> Result<()> {
        Ok(())
    }

    fn run_finished(&mut self, _result: &RunResult) {}
}

/// Reporter that ignores everything
#[derive(Debug, Default)]
pub struct NullReporter;

impl RunReporter for NullReporter {}

/// Runs the scanner and the engine for each selected media
pub struct Workflow {
    config: RunConfig,
    scanner: Box<dyn DuplicateScanner>,
}

impl Workflow {
    pub fn new(config: RunConfig, scanner: Box<dyn DuplicateScanner>) -> Self {
        Self { config, scanner }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run every selected media in order
    pub fn run(&self, reporter: &mut dyn RunReporter) -> Result<RunResult> {
        reporter.run_started(&self.config);

        let mut media = Vec::with_capacity(self.config.media.len());
        for kind in &self.config.media {
            media.push(self.run_media(*kind, reporter)?);
        }

        let summaries: Vec<MediaSummary> = media.iter().map(|m| m.summary).collect();
        let result = RunResult {
            mode: self.config.mode,
            combined: MediaSummary::combine(&summaries),
            media,
        };

        reporter.run_finished(&result);
        Ok(result)
    }

    /// Count, scan, decide and write artifacts for one media
    pub fn run_media(&self, kind: MediaKind, reporter: &mut dyn RunReporter) -> Result<MediaRunResult> {
        let config = &self.config;
        let total_found = count_media_files(&config.target_dir, kind);
        let paths = artifact_paths(&config.out_dir, &config.base_name(), kind, &config.timestamp);

        let request = ScanRequest {
            kind,
            target_dir: config.target_dir.clone(),
            report_path: paths.json.clone(),
            dry_run: config.dry_run(),
            settings: config.settings.clone(),
        };

        reporter.media_started(kind, config.mode, &self.scanner.describe(&request));
        let outcome = self.scanner.scan(&request)?;
        reporter.scanner_finished(kind, &outcome);

        let groups = load_duplicate_groups(&paths.json)?;
        let rows = RowBuilder::new(config.mode).build_rows(&groups);
        write_csv_file(&rows, &paths.csv)?;

        let expanded_path = if config.write_expanded {
            write_expanded_csv_file(&expand_rows(&rows), &paths.expanded)?;
            Some(paths.expanded.clone())
        } else {
            None
        };

        let summary = MediaSummary::derive(total_found, count_non_empty(&groups), &rows);
        info!(
            %kind,
            csv = %paths.csv.display(),
            duplicates_to_remove = summary.duplicates_to_remove,
            "media pass complete"
        );

        let result = MediaRunResult {
            kind,
            summary,
            exit_code: outcome.exit_code,
            json_path: paths.json,
            csv_path: paths.csv,
            expanded_path,
        };

        reporter.media_finished(&result)?;
        Ok(result)
    }
}
