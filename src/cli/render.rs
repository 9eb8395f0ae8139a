//! Terminal reporters for a run.

use console::{style, Term};
use czk_planner::core::engine::{KeepPolicy, LargestOldestPolicy, Mode};
use czk_planner::core::inventory::MediaKind;
use czk_planner::core::report::{build_preview, pretty_table, read_rows_file, PreviewRow};
use czk_planner::core::scanner::ScanOutcome;
use czk_planner::core::summary::MediaSummary;
use czk_planner::core::workflow::{MediaRunResult, RunConfig, RunReporter, RunResult};
use czk_planner::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Projected => "DRY RUN",
        Mode::Reconciled => "EXECUTE",
    }
}

/// The workflow builds rows with the default policy
fn keep_policy() -> String {
    LargestOldestPolicy.description()
}

fn media_list(media: &[MediaKind]) -> String {
    media
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format with thousands separators
pub fn format_number(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn summary_lines(summary: &MediaSummary) -> [(&'static str, usize); 4] {
    [
        ("total_found", summary.total_found),
        ("duplicate_groups", summary.duplicate_groups),
        ("duplicates_to_remove", summary.duplicates_to_remove),
        ("after_remove_estimate", summary.after_remove_estimate),
    ]
}

/// Styled output with a spinner while the scanner runs
pub struct PrettyReporter {
    term: Term,
    top: usize,
    spinner: Option<ProgressBar>,
}

impl PrettyReporter {
    pub fn new(top: usize) -> Self {
        Self {
            term: Term::stdout(),
            top,
            spinner: None,
        }
    }

    fn line(&self, text: impl AsRef<str>) {
        self.term.write_line(text.as_ref()).ok();
    }

    fn key_value(&self, key: &str, value: impl std::fmt::Display) {
        self.line(format!("  {:>22}  {}", style(key).bold().cyan(), value));
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn render_preview(&self, rows: &[PreviewRow], shown: usize, total: usize) {
        self.line(format!(
            "{}",
            style(format!("table_rows_shown: {}/{}", shown, total))
                .bold()
                .cyan()
        ));

        if rows.is_empty() {
            self.line("(no duplicate rows)");
            return;
        }

        let index_width = rows
            .iter()
            .map(|row| row.index.to_string().len())
            .max()
            .unwrap_or(1)
            .max(1);
        let keep_width = rows
            .iter()
            .map(|row| row.file_to_keep.chars().count())
            .max()
            .unwrap_or(0)
            .max("file_to_keep".len());

        self.line(format!(
            "{:>iw$}  {:<kw$}  {:>12}  {}",
            style("#").bold(),
            style("file_to_keep").bold(),
            style("remove_count").bold(),
            style("first_remove").bold(),
            iw = index_width,
            kw = keep_width,
        ));

        for row in rows {
            self.line(format!(
                "{:>iw$}  {:<kw$}  {:>12}  {}",
                row.index,
                row.file_to_keep,
                style(row.remove_count).yellow(),
                row.first_remove,
                iw = index_width,
                kw = keep_width,
            ));
        }
    }
}

impl RunReporter for PrettyReporter {
    fn run_started(&mut self, config: &RunConfig) {
        self.line(format!("{}", style("czk run").bold().cyan()));
        self.key_value("mode", mode_label(config.mode));
        self.key_value("target_dir", config.target_dir.display());
        self.key_value("out_dir", config.out_dir.display());
        self.key_value("timestamp", &config.timestamp);
        self.key_value("media", media_list(&config.media));
        self.key_value("keep_policy", keep_policy());
    }

    fn media_started(&mut self, kind: MediaKind, mode: Mode, command: &str) {
        let title = format!("{} - {}", kind.as_str().to_uppercase(), mode_label(mode));
        let title = match mode {
            Mode::Projected => style(title).bold().yellow(),
            Mode::Reconciled => style(title).bold().magenta(),
        };

        self.line("");
        self.line(format!("{}", title));
        self.key_value("command", command);

        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(format!("scanning {}", kind));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn scanner_finished(&mut self, _kind: MediaKind, outcome: &ScanOutcome) {
        self.stop_spinner();
        let code = if outcome.exit_code == 0 {
            style(outcome.exit_code).green()
        } else {
            style(outcome.exit_code).yellow()
        };
        self.key_value("czkawka_exit_code", code);
    }

    fn media_finished(&mut self, result: &MediaRunResult) -> Result<()> {
        self.line("");
        self.line(format!("{}", style("metrics").bold().underlined()));
        for (name, value) in summary_lines(&result.summary) {
            self.key_value(name, format_number(value));
        }

        self.line("");
        self.line(format!("{}", style("artifacts").bold().underlined()));
        self.key_value("json", result.json_path.display());
        self.key_value("csv", result.csv_path.display());
        if let Some(expanded) = &result.expanded_path {
            self.key_value("expanded", expanded.display());
        }

        // Read the flushed CSV back, as every downstream consumer does
        let rows = read_rows_file(&result.csv_path)?;
        let preview = build_preview(&rows, self.top);
        self.line("");
        self.render_preview(&preview.rows, preview.shown_rows, preview.total_rows);
        Ok(())
    }

    fn run_finished(&mut self, result: &RunResult) {
        self.line("");
        self.line(format!(
            "{}",
            style("combined summary").bold().green().underlined()
        ));
        for (name, value) in summary_lines(&result.combined) {
            self.key_value(name, format_number(value));
        }

        if result.mode == Mode::Projected {
            self.line("");
            self.line(format!(
                "{}",
                style("Dry run: no files were deleted. Review the CSV before running execute.").dim()
            ));
        }
    }
}

impl Drop for PrettyReporter {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

/// Unstyled `key: value` output with the fixed-width CSV table
pub struct PlainReporter {
    top: usize,
}

impl PlainReporter {
    pub fn new(top: usize) -> Self {
        Self { top }
    }
}

impl RunReporter for PlainReporter {
    fn run_started(&mut self, config: &RunConfig) {
        println!("mode: {}", config.mode);
        println!("target_dir: {}", config.target_dir.display());
        println!("out_dir: {}", config.out_dir.display());
        println!("timestamp: {}", config.timestamp);
        println!("media: {}", media_list(&config.media));
        println!("keep_policy: {}", keep_policy());
    }

    fn media_started(&mut self, kind: MediaKind, mode: Mode, command: &str) {
        println!();
        println!("== {} ({}) ==", kind.as_str().to_uppercase(), mode_label(mode));
        println!("Command: {}", command);
    }

    fn scanner_finished(&mut self, _kind: MediaKind, outcome: &ScanOutcome) {
        println!("Czkawka exit code: {}", outcome.exit_code);
    }

    fn media_finished(&mut self, result: &MediaRunResult) -> Result<()> {
        for (name, value) in summary_lines(&result.summary) {
            println!("{}: {}", name, value);
        }
        println!("json: {}", result.json_path.display());
        println!("csv: {}", result.csv_path.display());
        if let Some(expanded) = &result.expanded_path {
            println!("expanded: {}", expanded.display());
        }

        let rows = read_rows_file(&result.csv_path)?;
        let table = pretty_table(&rows, self.top);
        println!("table_rows_shown: {}/{}", table.shown_rows, table.total_rows);
        println!("{}", table.text);
        Ok(())
    }

    fn run_finished(&mut self, result: &RunResult) {
        println!();
        println!("== COMBINED SUMMARY ==");
        for (name, value) in summary_lines(&result.combined) {
            println!("{}: {}", name, value);
        }
    }
}
