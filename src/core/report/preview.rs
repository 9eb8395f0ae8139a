//! Bounded previews of the duplicate rows for terminal output.

use crate::core::engine::DuplicateRow;
use serde::Serialize;

/// Condensed row for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub index: usize,
    pub file_to_keep: String,
    pub remove_count: usize,
    /// First removed path, or `-` when nothing is removed
    pub first_remove: String,
}

impl From<&DuplicateRow> for PreviewRow {
    fn from(row: &DuplicateRow) -> Self {
        Self {
            index: row.index,
            file_to_keep: row.file_to_keep.clone(),
            remove_count: row.count,
            first_remove: row
                .files_to_remove
                .first()
                .cloned()
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// The first `top` rows plus how many exist in total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub rows: Vec<PreviewRow>,
    pub total_rows: usize,
    pub shown_rows: usize,
}

pub fn build_preview(rows: &[DuplicateRow], top: usize) -> Preview {
    let preview: Vec<PreviewRow> = rows.iter().take(top).map(PreviewRow::from).collect();
    Preview {
        shown_rows: preview.len(),
        total_rows: rows.len(),
        rows: preview,
    }
}

/// Plain-text table of the raw CSV fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    pub text: String,
    pub total_rows: usize,
    pub shown_rows: usize,
}

const HEADER: [&str; 4] = ["#", "file_to_keep", "files_to_remove", "count"];
const MIN_WIDTHS: [usize; 4] = [4, 70, 90, 6];
const MAX_WIDTHS: [usize; 4] = [6, 100, 140, 10];

pub fn pretty_table(rows: &[DuplicateRow], top: usize) -> TextTable {
    let shown = &rows[..top.min(rows.len())];
    if shown.is_empty() {
        return TextTable {
            text: "(no duplicate rows)".to_string(),
            total_rows: rows.len(),
            shown_rows: 0,
        };
    }

    let cells: Vec<[String; 4]> = shown.iter().map(row_cells).collect();

    let mut widths = MIN_WIDTHS;
    for row in &cells {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(MAX_WIDTHS[col].min(cell.chars().count()));
        }
    }

    let format_row = |values: [&str; 4]| -> String {
        values
            .iter()
            .zip(widths.iter())
            .map(|(value, width)| format!("{:<width$}", clip(value, *width), width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let separator = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = vec![format_row(HEADER), separator];
    for row in &cells {
        lines.push(format_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]));
    }

    TextTable {
        text: lines.join("\n"),
        total_rows: rows.len(),
        shown_rows: shown.len(),
    }
}

fn row_cells(row: &DuplicateRow) -> [String; 4] {
    [
        row.index.to_string(),
        row.file_to_keep.clone(),
        serde_json::to_string(&row.files_to_remove).unwrap_or_else(|_| "[]".to_string()),
        row.count.to_string(),
    ]
}

/// Cut to `width` characters, marking the cut with `...`
fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }
    let kept: String = value.chars().take(width - 3).collect();
    format!("{kept}...")
}
