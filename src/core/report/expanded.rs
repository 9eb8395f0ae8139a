//! One row per removed file, for tabular querying.

use crate::core::engine::DuplicateRow;
use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedRow {
    pub group_index: usize,
    pub file_to_keep: String,
    pub remove_path: String,
    /// 1-based position within the group's removal list
    pub remove_ordinal: usize,
    pub group_remove_count: usize,
}

pub fn expand_rows(rows: &[DuplicateRow]) -> Vec<ExpandedRow> {
    rows.iter()
        .flat_map(|row| {
            row.files_to_remove
                .iter()
                .enumerate()
                .map(move |(ordinal, remove_path)| ExpandedRow {
                    group_index: row.index,
                    file_to_keep: row.file_to_keep.clone(),
                    remove_path: remove_path.clone(),
                    remove_ordinal: ordinal + 1,
                    group_remove_count: row.count,
                })
        })
        .collect()
}

pub fn write_expanded_csv<W: Write>(rows: &[ExpandedRow], writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        // serialize() only emits the header alongside the first record
        csv_writer.write_record([
            "group_index",
            "file_to_keep",
            "remove_path",
            "remove_ordinal",
            "group_remove_count",
        ])?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_expanded_csv_file(rows: &[ExpandedRow], path: &Path) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_expanded_csv(rows, std::io::BufWriter::new(file))
}
