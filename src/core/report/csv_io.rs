//! Writing the duplicate CSV and reading it back.

use super::CSV_COLUMNS;
use crate::core::engine::DuplicateRow;
use crate::error::ReportError;
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// Write rows in the fixed column order
pub fn write_csv<W: Write>(rows: &[DuplicateRow], writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_COLUMNS)?;

    for row in rows {
        let removals = serde_json::to_string(&row.files_to_remove)?;
        csv_writer.write_record([
            row.index.to_string().as_str(),
            row.file_to_keep.as_str(),
            removals.as_str(),
            row.count.to_string().as_str(),
        ])?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write rows to a file, flushing before returning
pub fn write_csv_file(rows: &[DuplicateRow], path: &Path) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(rows, std::io::BufWriter::new(file))?;

    debug!(path = %path.display(), rows = rows.len(), "wrote duplicate csv");
    Ok(())
}

/// Read rows back, tolerating hand-edited or older files.
///
/// A bad `index` falls back to the row's position, a bad `files_to_remove`
/// becomes an empty list and a bad `count` falls back to the list length.
/// The legacy `#` header is accepted for `index`.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<DuplicateRow>, ReportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|header| header == name);
    let index_col = column("index").or_else(|| column("#"));
    let keep_col = column("file_to_keep");
    let remove_col = column("files_to_remove");
    let count_col = column("count");

    let mut rows = Vec::new();
    for (position, record) in csv_reader.records().enumerate() {
        let record = record?;
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

        let files_to_remove = parse_remove_list(field(remove_col));
        rows.push(DuplicateRow {
            index: field(index_col).trim().parse().unwrap_or(position + 1),
            file_to_keep: field(keep_col).to_string(),
            count: field(count_col)
                .trim()
                .parse()
                .unwrap_or(files_to_remove.len()),
            files_to_remove,
        });
    }

    Ok(rows)
}

/// Read rows back from a file
pub fn read_rows_file(path: &Path) -> Result<Vec<DuplicateRow>, ReportError> {
    let file = std::fs::File::open(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(std::io::BufReader::new(file))
}

fn parse_remove_list(raw: &str) -> Vec<String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(values)) => values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
