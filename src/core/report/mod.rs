//! # Report Module
//!
//! The flat CSV artifact and the views derived from it.
//!
//! ## Columns
//! | Column            | Content                                  |
//! |-------------------|------------------------------------------|
//! | `index`           | 1-based row number after sorting         |
//! | `file_to_keep`    | path kept for the group                  |
//! | `files_to_remove` | JSON array of removed paths              |
//! | `count`           | number of removed paths                  |
//!
//! Column order is part of the contract with downstream readers.

mod csv_io;
mod expanded;
mod preview;

pub use csv_io::{read_rows, read_rows_file, write_csv, write_csv_file};
pub use expanded::{expand_rows, write_expanded_csv, write_expanded_csv_file, ExpandedRow};
pub use preview::{build_preview, pretty_table, Preview, PreviewRow, TextTable};

/// Header of the duplicate CSV, in order
pub const CSV_COLUMNS: [&str; 4] = ["index", "file_to_keep", "files_to_remove", "count"];
