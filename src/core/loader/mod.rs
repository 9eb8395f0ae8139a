//! # Loader Module
//!
//! Reads the grouped duplicate report written by the scanner.
//!
//! The payload is an array of groups, each group an array of objects:
//! ```json
//! [
//!   [
//!     {"path": "/photos/a.jpg", "size": 100, "modified_date": 1700000000},
//!     {"path": "/photos/b.jpg", "size": 100, "modified_date": 1700000500}
//!   ]
//! ]
//! ```
//!
//! The whole structure is validated before anything is returned. `size` and
//! `modified_date` only break ties, so unusable values fall back to 0.

use crate::error::{LoadError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// One file record inside a duplicate group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateItem {
    /// File path as reported by the scanner (identity of the item)
    pub path: String,
    /// File size in bytes
    pub size: i64,
    /// Modification time as epoch seconds
    pub modified_date: i64,
}

impl DuplicateItem {
    pub fn new(path: impl Into<String>, size: i64, modified_date: i64) -> Self {
        Self {
            path: path.into(),
            size,
            modified_date,
        }
    }
}

/// Files the scanner believes are duplicates of one another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub items: Vec<DuplicateItem>,
}

impl DuplicateGroup {
    pub fn new(items: Vec<DuplicateItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Paths in input order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.path.as_str())
    }
}

/// Number of groups that will actually produce rows
pub fn count_non_empty(groups: &[DuplicateGroup]) -> usize {
    groups.iter().filter(|group| !group.is_empty()).count()
}

/// Validate and convert an already-parsed JSON value into groups
pub fn parse_groups(raw: &Value) -> Result<Vec<DuplicateGroup>, ValidationError> {
    let raw_groups = raw.as_array().ok_or(ValidationError::NotAnArray)?;

    let mut groups = Vec::with_capacity(raw_groups.len());
    for (group_index, raw_group) in raw_groups.iter().enumerate() {
        let group = group_index + 1;
        let raw_items = raw_group
            .as_array()
            .ok_or(ValidationError::GroupNotArray { group })?;

        let mut items = Vec::with_capacity(raw_items.len());
        for (item_index, raw_item) in raw_items.iter().enumerate() {
            let item = item_index + 1;
            let object = raw_item
                .as_object()
                .ok_or(ValidationError::ItemNotObject { group, item })?;
            items.push(parse_item(object, group, item)?);
        }

        groups.push(DuplicateGroup::new(items));
    }

    Ok(groups)
}

/// Read, parse and validate a scanner report file
pub fn load_duplicate_groups(path: &Path) -> Result<Vec<DuplicateGroup>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: Value = serde_json::from_str(&text).map_err(|source| LoadError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    let groups = parse_groups(&raw).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        groups = groups.len(),
        "loaded duplicate groups"
    );

    Ok(groups)
}

fn parse_item(
    object: &Map<String, Value>,
    group: usize,
    item: usize,
) -> Result<DuplicateItem, ValidationError> {
    let path = match object.get("path") {
        Some(Value::String(path)) if !path.is_empty() => path.clone(),
        _ => return Err(ValidationError::MissingPath { group, item }),
    };

    Ok(DuplicateItem {
        path,
        size: coerce_int(object.get("size")),
        modified_date: coerce_int(object.get("modified_date")),
    })
}

/// Integers pass through, floats truncate toward zero, anything else is 0
fn coerce_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))
            .unwrap_or(0),
        _ => 0,
    }
}
