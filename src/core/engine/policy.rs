//! Keep policies: which file of a group survives.

use crate::core::loader::DuplicateItem;
use std::cmp::Ordering;

/// Strategy trait for ordering the items of a duplicate group.
///
/// The item that sorts first is kept; the rest are removed in sorted order.
pub trait KeepPolicy: Send + Sync {
    /// Total order over items, "best to keep" first
    fn compare(&self, a: &DuplicateItem, b: &DuplicateItem) -> Ordering;

    /// Human-readable description of the policy
    fn description(&self) -> String;
}

/// AEB ordering: largest size, then oldest modification time, then path.
///
/// This mirrors the scanner's own `-D AEB` delete method so the projected
/// plan matches what the scanner deletes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestOldestPolicy;

impl KeepPolicy for LargestOldestPolicy {
    fn compare(&self, a: &DuplicateItem, b: &DuplicateItem) -> Ordering {
        b.size
            .cmp(&a.size)
            .then(a.modified_date.cmp(&b.modified_date))
            .then_with(|| a.path.cmp(&b.path))
    }

    fn description(&self) -> String {
        "Keep the largest file, then the oldest, then the first path alphabetically".to_string()
    }
}
