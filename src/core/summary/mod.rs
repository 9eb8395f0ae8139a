//! # Summary Module
//!
//! Headline counters for one media scan, always derived from the rows.

use crate::core::engine::DuplicateRow;
use serde::{Deserialize, Serialize};

/// Aggregate counts for a media scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSummary {
    /// Candidate media files found under the target directory
    pub total_found: usize,
    /// Non-empty duplicate groups
    pub duplicate_groups: usize,
    /// Sum of every row's removal count
    pub duplicates_to_remove: usize,
    /// `total_found - duplicates_to_remove`, clamped at zero
    pub after_remove_estimate: usize,
}

impl MediaSummary {
    pub fn derive(total_found: usize, duplicate_groups: usize, rows: &[DuplicateRow]) -> Self {
        let duplicates_to_remove = rows.iter().map(|row| row.count).sum();
        Self {
            total_found,
            duplicate_groups,
            duplicates_to_remove,
            after_remove_estimate: total_found.saturating_sub(duplicates_to_remove),
        }
    }

    /// Field-wise sum across media scans
    pub fn combine(summaries: &[MediaSummary]) -> Self {
        summaries.iter().fold(Self::default(), |acc, s| Self {
            total_found: acc.total_found + s.total_found,
            duplicate_groups: acc.duplicate_groups + s.duplicate_groups,
            duplicates_to_remove: acc.duplicates_to_remove + s.duplicates_to_remove,
            after_remove_estimate: acc.after_remove_estimate + s.after_remove_estimate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, removals: usize) -> DuplicateRow {
        DuplicateRow::new(
            index,
            format!("/keep/{index}"),
            (0..removals).map(|n| format!("/remove/{index}/{n}")).collect(),
        )
    }

    #[test]
    fn derives_counts_from_rows() {
        let summary = MediaSummary::derive(10, 2, &[row(1, 3), row(2, 1)]);

        assert_eq!(summary.total_found, 10);
        assert_eq!(summary.duplicate_groups, 2);
        assert_eq!(summary.duplicates_to_remove, 4);
        assert_eq!(summary.after_remove_estimate, 6);
    }

    #[test]
    fn estimate_clamps_at_zero() {
        // Scanner may report files the extension count missed
        let summary = MediaSummary::derive(2, 1, &[row(1, 5)]);

        assert_eq!(summary.duplicates_to_remove, 5);
        assert_eq!(summary.after_remove_estimate, 0);
    }

    #[test]
    fn empty_rows_leave_total_untouched() {
        let summary = MediaSummary::derive(7, 0, &[]);
        assert_eq!(summary.after_remove_estimate, 7);
    }

    #[test]
    fn combine_sums_each_field() {
        let images = MediaSummary::derive(10, 2, &[row(1, 3)]);
        let videos = MediaSummary::derive(1, 1, &[row(1, 4)]);

        let combined = MediaSummary::combine(&[images, videos]);

        assert_eq!(combined.total_found, 11);
        assert_eq!(combined.duplicate_groups, 3);
        assert_eq!(combined.duplicates_to_remove, 7);
        // Sum of clamped per-media estimates (7 + 0), not recomputed
        assert_eq!(combined.after_remove_estimate, 7);
    }
}
