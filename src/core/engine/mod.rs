//! # Engine Module
//!
//! Turns duplicate groups into an ordered, numbered keep/remove plan.
//!
//! ## Modes
//! - **Projected** - decided from size, modification time and path alone.
//!   Used for dry runs.
//! - **Reconciled** - after the scanner deleted files, a group whose only
//!   survivor is known is reported with that survivor as the kept file.
//!
//! ## Row Assembly
//! 1. One decision per non-empty group
//! 2. Sort by removal count (descending), then kept path
//! 3. Number rows from 1 in that order

mod decision;
mod policy;
mod probe;

pub use decision::{project, reconcile, Decision};
pub use policy::{KeepPolicy, LargestOldestPolicy};
pub use probe::{ExistenceProbe, FsProbe};

use crate::core::loader::DuplicateGroup;
use serde::{Deserialize, Serialize};
use tracing::info;

/// How per-group decisions are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Safe preview, deterministic from the report alone
    #[default]
    Projected,
    /// Post-deletion accounting against the filesystem
    Reconciled,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Projected => write!(f, "projected"),
            Mode::Reconciled => write!(f, "reconciled"),
        }
    }
}

/// One output record per duplicate group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRow {
    /// 1-based position after the global sort
    pub index: usize,
    pub file_to_keep: String,
    pub files_to_remove: Vec<String>,
    /// Always `files_to_remove.len()`
    pub count: usize,
}

impl DuplicateRow {
    pub fn new(index: usize, file_to_keep: String, files_to_remove: Vec<String>) -> Self {
        let count = files_to_remove.len();
        Self {
            index,
            file_to_keep,
            files_to_remove,
            count,
        }
    }
}

/// Builds rows with a configurable keep policy and existence probe
pub struct RowBuilder {
    mode: Mode,
    policy: Box<dyn KeepPolicy>,
    probe: Box<dyn ExistenceProbe>,
}

impl RowBuilder {
    /// Create a builder using the default policy and the real filesystem
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            policy: Box::new(LargestOldestPolicy),
            probe: Box::new(FsProbe),
        }
    }

    /// Replace the keep policy
    pub fn policy(mut self, policy: Box<dyn KeepPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the existence probe used in reconciled mode
    pub fn probe(mut self, probe: Box<dyn ExistenceProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Decide one group according to the configured mode
    pub fn decide(&self, group: &DuplicateGroup) -> Option<Decision> {
        match self.mode {
            Mode::Projected => project(group, self.policy.as_ref()),
            Mode::Reconciled => reconcile(group, self.policy.as_ref(), self.probe.as_ref()),
        }
    }

    /// Decide, sort and number all groups
    pub fn build_rows(&self, groups: &[DuplicateGroup]) -> Vec<DuplicateRow> {
        let decisions: Vec<Decision> = groups.iter().filter_map(|g| self.decide(g)).collect();
        let rows = number_rows(sort_decisions(decisions));

        info!(
            mode = %self.mode,
            policy = %self.policy.description(),
            rows = rows.len(),
            "built duplicate rows"
        );
        rows
    }
}

/// Build rows with the default policy and filesystem probe
pub fn build_rows(groups: &[DuplicateGroup], mode: Mode) -> Vec<DuplicateRow> {
    RowBuilder::new(mode).build_rows(groups)
}

/// Groups with more removals first; ties by kept path
fn sort_decisions(mut decisions: Vec<Decision>) -> Vec<Decision> {
    decisions.sort_by(|a, b| {
        b.remove
            .len()
            .cmp(&a.remove.len())
            .then_with(|| a.keep.cmp(&b.keep))
    });
    decisions
}

fn number_rows(sorted: Vec<Decision>) -> Vec<DuplicateRow> {
    sorted
        .into_iter()
        .enumerate()
        .map(|(position, decision)| DuplicateRow::new(position + 1, decision.keep, decision.remove))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::DuplicateItem;
    use std::cmp::Ordering;
    use std::collections::BTreeSet;

    fn group(items: &[(&str, i64, i64)]) -> DuplicateGroup {
        DuplicateGroup::new(
            items
                .iter()
                .map(|(path, size, modified)| DuplicateItem::new(*path, *size, *modified))
                .collect(),
        )
    }

    fn sample_groups() -> Vec<DuplicateGroup> {
        vec![
            group(&[("/m/b.jpg", 100, 3), ("/m/a.jpg", 100, 1)]),
            group(&[]),
            group(&[("/v/a.mp4", 2000, 20), ("/v/b.mp4", 3000, 10)]),
            group(&[
                ("/x/3.png", 7, 1),
                ("/x/1.png", 7, 1),
                ("/x/2.png", 7, 1),
                ("/x/0.png", 1, 0),
            ]),
        ]
    }

    #[test]
    fn equal_size_keeps_oldest() {
        let rows = build_rows(
            &[group(&[("/a.jpg", 100, 1), ("/b.jpg", 100, 3)])],
            Mode::Projected,
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].file_to_keep, "/a.jpg");
        assert_eq!(rows[0].files_to_remove, vec!["/b.jpg"]);
        assert_eq!(rows[0].count, 1);
    }

    #[test]
    fn larger_size_wins_regardless_of_date() {
        let rows = build_rows(
            &[group(&[("/a.mp4", 2000, 0), ("/b.mp4", 3000, 0)])],
            Mode::Projected,
        );

        assert_eq!(rows[0].file_to_keep, "/b.mp4");
        assert_eq!(rows[0].files_to_remove, vec!["/a.mp4"]);
    }

    #[test]
    fn rows_sorted_by_count_then_keep_path() {
        let rows = build_rows(&sample_groups(), Mode::Projected);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].file_to_keep, "/x/1.png");
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[1].file_to_keep, "/m/a.jpg");
        assert_eq!(rows[2].file_to_keep, "/v/b.mp4");

        for pair in rows.windows(2) {
            assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                assert!(pair[0].file_to_keep <= pair[1].file_to_keep);
            }
        }
    }

    #[test]
    fn indices_are_reassigned_from_one() {
        let rows = build_rows(&sample_groups(), Mode::Projected);
        let indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn every_input_path_appears_exactly_once() {
        let groups = sample_groups();
        let rows = build_rows(&groups, Mode::Projected);

        for row in &rows {
            assert!(!row.files_to_remove.contains(&row.file_to_keep));
            assert_eq!(row.count, row.files_to_remove.len());

            let source = groups
                .iter()
                .find(|g| g.paths().any(|p| p == row.file_to_keep))
                .unwrap();
            let expected: BTreeSet<&str> = source.paths().collect();
            let mut actual: BTreeSet<&str> = row.files_to_remove.iter().map(String::as_str).collect();
            actual.insert(row.file_to_keep.as_str());

            assert_eq!(actual, expected);
            assert_eq!(row.count + 1, source.len());
        }
    }

    #[test]
    fn building_twice_is_identical() {
        let groups = sample_groups();
        assert_eq!(
            build_rows(&groups, Mode::Projected),
            build_rows(&groups, Mode::Projected)
        );
    }

    #[test]
    fn reconciled_uses_single_survivor() {
        let groups = vec![group(&[("/gone.jpg", 10, 2), ("/kept.jpg", 9, 1)])];
        let builder = RowBuilder::new(Mode::Reconciled)
            .probe(Box::new(|path: &str| path == "/kept.jpg"));

        let rows = builder.build_rows(&groups);

        assert_eq!(rows[0].file_to_keep, "/kept.jpg");
        assert_eq!(rows[0].files_to_remove, vec!["/gone.jpg"]);
    }

    #[test]
    fn reconciled_matches_projected_when_nothing_survives() {
        let groups = sample_groups();
        let reconciled = RowBuilder::new(Mode::Reconciled)
            .probe(Box::new(|_: &str| false))
            .build_rows(&groups);

        assert_eq!(reconciled, build_rows(&groups, Mode::Projected));
    }

    #[test]
    fn projected_mode_never_probes() {
        let rows = RowBuilder::new(Mode::Projected)
            .probe(Box::new(|path: &str| -> bool {
                panic!("projected mode probed {path}")
            }))
            .build_rows(&sample_groups());

        assert_eq!(rows.len(), 3);
    }

    struct SmallestFirst;

    impl KeepPolicy for SmallestFirst {
        fn compare(&self, a: &DuplicateItem, b: &DuplicateItem) -> Ordering {
            a.size.cmp(&b.size).then_with(|| a.path.cmp(&b.path))
        }

        fn description(&self) -> String {
            "smallest first".to_string()
        }
    }

    #[test]
    fn policy_is_pluggable() {
        let rows = RowBuilder::new(Mode::Projected)
            .policy(Box::new(SmallestFirst))
            .build_rows(&[group(&[("/a.mp4", 2000, 0), ("/b.mp4", 3000, 0)])]);

        assert_eq!(rows[0].file_to_keep, "/a.mp4");
    }

    #[test]
    fn mode_display_and_serde_names_agree() {
        assert_eq!(Mode::Reconciled.to_string(), "reconciled");
        assert_eq!(
            serde_json::to_string(&Mode::Projected).unwrap(),
            "\"projected\""
        );
    }

    #[test]
    fn repeated_paths_in_report_never_remove_the_kept_file() {
        let raw = serde_json::json!([[
            {"path": "/a.jpg", "size": 5},
            {"path": "/a.jpg", "size": 5}
        ]]);
        let groups = crate::core::loader::parse_groups(&raw).unwrap();

        for mode in [Mode::Projected, Mode::Reconciled] {
            let rows = RowBuilder::new(mode)
                .probe(Box::new(|_: &str| false))
                .build_rows(&groups);

            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].file_to_keep, "/a.jpg");
            assert!(!rows[0].files_to_remove.contains(&rows[0].file_to_keep));
            assert_eq!(rows[0].count, 0);
        }
    }
}
