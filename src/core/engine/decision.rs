//! Per-group keep/remove decisions.

use super::policy::KeepPolicy;
use super::probe::ExistenceProbe;
use crate::core::loader::{DuplicateGroup, DuplicateItem};
use std::collections::HashSet;
use tracing::debug;

/// Keep/remove outcome for a single group, before numbering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub keep: String,
    pub remove: Vec<String>,
}

/// Decide purely from group metadata.
///
/// A path listed more than once counts once, as the item that sorts first.
/// Returns `None` for an empty group.
pub fn project(group: &DuplicateGroup, policy: &dyn KeepPolicy) -> Option<Decision> {
    let mut ordered: Vec<&DuplicateItem> = group.items.iter().collect();
    ordered.sort_by(|a, b| policy.compare(a, b));

    let mut seen = HashSet::new();
    ordered.retain(|item| seen.insert(item.path.as_str()));

    let (first, rest) = ordered.split_first()?;
    Some(Decision {
        keep: first.path.clone(),
        remove: rest.iter().map(|item| item.path.clone()).collect(),
    })
}

/// Decide after a destructive run, trusting the filesystem only when it is
/// conclusive: exactly one survivor and at least one missing file.
///
/// Any other outcome (no survivors, several survivors, nothing missing)
/// falls back to the projected decision.
pub fn reconcile(
    group: &DuplicateGroup,
    policy: &dyn KeepPolicy,
    probe: &dyn ExistenceProbe,
) -> Option<Decision> {
    let projected = project(group, policy)?;

    let mut seen = HashSet::new();
    let mut existing = Vec::new();
    let mut missing = Vec::new();
    for path in group.paths().filter(|path| seen.insert(*path)) {
        if probe.exists(path) {
            existing.push(path);
        } else {
            missing.push(path);
        }
    }

    if existing.len() != 1 || missing.is_empty() {
        debug!(
            keep = %projected.keep,
            survivors = existing.len(),
            missing = missing.len(),
            "filesystem inconclusive, keeping projected decision"
        );
        return Some(projected);
    }

    missing.sort_unstable();
    let decision = Decision {
        keep: existing[0].to_string(),
        remove: missing.into_iter().map(str::to_string).collect(),
    };

    if decision.keep != projected.keep {
        debug!(
            projected = %projected.keep,
            survivor = %decision.keep,
            "survivor differs from projected keep"
        );
    }

    Some(decision)
}
