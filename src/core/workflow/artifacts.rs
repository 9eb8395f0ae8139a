//! Naming of the JSON/CSV artifacts written for each media scan.

use crate::core::inventory::MediaKind;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Files produced for one media scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Scanner report
    pub json: PathBuf,
    /// Duplicate rows
    pub csv: PathBuf,
    /// One row per removed file (only written on request)
    pub expanded: PathBuf,
}

/// Current local time as `YYYYmmdd-HHMMSS`
pub fn run_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// Make a directory name safe for use in file names
pub fn sanitize_name(value: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let pattern = UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid pattern"));

    let sanitized = pattern.replace_all(value, "-");
    let trimmed = sanitized.trim_matches('-');
    if trimmed.is_empty() {
        "root".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Pick `<base>-<media>-<timestamp>[-N]` paths that collide with nothing
/// already in `out_dir`
pub fn artifact_paths(out_dir: &Path, base_name: &str, kind: MediaKind, timestamp: &str) -> ArtifactPaths {
    let mut counter = 0usize;
    loop {
        let suffix = if counter == 0 {
            String::new()
        } else {
            format!("-{counter}")
        };
        let stem = format!("{base_name}-{kind}-{timestamp}{suffix}");
        let paths = ArtifactPaths {
            json: out_dir.join(format!("{stem}.json")),
            csv: out_dir.join(format!("{stem}.csv")),
            expanded: out_dir.join(format!("{stem}-expanded.csv")),
        };

        if !paths.json.exists() && !paths.csv.exists() {
            return paths;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_runs_of_unsafe_characters() {
        assert_eq!(sanitize_name("My Photos (2024)"), "My-Photos-2024");
        assert_eq!(sanitize_name("already_ok-1.0"), "already_ok-1.0");
    }

    #[test]
    fn sanitize_falls_back_to_root() {
        assert_eq!(sanitize_name(""), "root");
        assert_eq!(sanitize_name("///"), "root");
    }

    #[test]
    fn timestamp_has_fixed_shape() {
        let stamp = run_timestamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'-');
    }

    #[test]
    fn first_free_suffix_is_chosen() {
        let dir = tempfile::TempDir::new().unwrap();

        let first = artifact_paths(dir.path(), "lib", MediaKind::Images, "20240101-000000");
        assert_eq!(
            first.json.file_name().unwrap(),
            "lib-images-20240101-000000.json"
        );

        std::fs::write(&first.csv, "").unwrap();
        let second = artifact_paths(dir.path(), "lib", MediaKind::Images, "20240101-000000");
        assert_eq!(
            second.csv.file_name().unwrap(),
            "lib-images-20240101-000000-1.csv"
        );
        assert_eq!(
            second.expanded.file_name().unwrap(),
            "lib-images-20240101-000000-1-expanded.csv"
        );
    }
}
