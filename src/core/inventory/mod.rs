//! # Inventory Module
//!
//! Counts candidate media files under a directory so the summary can
//! estimate what is left after duplicates are removed.
//!
//! ## Supported Extensions
//! - Images: avif, bmp, gif, hdr, heic, heif, jpeg, jpg, kra, png, svg, tif, tiff, webp
//! - Videos: 3gp, avi, flv, gifv, m4p, m4v, mkv, mov, mp4, mpeg, mpg, ogv, vob, webm, wmv

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &[
    "avif", "bmp", "gif", "hdr", "heic", "heif", "jpeg", "jpg", "kra", "png", "svg", "tif",
    "tiff", "webp",
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "3gp", "avi", "flv", "gifv", "m4p", "m4v", "mkv", "mov", "mp4", "mpeg", "mpg", "ogv", "vob",
    "webm", "wmv",
];

/// Media class scanned in one pass of the external scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Images,
    Videos,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Images, MediaKind::Videos];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Images => "images",
            MediaKind::Videos => "videos",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Images => IMAGE_EXTENSIONS,
            MediaKind::Videos => VIDEO_EXTENSIONS,
        }
    }

    /// Check whether a file name carries one of this kind's extensions
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count files of `kind` below `root`, without following symlinks.
///
/// Entries that cannot be read are skipped.
pub fn count_media_files(root: &Path, kind: MediaKind) -> usize {
    let total = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| kind.matches(entry.path()))
        .count();

    debug!(root = %root.display(), %kind, total, "counted media files");
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(MediaKind::Images.matches(Path::new("/a/B.JPG")));
        assert!(MediaKind::Images.matches(Path::new("scan.Tiff")));
        assert!(MediaKind::Videos.matches(Path::new("clip.MkV")));
    }

    #[test]
    fn kinds_do_not_overlap() {
        assert!(!MediaKind::Videos.matches(Path::new("a.jpg")));
        assert!(!MediaKind::Images.matches(Path::new("a.mp4")));
        assert!(!MediaKind::Images.matches(Path::new("README")));
        assert!(!MediaKind::Images.matches(Path::new("archive.jpg.zip")));
    }

    #[test]
    fn counts_recursively_per_kind() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("nested/deeper");
        fs::create_dir_all(&nested).unwrap();

        for name in ["a.jpg", "b.PNG", "notes.txt", "movie.mp4"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::write(nested.join("c.webp"), b"x").unwrap();
        fs::write(nested.join("d.mov"), b"x").unwrap();

        assert_eq!(count_media_files(dir.path(), MediaKind::Images), 3);
        assert_eq!(count_media_files(dir.path(), MediaKind::Videos), 2);
    }

    #[test]
    fn directories_named_like_media_are_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir(dir.path().join("album.jpg")).unwrap();

        assert_eq!(count_media_files(dir.path(), MediaKind::Images), 0);
    }

    #[test]
    fn missing_root_counts_zero() {
        assert_eq!(
            count_media_files(Path::new("/nonexistent/media/root"), MediaKind::Images),
            0
        );
    }

    #[test]
    fn display_uses_plural_name() {
        assert_eq!(MediaKind::Videos.to_string(), "videos");
    }
}
