//! Filesystem existence checks used by reconciliation.

use std::path::Path;
use tracing::debug;

/// Answers whether a path is still present.
///
/// Implement this trait to substitute the filesystem (e.g., for testing).
pub trait ExistenceProbe {
    fn exists(&self, path: &str) -> bool;
}

/// Probe backed by the real filesystem.
///
/// Errors such as permission denied count as "missing" for that one path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ExistenceProbe for FsProbe {
    fn exists(&self, path: &str) -> bool {
        match Path::new(path).try_exists() {
            Ok(exists) => exists,
            Err(error) => {
                debug!(path, %error, "existence probe failed, treating as missing");
                false
            }
        }
    }
}

impl<F> ExistenceProbe for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}
