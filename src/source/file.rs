//! File-based status source.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{parse_status, RawStatus, SnapshotSource};
use crate::error::SnapshotError;

/// Reads the status from a file on every call.
///
/// Unlike a polling source there is no modification-time check: each refresh
/// pass re-reads and re-parses the whole file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = path.display().to_string();
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn read(&mut self) -> Result<RawStatus, SnapshotError> {
        let bytes = fs::read(&self.path).map_err(|source| SnapshotError::Read {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read status file");
        // Plugin output is not always UTF-8; undecodable bytes become U+FFFD.
        let content = String::from_utf8_lossy(&bytes);
        parse_status(&content, &self.description)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
