//! Error types for reading, parsing and rendering status snapshots.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a status source into a [`Snapshot`](crate::Snapshot).
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The status source could not be read (missing file, permissions, I/O).
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The status content is structurally invalid.
    #[error("failed to parse {origin}: {reason}")]
    Parse { origin: String, reason: String },

    /// A service names a host that is not part of the snapshot.
    ///
    /// This one is per-record: the adapter skips the service and keeps going.
    #[error("service '{service}' references unknown host '{host}'")]
    DanglingServiceReference { host: String, service: String },
}

impl SnapshotError {
    pub(crate) fn parse(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        SnapshotError::Parse {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abandon a single refresh pass.
#[derive(Debug, Error)]
pub enum PassError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Writing the rendered view to the terminal failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
