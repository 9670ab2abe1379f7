//! Status source abstraction.
//!
//! A [`SnapshotSource`] yields one complete [`RawStatus`] per call. Sources are
//! re-read in full on every refresh; nothing is cached between reads.

mod file;
mod snapshot;
pub mod status_dat;

pub use file::FileSource;
pub use snapshot::{RawHostStatus, RawInfo, RawServiceStatus, RawStatus};

use std::fmt::Debug;

use crate::error::SnapshotError;

/// Trait for reading monitoring status from some backend.
///
/// # Example
///
/// ```no_run
/// use nagios_view::{FileSource, SnapshotSource};
///
/// let mut source = FileSource::new("/var/spool/nagios/status.dat");
/// let status = source.read().expect("status file should be readable");
/// println!("{} services", status.servicestatus.len());
/// ```
pub trait SnapshotSource: Debug {
    /// Read and parse the full status.
    fn read(&mut self) -> Result<RawStatus, SnapshotError>;

    /// Human-readable name of the source, used in the header line.
    fn description(&self) -> &str;
}

/// Parse status content, picking the encoding from its first character.
///
/// JSON documents start with `{`; anything else is treated as `status.dat`.
pub fn parse_status(content: &str, origin: &str) -> Result<RawStatus, SnapshotError> {
    if content.trim_start().starts_with('{') {
        serde_json::from_str(content).map_err(|e| SnapshotError::parse(origin, e.to_string()))
    } else {
        status_dat::parse(content, origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_detects_json() {
        let status = parse_status(
            r#"  {"hoststatus": [{"host_name": "web1", "current_state": 1}]}"#,
            "inline",
        )
        .unwrap();
        assert_eq!(status.hoststatus[0].current_state, 1);
    }

    #[test]
    fn test_parse_status_falls_back_to_status_dat() {
        let status = parse_status("hoststatus {\nhost_name=web1\n}\n", "inline").unwrap();
        assert_eq!(status.hoststatus[0].host_name, "web1");
    }

    #[test]
    fn test_parse_status_invalid_json() {
        let err = parse_status("{ not json", "inline").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse inline"));
    }
}
