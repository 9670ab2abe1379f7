//! Parser for Nagios' `status.dat` format.
//!
//! The file is a sequence of blocks:
//!
//! ```text
//! # comment
//! hoststatus {
//!     host_name=web1
//!     current_state=0
//!     }
//! ```
//!
//! Every block becomes a flat record keyed by its type. Values are kept as
//! text; [`RawStatus`] decides how to interpret them.

use serde_json::{Map, Value};

use super::RawStatus;
use crate::error::SnapshotError;

/// Parse `status.dat` content into raw records.
///
/// `origin` names the source in error messages (usually the file path).
pub fn parse(content: &str, origin: &str) -> Result<RawStatus, SnapshotError> {
    let mut blocks: Map<String, Value> = Map::new();
    let mut current: Option<(String, Map<String, Value>)> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_suffix('{').filter(|_| !line.contains('=')) {
            if let Some((open, _)) = &current {
                return Err(SnapshotError::parse(
                    origin,
                    format!("line {line_no}: block opened inside unterminated '{open}' block"),
                ));
            }
            current = Some((name.trim().to_string(), Map::new()));
            continue;
        }

        if line == "}" {
            let Some((name, fields)) = current.take() else {
                return Err(SnapshotError::parse(
                    origin,
                    format!("line {line_no}: '}}' without an open block"),
                ));
            };
            if let Value::Array(entries) = blocks
                .entry(name)
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                entries.push(Value::Object(fields));
            }
            continue;
        }

        let Some((_, fields)) = current.as_mut() else {
            return Err(SnapshotError::parse(
                origin,
                format!("line {line_no}: entry outside of a block"),
            ));
        };
        // Plugin output may itself contain '=', only the first one separates.
        let Some((key, value)) = raw_line.trim_start().split_once('=') else {
            return Err(SnapshotError::parse(
                origin,
                format!("line {line_no}: expected key=value, found '{line}'"),
            ));
        };
        fields.insert(key.trim().to_string(), Value::String(value.to_string()));
    }

    if let Some((name, _)) = current {
        return Err(SnapshotError::parse(
            origin,
            format!("unterminated '{name}' block at end of input"),
        ));
    }

    serde_json::from_value(Value::Object(blocks))
        .map_err(|e| SnapshotError::parse(origin, e.to_string()))
}
