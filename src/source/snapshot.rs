//! Raw status records as produced by the status parsers.
//!
//! These types mirror the block layout of Nagios' `status.dat`: one list per
//! block type, each entry a flat record. Both the `status.dat` parser and the
//! JSON reader produce a [`RawStatus`]; the data layer converts it into the
//! indexed [`Snapshot`](crate::Snapshot).
//!
//! Field values are accepted loosely. `status.dat` carries every value as
//! text, while JSON producers tend to emit real numbers and booleans.

use serde::{Deserialize, Serialize};

/// One complete read of the status source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStatus {
    /// `info` blocks; the first one carries the creation timestamp.
    #[serde(default)]
    pub info: Vec<RawInfo>,
    /// `hoststatus` blocks, in file order.
    #[serde(default)]
    pub hoststatus: Vec<RawHostStatus>,
    /// `servicestatus` blocks, in file order.
    #[serde(default)]
    pub servicestatus: Vec<RawServiceStatus>,
}

impl RawStatus {
    /// Creation time of the snapshot in epoch seconds, if recorded.
    pub fn created(&self) -> Option<f64> {
        self.info.first().and_then(|info| info.created)
    }
}

/// Snapshot metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInfo {
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created: Option<f64>,
}

/// State of a single host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHostStatus {
    #[serde(deserialize_with = "lenient::text")]
    pub host_name: String,

    #[serde(default = "lenient::unknown_state", deserialize_with = "lenient::state")]
    pub current_state: i64,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub problem_has_been_acknowledged: bool,

    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub last_state_change: Option<f64>,
}

/// State of a single service check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawServiceStatus {
    #[serde(deserialize_with = "lenient::text")]
    pub host_name: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub service_description: String,

    #[serde(default = "lenient::unknown_state", deserialize_with = "lenient::state")]
    pub current_state: i64,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub problem_has_been_acknowledged: bool,

    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub last_state_change: Option<f64>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub plugin_output: String,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_been_checked: bool,
}

/// Deserializers that accept both the textual `status.dat` encoding and
/// native JSON types.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Sentinel for a missing or unreadable state; outside the 0..=3 range.
    pub const UNREADABLE_STATE: i64 = -1;

    pub fn unknown_state() -> i64 {
        UNREADABLE_STATE
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn state<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let state = match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        Ok(state.unwrap_or(UNREADABLE_STATE))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => match s.trim() {
                "" | "0" | "false" => false,
                other => other.parse::<f64>().map_or(true, |f| f != 0.0),
            },
            _ => false,
        })
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}
