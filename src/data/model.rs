//! Host and service model built from raw status records.
//!
//! A [`Snapshot`] is constructed fresh for every refresh pass and discarded
//! afterwards.

use std::collections::HashMap;

use tracing::warn;

use crate::error::SnapshotError;
use crate::source::{parse_status, RawHostStatus, RawServiceStatus, RawStatus};

/// A Nagios health code.
///
/// Valid codes are `0..=3`. Anything else is kept as-is so it can be rendered
/// with a neutral mark instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Health(i64);

impl Health {
    pub const OK: Health = Health(0);
    pub const WARNING: Health = Health(1);
    pub const CRITICAL: Health = Health(2);
    pub const UNKNOWN: Health = Health(3);

    /// All valid codes in display order.
    pub const ALL: [Health; 4] = [Health::OK, Health::WARNING, Health::CRITICAL, Health::UNKNOWN];

    pub fn new(code: i64) -> Self {
        Health(code)
    }

    pub fn code(self) -> i64 {
        self.0
    }

    pub fn is_ok(self) -> bool {
        self == Health::OK
    }

    /// Index into a per-code count vector, `None` for out-of-range codes.
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|i| *i < Health::ALL.len())
    }

    /// Lowercase name used in the totals block.
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "ok",
            1 => "warning",
            2 => "critical",
            3 => "unknown",
            _ => "invalid",
        }
    }
}

/// A monitored host.
#[derive(Debug, Clone)]
pub struct Host {
    pub name: String,
    pub health: Health,
    pub acknowledged: bool,
    /// Epoch seconds of the last state change, if known.
    pub last_state_change: Option<f64>,
}

impl From<RawHostStatus> for Host {
    fn from(raw: RawHostStatus) -> Self {
        Self {
            name: raw.host_name,
            health: Health::new(raw.current_state),
            acknowledged: raw.problem_has_been_acknowledged,
            last_state_change: raw.last_state_change,
        }
    }
}

/// A service check running on a host.
#[derive(Debug, Clone)]
pub struct Service {
    pub host_name: String,
    pub description: String,
    pub health: Health,
    pub acknowledged: bool,
    pub last_state_change: Option<f64>,
    pub output: String,
    pub checked: bool,
}

impl From<RawServiceStatus> for Service {
    fn from(raw: RawServiceStatus) -> Self {
        Self {
            host_name: raw.host_name,
            description: raw.service_description,
            health: Health::new(raw.current_state),
            acknowledged: raw.problem_has_been_acknowledged,
            last_state_change: raw.last_state_change,
            output: raw.plugin_output,
            checked: raw.has_been_checked,
        }
    }
}

/// Hosts indexed by name plus services in their native order.
#[derive(Debug, Default)]
pub struct Snapshot {
    hosts: HashMap<String, Host>,
    services: Vec<Service>,
    /// Epoch seconds at which the status source was written.
    pub created: Option<f64>,
    /// Length of the longest host name, in characters.
    pub longest_host_name: usize,
    /// Records skipped while building the snapshot.
    pub anomalies: Vec<SnapshotError>,
}

impl Snapshot {
    /// Parse status text (`status.dat` or JSON) straight into a snapshot.
    pub fn parse(content: &str, origin: &str) -> Result<Self, SnapshotError> {
        parse_status(content, origin).map(Self::from_raw)
    }

    /// Convert raw records into the indexed model.
    ///
    /// Services referencing an unknown host are dropped and recorded as
    /// [`SnapshotError::DanglingServiceReference`] in [`Snapshot::anomalies`].
    pub fn from_raw(raw: RawStatus) -> Self {
        let created = raw.created();

        let mut hosts = HashMap::with_capacity(raw.hoststatus.len());
        let mut longest_host_name = 0;
        for host in raw.hoststatus.into_iter().map(Host::from) {
            longest_host_name = longest_host_name.max(host.name.chars().count());
            hosts.insert(host.name.clone(), host);
        }

        let mut services = Vec::with_capacity(raw.servicestatus.len());
        let mut anomalies = Vec::new();
        for service in raw.servicestatus.into_iter().map(Service::from) {
            if hosts.contains_key(&service.host_name) {
                services.push(service);
            } else {
                warn!(
                    host = %service.host_name,
                    service = %service.description,
                    "skipping service for unknown host"
                );
                anomalies.push(SnapshotError::DanglingServiceReference {
                    host: service.host_name,
                    service: service.description,
                });
            }
        }

        Self {
            hosts,
            services,
            created,
            longest_host_name,
            anomalies,
        }
    }

    /// Look up a host by name.
    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Services in snapshot order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }
}
