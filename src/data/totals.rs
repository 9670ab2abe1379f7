//! Per-pass totals and priority resolution.

use std::collections::HashSet;

use super::model::{Health, Host, Service};

/// Counts indexed by health code.
pub type Counts = [u64; 4];

/// Host and service counts for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub hosts: Counts,
    pub services: Counts,
}

/// Reduce a count vector to the health that represents it.
///
/// Critical beats warning, warning beats unknown, unknown beats ok. This is
/// not numeric order: unknown (3) ranks below warning (1).
pub fn resolve(counts: &Counts) -> Health {
    [Health::CRITICAL, Health::WARNING, Health::UNKNOWN]
        .into_iter()
        .find(|health| health.index().is_some_and(|i| counts[i] > 0))
        .unwrap_or(Health::OK)
}

/// Accumulates totals over the filtered services of one pass.
#[derive(Debug, Default)]
pub struct Aggregator<'a> {
    totals: Totals,
    problems: usize,
    seen_hosts: HashSet<&'a str>,
}

impl<'a> Aggregator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a service that passed the filter set.
    pub fn record_service(&mut self, service: &Service) {
        if let Some(i) = service.health.index() {
            self.totals.services[i] += 1;
        }
        if !service.health.is_ok() {
            self.problems += 1;
        }
    }

    /// Count a host the first time one of its services is seen.
    ///
    /// Returns `false` if the host was already counted this pass.
    pub fn record_host(&mut self, host: &'a Host) -> bool {
        if !self.seen_hosts.insert(host.name.as_str()) {
            return false;
        }
        if let Some(i) = host.health.index() {
            self.totals.hosts[i] += 1;
        }
        if !host.health.is_ok() {
            self.problems += 1;
        }
        true
    }

    /// Non-OK hosts and services counted so far.
    pub fn problems(&self) -> usize {
        self.problems
    }

    pub fn finish(self) -> (Totals, usize) {
        (self.totals, self.problems)
    }
}
