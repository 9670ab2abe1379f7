//! Which services take part in a pass, and which detail lines they produce.
//!
//! Exclusion happens in layers:
//!
//! 1. the [`FilterSet`] removes services completely, totals included;
//! 2. hosts-only / services-only / status-only decide which kinds of lines
//!    print (handled by the renderer);
//! 3. [`detail_visible`] hides OK services in problems-only mode and
//!    acknowledged services when asked to, without touching totals.

use super::model::{Host, Service};
use crate::config::ViewOptions;

/// Conjunctive substring filters taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet(Vec<String>);

impl FilterSet {
    pub fn new<I, S>(filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(filters.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every filter occurs in the host name or the description.
    pub fn matches(&self, host_name: &str, description: &str) -> bool {
        self.0
            .iter()
            .all(|f| host_name.contains(f.as_str()) || description.contains(f.as_str()))
    }
}

/// Whether `service` survives the filter set at all.
pub fn included(service: &Service, host: &Host, filters: &FilterSet) -> bool {
    filters.matches(&host.name, &service.description)
}

/// Whether an included service gets its own detail line.
pub fn detail_visible(service: &Service, options: &ViewOptions) -> bool {
    if options.problems_only && service.health.is_ok() {
        return false;
    }
    !(options.hide_acknowledged && service.acknowledged)
}

/// Whether a host header prints as soon as its block starts, rather than
/// lazily before its first detail line.
pub fn header_eager(host: &Host, options: &ViewOptions) -> bool {
    !options.services_only
        && (!host.health.is_ok() || (options.hosts_only && !options.problems_only))
}
