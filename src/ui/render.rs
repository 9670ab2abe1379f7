//! Render orchestration: one snapshot in, one [`Report`] out.
//!
//! Services are walked in snapshot order. A host block starts whenever the
//! owning host differs from the previous service's host; its header prints
//! eagerly for problem hosts (or in hosts-only listings) and otherwise lazily,
//! right before the first detail line of the block.

use chrono::{DateTime, Local};
use tracing::debug;

use super::line::{Line, LineFormatter};
use crate::config::ViewOptions;
use crate::data::duration::format_relative;
use crate::data::filter::{detail_visible, header_eager, included};
use crate::data::{Aggregator, Host, Snapshot, Totals};

/// Placeholder printed in problems-only mode when nothing is wrong.
pub const NO_PROBLEMS: &str = "(no problems)";

/// Everything one pass produces.
#[derive(Debug, Clone)]
pub struct Report {
    /// Clear the terminal before writing (watch mode).
    pub clear_screen: bool,
    pub lines: Vec<Line>,
    pub totals: Totals,
    /// Non-OK hosts and services among the filtered records.
    pub problems: usize,
}

impl Report {
    pub fn service_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.is_service()).count()
    }

    pub fn host_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.is_host()).count()
    }

    /// All lines without color codes.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(Line::plain).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    NotPrinted,
    Printed,
}

#[derive(Debug, Clone, Copy)]
enum BlockState<'a> {
    BeforeFirstHost,
    InHost { host: &'a Host, header: HeaderState },
}

/// Accumulates output lines and tracks host-block separators.
struct Output<'a> {
    lines: Vec<Line>,
    blocks_printed: usize,
    fmt: LineFormatter<'a>,
}

impl Output<'_> {
    /// Blank line between host blocks, never before the first.
    fn separate(&mut self) {
        if self.blocks_printed > 0 {
            self.lines.push(Line::Blank);
        }
        self.blocks_printed += 1;
    }

    fn host_header(&mut self, host: &Host, options: &ViewOptions) {
        if !options.hosts_only {
            self.separate();
        }
        self.lines.push(self.fmt.host(host));
    }
}

/// Render `snapshot` according to `options`.
///
/// `source` names the status source in the header line; `now` drives the
/// watch banner and every relative time.
pub fn render(
    snapshot: &Snapshot,
    options: &ViewOptions,
    source: &str,
    now: DateTime<Local>,
) -> Report {
    let fmt = LineFormatter::new(options, now.timestamp(), snapshot.longest_host_name);
    let mut out = Output {
        lines: Vec::new(),
        blocks_printed: 0,
        fmt,
    };

    if options.watch {
        out.lines
            .push(Line::Text(now.format("%a %b %d %Y %H:%M:%S %z").to_string()));
        out.lines.push(Line::Blank);
    }

    if options.header {
        out.lines.push(Line::Text(format!(
            "Nagios View - {} - updated {}",
            source,
            format_relative(snapshot.created, now.timestamp())
        )));
        out.lines.push(Line::Blank);
    }

    let mut aggregator = Aggregator::new();
    let mut state = BlockState::BeforeFirstHost;

    for service in snapshot.services() {
        let Some(host) = snapshot.host(&service.host_name) else {
            continue;
        };
        if !included(service, host, &options.filters) {
            continue;
        }
        aggregator.record_service(service);

        let same_block =
            matches!(state, BlockState::InHost { host: current, .. } if current.name == host.name);
        if !same_block {
            aggregator.record_host(host);
            let mut header = HeaderState::NotPrinted;
            if !options.status_only && header_eager(host, options) {
                out.host_header(host, options);
                header = HeaderState::Printed;
            }
            state = BlockState::InHost { host, header };
        }

        if options.hosts_only || options.status_only || !detail_visible(service, options) {
            continue;
        }

        if let BlockState::InHost { header, .. } = &mut state {
            if !options.services_only && *header == HeaderState::NotPrinted {
                out.host_header(host, options);
                *header = HeaderState::Printed;
            }
        }
        out.lines.push(fmt.service(service));
    }

    let (totals, problems) = aggregator.finish();
    debug!(
        services = snapshot.services().len(),
        problems,
        lines = out.lines.len(),
        "rendered snapshot"
    );

    if options.problems_only && problems == 0 {
        out.lines.push(Line::Text(NO_PROBLEMS.to_string()));
    }

    if options.status || options.status_only {
        if !options.status_only {
            out.lines.push(Line::Blank);
        }
        out.lines.push(fmt.total("hosts", &totals.hosts));
        out.lines.push(fmt.total("services", &totals.services));
    }

    Report {
        clear_screen: options.watch,
        lines: out.lines,
        totals,
        problems,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeMode;
    use crate::data::FilterSet;
    use crate::source::{RawHostStatus, RawInfo, RawServiceStatus, RawStatus};
    use chrono::TimeZone;

    const NOW: i64 = 1_700_000_000;

    fn now() -> DateTime<Local> {
        Local.timestamp_opt(NOW, 0).single().unwrap()
    }

    /// Hosts as (name, state); services as (host, description, state, acknowledged).
    fn snapshot(hosts: &[(&str, i64)], services: &[(&str, &str, i64, bool)]) -> Snapshot {
        Snapshot::from_raw(RawStatus {
            info: vec![RawInfo {
                created: Some((NOW - 30) as f64),
            }],
            hoststatus: hosts
                .iter()
                .map(|(name, state)| RawHostStatus {
                    host_name: name.to_string(),
                    current_state: *state,
                    problem_has_been_acknowledged: false,
                    last_state_change: Some((NOW - 60) as f64),
                })
                .collect(),
            servicestatus: services
                .iter()
                .map(|(host, description, state, acked)| RawServiceStatus {
                    host_name: host.to_string(),
                    service_description: description.to_string(),
                    current_state: *state,
                    problem_has_been_acknowledged: *acked,
                    last_state_change: Some((NOW - 60) as f64),
                    plugin_output: format!("{description} output"),
                    has_been_checked: true,
                })
                .collect(),
        })
    }

    /// Options without header or time suffixes, so output is time independent.
    fn quiet() -> ViewOptions {
        ViewOptions {
            header: false,
            times: TimeMode::None,
            ..ViewOptions::default()
        }
    }

    fn service_line(description: &str, mark: &str) -> String {
        format!("{mark} {:<20} {description} output", description)
    }

    fn acked_service_line(description: &str, mark: &str) -> String {
        let output = format!("{description} output");
        format!("{mark} {:<20} {:<65} [ACKNOWLEDGED]", description, output)
    }

    fn totals_lines(hosts: [u64; 4], services: [u64; 4]) -> Vec<String> {
        let opts = quiet();
        let fmt = LineFormatter::new(&opts, NOW, 0);
        vec![
            fmt.total("hosts", &hosts).plain(),
            fmt.total("services", &services).plain(),
        ]
    }

    fn fleet() -> Snapshot {
        snapshot(
            &[("web1", 0), ("db1", 1), ("cache1", 0)],
            &[
                ("web1", "http", 0, false),
                ("web1", "disk", 2, false),
                ("db1", "mysql", 0, false),
                ("db1", "replication", 1, true),
                ("cache1", "redis", 0, false),
            ],
        )
    }

    #[test]
    fn test_problems_only_lazy_header() {
        let snap = snapshot(
            &[("web1", 0)],
            &[("web1", "http", 0, false), ("web1", "disk", 2, false)],
        );
        let options = ViewOptions {
            problems_only: true,
            ..quiet()
        };

        let report = render(&snap, &options, "status.dat", now());

        let mut expected = vec![
            "web1".to_string(),
            service_line("disk", " ✘ "),
            String::new(),
        ];
        expected.extend(totals_lines([1, 0, 0, 0], [1, 0, 1, 0]));
        assert_eq!(report.plain_lines(), expected);
        assert_eq!(report.totals.hosts[2], 0);
        assert_eq!(report.totals.services[2], 1);
    }

    #[test]
    fn test_no_problems_placeholder() {
        let options = ViewOptions {
            problems_only: true,
            filters: FilterSet::new(["nothing-matches"]),
            ..quiet()
        };

        let report = render(&fleet(), &options, "status.dat", now());

        let mut expected = vec![NO_PROBLEMS.to_string(), String::new()];
        expected.extend(totals_lines([0; 4], [0; 4]));
        assert_eq!(report.plain_lines(), expected);
    }

    #[test]
    fn test_no_problems_placeholder_without_status() {
        let snap = snapshot(&[("web1", 0)], &[("web1", "http", 0, false)]);
        let options = ViewOptions {
            problems_only: true,
            status: false,
            ..quiet()
        };

        let report = render(&snap, &options, "status.dat", now());
        assert_eq!(report.plain_lines(), vec![NO_PROBLEMS.to_string()]);
    }

    #[test]
    fn test_default_view_groups_by_host() {
        let report = render(&fleet(), &quiet(), "status.dat", now());

        let mut expected = vec![
            "web1".to_string(),
            service_line("http", " ✔ "),
            service_line("disk", " ✘ "),
            String::new(),
            format!("✘  {:<25}", "db1").trim_end().to_string(),
            service_line("mysql", " ✔ "),
            acked_service_line("replication", " ✘ "),
            String::new(),
            "cache1".to_string(),
            service_line("redis", " ✔ "),
            String::new(),
        ];
        expected.extend(totals_lines([2, 1, 0, 0], [3, 1, 1, 0]));
        assert_eq!(report.plain_lines(), expected);
        assert_eq!(report.problems, 3);
    }

    #[test]
    fn test_filter_counts_match_service_lines() {
        let cases: &[&[&str]] = &[&[], &["web"], &["db", "repl"], &["1"], &["http", "disk"]];
        let snap = fleet();

        for filters in cases {
            for hide_acknowledged in [false, true] {
                let options = ViewOptions {
                    filters: FilterSet::new(filters.iter().copied()),
                    hide_acknowledged,
                    ..quiet()
                };
                let expected = snap
                    .services()
                    .iter()
                    .filter(|s| {
                        filters
                            .iter()
                            .all(|f| s.host_name.contains(f) || s.description.contains(f))
                    })
                    .filter(|s| !(hide_acknowledged && s.acknowledged))
                    .count();

                let report = render(&snap, &options, "status.dat", now());
                assert_eq!(
                    report.service_lines(),
                    expected,
                    "filters {filters:?}, hide_acknowledged {hide_acknowledged}"
                );
            }
        }
    }

    #[test]
    fn test_hide_acknowledged_keeps_totals() {
        let snap = snapshot(&[("db1", 0)], &[("db1", "replication", 1, true)]);
        let options = ViewOptions {
            hide_acknowledged: true,
            ..quiet()
        };

        let report = render(&snap, &options, "status.dat", now());

        // The only service is hidden, so the OK host never gets a header.
        assert_eq!(report.host_lines(), 0);
        assert_eq!(report.service_lines(), 0);
        assert_eq!(report.totals.services, [0, 1, 0, 0]);
        assert_eq!(report.totals.hosts, [1, 0, 0, 0]);
    }

    #[test]
    fn test_host_totals_count_distinct_hosts() {
        // web1 appears in two separate blocks.
        let snap = snapshot(
            &[("web1", 2), ("db1", 0), ("idle", 1)],
            &[
                ("web1", "http", 0, false),
                ("db1", "mysql", 0, false),
                ("web1", "disk", 0, false),
            ],
        );

        let report = render(&snap, &quiet(), "status.dat", now());

        assert_eq!(report.totals.hosts, [1, 0, 1, 0]);
        assert_eq!(report.totals.hosts.iter().sum::<u64>(), 2);
        // Headers follow blocks, so web1 is printed twice.
        let headers: Vec<_> = report
            .lines
            .iter()
            .filter(|l| l.is_host())
            .map(Line::plain)
            .collect();
        assert_eq!(headers.len(), 3);
        assert!(headers[0].starts_with("✘  web1"));
        assert_eq!(headers[1], "db1");
        assert!(headers[2].starts_with("✘  web1"));
    }

    #[test]
    fn test_hosts_only() {
        let options = ViewOptions {
            hosts_only: true,
            ..quiet()
        };
        let report = render(&fleet(), &options, "status.dat", now());

        let mut expected = vec!["✔  web1".to_string(), "✘  db1".to_string(), "✔  cache1".to_string()];
        expected.push(String::new());
        expected.extend(totals_lines([2, 1, 0, 0], [3, 1, 1, 0]));
        assert_eq!(report.plain_lines(), expected);
    }

    #[test]
    fn test_hosts_only_problems() {
        let options = ViewOptions {
            hosts_only: true,
            problems_only: true,
            status: false,
            ..quiet()
        };
        let report = render(&fleet(), &options, "status.dat", now());
        assert_eq!(report.plain_lines(), vec!["✘  db1".to_string()]);
    }

    #[test]
    fn test_services_only() {
        let options = ViewOptions {
            services_only: true,
            status: false,
            filters: FilterSet::new(["db1"]),
            ..quiet()
        };
        let report = render(&fleet(), &options, "status.dat", now());

        // Host column is as wide as the longest host name ("cache1").
        assert_eq!(
            report.plain_lines(),
            vec![
                format!("db1    {}", service_line("mysql", " ✔ ")),
                format!("db1    {}", acked_service_line("replication", " ✘ ")),
            ]
        );
    }

    #[test]
    fn test_status_only() {
        let options = ViewOptions {
            status_only: true,
            ..quiet()
        };
        let report = render(&fleet(), &options, "status.dat", now());
        assert_eq!(report.plain_lines(), totals_lines([2, 1, 0, 0], [3, 1, 1, 0]));
    }

    #[test]
    fn test_no_status() {
        let options = ViewOptions {
            status: false,
            ..quiet()
        };
        let report = render(&fleet(), &options, "status.dat", now());
        assert!(!report.lines.iter().any(|l| matches!(l, Line::Total { .. })));
        assert_eq!(report.lines.last().map(Line::plain), Some(service_line("redis", " ✔ ")));
    }

    #[test]
    fn test_header_and_watch_banner() {
        let options = ViewOptions {
            watch: true,
            status: false,
            ..ViewOptions::default()
        };
        let snap = snapshot(&[], &[]);
        let report = render(&snap, &options, "/var/spool/nagios/status.dat", now());

        assert!(report.clear_screen);
        let lines = report.plain_lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], now().format("%a %b %d %Y %H:%M:%S %z").to_string());
        assert_eq!(lines[1], "");
        assert_eq!(
            lines[2],
            "Nagios View - /var/spool/nagios/status.dat - updated 30 seconds ago"
        );
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_render_is_idempotent() {
        let snap = fleet();
        let options = quiet();
        let first = render(&snap, &options, "status.dat", now());
        let second = render(&snap, &options, "status.dat", now());
        assert_eq!(first.lines, second.lines);
    }

    #[test]
    fn test_out_of_range_state() {
        let snap = snapshot(&[("odd", 0)], &[("odd", "weird", 9, false)]);
        let options = ViewOptions {
            status: false,
            ..quiet()
        };
        let report = render(&snap, &options, "status.dat", now());

        assert_eq!(
            report.plain_lines(),
            vec!["odd".to_string(), service_line("weird", " ")]
        );
        assert_eq!(report.totals.services, [0; 4]);
        assert_eq!(report.problems, 1);
    }
}
