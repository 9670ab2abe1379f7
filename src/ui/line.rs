//! Formatting of individual output lines.

use super::theme::Mark;
use crate::config::{TimeMode, ViewOptions};
use crate::data::duration::format_relative;
use crate::data::{resolve, Counts, Health, Host, Service};

/// Width of the host name column in host headers.
const HOST_NAME_WIDTH: usize = 25;
/// Width of the service description column.
const DESCRIPTION_WIDTH: usize = 20;
/// Width of the plugin output column.
const OUTPUT_WIDTH: usize = 65;
/// Width of the category label in the totals block.
const LABEL_WIDTH: usize = 10;

const PENDING_CHECK: &str = "[PENDING CHECK]";
const NO_OUTPUT: &str = "(no output)";
const ACKNOWLEDGED: &str = "[ACKNOWLEDGED]";

/// One line of rendered output, with marks still uncolored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Text(String),
    Host {
        mark: Mark,
        body: String,
    },
    Service {
        /// Owning host column, present in services-only mode.
        host: Option<String>,
        mark: Mark,
        body: String,
    },
    Total {
        mark: Mark,
        body: String,
    },
}

impl Line {
    /// Render the line, coloring marks if `color` is set.
    pub fn paint(&self, color: bool) -> String {
        match self {
            Line::Blank => String::new(),
            Line::Text(text) => text.clone(),
            Line::Host { mark, body } | Line::Total { mark, body } => {
                format!("{}{}", mark.paint(color), body)
            }
            Line::Service { host, mark, body } => match host {
                Some(host) => format!("{} {}{}", host, mark.paint(color), body),
                None => format!("{}{}", mark.paint(color), body),
            },
        }
    }

    /// The line without any color codes.
    pub fn plain(&self) -> String {
        self.paint(false)
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Line::Service { .. })
    }

    pub fn is_host(&self) -> bool {
        matches!(self, Line::Host { .. })
    }
}

/// Builds host, service and totals lines for one pass.
#[derive(Debug, Clone, Copy)]
pub struct LineFormatter<'a> {
    options: &'a ViewOptions,
    /// Current time, epoch seconds.
    now: i64,
    /// Host column width in services-only mode.
    host_width: usize,
}

impl<'a> LineFormatter<'a> {
    pub fn new(options: &'a ViewOptions, now: i64, host_width: usize) -> Self {
        Self {
            options,
            now,
            host_width,
        }
    }

    pub fn host(&self, host: &Host) -> Line {
        let body = format!("{:<width$}", host.name, width = HOST_NAME_WIDTH);
        let body = self.decorate(body, host.health, host.last_state_change, host.acknowledged);
        Line::Host {
            mark: Mark::host(host.health, self.options.hosts_only),
            body,
        }
    }

    pub fn service(&self, service: &Service) -> Line {
        let output = if !service.checked {
            PENDING_CHECK
        } else if service.output.is_empty() {
            NO_OUTPUT
        } else {
            service.output.as_str()
        };

        let body = format!(
            " {:<dw$} {:<ow$}",
            service.description,
            output,
            dw = DESCRIPTION_WIDTH,
            ow = OUTPUT_WIDTH
        );
        let body = self.decorate(
            body,
            service.health,
            service.last_state_change,
            service.acknowledged,
        );

        let host = self
            .options
            .services_only
            .then(|| format!("{:<width$}", service.host_name, width = self.host_width));

        Line::Service {
            host,
            mark: Mark::service(service.health),
            body,
        }
    }

    /// One line of the totals block, e.g. `hosts` or `services`.
    pub fn total(&self, label: &str, counts: &Counts) -> Line {
        let columns = Health::ALL
            .iter()
            .zip(counts)
            .map(|(health, count)| format!("{:>5} {}", count, health.name()))
            .collect::<Vec<_>>()
            .join(" ");
        Line::Total {
            mark: Mark::service(resolve(counts)),
            body: format!(" {:<width$} {}", label, columns, width = LABEL_WIDTH),
        }
    }

    /// Append the time and acknowledgment suffixes, then trim the right side.
    fn decorate(
        &self,
        mut body: String,
        health: Health,
        last_state_change: Option<f64>,
        acknowledged: bool,
    ) -> String {
        if self.shows_time(health) {
            body.push_str(&format!(" ({})", format_relative(last_state_change, self.now)));
        }
        if acknowledged {
            body.push(' ');
            body.push_str(ACKNOWLEDGED);
        }
        body.truncate(body.trim_end().len());
        body
    }

    fn shows_time(&self, health: Health) -> bool {
        match self.options.times {
            TimeMode::None => false,
            TimeMode::Problems => !health.is_ok(),
            TimeMode::All => true,
        }
    }
}
