//! Refresh loop: read, render, write, then optionally wait and repeat.

use std::future::Future;
use std::io::Write;

use chrono::Local;
use tracing::{debug, warn};

use crate::config::ViewOptions;
use crate::data::Snapshot;
use crate::error::PassError;
use crate::source::SnapshotSource;
use crate::ui::{render, write_report, Report};

/// Owns the status source and the view options for the lifetime of the
/// process.
#[derive(Debug)]
pub struct App {
    source: Box<dyn SnapshotSource>,
    options: ViewOptions,
}

impl App {
    pub fn new(source: Box<dyn SnapshotSource>, options: ViewOptions) -> Self {
        Self { source, options }
    }

    /// Run one complete pass: read the source, render it and write it out.
    ///
    /// Nothing is written if reading or parsing fails, so whatever a previous
    /// pass left on screen stays there.
    pub fn pass<W: Write>(&mut self, out: &mut W) -> Result<Report, PassError> {
        let raw = self.source.read()?;
        let snapshot = Snapshot::from_raw(raw);
        let report = render(
            &snapshot,
            &self.options,
            self.source.description(),
            Local::now(),
        );
        write_report(out, &report, self.options.color)?;
        Ok(report)
    }

    /// Run the first pass and, in watch mode, keep refreshing until `shutdown`
    /// resolves.
    ///
    /// A failed first pass is returned as an error. Later snapshot failures are
    /// reported on `err` with a timestamp and the loop carries on; output
    /// errors still end it.
    /// The delay only starts once a pass has fully completed, so passes never
    /// overlap.
    pub async fn run<W, E, F>(
        &mut self,
        out: &mut W,
        err: &mut E,
        shutdown: F,
    ) -> Result<(), PassError>
    where
        W: Write,
        E: Write,
        F: Future<Output = ()>,
    {
        self.pass(out)?;
        if !self.options.watch {
            return Ok(());
        }

        tokio::pin!(shutdown);
        let mut passes: u64 = 1;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!(passes, "watch stopped");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.options.interval) => {}
            }

            passes += 1;
            match self.pass(out) {
                Ok(report) => debug!(passes, problems = report.problems, "refreshed"),
                Err(PassError::Snapshot(e)) => {
                    warn!(passes, error = %e, "refresh failed");
                    writeln!(err, "[{}] {}", Local::now().format("%a %b %d %Y %H:%M:%S %z"), e)?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
