//! # nagios-view
//!
//! A terminal dashboard for Nagios' `status.dat`.
//!
//! Each refresh pass reads the status source in full, filters hosts and
//! services, accumulates totals, and prints a host-grouped listing followed by
//! a totals block. Watch mode repeats the pass on a fixed interval.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐   ┌──────────────┐   ┌──────────────────┐   ┌──────────┐
//! │ source  │──▶│ data         │──▶│ ui::render       │──▶│ Terminal │
//! │ (read,  │   │ (Snapshot,   │   │ (lines, totals;  │   │ (color,  │
//! │  parse) │   │  filter, agg)│   │  no I/O)         │   │  clear)  │
//! └─────────┘   └──────────────┘   └──────────────────┘   └──────────┘
//!      ▲                                                        │
//!      └──────────────────── app (refresh loop) ◀───────────────┘
//! ```
//!
//! - **[`source`]**: the [`SnapshotSource`] trait, [`FileSource`], and parsers
//!   for `status.dat` and JSON
//! - **[`data`]**: [`Snapshot`], filters, totals and priority resolution
//! - **[`ui`]**: line formatting, the render orchestrator, and emission
//! - **[`app`]**: the refresh loop
//! - **[`config`]**: settings layering and the immutable [`ViewOptions`]
//!
//! ## Usage
//!
//! ```
//! use nagios_view::{render, Snapshot, ViewOptions};
//!
//! let snapshot = Snapshot::parse(
//!     "hoststatus {\nhost_name=web1\ncurrent_state=0\n}\n\
//!      servicestatus {\nhost_name=web1\nservice_description=disk\ncurrent_state=2\n}\n",
//!     "example",
//! )
//! .unwrap();
//!
//! let options = ViewOptions { header: false, ..ViewOptions::default() };
//! let report = render(&snapshot, &options, "example", chrono::Local::now());
//! assert_eq!(report.totals.services, [0, 0, 1, 0]);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{Settings, TimeMode, ViewOptions};
pub use data::{FilterSet, Health, Host, Service, Snapshot, Totals};
pub use error::{PassError, SnapshotError};
pub use source::{FileSource, RawStatus, SnapshotSource};
pub use ui::{render, write_report, Report};
