//! Terminal rendering.
//!
//! - [`line`]: formatting of host, service and totals lines
//! - [`render`]: the per-pass orchestrator producing a [`Report`]
//! - [`theme`]: health marks and their colors
//!
//! Rendering never writes; [`write_report`] is the only place bytes reach the
//! terminal, and the only place color is applied.

pub mod line;
pub mod render;
pub mod theme;

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};

pub use line::{Line, LineFormatter};
pub use render::{render, Report};
pub use theme::{Mark, MarkKind};

/// Write a report to `out`, clearing the screen first if the report asks for
/// it, and flush.
pub fn write_report<W: Write>(out: &mut W, report: &Report, color: bool) -> io::Result<()> {
    if report.clear_screen {
        queue!(out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0))?;
    }
    for line in &report.lines {
        writeln!(out, "{}", line.paint(color))?;
    }
    out.flush()
}
