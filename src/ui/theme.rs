//! Health marks and their colors.
//!
//! Marks are plain values until the moment they are written: the renderer
//! builds lines from [`Mark`]s, and [`Mark::paint`] injects ANSI color only
//! when color output is enabled.

use crossterm::style::{Color, Stylize};

use crate::data::Health;

/// Where a mark is drawn; hosts and services use different glyph sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// Service lines and the totals block.
    Service,
    /// Host headers. `show_ok` draws a check for OK hosts (hosts-only listing).
    Host { show_ok: bool },
}

/// How a mark is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkStyle {
    Foreground(Color),
    Background(Color),
}

/// A health mark, not yet colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub kind: MarkKind,
    pub health: Health,
}

impl Mark {
    pub fn service(health: Health) -> Self {
        Self {
            kind: MarkKind::Service,
            health,
        }
    }

    pub fn host(health: Health, show_ok: bool) -> Self {
        Self {
            kind: MarkKind::Host { show_ok },
            health,
        }
    }

    /// Glyph text including its padding.
    pub fn text(&self) -> &'static str {
        match (self.kind, self.health.code()) {
            (MarkKind::Service, 0) => " ✔ ",
            (MarkKind::Service, 1 | 2) => " ✘ ",
            (MarkKind::Service, 3) => " ? ",
            (MarkKind::Service, _) => " ",
            (MarkKind::Host { show_ok: true }, 0) => "✔  ",
            (MarkKind::Host { .. }, 1 | 2) => "✘  ",
            (MarkKind::Host { .. }, 3) => "?  ",
            (MarkKind::Host { .. }, _) => "",
        }
    }

    pub fn style(&self) -> Option<MarkStyle> {
        let color = match self.health.code() {
            0 => Color::Green,
            1 => Color::Yellow,
            2 => Color::Red,
            3 => Color::Magenta,
            _ => return None,
        };
        match self.kind {
            MarkKind::Service if self.health.is_ok() => Some(MarkStyle::Foreground(color)),
            MarkKind::Service => Some(MarkStyle::Background(color)),
            MarkKind::Host { .. } => Some(MarkStyle::Foreground(color)),
        }
    }

    /// Render the mark, colored if `color` is set.
    pub fn paint(&self, color: bool) -> String {
        let text = self.text();
        if !color || text.is_empty() {
            return text.to_string();
        }
        match self.style() {
            Some(MarkStyle::Foreground(c)) => text.with(c).to_string(),
            Some(MarkStyle::Background(c)) => text.on(c).to_string(),
            None => text.to_string(),
        }
    }
}
