//! Output helpers for the CLI
//!
//! Human output uses colored status icons when stdout is a terminal; CI
//! output (`--json`) is an NDJSON event stream, one JSON object per line.

use std::io::{self, Write};

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

/// Whether styled output should be used
pub fn use_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Status markers for human-readable reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Warning,
    Error,
}

impl Icon {
    pub fn render(&self) -> &'static str {
        match self {
            Icon::Success => "✓",
            Icon::Warning => "⚠",
            Icon::Error => "✗",
        }
    }

    pub fn colored(&self, supports_color: bool) -> String {
        let s = self.render();
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => Color::Green,
            Icon::Warning => Color::Yellow,
            Icon::Error => Color::Red,
        };
        format!("{}", s.with(color))
    }
}
