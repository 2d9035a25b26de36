use std::io::{self, Write};
use std::sync::Mutex;

/// Persistent status affordance the timer writes into. The binary wires a
/// terminal line; a tray icon or a test recorder slots in the same way.
pub trait StatusDisplay: Send + Sync {
    /// Persistent timer name, shown alongside every status.
    fn set_label(&self, label: &str);
    /// Live slot: remaining minutes while counting, phase text afterwards.
    fn set_status(&self, status: &str);
    fn clear(&self);
}

/// Rewrites a single stdout line in place. Writes are best-effort; a closed
/// stdout never takes the timer down.
pub struct TerminalDisplay {
    line: Mutex<Line>,
}

#[derive(Default)]
struct Line {
    label: String,
    width: usize,
}

impl Line {
    fn write(&mut self, text: &str) {
        let shown = text.chars().count();
        let padding = self.width.saturating_sub(shown);
        let mut out = io::stdout();
        let _ = write!(out, "\r{}{}", text, " ".repeat(padding));
        let _ = out.flush();
        self.width = shown;
    }
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            line: Mutex::new(Line::default()),
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for TerminalDisplay {
    fn set_label(&self, label: &str) {
        self.line.lock().unwrap().label = label.to_string();
    }

    fn set_status(&self, status: &str) {
        let mut line = self.line.lock().unwrap();
        let text = if line.label.is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", line.label, status)
        };
        line.write(&text);
    }

    fn clear(&self) {
        self.line.lock().unwrap().write("");
    }
}
