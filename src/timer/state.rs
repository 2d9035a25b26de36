use std::time::Duration;

use chrono::{DateTime, Utc};

use super::generation::Generation;
use crate::settings::UserSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Work,
    Break,
    Fixed { minutes: f64 },
}

impl Mode {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::Break => "break",
            Mode::Fixed { .. } => "countdown",
        }
    }

    pub fn duration_minutes(&self, settings: &UserSettings) -> f64 {
        match self {
            Mode::Work => settings.work_minutes,
            Mode::Break => settings.break_minutes,
            Mode::Fixed { minutes } => *minutes,
        }
    }

    /// Label shown when the user did not name the timer.
    pub fn default_label(&self) -> String {
        match self {
            Mode::Work | Mode::Break => "Pomodoro".to_string(),
            Mode::Fixed { minutes } => format!("{} min", minutes),
        }
    }

    /// Status text shown once this mode's countdown has run out.
    pub fn over_text(&self, label: &str) -> String {
        match self {
            Mode::Work => "Work over".to_string(),
            Mode::Break => "Break over".to_string(),
            Mode::Fixed { .. } => format!("{} timer over", label),
        }
    }
}

/// One timer run. Created when a countdown begins and dropped when its loop
/// exits, whether it ran out or was superseded.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Generation,
    pub mode: Mode,
    pub minutes: f64,
    pub started_at: DateTime<Utc>,
}

/// Wall-clock scale the timer loops run against. Production uses real
/// minutes; tests shrink all three to keep runs under a second.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Length of one displayed minute.
    pub minute: Duration,
    /// How long a countdown sleeps between wake-ups.
    pub poll: Duration,
    /// Gap between repeated completion notices in countdown mode.
    pub renotify: Duration,
}

impl Pacing {
    /// The timer loops require non-zero intervals, so zero settings values
    /// fall back to the defaults.
    pub fn from_settings(settings: &UserSettings) -> Self {
        let defaults = Self::default();
        Self {
            poll: interval_or(settings.poll_interval_secs, defaults.poll),
            renotify: interval_or(settings.renotify_interval_secs, defaults.renotify),
            minute: defaults.minute,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            minute: Duration::from_secs(60),
            poll: Duration::from_secs(20),
            renotify: Duration::from_secs(2),
        }
    }
}

fn interval_or(secs: u64, fallback: Duration) -> Duration {
    if secs == 0 {
        fallback
    } else {
        Duration::from_secs(secs)
    }
}
