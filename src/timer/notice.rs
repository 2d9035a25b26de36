use super::state::Mode;

/// What activating a completion notice should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainAction {
    StartBreak,
    StartWork,
    Quit,
}

/// A completion notification, ready for whatever notifier is wired in.
/// `sound` is a platform sound name; notifiers without sound support skip it.
#[derive(Debug, Clone)]
pub struct Notice {
    pub summary: String,
    pub body: String,
    pub action_label: &'static str,
    pub action: ChainAction,
    pub sound: &'static str,
}

impl Notice {
    pub fn for_completion(mode: Mode, label: &str) -> Self {
        match mode {
            Mode::Work => Self::work_over(),
            Mode::Break => Self::break_over(),
            Mode::Fixed { minutes } => Self::fixed_done(label, minutes),
        }
    }

    fn work_over() -> Self {
        Self {
            summary: "Finished work time".to_string(),
            body: "Start the break at any time".to_string(),
            action_label: "Start break",
            action: ChainAction::StartBreak,
            sound: "Blow",
        }
    }

    fn break_over() -> Self {
        Self {
            summary: "Break is over".to_string(),
            body: "Ready to start a new pomodoro whenever you want".to_string(),
            action_label: "New pomodoro",
            action: ChainAction::StartWork,
            sound: "Blow",
        }
    }

    fn fixed_done(label: &str, minutes: f64) -> Self {
        let unit = if minutes == 1.0 { "minute" } else { "minutes" };
        Self {
            summary: format!("{} timer done!", label),
            body: format!("It was set for {} {}", minutes, unit),
            action_label: "Quit",
            action: ChainAction::Quit,
            sound: "Submarine",
        }
    }
}
