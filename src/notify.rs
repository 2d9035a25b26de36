use std::thread;

use log::warn;
use notify_rust::Notification;
use tokio::sync::mpsc;

use crate::timer::{ChainAction, ControlEvent, Mode, Notice};

const APP_NAME: &str = "SandwichTimer";

/// Delivers completion notices. Implementations must not block the caller;
/// the controller treats every notice as fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Desktop notifications through the system notification server. On XDG
/// platforms the notice's action button (and a plain click) feed control
/// events back into the session controller; elsewhere the notice is
/// informational only and chains are driven by CLI restarts.
pub struct DesktopNotifier {
    events: mpsc::UnboundedSender<ControlEvent>,
}

impl DesktopNotifier {
    pub fn new(events: mpsc::UnboundedSender<ControlEvent>) -> Self {
        Self { events }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) {
        let notice = notice.clone();
        let events = self.events.clone();
        // The XDG action listener parks until the server reports back, so
        // each delivery runs on its own plain thread. Plain threads die with
        // the process instead of holding the runtime open on shutdown.
        thread::spawn(move || deliver(&notice, &events));
    }
}

fn chain_event(action: ChainAction) -> ControlEvent {
    match action {
        ChainAction::StartBreak => ControlEvent::Start(Mode::Break),
        ChainAction::StartWork => ControlEvent::Start(Mode::Work),
        ChainAction::Quit => ControlEvent::Quit,
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn deliver(notice: &Notice, events: &mpsc::UnboundedSender<ControlEvent>) {
    use notify_rust::Urgency;

    let urgency = if notice.action == ChainAction::Quit {
        Urgency::Critical
    } else {
        Urgency::Normal
    };

    let shown = Notification::new()
        .summary(&notice.summary)
        .body(&notice.body)
        .appname(APP_NAME)
        .icon("alarm-clock")
        .sound_name(notice.sound)
        .urgency(urgency)
        .action("default", notice.action_label)
        .action("chain", notice.action_label)
        .show();

    match shown {
        Ok(handle) => handle.wait_for_action(|action| {
            if action == "default" || action == "chain" {
                let _ = events.send(chain_event(notice.action));
            }
        }),
        Err(err) => warn!("Failed to deliver notification: {err}"),
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn deliver(notice: &Notice, events: &mpsc::UnboundedSender<ControlEvent>) {
    let _ = events;

    if let Err(err) = Notification::new()
        .summary(&notice.summary)
        .body(&notice.body)
        .appname(APP_NAME)
        .sound_name(notice.sound)
        .show()
    {
        warn!("Failed to deliver notification: {err}");
    }
}
