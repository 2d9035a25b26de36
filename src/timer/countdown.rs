use tokio::time::{self, Instant, MissedTickBehavior};

use super::generation::{Generation, GenerationGuard};
use super::notice::Notice;
use super::state::{Pacing, Session};
use crate::display::StatusDisplay;
use crate::notify::Notifier;

/// How a countdown ended: it either ran out of time or woke up to find its
/// generation superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    Completed,
    Cancelled,
}

/// Runs one countdown to its end, updating the display with the
/// ceiling-rounded minutes left whenever that value changes.
///
/// Cancellation is polled, not preempted: the loop sleeps the full poll
/// interval and checks staleness right after waking, before touching the
/// display. A superseded run therefore lingers for at most one interval.
/// Durations of zero or less complete on the first pass without waiting.
pub async fn countdown_loop(
    session: &Session,
    guard: &GenerationGuard,
    pacing: &Pacing,
    display: &dyn StatusDisplay,
) -> CountdownOutcome {
    let started = Instant::now();
    let mut ticker = time::interval(pacing.poll);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut shown: Option<u64> = None;

    loop {
        // The first tick completes immediately; later ones pace the poll.
        ticker.tick().await;

        if guard.is_stale(session.token) {
            return CountdownOutcome::Cancelled;
        }

        let elapsed = started.elapsed().as_secs_f64() / pacing.minute.as_secs_f64();
        let left = session.minutes - elapsed;
        if left <= 0.0 {
            return CountdownOutcome::Completed;
        }

        let minutes_left = left.ceil() as u64;
        if shown != Some(minutes_left) {
            display.set_status(&minutes_left.to_string());
            shown = Some(minutes_left);
        }
    }
}

/// Raises the completion notice, then keeps re-raising it until the run is
/// superseded or the process exits. Staleness is checked once per iteration,
/// before raising.
pub async fn renotify_loop(
    notice: &Notice,
    token: Generation,
    guard: &GenerationGuard,
    pacing: &Pacing,
    notifier: &dyn Notifier,
) {
    loop {
        if guard.is_stale(token) {
            return;
        }
        notifier.notify(notice);
        time::sleep(pacing.renotify).await;
    }
}
