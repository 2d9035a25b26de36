use std::sync::Arc;

use chrono::Utc;
use log::info;
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::display::StatusDisplay;
use crate::notify::Notifier;
use crate::settings::UserSettings;

use super::countdown::{countdown_loop, renotify_loop, CountdownOutcome};
use super::generation::GenerationGuard;
use super::notice::Notice;
use super::state::{Mode, Pacing, Session};

/// Everything that can steer the controller: CLI startup, notification
/// activations, and Ctrl-C all reduce to these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    Start(Mode),
    Stop,
    Quit,
}

/// Owns the generation guard and the active session, and spawns one
/// cooperative countdown task per run. Cheap to clone; all state is shared.
#[derive(Clone)]
pub struct SessionController {
    guard: Arc<GenerationGuard>,
    session: Arc<Mutex<Option<Session>>>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
    settings: UserSettings,
    pacing: Pacing,
    label: String,
    display: Arc<dyn StatusDisplay>,
    notifier: Arc<dyn Notifier>,
}

impl SessionController {
    pub fn new(
        settings: UserSettings,
        pacing: Pacing,
        label: String,
        display: Arc<dyn StatusDisplay>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            guard: Arc::new(GenerationGuard::new()),
            session: Arc::new(Mutex::new(None)),
            worker: Arc::new(Mutex::new(None)),
            settings,
            pacing,
            label,
            display,
            notifier,
        }
    }

    /// The session currently counting down, if any.
    pub async fn snapshot(&self) -> Option<Session> {
        self.session.lock().await.clone()
    }

    /// Begin a new session, superseding whatever was running.
    pub async fn start(&self, mode: Mode) {
        let minutes = mode.duration_minutes(&self.settings);
        let session = Session {
            token: self.guard.begin(),
            mode,
            minutes,
            started_at: Utc::now(),
        };

        info!(
            "Starting {} timer for {} minute(s) at {}",
            mode.kind(),
            minutes,
            session.started_at
        );

        *self.session.lock().await = Some(session.clone());
        self.display.set_label(&self.label);
        self.spawn_countdown(session).await;
    }

    /// Manual stop: invalidates the live generation and clears the display.
    /// In-flight workers notice at their next wake-up; nothing is notified.
    pub async fn stop(&self) {
        self.guard.invalidate();
        *self.session.lock().await = None;
        self.display.clear();
        info!("Timer stopped");
    }

    /// Drive the controller from control events until `Quit` arrives or
    /// `shutdown` fires.
    pub async fn run(
        &self,
        mut events: mpsc::UnboundedReceiver<ControlEvent>,
        shutdown: CancellationToken,
    ) {
        loop {
            let event = tokio::select! {
                _ = shutdown.cancelled() => ControlEvent::Quit,
                received = events.recv() => received.unwrap_or(ControlEvent::Quit),
            };

            match event {
                ControlEvent::Start(mode) => self.start(mode).await,
                ControlEvent::Stop => self.stop().await,
                ControlEvent::Quit => {
                    self.stop().await;
                    info!("Quitting");
                    break;
                }
            }
        }
    }

    async fn spawn_countdown(&self, session: Session) {
        let mut worker = self.worker.lock().await;
        // A replaced worker is stale already and exits on its own at the
        // next wake-up, so the old handle is simply dropped.
        worker.take();

        let guard = Arc::clone(&self.guard);
        let active = Arc::clone(&self.session);
        let pacing = self.pacing.clone();
        let display = Arc::clone(&self.display);
        let notifier = Arc::clone(&self.notifier);
        let label = self.label.clone();

        let handle = tokio::spawn(async move {
            let outcome = countdown_loop(&session, &guard, &pacing, display.as_ref()).await;

            match outcome {
                CountdownOutcome::Cancelled => {
                    info!("{} timer superseded before completion", session.mode.kind());
                }
                CountdownOutcome::Completed => {
                    info!("{} timer completed", session.mode.kind());

                    // Only this run's own slot entry is cleared; a newer
                    // session may have replaced it already.
                    {
                        let mut slot = active.lock().await;
                        if slot.as_ref().map(|current| current.token) == Some(session.token) {
                            *slot = None;
                        }
                    }

                    display.clear();
                    display.set_status(&session.mode.over_text(&label));

                    let notice = Notice::for_completion(session.mode, &label);
                    match session.mode {
                        Mode::Fixed { .. } => {
                            renotify_loop(
                                &notice,
                                session.token,
                                &guard,
                                &pacing,
                                notifier.as_ref(),
                            )
                            .await;
                        }
                        Mode::Work | Mode::Break => notifier.notify(&notice),
                    }
                }
            }
        });

        *worker = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::notice::ChainAction;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use tokio::time::{self, Duration, Instant};

    #[derive(Default)]
    struct RecordingDisplay {
        statuses: StdMutex<Vec<String>>,
        clears: AtomicUsize,
    }

    impl StatusDisplay for RecordingDisplay {
        fn set_label(&self, _label: &str) {}

        fn set_status(&self, status: &str) {
            self.statuses.lock().unwrap().push(status.to_string());
        }

        fn clear(&self) {
            self.clears.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: StdMutex<Vec<Notice>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    fn controller_with(
        settings: UserSettings,
        display: Arc<RecordingDisplay>,
        notifier: Arc<RecordingNotifier>,
    ) -> SessionController {
        let pacing = Pacing {
            minute: Duration::from_millis(60),
            poll: Duration::from_millis(15),
            renotify: Duration::from_millis(10),
        };
        SessionController::new(settings, pacing, "Pomodoro".to_string(), display, notifier)
    }

    async fn wait_until(limit: Duration, condition: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            time::sleep(Duration::from_millis(5)).await;
        }
        condition()
    }

    #[tokio::test]
    async fn chained_sessions_get_distinct_tokens() {
        let display = Arc::new(RecordingDisplay::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(UserSettings::default(), display, notifier);

        controller.start(Mode::Work).await;
        let work = controller.snapshot().await.unwrap();
        controller.start(Mode::Break).await;
        let brk = controller.snapshot().await.unwrap();

        assert_eq!(work.mode, Mode::Work);
        assert_eq!(brk.mode, Mode::Break);
        assert_ne!(work.token, brk.token);
        assert!(work.started_at <= brk.started_at);
    }

    #[tokio::test]
    async fn stop_silences_the_running_timer() {
        let display = Arc::new(RecordingDisplay::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let settings = UserSettings {
            work_minutes: 2.0,
            ..UserSettings::default()
        };
        let controller = controller_with(settings, display.clone(), notifier.clone());

        controller.start(Mode::Work).await;
        controller.stop().await;
        controller.stop().await;

        assert!(controller.snapshot().await.is_none());
        assert!(display.clears.load(Ordering::SeqCst) >= 1);

        // Give the superseded worker time to wake up and exit.
        time::sleep(Duration::from_millis(200)).await;
        assert!(notifier.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn completed_work_offers_the_break() {
        let display = Arc::new(RecordingDisplay::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let settings = UserSettings {
            work_minutes: 1.0,
            ..UserSettings::default()
        };
        let controller = controller_with(settings, display.clone(), notifier.clone());

        controller.start(Mode::Work).await;
        let notified = {
            let notifier = notifier.clone();
            wait_until(Duration::from_secs(2), move || {
                !notifier.notices.lock().unwrap().is_empty()
            })
            .await
        };
        assert!(notified, "work completion never notified");

        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].action, ChainAction::StartBreak);
        assert_eq!(display.clears.load(Ordering::SeqCst), 1);
        let statuses = display.statuses.lock().unwrap();
        assert_eq!(statuses.last().map(String::as_str), Some("Work over"));
    }

    #[tokio::test]
    async fn fixed_completion_repeats_until_stopped() {
        let display = Arc::new(RecordingDisplay::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(UserSettings::default(), display, notifier.clone());

        controller.start(Mode::Fixed { minutes: 0.0 }).await;
        let repeated = {
            let notifier = notifier.clone();
            wait_until(Duration::from_secs(2), move || {
                notifier.notices.lock().unwrap().len() >= 3
            })
            .await
        };
        assert!(repeated, "completion notice was not re-raised");

        controller.stop().await;
        time::sleep(Duration::from_millis(50)).await;
        let frozen = notifier.notices.lock().unwrap().len();
        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(notifier.notices.lock().unwrap().len(), frozen);
    }

    #[tokio::test]
    async fn quit_event_stops_the_run_loop() {
        let display = Arc::new(RecordingDisplay::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(UserSettings::default(), display, notifier);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let runner = tokio::spawn({
            let controller = controller.clone();
            let shutdown = shutdown.clone();
            async move { controller.run(events_rx, shutdown).await }
        });

        events_tx.send(ControlEvent::Start(Mode::Work)).unwrap();
        events_tx.send(ControlEvent::Quit).unwrap();
        runner.await.unwrap();

        assert!(controller.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn shutdown_token_stops_the_run_loop() {
        let display = Arc::new(RecordingDisplay::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = controller_with(UserSettings::default(), display, notifier);

        let (_events_tx, events_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let runner = tokio::spawn({
            let controller = controller.clone();
            let shutdown = shutdown.clone();
            async move { controller.run(events_rx, shutdown).await }
        });

        shutdown.cancel();
        runner.await.unwrap();
    }
}
