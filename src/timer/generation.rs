use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a single timer run. Comparing a captured copy against the
/// guard's live value tells a resumed task whether it has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

/// Strictly-increasing counter marking the currently-active timer run.
///
/// Exactly one generation is live at a time; replacing it invalidates every
/// task still holding an older captured copy. Tasks poll `is_stale` at each
/// resume point, so no locking is needed around the counter itself.
#[derive(Debug)]
pub struct GenerationGuard {
    live: AtomicU64,
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self {
            live: AtomicU64::new(0),
        }
    }

    /// Mint a fresh live generation for a new session. Any generation
    /// captured earlier becomes stale.
    pub fn begin(&self) -> Generation {
        Generation(self.live.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The generation currently live.
    pub fn capture(&self) -> Generation {
        Generation(self.live.load(Ordering::SeqCst))
    }

    /// Replace the live generation without starting anything new. Used on
    /// manual stop so in-flight timers cancel at their next wake-up.
    pub fn invalidate(&self) {
        self.live.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_stale(&self, token: Generation) -> bool {
        token.0 != self.live.load(Ordering::SeqCst)
    }
}

impl Default for GenerationGuard {
    fn default() -> Self {
        Self::new()
    }
}
