use std::time::{Duration, Instant};

/// Cancellable periodic-task scheduler.
///
/// Implementations are polled by the frontend loop; they never run tasks on
/// their own thread.
pub trait TickScheduler {
    /// (Re)starts the schedule so the first tick is due `interval` after `now`.
    fn start(&mut self, interval: Duration, now: Instant);

    /// Stops the schedule. Calling this on a stopped scheduler does nothing.
    fn cancel(&mut self);

    /// Returns true when the schedule is active.
    fn is_running(&self) -> bool;

    /// Returns true at most once per elapsed interval.
    fn poll(&mut self, now: Instant) -> bool;
}

/// Fixed-interval ticker with no catch-up.
///
/// When a poll arrives late, exactly one tick fires and the next deadline is
/// measured from that poll, so missed intervals are dropped rather than
/// replayed.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    interval: Option<Duration>,
    next_due: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interval of the active schedule.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval.filter(|_| self.next_due.is_some())
    }
}

impl TickScheduler for Ticker {
    fn start(&mut self, interval: Duration, now: Instant) {
        self.interval = Some(interval);
        self.next_due = Some(now + interval);
    }

    fn cancel(&mut self) {
        self.next_due = None;
    }

    fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    fn poll(&mut self, now: Instant) -> bool {
        let (Some(interval), Some(due)) = (self.interval, self.next_due) else {
            return false;
        };

        if now < due {
            return false;
        }

        self.next_due = Some(now + interval);
        true
    }
}
