use web_time::{Duration, Instant};

/// Single-slot debounce timer: at most one pending trigger, and scheduling
/// again replaces it and restarts the delay.
///
/// The clock is passed in so callers (and tests) decide what "now" is;
/// nothing fires on its own, the owner polls with `take_due`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Cancels any pending trigger and schedules `value` for `now + delay`.
    /// Returns the superseded value, if any.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        self.pending
            .replace(Pending {
                value,
                deadline: now + self.delay,
            })
            .map(|old| old.value)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Fires the pending trigger once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.cancel()
        } else {
            None
        }
    }
}
