//! Debounce timer for autosave.
//!
//! The timer is an explicit deadline rather than a background task: the UI
//! loop polls it with the current time and repaints after `remaining()`.
//! Scheduling again before the deadline replaces it, so a burst of edits
//! fires once, `delay` after the last edit.

use std::time::{Duration, Instant};

/// Default quiet period before an edit is propagated.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(400);

/// A single-flight, restartable deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DELAY)
    }
}

impl Debouncer {
    /// Create an idle timer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// The quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the quiet period. A pending deadline keeps its old value.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Start the timer, cancelling any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the deadline, `None` when idle.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume the deadline if it has passed.
    ///
    /// Returns `true` exactly once per scheduled deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(400);

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = Debouncer::new(DELAY);
        let now = Instant::now();
        assert!(!timer.is_pending());
        assert!(timer.remaining(now).is_none());
        assert!(!timer.fire(now + DELAY * 10));
    }

    #[test]
    fn test_fires_once_after_delay() {
        let mut timer = Debouncer::new(DELAY);
        let start = Instant::now();
        timer.schedule(start);

        assert!(!timer.fire(start + Duration::from_millis(399)));
        assert!(timer.fire(start + DELAY));
        assert!(!timer.fire(start + DELAY * 2));
    }

    #[test]
    fn test_reschedule_pushes_deadline_back() {
        let mut timer = Debouncer::new(DELAY);
        let start = Instant::now();
        timer.schedule(start);
        timer.schedule(start + Duration::from_millis(300));

        assert!(!timer.fire(start + Duration::from_millis(500)));
        assert_eq!(
            timer.remaining(start + Duration::from_millis(500)),
            Some(Duration::from_millis(200))
        );
        assert!(timer.fire(start + Duration::from_millis(700)));
    }

    #[test]
    fn test_cancel() {
        let mut timer = Debouncer::new(DELAY);
        let start = Instant::now();
        timer.schedule(start);
        timer.cancel();
        assert!(!timer.fire(start + DELAY));
    }

    #[test]
    fn test_remaining_saturates_at_zero() {
        let mut timer = Debouncer::default();
        let start = Instant::now();
        timer.schedule(start);
        assert_eq!(timer.remaining(start + DELAY * 3), Some(Duration::ZERO));
    }
}
