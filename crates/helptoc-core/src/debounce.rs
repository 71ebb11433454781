//! A supersedable quiet-period timer.
//!
//! Each [`Debouncer::push`] replaces the pending value and restarts the quiet period,
//! so only the last value pushed before the period elapses is ever released. The
//! debouncer does no work itself; callers either [`poll`](Debouncer::poll) it with a
//! timestamp or await [`settled`](Debouncer::settled).
//!
//! Time comes from `tokio::time::Instant`, so tests can drive it with a paused clock.

use std::time::Duration;

use tokio::time::Instant;

/// Holds at most one pending value until its quiet period has elapsed.
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
    /// Create a debouncer with the given quiet period.
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value and restart the quiet period from now.
    pub fn push(&mut self, value: T) {
        self.push_at(value, Instant::now());
    }

    /// Replace the pending value and restart the quiet period from `now`.
    pub fn push_at(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// The value waiting for its quiet period, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Whether a value is waiting.
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be released.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Release the pending value if its deadline is at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| deadline <= now) {
            self.cancel()
        } else {
            None
        }
    }

    /// Wait out the quiet period and release the pending value.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.poll(Instant::now())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn holds_value_until_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push_at("c", start);

        assert!(debouncer.poll(start + Duration::from_millis(299)).is_none());
        assert_eq!(debouncer.poll(start + DELAY), Some("c"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn each_push_restarts_the_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push_at("c", start);
        debouncer.push_at("co", start + Duration::from_millis(100));
        debouncer.push_at("con", start + Duration::from_millis(200));

        assert!(debouncer.poll(start + DELAY).is_none());
        assert_eq!(debouncer.pending(), Some(&"con"));
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("con"));
        assert!(debouncer.poll(start + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("query");
        assert_eq!(debouncer.cancel(), Some("query"));
        assert!(debouncer.deadline().is_none());
    }

    #[test]
    fn zero_delay_releases_immediately() {
        let now = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.push_at(1, now);
        assert_eq!(debouncer.poll(now), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn settled_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.push("docs");

        assert_eq!(debouncer.settled().await, Some("docs"));
        assert!(start.elapsed() >= DELAY);
        assert!(debouncer.settled().await.is_none());
    }
}
