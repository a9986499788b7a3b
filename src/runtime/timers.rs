//! Virtual-clock timer queue.
//!
//! Single-shot timers keyed by `(ControllerId, TimerHandle)`. Each armed timer
//! fires at most once and can be cancelled at any time before it fires.

use crate::feed::ControllerId;
use crate::player::TimerHandle;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

type TimerKey = (ControllerId, TimerHandle);

/// Deadline-ordered set of pending single-shot timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    /// `(deadline, arm order)` → timer. Arm order breaks deadline ties.
    by_deadline: BTreeMap<(Duration, u64), TimerKey>,
    by_key: HashMap<TimerKey, (Duration, u64)>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Whether the given timer is still pending.
    #[must_use]
    pub fn is_pending(&self, controller: ControllerId, handle: TimerHandle) -> bool {
        self.by_key.contains_key(&(controller, handle))
    }

    /// Pending timers of one controller.
    #[must_use]
    pub fn pending_for(&self, controller: ControllerId) -> usize {
        self.by_key.keys().filter(|(id, _)| *id == controller).count()
    }

    /// Arms a timer firing `after` from now. Re-arming the same key replaces it.
    pub fn arm(&mut self, controller: ControllerId, handle: TimerHandle, after: Duration) {
        self.cancel(controller, handle);
        self.seq += 1;
        let slot = (self.now + after, self.seq);
        self.by_deadline.insert(slot, (controller, handle));
        self.by_key.insert((controller, handle), slot);
    }

    /// Cancels a pending timer. Returns `false` if it was not pending.
    pub fn cancel(&mut self, controller: ControllerId, handle: TimerHandle) -> bool {
        self.by_key
            .remove(&(controller, handle))
            .map(|slot| self.by_deadline.remove(&slot))
            .is_some()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.by_deadline.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Moves the clock to `time` and pops every timer due by then, in order.
    ///
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, time: Duration) -> Vec<TimerKey> {
        self.now = self.now.max(time);

        let mut fired = vec![];
        while let Some((slot, key)) = self.by_deadline.pop_first() {
            if slot.0 > self.now {
                self.by_deadline.insert(slot, key);
                break;
            }
            self.by_key.remove(&key);
            fired.push(key);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ControllerId = ControllerId(1);
    const B: ControllerId = ControllerId(2);

    #[test]
    fn fires_once_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.arm(A, TimerHandle(1), Duration::from_millis(300));
        timers.arm(B, TimerHandle(1), Duration::from_millis(100));

        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(100)));
        let fired = timers.advance_to(Duration::from_millis(500));
        assert_eq!(fired, vec![(B, TimerHandle(1)), (A, TimerHandle(1))]);
        assert!(timers.advance_to(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        timers.arm(A, TimerHandle(1), Duration::from_millis(100));

        assert!(timers.cancel(A, TimerHandle(1)));
        assert!(!timers.cancel(A, TimerHandle(1)));
        assert!(timers.advance_to(Duration::from_secs(1)).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn timer_is_not_due_before_deadline() {
        let mut timers = TimerQueue::new();
        timers.arm(A, TimerHandle(7), Duration::from_millis(3000));

        assert!(timers.advance_to(Duration::from_millis(2999)).is_empty());
        assert!(timers.is_pending(A, TimerHandle(7)));
        assert_eq!(timers.advance_to(Duration::from_millis(3000)), vec![(A, TimerHandle(7))]);
    }
}
