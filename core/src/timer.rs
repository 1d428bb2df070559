use alloc::vec::Vec;
use core::time::Duration;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Identifies one scheduled callback. Issued by the [`Scheduler`] and handed back to the engine
/// when the delay elapses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Host-provided delayed callbacks.
///
/// `schedule` returns a token unique for the lifetime of the scheduler, so any number of engines
/// can share one. When the delay elapses the host passes the token back to the engine's
/// `on_timer`. A cancelled token must not be delivered, but engines tolerate it if it is.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken;
    fn cancel(&mut self, token: TimerToken);
}

/// At most one outstanding timer per engine.
///
/// Arming cancels whatever was pending, and only the outstanding token is accepted when it fires.
/// Tokens come from the scheduler, so tokens from before a restart stay stale forever.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TimerSlot {
    pending: Option<TimerToken>,
}

impl TimerSlot {
    pub(crate) fn arm<S: Scheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        delay: Duration,
    ) -> TimerToken {
        self.disarm(scheduler);
        let token = scheduler.schedule(delay);
        self.pending = Some(token);
        token
    }

    pub(crate) fn disarm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
    }

    /// Consumes `token` if it is the outstanding one.
    pub(crate) fn fire(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            log::debug!("ignoring stale timer {:?}", token);
            false
        }
    }
}

/// Deterministic scheduler driven by a virtual clock.
#[derive(Clone, Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next: u64,
    deadlines: HashMap<TimerToken, Duration>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.deadlines.contains_key(&token)
    }

    pub fn deadline(&self, token: TimerToken) -> Option<Duration> {
        self.deadlines.get(&token).map(|&at| at - self.now)
    }

    /// Moves the clock forward and returns the tokens that came due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerToken> {
        self.now += by;
        let now = self.now;
        let mut due: Vec<(Duration, TimerToken)> = self
            .deadlines
            .iter()
            .filter(|&(_, &at)| at <= now)
            .map(|(&token, &at)| (at, token))
            .collect();
        due.sort_unstable();
        for (_, token) in &due {
            self.deadlines.remove(token);
        }
        due.into_iter().map(|(_, token)| token).collect()
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next);
        self.next += 1;
        self.deadlines.insert(token, self.now + delay);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.deadlines.remove(&token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn arming_twice_cancels_first_token() {
        let mut scheduler = VirtualScheduler::new();
        let mut slot = TimerSlot::default();

        let first = slot.arm(&mut scheduler, 10 * MS);
        let second = slot.arm(&mut scheduler, 20 * MS);

        assert!(!scheduler.is_scheduled(first));
        assert!(scheduler.is_scheduled(second));
        assert_eq!(scheduler.pending_count(), 1);
        assert!(!slot.fire(first));
        assert!(slot.fire(second));
        assert_eq!(slot, TimerSlot::default());
    }

    #[test]
    fn advance_returns_due_tokens_in_order() {
        let mut scheduler = VirtualScheduler::new();
        let a = scheduler.schedule(30 * MS);
        let b = scheduler.schedule(10 * MS);
        let c = scheduler.schedule(50 * MS);

        assert!(scheduler.advance(5 * MS).is_empty());
        assert_eq!(scheduler.advance(25 * MS), alloc::vec![b, a]);
        assert_eq!(scheduler.deadline(c), Some(20 * MS));
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn slots_sharing_a_scheduler_get_distinct_tokens() {
        let mut scheduler = VirtualScheduler::new();
        let mut first = TimerSlot::default();
        let mut second = TimerSlot::default();

        let a = first.arm(&mut scheduler, 10 * MS);
        let b = second.arm(&mut scheduler, 20 * MS);
        assert_ne!(a, b);
        assert_eq!(scheduler.pending_count(), 2);

        assert_eq!(scheduler.advance(10 * MS), alloc::vec![a]);
        assert!(!second.fire(a));
        assert!(first.fire(a));
        assert_eq!(scheduler.advance(10 * MS), alloc::vec![b]);
        assert!(second.fire(b));
    }

    #[test]
    fn disarm_then_fire_is_ignored() {
        let mut scheduler = VirtualScheduler::new();
        let mut slot = TimerSlot::default();

        let token = slot.arm(&mut scheduler, MS);
        slot.disarm(&mut scheduler);

        assert_eq!(scheduler.pending_count(), 0);
        assert!(!slot.fire(token));
    }
}
