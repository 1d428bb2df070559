use std::collections::HashMap;
use std::time::Duration;

use arcade_core::{Scheduler, TimerToken};
use gloo::timers::callback::Timeout;
use yew::Callback;

/// Maps engine timer tokens onto browser timeouts that report back through `on_fire`.
///
/// Dropping a [`Timeout`] cancels it, so cancelling a token is just removing it.
pub(crate) struct TimeoutScheduler {
    on_fire: Callback<TimerToken>,
    next: u64,
    timeouts: HashMap<TimerToken, Timeout>,
}

impl TimeoutScheduler {
    pub(crate) fn new(on_fire: Callback<TimerToken>) -> Self {
        Self {
            on_fire,
            next: 0,
            timeouts: HashMap::new(),
        }
    }

    /// Drops bookkeeping for a timeout that already ran.
    pub(crate) fn forget(&mut self, token: TimerToken) {
        self.timeouts.remove(&token);
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken::new(self.next);
        self.next += 1;
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let on_fire = self.on_fire.clone();
        let timeout = Timeout::new(millis, move || on_fire.emit(token));
        log::trace!("timer {} in {} ms", token.id(), millis);
        self.timeouts.insert(token, timeout);
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        if self.timeouts.remove(&token).is_some() {
            log::trace!("timer {} cancelled", token.id());
        }
    }
}

impl std::fmt::Debug for TimeoutScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutScheduler")
            .field("pending", &self.timeouts.len())
            .finish()
    }
}
