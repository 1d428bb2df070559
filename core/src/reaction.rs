use alloc::format;
use alloc::string::String;
use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl ReactionConfig {
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay: min_delay.min(max_delay),
            max_delay: max_delay.max(min_delay),
        }
    }
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(1100),
            max_delay: Duration::from_millis(2200),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReactionState {
    Idle,
    /// Waiting for the random delay to elapse.
    Pending,
    /// Signal is showing since the given instant.
    Live(Instant),
}

/// Result of the most recent round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionReport {
    FalseStart,
    Reaction(Duration),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionEvent {
    Armed,
    Reacted(Duration),
}

impl fmt::Display for ReactionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Armed => f.write_str("Wait for green..."),
            Self::Reacted(latency) => write!(f, "{} ms", latency.as_millis()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Reaction {
    config: ReactionConfig,
    rng: RandomSource,
    state: ReactionState,
    timer: TimerSlot,
    last: Option<ReactionReport>,
    best: Option<Duration>,
}

impl Reaction {
    pub fn new(config: ReactionConfig, rng: RandomSource) -> Self {
        Self {
            config,
            rng,
            state: ReactionState::Idle,
            timer: TimerSlot::default(),
            last: None,
            best: None,
        }
    }

    pub fn state(&self) -> ReactionState {
        self.state
    }

    pub fn last_report(&self) -> Option<ReactionReport> {
        self.last
    }

    pub fn best(&self) -> Option<Duration> {
        self.best
    }

    /// Arms a new round. Any round already in flight is abandoned and its timer cancelled.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> ReactionEvent {
        let delay = self
            .rng
            .duration_between(self.config.min_delay, self.config.max_delay);
        self.timer.arm(scheduler, delay);
        self.state = ReactionState::Pending;
        log::debug!("reaction: armed, signal in {:?}", delay);
        ReactionEvent::Armed
    }

    /// Switches to the live signal when the outstanding timer fires.
    pub fn on_timer(&mut self, token: TimerToken, now: Instant) -> bool {
        if !self.timer.fire(token) {
            return false;
        }
        if self.state != ReactionState::Pending {
            return false;
        }
        self.state = ReactionState::Live(now);
        true
    }

    pub fn respond<S: Scheduler + ?Sized>(
        &mut self,
        now: Instant,
        scheduler: &mut S,
    ) -> Result<Duration> {
        match self.state {
            ReactionState::Idle => Err(GameError::NotArmed),
            ReactionState::Pending => {
                self.timer.disarm(scheduler);
                self.state = ReactionState::Idle;
                self.last = Some(ReactionReport::FalseStart);
                log::debug!("reaction: false start");
                Err(GameError::FalseStart)
            }
            ReactionState::Live(since) => {
                let latency = now.saturating_duration_since(since);
                self.state = ReactionState::Idle;
                self.last = Some(ReactionReport::Reaction(latency));
                self.best = Some(self.best.map_or(latency, |best| best.min(latency)));
                log::debug!("reaction: {:?}", latency);
                Ok(latency)
            }
        }
    }

    pub fn restart<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.timer.disarm(scheduler);
        self.state = ReactionState::Idle;
        self.last = None;
        self.best = None;
    }

    pub fn render(&self) -> Frame {
        let (headline, style, action) = match self.state {
            ReactionState::Idle => (
                match self.last {
                    None => String::from("Click start, then hit the panel when it turns green"),
                    Some(ReactionReport::FalseStart) => String::from("Too soon! Try again"),
                    Some(ReactionReport::Reaction(latency)) => {
                        format!("{} ms", latency.as_millis())
                    }
                },
                CellStyle::empty(),
                "Start",
            ),
            ReactionState::Pending => (
                String::from("Wait for green..."),
                CellStyle::ENABLED | CellStyle::WAITING,
                "Restart",
            ),
            ReactionState::Live(_) => (
                String::from("Click!"),
                CellStyle::ENABLED | CellStyle::LIVE,
                "Restart",
            ),
        };

        let frame = Frame::new(GameKind::Reaction, headline)
            .with_grid(1, alloc::vec![CellFrame::new("", style)])
            .with_primary(action, true);
        match self.best {
            Some(best) => frame.with_detail(format!("Best: {} ms", best.as_millis())),
            None => frame,
        }
    }
}
