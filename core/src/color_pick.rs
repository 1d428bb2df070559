use alloc::format;
use alloc::string::String;
use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    pub const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    pub const fn name(self) -> &'static str {
        use Color::*;
        match self {
            Red => "Red",
            Orange => "Orange",
            Yellow => "Yellow",
            Green => "Green",
            Blue => "Blue",
            Purple => "Purple",
        }
    }

    pub const fn css(self) -> &'static str {
        use Color::*;
        match self {
            Red => "#e74c3c",
            Orange => "#e67e22",
            Yellow => "#f1c40f",
            Green => "#2ecc71",
            Blue => "#3498db",
            Purple => "#9b59b6",
        }
    }
}

/// Outcome of a [`ColorPick::select`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub color: Color,
    pub target: Color,
    pub elapsed: Duration,
}

impl Pick {
    pub fn is_correct(&self) -> bool {
        self.color == self.target
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_correct() { "Correct" } else { "Wrong" };
        write!(f, "{}! {} ms", verdict, self.elapsed.as_millis())
    }
}

/// Running totals across rounds, cleared only by [`ColorPick::reset_stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickStats {
    pub rounds: u32,
    pub correct: u32,
    pub total: Duration,
}

impl PickStats {
    pub fn average(&self) -> Option<Duration> {
        (self.rounds > 0).then(|| self.total / self.rounds)
    }

    fn record(&mut self, pick: &Pick) {
        self.rounds = self.rounds.saturating_add(1);
        self.total = self.total.saturating_add(pick.elapsed);
        if pick.is_correct() {
            self.correct = self.correct.saturating_add(1);
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColorPick {
    rng: RandomSource,
    target: Color,
    arrangement: [Color; 6],
    armed_at: Option<Instant>,
    last: Option<Pick>,
    stats: PickStats,
}

impl ColorPick {
    pub fn new(rng: RandomSource) -> Self {
        Self {
            rng,
            target: Color::Red,
            arrangement: Color::PALETTE,
            armed_at: None,
            last: None,
            stats: PickStats::default(),
        }
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn arrangement(&self) -> &[Color; 6] {
        &self.arrangement
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub fn stats(&self) -> PickStats {
        self.stats
    }

    pub fn average(&self) -> Option<Duration> {
        self.stats.average()
    }

    pub fn start_round(&mut self, now: Instant) -> Color {
        self.target = self
            .rng
            .choose(&Color::PALETTE)
            .unwrap_or(Color::Red);
        self.arrangement = Color::PALETTE;
        self.rng.shuffle(&mut self.arrangement);
        self.armed_at = Some(now);
        log::debug!("color pick: target {:?}", self.target);
        self.target
    }

    /// Reports the elapsed time for any pick while armed, matching or not.
    pub fn select(&mut self, color: Color, now: Instant) -> Result<Pick> {
        let Some(armed_at) = self.armed_at.take() else {
            return Err(GameError::NotArmed);
        };
        let pick = Pick {
            color,
            target: self.target,
            elapsed: now.saturating_duration_since(armed_at),
        };
        self.stats.record(&pick);
        self.last = Some(pick);
        log::debug!("color pick: {:?}", pick);
        Ok(pick)
    }

    pub fn reset_stats(&mut self) {
        self.stats = PickStats::default();
    }

    pub fn restart(&mut self) {
        self.armed_at = None;
        self.last = None;
        self.reset_stats();
    }

    pub fn render(&self) -> Frame {
        let armed = self.is_armed();
        let cells = self
            .arrangement
            .iter()
            .map(|&color| {
                let style = if armed {
                    CellStyle::ENABLED
                } else {
                    CellStyle::empty()
                };
                CellFrame::new(color.name(), style).with_swatch(color.css())
            })
            .collect();

        let headline = match (armed, self.last) {
            (true, _) => format!("Pick {}!", self.target.name()),
            (false, Some(pick)) => format!("{}", pick),
            (false, None) => String::from("Press start and pick the named color"),
        };

        let frame = Frame::new(GameKind::ColorPick, headline)
            .with_grid(3, cells)
            .with_primary(if armed { "Skip" } else { "Start" }, true);
        match self.stats.average() {
            Some(average) => frame.with_detail(format!(
                "Average: {} ms over {} rounds, {} correct",
                average.as_millis(),
                self.stats.rounds,
                self.stats.correct
            )),
            None => frame,
        }
    }
}
