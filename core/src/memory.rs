use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of distinct icons available for pairs.
pub const ICON_COUNT: u8 = 8;

/// Glyphs shown on face-up cards, indexed by [`IconId`].
pub const ICON_GLYPHS: [&str; ICON_COUNT as usize] =
    ["🎮", "🐉", "⚔️", "🏆", "💎", "🚀", "👾", "🎲"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IconId(pub u8);

impl IconId {
    pub fn glyph(self) -> &'static str {
        ICON_GLYPHS[usize::from(self.0 % ICON_COUNT)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub pairs: u8,
    pub mismatch_delay: Duration,
}

impl MemoryConfig {
    pub fn new(pairs: u8, mismatch_delay: Duration) -> Self {
        Self {
            pairs: pairs.clamp(1, ICON_COUNT),
            mismatch_delay,
        }
    }

    pub const fn card_count(&self) -> usize {
        self.pairs as usize * 2
    }

    /// Square-ish grid width for the deck.
    pub fn columns(&self) -> u8 {
        match self.card_count() {
            0..=4 => self.card_count() as u8,
            5..=9 => 3,
            _ => 4,
        }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            pairs: ICON_COUNT,
            mismatch_delay: Duration::from_millis(900),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    FaceDown,
    Flipped,
    Matched,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub icon: IconId,
    pub state: CardState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    NoChange,
    /// First card of an attempt is face up.
    Flipped,
    /// Second card matched the first.
    Matched,
    /// Second card differs; both turn back after the display delay.
    Mismatched,
    /// Last pair matched.
    Won,
}

impl fmt::Display for FlipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoChange => "",
            Self::Flipped => "Pick another card",
            Self::Matched => "It's a match!",
            Self::Mismatched => "No match",
            Self::Won => "All pairs found!",
        })
    }
}

#[derive(Clone, Debug)]
pub struct Memory {
    config: MemoryConfig,
    rng: RandomSource,
    cards: Vec<Card>,
    /// Face-up cards of the current attempt, in flip order.
    open: Option<(usize, Option<usize>)>,
    moves: u32,
    matched_pairs: u8,
    timer: TimerSlot,
}

impl Memory {
    pub fn new(config: MemoryConfig, rng: RandomSource) -> Self {
        let mut game = Self {
            config,
            rng,
            cards: Vec::with_capacity(config.card_count()),
            open: None,
            moves: 0,
            matched_pairs: 0,
            timer: TimerSlot::default(),
        };
        game.deal();
        game
    }

    fn deal(&mut self) {
        self.cards.clear();
        for icon in 0..self.config.pairs {
            let card = Card {
                icon: IconId(icon),
                state: CardState::FaceDown,
            };
            self.cards.extend([card, card]);
        }
        self.rng.shuffle(&mut self.cards);
    }

    pub fn config(&self) -> MemoryConfig {
        self.config
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Two mismatched cards are face up waiting for the display delay.
    pub fn is_locked(&self) -> bool {
        matches!(self.open, Some((_, Some(_))))
    }

    pub fn status(&self) -> GameStatus {
        if self.matched_pairs == self.config.pairs {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    pub fn flip<S: Scheduler + ?Sized>(
        &mut self,
        index: usize,
        scheduler: &mut S,
    ) -> Result<FlipOutcome> {
        let Some(card) = self.cards.get(index).copied() else {
            return Err(GameError::OutOfRange(index.min(usize::from(u8::MAX)) as u8));
        };
        if self.status().is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if self.is_locked() {
            return Err(GameError::InputLocked);
        }
        if card.state != CardState::FaceDown {
            return Ok(FlipOutcome::NoChange);
        }

        self.cards[index].state = CardState::Flipped;

        let Some((first, None)) = self.open else {
            self.open = Some((index, None));
            log::trace!("memory: first card {}", index);
            return Ok(FlipOutcome::Flipped);
        };

        self.moves = self.moves.saturating_add(1);
        if self.cards[first].icon == card.icon {
            self.cards[first].state = CardState::Matched;
            self.cards[index].state = CardState::Matched;
            self.open = None;
            self.matched_pairs += 1;
            log::debug!("memory: matched {} and {} after {} moves", first, index, self.moves);
            Ok(if self.status() == GameStatus::Won {
                FlipOutcome::Won
            } else {
                FlipOutcome::Matched
            })
        } else {
            self.open = Some((first, Some(index)));
            self.timer.arm(scheduler, self.config.mismatch_delay);
            log::debug!("memory: {} and {} differ", first, index);
            Ok(FlipOutcome::Mismatched)
        }
    }

    /// Turns a mismatched pair back once the display delay elapses.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if !self.timer.fire(token) {
            return false;
        }
        let Some((first, Some(second))) = self.open.take() else {
            return false;
        };
        self.cards[first].state = CardState::FaceDown;
        self.cards[second].state = CardState::FaceDown;
        true
    }

    pub fn restart<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.timer.disarm(scheduler);
        self.open = None;
        self.moves = 0;
        self.matched_pairs = 0;
        self.deal();
    }

    pub fn render(&self) -> Frame {
        let locked = self.is_locked();
        let cells = self
            .cards
            .iter()
            .map(|card| match card.state {
                CardState::FaceDown if locked => CellFrame::new("", CellStyle::empty()),
                CardState::FaceDown => CellFrame::new("", CellStyle::ENABLED),
                CardState::Flipped => CellFrame::new(card.icon.glyph(), CellStyle::FLIPPED),
                CardState::Matched => {
                    CellFrame::new(card.icon.glyph(), CellStyle::FLIPPED | CellStyle::MATCHED)
                }
            })
            .collect();

        let headline = match self.status() {
            GameStatus::Won => format!("Cleared in {} moves!", self.moves),
            _ => format!("Moves: {}", self.moves),
        };

        Frame::new(GameKind::Memory, headline)
            .with_detail(format!(
                "Pairs: {}/{}",
                self.matched_pairs, self.config.pairs
            ))
            .with_grid(self.config.columns(), cells)
            .with_primary("Shuffle", true)
    }
}
