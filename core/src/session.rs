use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Raw player input as delivered by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// Typed text submitted with the form.
    Submit(String),
    /// Click on a grid cell.
    Cell(u8),
    /// Click on a colour swatch.
    Pick(Color),
    /// Primary action; also what the Enter key maps to.
    Confirm,
    ResetStats,
}

/// Typed result of an accepted input. `Display` gives the message shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Guess(GuessOutcome),
    Turn(TurnReport),
    Flip(FlipOutcome),
    Reaction(ReactionEvent),
    Pick(Pick),
    Round(Color),
    StatsReset,
    Restarted,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guess(outcome) => fmt::Display::fmt(outcome, f),
            Self::Turn(report) => fmt::Display::fmt(report, f),
            Self::Flip(outcome) => fmt::Display::fmt(outcome, f),
            Self::Reaction(event) => fmt::Display::fmt(event, f),
            Self::Pick(pick) => fmt::Display::fmt(pick, f),
            Self::Round(target) => write!(f, "Pick {}!", target.name()),
            Self::StatsReset => f.write_str("Stats cleared"),
            Self::Restarted => f.write_str("New game"),
        }
    }
}

/// Tunables for every game, with the defaults the site ships.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcadeConfig {
    pub guess: GuessConfig,
    pub difficulty: Difficulty,
    pub memory: MemoryConfig,
    pub reaction: ReactionConfig,
}

/// One live game. Restart replaces the state in place so pending timer tokens go stale.
#[derive(Clone, Debug)]
pub enum GameSession {
    NumberGuess(NumberGuess),
    TicTacToe(TicTacToe),
    Memory(Memory),
    Reaction(Reaction),
    ColorPick(ColorPick),
}

impl GameSession {
    pub fn new(kind: GameKind, config: &ArcadeConfig, rng: RandomSource) -> Self {
        log::debug!("new {:?} session (seed: {:?})", kind, rng.seed());
        match kind {
            GameKind::NumberGuess => Self::NumberGuess(NumberGuess::new(config.guess, rng)),
            GameKind::TicTacToe => Self::TicTacToe(TicTacToe::new(config.difficulty, rng)),
            GameKind::Memory => Self::Memory(Memory::new(config.memory, rng)),
            GameKind::Reaction => Self::Reaction(Reaction::new(config.reaction, rng)),
            GameKind::ColorPick => Self::ColorPick(ColorPick::new(rng)),
        }
    }

    /// Builds a session whose randomness derives from a page-wide seed.
    pub fn seeded(kind: GameKind, config: &ArcadeConfig, seed: u64) -> Self {
        Self::new(kind, config, RandomSource::seeded(seed ^ kind.salt()))
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Self::NumberGuess(_) => GameKind::NumberGuess,
            Self::TicTacToe(_) => GameKind::TicTacToe,
            Self::Memory(_) => GameKind::Memory,
            Self::Reaction(_) => GameKind::Reaction,
            Self::ColorPick(_) => GameKind::ColorPick,
        }
    }

    pub fn status(&self) -> GameStatus {
        match self {
            Self::NumberGuess(game) => game.status(),
            Self::TicTacToe(game) => game.status(),
            Self::Memory(game) => game.status(),
            Self::Reaction(_) | Self::ColorPick(_) => GameStatus::InProgress,
        }
    }

    /// Input produced by clicking grid cell `index` of the rendered frame.
    pub fn cell_input(&self, index: u8) -> Input {
        match self {
            Self::ColorPick(game) => game
                .arrangement()
                .get(usize::from(index))
                .map_or(Input::Cell(index), |&color| Input::Pick(color)),
            _ => Input::Cell(index),
        }
    }

    pub fn render(&self) -> Frame {
        match self {
            Self::NumberGuess(game) => game.render(),
            Self::TicTacToe(game) => game.render(),
            Self::Memory(game) => game.render(),
            Self::Reaction(game) => game.render(),
            Self::ColorPick(game) => game.render(),
        }
    }

    pub fn handle_input<S: Scheduler + ?Sized>(
        &mut self,
        input: Input,
        now: Instant,
        scheduler: &mut S,
    ) -> Result<Feedback> {
        log::trace!("{:?} input: {:?}", self.kind(), input);

        match (self, input) {
            (Self::NumberGuess(game), Input::Submit(text)) => {
                game.submit_text(&text).map(Feedback::Guess)
            }
            (Self::NumberGuess(game), Input::Confirm) if game.status().is_finished() => {
                game.restart();
                Ok(Feedback::Restarted)
            }

            (Self::TicTacToe(game), Input::Cell(index)) => {
                game.player_move(index).map(Feedback::Turn)
            }
            (Self::TicTacToe(game), Input::Confirm) => {
                game.restart();
                Ok(Feedback::Restarted)
            }

            (Self::Memory(game), Input::Cell(index)) => game
                .flip(usize::from(index), scheduler)
                .map(Feedback::Flip),
            (Self::Memory(game), Input::Confirm) => {
                game.restart(scheduler);
                Ok(Feedback::Restarted)
            }

            (Self::Reaction(game), Input::Cell(_)) => game
                .respond(now, scheduler)
                .map(|latency| Feedback::Reaction(ReactionEvent::Reacted(latency))),
            (Self::Reaction(game), Input::Confirm) => match game.state() {
                ReactionState::Live(_) => game
                    .respond(now, scheduler)
                    .map(|latency| Feedback::Reaction(ReactionEvent::Reacted(latency))),
                _ => Ok(Feedback::Reaction(game.start(scheduler))),
            },

            (Self::ColorPick(game), Input::Pick(color)) => {
                game.select(color, now).map(Feedback::Pick)
            }
            (Self::ColorPick(game), Input::Confirm) => {
                Ok(Feedback::Round(game.start_round(now)))
            }
            (Self::ColorPick(game), Input::ResetStats) => {
                game.reset_stats();
                Ok(Feedback::StatsReset)
            }

            (_, _) => Err(GameError::Unsupported),
        }
    }

    /// Delivers a fired timer. Returns whether the session changed.
    pub fn on_timer(&mut self, token: TimerToken, now: Instant) -> bool {
        match self {
            Self::Memory(game) => game.on_timer(token),
            Self::Reaction(game) => game.on_timer(token, now),
            _ => false,
        }
    }

    pub fn restart<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        match self {
            Self::NumberGuess(game) => game.restart(),
            Self::TicTacToe(game) => game.restart(),
            Self::Memory(game) => game.restart(scheduler),
            Self::Reaction(game) => game.restart(scheduler),
            Self::ColorPick(game) => game.restart(),
        }
        log::debug!("{:?} restarted", self.kind());
    }
}
