use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessConfig {
    pub min: i64,
    pub max: i64,
}

impl GuessConfig {
    pub fn new(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub const fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    const fn invalid(&self) -> GameError {
        GameError::InvalidInput {
            min: self.min,
            max: self.max,
        }
    }
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    TooLow,
    TooHigh,
    Correct,
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TooLow => "Too low, go higher",
            Self::TooHigh => "Too high, go lower",
            Self::Correct => "Correct!",
        })
    }
}

#[derive(Clone, Debug)]
pub struct NumberGuess {
    config: GuessConfig,
    rng: RandomSource,
    secret: i64,
    attempts: u32,
    guesses: Vec<i64>,
    last: Option<GuessOutcome>,
    status: GameStatus,
}

impl NumberGuess {
    pub fn new(config: GuessConfig, mut rng: RandomSource) -> Self {
        let secret = rng.range_inclusive(config.min, config.max);
        Self {
            config,
            rng,
            secret,
            attempts: 0,
            guesses: Vec::new(),
            last: None,
            status: GameStatus::InProgress,
        }
    }

    pub fn config(&self) -> GuessConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn guesses(&self) -> &[i64] {
        &self.guesses
    }

    #[cfg(test)]
    pub(crate) fn secret(&self) -> i64 {
        self.secret
    }

    /// Parses typed input; anything but a plain integer is invalid.
    pub fn submit_text(&mut self, input: &str) -> Result<GuessOutcome> {
        let value = input
            .trim()
            .parse::<i64>()
            .map_err(|_| self.config.invalid())?;
        self.submit_guess(value)
    }

    pub fn submit_guess(&mut self, value: i64) -> Result<GuessOutcome> {
        if self.status.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        if !self.config.contains(value) {
            return Err(self.config.invalid());
        }

        self.attempts = self.attempts.saturating_add(1);
        self.guesses.push(value);

        let outcome = match value.cmp(&self.secret) {
            core::cmp::Ordering::Less => GuessOutcome::TooLow,
            core::cmp::Ordering::Greater => GuessOutcome::TooHigh,
            core::cmp::Ordering::Equal => {
                self.status = GameStatus::Won;
                GuessOutcome::Correct
            }
        };
        log::debug!("guess #{}: {} -> {:?}", self.attempts, value, outcome);
        self.last = Some(outcome);
        Ok(outcome)
    }

    pub fn restart(&mut self) {
        self.secret = self.rng.range_inclusive(self.config.min, self.config.max);
        self.attempts = 0;
        self.guesses.clear();
        self.last = None;
        self.status = GameStatus::InProgress;
    }

    pub fn render(&self) -> Frame {
        let GuessConfig { min, max } = self.config;
        let headline = match (self.status, self.last) {
            (GameStatus::Won, _) => format!(
                "You got it in {} {}!",
                self.attempts,
                if self.attempts == 1 { "try" } else { "tries" }
            ),
            (_, Some(outcome)) => format!("{}", outcome),
            (_, None) => format!("I'm thinking of a number between {} and {}", min, max),
        };

        let mut frame = Frame::new(GameKind::NumberGuess, headline);
        if !self.guesses.is_empty() {
            let history = self
                .guesses
                .iter()
                .map(|guess| format!("{}", guess))
                .collect::<Vec<_>>()
                .join(", ");
            frame = frame.with_detail(format!("Attempts: {} ({})", self.attempts, history));
        }

        if self.status.is_finished() {
            frame.with_primary("Play again", true)
        } else {
            frame
                .with_text_entry("Your guess")
                .with_primary("Guess", true)
        }
    }
}
