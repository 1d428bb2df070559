//! Engines for the community site's mini-games.
//!
//! Every game is a self-contained state machine that renders into a [`Frame`] and takes
//! [`Input`]. Randomness comes in through [`RandomSource`] and delayed transitions go through a
//! host [`Scheduler`], so the crate has no clock, timer or entropy of its own.

#![no_std]

extern crate alloc;

pub use color_pick::*;
pub use error::*;
pub use memory::*;
pub use number_guess::*;
pub use random::*;
pub use reaction::*;
pub use render::*;
pub use session::*;
pub use tic_tac_toe::*;
pub use timer::*;
pub use types::*;

pub(crate) use timer::TimerSlot;

mod color_pick;
mod error;
mod memory;
mod number_guess;
mod random;
mod reaction;
mod render;
mod session;
mod tic_tac_toe;
mod timer;
mod types;
